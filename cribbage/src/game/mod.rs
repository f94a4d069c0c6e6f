//! Client-side game model: cards, snapshots, phases, and pending input.
//!
//! This module provides the reactive projection of a cribbage game as a
//! client sees it:
//! - Immutable card values and their wire encoding
//! - The authoritative snapshot container and blocking/turn logic
//! - Per-phase pending input with local validation

pub mod constants;
pub mod entities;
pub mod selection;
pub mod state;
