//! # Cribbage
//!
//! Core library for a multiplayer cribbage client. The authoritative
//! rules engine (dealing, pegging legality, scoring) lives in an external
//! server; this crate models the client's side of the conversation:
//!
//! - **Card model**: immutable card values, the hidden-card sentinel for
//!   opponents' concealed cards, and the `{s, v}` wire encoding.
//! - **Phase state machine**: a reactive projection holding the
//!   last-known authoritative [`GameSnapshot`], blocking/turn eligibility,
//!   and opponent seat resolution. Transitions arrive from the server;
//!   the only client-side transition logic is resetting pending input.
//! - **Selection tracker**: the cards a player has tentatively chosen
//!   before submitting.
//! - **Action codec**: maps `(phase, accumulated input)` to the compact
//!   `{pID, gID, o, a}` wire request.
//!
//! ## Example
//!
//! ```
//! use cribbage::{Card, GameState, Suit};
//!
//! let mut state = GameState::new();
//! assert!(state.snapshot().is_none());
//! let five = Card::Known(5, Suit::Heart);
//! assert_eq!(five.name(), "5H");
//! ```

/// Client-side game model: cards, snapshots, phases, pending input.
pub mod game;
pub use game::{
    constants,
    entities::{
        self, Blocker, BlockingSet, Card, GameId, GameSnapshot, OpponentSeat, PegPlay, Phase,
        Player, PlayerId, Suit, Team, Value,
    },
    selection::Selection,
    state::{GameState, PendingAction, PendingInput, ValidationError},
};

/// Wire formats and error taxonomy.
pub mod net;
pub use net::{
    errors::{DecodeError, EncodeError, TransportError},
    messages,
    wire::{self, ActionPayload, ActionRequest, WireCard, encode_action},
};
