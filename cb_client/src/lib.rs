//! A cribbage client library and CLI.
//!
//! The [`facade::GameFacade`] is the surface a UI drives: it accumulates
//! per-phase input, validates it locally, encodes it for the wire and
//! keeps a [`cribbage::GameState`] in sync with the server.

pub mod api_client;
pub mod commands;
pub mod config;
pub mod facade;
pub mod notify;
pub mod transport;
