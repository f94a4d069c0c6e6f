//! Wire formats and error taxonomy for talking to the cribbage server.
//!
//! The server speaks JSON over HTTP. This module owns the shapes only;
//! the HTTP transport itself lives in the client crate.

/// Errors for wire encoding, decoding, and transport.
pub mod errors;

/// HTTP request/response bodies outside the action format.
pub mod messages;

/// The compact action wire format and codec.
pub mod wire;
