//! Error types for wire encoding, decoding, and transport.

use thiserror::Error;

use crate::game::entities::Phase;

/// Malformed wire data received from the server. Fatal to the request
/// that carried it (the refresh is aborted, no partial snapshot applied)
/// but never fatal to the process; usually indicates a protocol version
/// mismatch.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    #[error("suit index {0} out of range (expected 0..=3)")]
    SuitOutOfRange(u8),

    #[error("card value {0} out of range (expected 1..=13)")]
    ValueOutOfRange(u8),

    #[error("unrecognized card name {0:?}")]
    BadName(String),
}

/// A phase/input combination the codec cannot express. These indicate a
/// facade bug, not bad user input: the facade must never hand the codec a
/// pending input that doesn't belong to the current phase.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EncodeError {
    #[error("phase {0} has no action opcode")]
    UnencodablePhase(Phase),

    #[error("{pending} input does not belong to the {phase} phase")]
    PhaseMismatch { phase: Phase, pending: &'static str },

    #[error("hidden cards cannot be sent to the server")]
    HiddenCard,

    #[error("pegging submits at most one card, got {0}")]
    TooManyPegCards(usize),
}

/// Network or server failure on a submit or refresh. Recovery is to
/// surface a notification and leave the last-known snapshot in place.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed server response: {0}")]
    Decode(String),
}
