//! The compact action wire format and the codec that produces it.
//!
//! Every submission crosses the wire as `{pID, gID, o, a}` where `o` is a
//! positional opcode (see [`Phase::opcode`]) and `a` is a phase-shaped
//! payload. Field names and opcode numbering are server contracts and must
//! be preserved exactly.

use serde::{Deserialize, Serialize};

use super::errors::EncodeError;
use crate::game::{
    entities::{Card, GameId, Phase, PlayerId},
    state::{PendingAction, PendingInput},
};

/// Compact wire form of a card: `{s: 0..=3, v: 1..=13}` with suit order
/// Spades, Clubs, Diamonds, Hearts.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct WireCard {
    pub s: u8,
    pub v: u8,
}

/// Phase-shaped action payload. Untagged so the JSON carries only the
/// phase's own fields, e.g. `{"ns": 3}` or `{"sg": true}`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionPayload {
    /// Deal: number of shuffles requested.
    Shuffle { ns: u32 },
    /// BuildCrib: cards thrown to the crib, in selection order.
    Discard { cs: Vec<WireCard> },
    /// Cut: where to cut the deck, as a fraction of its depth.
    Cut { p: f64 },
    /// Pegging: no card to play, saying "go".
    SayGo { sg: bool },
    /// Pegging: the single card played.
    PlayCard { c: WireCard },
    /// Counting and CribCounting: points claimed.
    Count { pts: i32 },
}

/// A complete action request as sent to the server.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ActionRequest {
    #[serde(rename = "pID")]
    pub player_id: PlayerId,
    #[serde(rename = "gID")]
    pub game_id: GameId,
    /// Positional opcode for the phase this action belongs to.
    pub o: u8,
    pub a: ActionPayload,
}

/// Encode the accumulated input for a phase into a wire request.
///
/// The codec guarantees syntactic correctness of the encoding only;
/// business legality (is this peg playable, is the count right) is the
/// server's responsibility. Phase rules like card counts are the facade's
/// job before this point, with one structural exception: a pegging
/// selection larger than one card has no wire form at all.
pub fn encode_action(
    phase: Phase,
    player_id: &PlayerId,
    game_id: GameId,
    pending: &PendingAction,
) -> Result<ActionRequest, EncodeError> {
    let o = phase.opcode().ok_or(EncodeError::UnencodablePhase(phase))?;
    let a = match (phase, pending) {
        (Phase::Deal, PendingAction::Shuffle(input)) => ActionPayload::Shuffle { ns: input.count },
        (Phase::BuildCrib, PendingAction::Discard(input)) => ActionPayload::Discard {
            cs: input
                .selection
                .cards()
                .iter()
                .map(|card| wire_card(*card))
                .collect::<Result<_, _>>()?,
        },
        (Phase::Cut, PendingAction::CutAt(input)) => ActionPayload::Cut { p: input.fraction },
        (Phase::Pegging, PendingAction::Peg(input)) => match input.selection.cards() {
            [] => ActionPayload::SayGo { sg: true },
            [card] => ActionPayload::PlayCard {
                c: wire_card(*card)?,
            },
            cards => return Err(EncodeError::TooManyPegCards(cards.len())),
        },
        (Phase::Counting | Phase::CribCounting, PendingAction::Score(input)) => {
            ActionPayload::Count { pts: input.points }
        }
        (phase, pending) => {
            return Err(EncodeError::PhaseMismatch {
                phase,
                pending: pending.kind(),
            });
        }
    };
    Ok(ActionRequest {
        player_id: player_id.clone(),
        game_id,
        o,
        a,
    })
}

fn wire_card(card: Card) -> Result<WireCard, EncodeError> {
    card.to_wire().ok_or(EncodeError::HiddenCard)
}
