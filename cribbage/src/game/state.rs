//! Client-side phase state container and per-phase pending input.
//!
//! Phase transitions are never computed here; they arrive embedded in each
//! refreshed [`GameSnapshot`]. The container is a reactive projection whose
//! only transition logic is resetting the pending input when the phase or
//! game id changes.

use enum_dispatch::enum_dispatch;
use log::debug;
use thiserror::Error;

use super::constants::POINTS_UNSET;
use super::entities::{Card, GameId, GameSnapshot, OpponentSeat, Phase, PlayerId};
use super::selection::Selection;

/// Local phase-rule violations that must block submission before any
/// network call is made.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("throw exactly {expected} card(s) to the crib, {got} selected")]
    WrongCribCount { expected: usize, got: usize },
    #[error("play one card or say go, {got} selected")]
    AmbiguousPegPlay { got: usize },
    #[error("cut fraction {fraction} must be between 0 and 1")]
    CutOutOfRange { fraction: f64 },
    #[error("enter your points before counting")]
    PointsNotSet,
    #[error("nothing to submit in this phase")]
    NothingToSubmit,
}

/// Behavior shared by all per-phase pending inputs.
#[enum_dispatch]
pub trait PendingInput {
    /// Check the accumulated input against this phase's submission rules.
    fn validate(&self, player_count: usize) -> Result<(), ValidationError>;

    /// Short tag for logging and codec mismatch errors.
    fn kind(&self) -> &'static str;
}

/// Shuffle count accumulated during the deal phase.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Shuffle {
    pub count: u32,
}

impl PendingInput for Shuffle {
    fn validate(&self, _player_count: usize) -> Result<(), ValidationError> {
        // Any non-negative count is fine, including zero shuffles.
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "shuffle"
    }
}

/// Cards selected to throw to the crib.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Discard {
    pub selection: Selection,
}

impl PendingInput for Discard {
    fn validate(&self, player_count: usize) -> Result<(), ValidationError> {
        let expected = if player_count <= 2 { 2 } else { 1 };
        let got = self.selection.len();
        if got == expected {
            Ok(())
        } else {
            Err(ValidationError::WrongCribCount { expected, got })
        }
    }

    fn kind(&self) -> &'static str {
        "discard"
    }
}

/// Where to cut the deck, as a fraction of its depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutAt {
    pub fraction: f64,
}

impl Default for CutAt {
    fn default() -> Self {
        Self { fraction: 0.5 }
    }
}

impl PendingInput for CutAt {
    fn validate(&self, _player_count: usize) -> Result<(), ValidationError> {
        if (0.0..=1.0).contains(&self.fraction) {
            Ok(())
        } else {
            Err(ValidationError::CutOutOfRange {
                fraction: self.fraction,
            })
        }
    }

    fn kind(&self) -> &'static str {
        "cut"
    }
}

/// Card selected to peg with. An empty selection means "go".
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Peg {
    pub selection: Selection,
}

impl PendingInput for Peg {
    fn validate(&self, _player_count: usize) -> Result<(), ValidationError> {
        let got = self.selection.len();
        if got <= 1 {
            Ok(())
        } else {
            Err(ValidationError::AmbiguousPegPlay { got })
        }
    }

    fn kind(&self) -> &'static str {
        "peg"
    }
}

/// Points claimed for a counted hand or crib.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Score {
    pub points: i32,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            points: POINTS_UNSET,
        }
    }
}

impl PendingInput for Score {
    fn validate(&self, _player_count: usize) -> Result<(), ValidationError> {
        if self.points >= 0 {
            Ok(())
        } else {
            Err(ValidationError::PointsNotSet)
        }
    }

    fn kind(&self) -> &'static str {
        "count"
    }
}

/// Placeholder before the first snapshot has loaded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Idle;

impl PendingInput for Idle {
    fn validate(&self, _player_count: usize) -> Result<(), ValidationError> {
        Err(ValidationError::NothingToSubmit)
    }

    fn kind(&self) -> &'static str {
        "idle"
    }
}

/// Transient, client-only input accumulated for the current phase. A
/// tagged union keyed by phase so each phase carries exactly the fields it
/// needs. Reset to the phase default whenever the snapshot reports a new
/// phase or game id; consumed and cleared on successful submission.
#[enum_dispatch(PendingInput)]
#[derive(Clone, Debug, PartialEq)]
pub enum PendingAction {
    Shuffle(Shuffle),
    Discard(Discard),
    CutAt(CutAt),
    Peg(Peg),
    Score(Score),
    Idle(Idle),
}

impl Default for PendingAction {
    fn default() -> Self {
        Self::Idle(Idle)
    }
}

impl PendingAction {
    /// The default accumulated input for a phase.
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Deal => Shuffle::default().into(),
            Phase::BuildCrib => Discard::default().into(),
            Phase::Cut => CutAt::default().into(),
            Phase::Pegging => Peg::default().into(),
            Phase::Counting | Phase::CribCounting => Score::default().into(),
            Phase::Unknown => Idle.into(),
        }
    }

    /// The card selection, if this phase accumulates one.
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Self::Discard(input) => Some(&input.selection),
            Self::Peg(input) => Some(&input.selection),
            _ => None,
        }
    }

    pub fn selection_mut(&mut self) -> Option<&mut Selection> {
        match self {
            Self::Discard(input) => Some(&mut input.selection),
            Self::Peg(input) => Some(&mut input.selection),
            _ => None,
        }
    }
}

/// Owner of the last-known authoritative [`GameSnapshot`] and the pending
/// input for the current phase. Explicitly constructed and injected into
/// the facade rather than living in a process-wide singleton, so the codec
/// and state logic test in isolation.
#[derive(Debug, Default)]
pub struct GameState {
    snapshot: Option<GameSnapshot>,
    pending: PendingAction,
    /// Highest refresh sequence installed so far. Responses carrying an
    /// older sequence are stale and dropped.
    seq: u64,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn game_id(&self) -> Option<GameId> {
        self.snapshot.as_ref().map(|s| s.id)
    }

    pub fn phase(&self) -> Phase {
        self.snapshot.as_ref().map_or(Phase::Unknown, |s| s.phase)
    }

    pub fn pending(&self) -> &PendingAction {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut PendingAction {
        &mut self.pending
    }

    /// Install a refreshed snapshot, replacing the old one wholesale.
    ///
    /// `seq` is the monotonic sequence the refresh request was issued
    /// with; a response older than the latest installed one is dropped and
    /// `false` is returned, so a slow refresh can never overwrite newer
    /// state. On accept, the pending input resets to the phase default iff
    /// the phase or game id changed (a no-op reset when nothing changed).
    pub fn install(&mut self, snapshot: GameSnapshot, seq: u64) -> bool {
        if seq < self.seq {
            debug!(
                "dropping stale snapshot for game {} (seq {seq} < {})",
                snapshot.id, self.seq
            );
            return false;
        }
        let changed = match &self.snapshot {
            None => true,
            Some(old) => old.phase != snapshot.phase || old.id != snapshot.id,
        };
        if changed {
            self.pending = PendingAction::for_phase(snapshot.phase);
        }
        self.seq = seq;
        self.snapshot = Some(snapshot);
        true
    }

    /// Reset the pending input to the current phase's default. Invoked
    /// after a successful submission; idempotent.
    pub fn reset_pending(&mut self) {
        self.pending = PendingAction::for_phase(self.phase());
    }

    /// Whether this player currently owes an action. Submission controls
    /// consult this, and the facade re-checks it on submit since renders
    /// race against server state changes.
    pub fn is_blocking(&self, player_id: &PlayerId) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| s.blocking.contains_key(player_id))
    }

    /// Validate the pending input against the current phase's rules.
    pub fn validate_pending(&self) -> Result<(), ValidationError> {
        let player_count = self.snapshot.as_ref().map_or(2, GameSnapshot::player_count);
        self.pending.validate(player_count)
    }

    /// The hand shown at the given seat relative to the viewer. Returns an
    /// empty vec when the seat doesn't exist for the current player count
    /// (or nothing is loaded), and hidden placeholders of dealt-hand size
    /// before cards have been dealt.
    pub fn resolve_opponent_hand(&self, my_id: &PlayerId, seat: OpponentSeat) -> Vec<Card> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };
        let Some(target) = snapshot.seat_of(my_id, seat) else {
            return Vec::new();
        };
        if matches!(snapshot.phase, Phase::Unknown | Phase::Deal) {
            return vec![Card::Hidden; snapshot.dealt_hand_size()];
        }
        snapshot.hands.get(target).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{Blocker, Player, Suit, Team};
    use std::collections::HashMap;

    fn player(id: &str) -> Player {
        Player {
            id: PlayerId::new(id),
            name: id.to_string(),
        }
    }

    fn solo_team(id: &str, color: &str) -> Team {
        Team {
            players: vec![player(id)],
            color: color.to_string(),
            score: 0,
            lag_score: 0,
        }
    }

    fn two_player_snapshot(id: GameId, phase: Phase) -> GameSnapshot {
        GameSnapshot {
            id,
            teams: vec![solo_team("P1", "red"), solo_team("P2", "blue")],
            phase,
            peg_count: 0,
            blocking: HashMap::new(),
            dealer: PlayerId::new("P1"),
            hands: HashMap::new(),
            crib: Vec::new(),
            cut_card: None,
            peg_plays: Vec::new(),
        }
    }

    // === PendingAction tests ===

    #[test]
    fn for_phase_picks_the_matching_input() {
        assert_eq!(
            PendingAction::for_phase(Phase::Deal),
            PendingAction::Shuffle(Shuffle::default())
        );
        assert_eq!(
            PendingAction::for_phase(Phase::BuildCrib),
            PendingAction::Discard(Discard::default())
        );
        assert_eq!(
            PendingAction::for_phase(Phase::Cut),
            PendingAction::CutAt(CutAt::default())
        );
        assert_eq!(
            PendingAction::for_phase(Phase::Pegging),
            PendingAction::Peg(Peg::default())
        );
        assert_eq!(
            PendingAction::for_phase(Phase::Counting),
            PendingAction::Score(Score::default())
        );
        assert_eq!(
            PendingAction::for_phase(Phase::CribCounting),
            PendingAction::Score(Score::default())
        );
        assert_eq!(
            PendingAction::for_phase(Phase::Unknown),
            PendingAction::Idle(Idle)
        );
    }

    #[test]
    fn crib_validation_follows_player_count() {
        let mut input = Discard::default();
        input.selection.toggle(Card::Known(5, Suit::Club));
        assert_eq!(
            input.validate(2),
            Err(ValidationError::WrongCribCount {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(input.validate(3), Ok(()));

        input.selection.toggle(Card::Known(1, Suit::Spade));
        assert_eq!(input.validate(2), Ok(()));
        assert_eq!(
            input.validate(4),
            Err(ValidationError::WrongCribCount {
                expected: 1,
                got: 2
            })
        );
    }

    #[test]
    fn peg_validation_allows_go_or_one_card() {
        let mut input = Peg::default();
        assert_eq!(input.validate(2), Ok(()));
        input.selection.toggle(Card::Known(9, Suit::Diamond));
        assert_eq!(input.validate(2), Ok(()));
        input.selection.toggle(Card::Known(4, Suit::Heart));
        assert_eq!(
            input.validate(2),
            Err(ValidationError::AmbiguousPegPlay { got: 2 })
        );
    }

    #[test]
    fn cut_validation_bounds_fraction() {
        assert_eq!(CutAt { fraction: 0.0 }.validate(2), Ok(()));
        assert_eq!(CutAt { fraction: 1.0 }.validate(2), Ok(()));
        assert!(CutAt { fraction: 1.01 }.validate(2).is_err());
        assert!(CutAt { fraction: -0.5 }.validate(2).is_err());
    }

    #[test]
    fn score_validation_rejects_unset_points() {
        assert_eq!(
            Score::default().validate(2),
            Err(ValidationError::PointsNotSet)
        );
        assert_eq!(Score { points: 0 }.validate(2), Ok(()));
        assert_eq!(Score { points: 29 }.validate(2), Ok(()));
    }

    // === GameState tests ===

    #[test]
    fn install_resets_pending_on_phase_change() {
        let mut state = GameState::new();
        assert!(state.install(two_player_snapshot(7, Phase::Deal), 1));
        if let PendingAction::Shuffle(input) = state.pending_mut() {
            input.count = 5;
        }

        // Same phase and game: accumulated input survives the refresh.
        assert!(state.install(two_player_snapshot(7, Phase::Deal), 2));
        assert_eq!(
            state.pending(),
            &PendingAction::Shuffle(Shuffle { count: 5 })
        );

        // New phase: leftover shuffle count must not leak forward.
        assert!(state.install(two_player_snapshot(7, Phase::BuildCrib), 3));
        assert_eq!(state.pending(), &PendingAction::Discard(Discard::default()));
    }

    #[test]
    fn install_resets_pending_on_game_change() {
        let mut state = GameState::new();
        state.install(two_player_snapshot(7, Phase::Deal), 1);
        if let PendingAction::Shuffle(input) = state.pending_mut() {
            input.count = 3;
        }
        state.install(two_player_snapshot(8, Phase::Deal), 2);
        assert_eq!(state.pending(), &PendingAction::Shuffle(Shuffle::default()));
    }

    #[test]
    fn install_drops_stale_sequences() {
        let mut state = GameState::new();
        let mut newer = two_player_snapshot(7, Phase::Pegging);
        newer.peg_count = 15;
        assert!(state.install(newer.clone(), 5));

        let mut older = two_player_snapshot(7, Phase::Pegging);
        older.peg_count = 4;
        assert!(!state.install(older, 3));
        assert_eq!(state.snapshot(), Some(&newer));
    }

    #[test]
    fn reset_pending_is_idempotent() {
        let mut state = GameState::new();
        state.install(two_player_snapshot(7, Phase::Cut), 1);
        state.reset_pending();
        let first = state.pending().clone();
        state.reset_pending();
        assert_eq!(state.pending(), &first);
    }

    #[test]
    fn is_blocking_tracks_membership() {
        let mut snapshot = two_player_snapshot(7, Phase::Deal);
        snapshot
            .blocking
            .insert(PlayerId::new("P1"), Blocker::MustDeal);
        let mut state = GameState::new();
        state.install(snapshot, 1);

        assert!(state.is_blocking(&PlayerId::new("P1")));
        assert!(!state.is_blocking(&PlayerId::new("P2")));
        assert!(!state.is_blocking(&PlayerId::new("P9")));
    }

    #[test]
    fn is_blocking_is_false_before_first_load() {
        let state = GameState::new();
        assert!(!state.is_blocking(&PlayerId::new("P1")));
    }

    #[test]
    fn opponent_hand_is_placeholder_before_dealing() {
        let mut state = GameState::new();
        state.install(two_player_snapshot(7, Phase::Deal), 1);
        let hand = state.resolve_opponent_hand(&PlayerId::new("P1"), OpponentSeat::Across);
        assert_eq!(hand, vec![Card::Hidden; 6]);
    }

    #[test]
    fn opponent_hand_reads_stored_hand_after_dealing() {
        let mut snapshot = two_player_snapshot(7, Phase::Pegging);
        snapshot
            .hands
            .insert(PlayerId::new("P2"), vec![Card::Hidden; 4]);
        let mut state = GameState::new();
        state.install(snapshot, 1);
        let hand = state.resolve_opponent_hand(&PlayerId::new("P1"), OpponentSeat::Across);
        assert_eq!(hand, vec![Card::Hidden; 4]);
    }

    #[test]
    fn opponent_hand_is_empty_for_missing_seat() {
        let mut state = GameState::new();
        state.install(two_player_snapshot(7, Phase::Pegging), 1);
        let hand = state.resolve_opponent_hand(&PlayerId::new("P1"), OpponentSeat::Left);
        assert!(hand.is_empty());
    }

    #[test]
    fn three_player_across_hand_comes_from_second_other_team() {
        let mut snapshot = GameSnapshot {
            id: 7,
            teams: vec![
                solo_team("P1", "red"),
                solo_team("P2", "blue"),
                solo_team("P3", "green"),
            ],
            phase: Phase::Counting,
            peg_count: 0,
            blocking: HashMap::new(),
            dealer: PlayerId::new("P1"),
            hands: HashMap::new(),
            crib: Vec::new(),
            cut_card: None,
            peg_plays: Vec::new(),
        };
        snapshot
            .hands
            .insert(PlayerId::new("P3"), vec![Card::Known(7, Suit::Spade)]);
        let mut state = GameState::new();
        state.install(snapshot, 1);
        let hand = state.resolve_opponent_hand(&PlayerId::new("P1"), OpponentSeat::Across);
        assert_eq!(hand, vec![Card::Known(7, Suit::Spade)]);
    }

    #[test]
    fn validate_pending_uses_snapshot_player_count() {
        let mut state = GameState::new();
        state.install(two_player_snapshot(7, Phase::BuildCrib), 1);
        state
            .pending_mut()
            .selection_mut()
            .unwrap()
            .toggle(Card::Known(5, Suit::Club));
        assert_eq!(
            state.validate_pending(),
            Err(ValidationError::WrongCribCount {
                expected: 2,
                got: 1
            })
        );
    }
}
