//! Single entry point UI code talks to.
//!
//! The facade owns the [`GameState`], a [`Transport`] and a [`Notifier`],
//! and funnels every submission through one pipeline: turn check, local
//! validation, encode, send, refresh. UI layers never touch the codec or
//! the transport directly.

use log::debug;
use thiserror::Error;
use tokio::sync::watch;

use cribbage::{
    Card, EncodeError, GameId, GameState, PendingAction, PendingInput, Phase, PlayerId,
    TransportError, ValidationError,
    constants::{MAX_PLAYERS, MIN_PLAYERS},
    encode_action,
    wire::ActionRequest,
};

use crate::notify::{Notifier, Severity};
use crate::transport::Transport;

/// Reasons a facade call did not reach the server, or failed once it did.
///
/// The soft variants (`Busy`, `NotYourTurn`, `WrongPhase`, `Invalid`) are
/// also surfaced through the notifier so a UI can show them without
/// matching on the error.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("another request is still in flight")]
    Busy,
    #[error("no game loaded")]
    NoGame,
    #[error("a game needs {min} to {max} players, got {got}")]
    BadPlayerCount { min: usize, max: usize, got: usize },
    #[error("waiting on other players")]
    NotYourTurn,
    #[error("game is in the {actual} phase")]
    WrongPhase { actual: Phase },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Orchestrates one player's view of one game.
///
/// Not `Clone` and not shared: a UI owns exactly one facade and drives it
/// from one task. Cross-task consumers watch [`GameFacade::subscribe`] for
/// state-change ticks and read the state on their next turn of the event
/// loop.
pub struct GameFacade<T, N> {
    transport: T,
    notifier: N,
    player_id: PlayerId,
    state: GameState,
    /// One request at a time. Submissions while a request is in flight are
    /// rejected outright, never queued.
    in_flight: bool,
    /// Monotonic sequence stamped on each refresh so slow responses can be
    /// recognized as stale.
    refresh_seq: u64,
    changed: watch::Sender<u64>,
}

impl<T: Transport, N: Notifier> GameFacade<T, N> {
    pub fn new(transport: T, notifier: N, player_id: PlayerId) -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            transport,
            notifier,
            player_id,
            state: GameState::new(),
            in_flight: false,
            refresh_seq: 0,
            changed,
        }
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The underlying transport, for lobby calls outside any one game.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A receiver that ticks with a new sequence number every time a
    /// snapshot is installed.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changed.subscribe()
    }

    // === Pending-input accumulation ===
    //
    // Each setter is a no-op when the current phase doesn't accumulate
    // that input; stray UI events outside their phase do nothing.

    pub fn set_shuffle_count(&mut self, count: u32) {
        if let PendingAction::Shuffle(input) = self.state.pending_mut() {
            input.count = count;
        }
    }

    /// Toggle a card in or out of the current selection. Hidden cards and
    /// non-selecting phases are ignored.
    pub fn toggle_card(&mut self, card: Card) {
        if let Some(selection) = self.state.pending_mut().selection_mut() {
            selection.toggle(card);
        }
    }

    pub fn clear_selection(&mut self) {
        if let Some(selection) = self.state.pending_mut().selection_mut() {
            selection.clear();
        }
    }

    pub fn set_cut_fraction(&mut self, fraction: f64) {
        if let PendingAction::CutAt(input) = self.state.pending_mut() {
            input.fraction = fraction;
        }
    }

    pub fn set_points(&mut self, points: i32) {
        if let PendingAction::Score(input) = self.state.pending_mut() {
            input.points = points;
        }
    }

    /// Whether a submit control should be enabled right now: no request in
    /// flight, this player owes an action, and the accumulated input
    /// passes the phase's rules.
    pub fn can_submit(&self) -> bool {
        !self.in_flight
            && self.state.is_blocking(&self.player_id)
            && self.state.validate_pending().is_ok()
    }

    // === Submissions ===

    pub async fn submit_deal(&mut self) -> Result<(), ClientError> {
        self.submit(&[Phase::Deal]).await
    }

    pub async fn submit_crib(&mut self) -> Result<(), ClientError> {
        self.submit(&[Phase::BuildCrib]).await
    }

    pub async fn submit_cut(&mut self) -> Result<(), ClientError> {
        self.submit(&[Phase::Cut]).await
    }

    pub async fn submit_peg(&mut self) -> Result<(), ClientError> {
        self.submit(&[Phase::Pegging]).await
    }

    /// Submit a claimed score. Valid in both counting phases; the opcode
    /// follows whichever one the snapshot reports.
    pub async fn submit_count(&mut self) -> Result<(), ClientError> {
        self.submit(&[Phase::Counting, Phase::CribCounting]).await
    }

    async fn submit(&mut self, phases: &[Phase]) -> Result<(), ClientError> {
        if self.in_flight {
            return Err(ClientError::Busy);
        }
        let Some(game_id) = self.state.game_id() else {
            return Err(ClientError::NoGame);
        };
        let phase = self.state.phase();
        if !phases.contains(&phase) {
            self.warn(&format!("game is in the {phase} phase"));
            return Err(ClientError::WrongPhase { actual: phase });
        }
        // Renders race against server-side turn changes, so the blocking
        // set is re-checked here rather than trusted from the last render.
        if !self.state.is_blocking(&self.player_id) {
            self.warn("waiting on other players");
            return Err(ClientError::NotYourTurn);
        }
        if let Err(error) = self.state.validate_pending() {
            self.warn(&error.to_string());
            return Err(error.into());
        }
        let request = encode_action(phase, &self.player_id, game_id, self.state.pending())?;
        self.in_flight = true;
        let result = self.send_and_refresh(game_id, request).await;
        self.in_flight = false;
        result
    }

    async fn send_and_refresh(
        &mut self,
        game_id: GameId,
        request: ActionRequest,
    ) -> Result<(), ClientError> {
        debug!(
            "submitting {} action for game {game_id}",
            self.state.pending().kind()
        );
        match self.transport.send_action(&request).await {
            Ok(()) => {
                self.state.reset_pending();
                self.refresh_locked(game_id).await
            }
            Err(error) => {
                self.report(&error);
                Err(error.into())
            }
        }
    }

    // === Loading and refreshing ===

    /// Fetch the latest snapshot for the loaded game.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        if self.in_flight {
            return Err(ClientError::Busy);
        }
        let Some(game_id) = self.state.game_id() else {
            return Err(ClientError::NoGame);
        };
        self.in_flight = true;
        let result = self.refresh_locked(game_id).await;
        self.in_flight = false;
        result
    }

    /// Load a game by id. Installing its snapshot resets the pending
    /// input whenever the game differs from the one already loaded.
    pub async fn load_game(&mut self, game_id: GameId) -> Result<(), ClientError> {
        if self.in_flight {
            return Err(ClientError::Busy);
        }
        self.in_flight = true;
        let result = self.refresh_locked(game_id).await;
        self.in_flight = false;
        result
    }

    /// Create a game for the given players and load it.
    pub async fn create_game(&mut self, player_ids: &[PlayerId]) -> Result<GameId, ClientError> {
        if self.in_flight {
            return Err(ClientError::Busy);
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_ids.len()) {
            return Err(ClientError::BadPlayerCount {
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
                got: player_ids.len(),
            });
        }
        self.in_flight = true;
        let result = self.create_game_locked(player_ids).await;
        self.in_flight = false;
        result
    }

    async fn create_game_locked(
        &mut self,
        player_ids: &[PlayerId],
    ) -> Result<GameId, ClientError> {
        let game_id = match self.transport.create_game(player_ids).await {
            Ok(id) => id,
            Err(error) => {
                self.report(&error);
                return Err(error.into());
            }
        };
        self.refresh_locked(game_id).await?;
        Ok(game_id)
    }

    async fn refresh_locked(&mut self, game_id: GameId) -> Result<(), ClientError> {
        self.refresh_seq += 1;
        let seq = self.refresh_seq;
        match self.transport.fetch_game(game_id, &self.player_id).await {
            Ok(snapshot) => {
                if self.state.install(snapshot, seq) {
                    self.changed.send_replace(seq);
                }
                Ok(())
            }
            Err(error) => {
                // The last-known snapshot stays in place.
                self.report(&error);
                Err(error.into())
            }
        }
    }

    fn warn(&self, message: &str) {
        self.notifier.notify(message, Severity::Warn);
    }

    fn report(&self, error: &TransportError) {
        self.notifier.notify(&error.to_string(), Severity::Error);
    }
}
