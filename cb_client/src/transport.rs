//! The transport boundary to the cribbage server.
//!
//! The facade is written against this trait so tests can drive it with a
//! mock; the production implementation is
//! [`HttpTransport`](crate::api_client::HttpTransport).

use async_trait::async_trait;

use cribbage::{
    GameId, GameSnapshot, PlayerId, TransportError,
    messages::{ActiveGamesResponse, PlayerRecord},
    wire::ActionRequest,
};

/// Request/response access to the cribbage server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET /game/{id}?player={playerId}`: the authoritative snapshot as
    /// seen by this player.
    async fn fetch_game(
        &self,
        game_id: GameId,
        player_id: &PlayerId,
    ) -> Result<GameSnapshot, TransportError>;

    /// `POST /action`: submit an encoded action.
    async fn send_action(&self, request: &ActionRequest) -> Result<(), TransportError>;

    /// `POST /create/game`: start a game for the given players.
    async fn create_game(&self, player_ids: &[PlayerId]) -> Result<GameId, TransportError>;

    /// `GET /player/{id}`
    async fn fetch_player(&self, player_id: &PlayerId) -> Result<PlayerRecord, TransportError>;

    /// `POST /create/player`
    async fn create_player(&self, name: &str) -> Result<PlayerRecord, TransportError>;

    /// `GET /games/active?playerID=`
    async fn active_games(&self, player_id: &PlayerId)
    -> Result<ActiveGamesResponse, TransportError>;
}
