//! Request and response bodies for the server's HTTP endpoints, aside
//! from the action wire format in [`wire`](super::wire).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::entities::{GameId, PlayerId};

/// Body of `POST /create/game`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CreateGameRequest {
    #[serde(rename = "playerIDs")]
    pub player_ids: Vec<PlayerId>,
}

/// Response of `POST /create/game`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CreateGameResponse {
    pub id: GameId,
}

/// Body of `POST /create/player`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CreatePlayerRequest {
    pub name: String,
}

/// A registered player, as returned by `GET /player/{id}` and
/// `POST /create/player`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
}

impl fmt::Display for PlayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// One entry of a player's active-game listing.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGame {
    pub id: GameId,
    pub started: DateTime<Utc>,
    pub opponents: Vec<String>,
}

impl fmt::Display for ActiveGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "game {} vs {} (started {})",
            self.id,
            self.opponents.join(", "),
            self.started.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Response of `GET /games/active?playerID=`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGamesResponse {
    pub player: PlayerRecord,
    pub active_games: Vec<ActiveGame>,
}
