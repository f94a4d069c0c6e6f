//! HTTP transport for the cribbage server.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

use cribbage::{
    GameId, GameSnapshot, PlayerId, TransportError,
    messages::{ActiveGamesResponse, CreateGameRequest, CreateGameResponse, CreatePlayerRequest,
        PlayerRecord},
    wire::ActionRequest,
};

use crate::transport::Transport;

/// HTTP client for communicating with the cribbage server.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with reqwest's default timeouts.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport with a per-request timeout.
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(request_error)?;
        Ok(Self { base_url, client })
    }

    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("failed to read error response: {e}"));
        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, TransportError> {
        let response = self.client.get(url).send().await.map_err(request_error)?;
        Self::checked(response)
            .await?
            .json()
            .await
            .map_err(decode_error)
    }

    async fn post_json<B, T>(&self, url: String, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(request_error)?;
        Self::checked(response)
            .await?
            .json()
            .await
            .map_err(decode_error)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_game(
        &self,
        game_id: GameId,
        player_id: &PlayerId,
    ) -> Result<GameSnapshot, TransportError> {
        self.get_json(format!(
            "{}/game/{game_id}?player={player_id}",
            self.base_url
        ))
        .await
    }

    async fn send_action(&self, request: &ActionRequest) -> Result<(), TransportError> {
        let response = self
            .client
            .post(format!("{}/action", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(request_error)?;
        // The ack carries no body the client needs.
        Self::checked(response).await?;
        Ok(())
    }

    async fn create_game(&self, player_ids: &[PlayerId]) -> Result<GameId, TransportError> {
        let request = CreateGameRequest {
            player_ids: player_ids.to_vec(),
        };
        let response: CreateGameResponse = self
            .post_json(format!("{}/create/game", self.base_url), &request)
            .await?;
        Ok(response.id)
    }

    async fn fetch_player(&self, player_id: &PlayerId) -> Result<PlayerRecord, TransportError> {
        self.get_json(format!("{}/player/{player_id}", self.base_url))
            .await
    }

    async fn create_player(&self, name: &str) -> Result<PlayerRecord, TransportError> {
        let request = CreatePlayerRequest {
            name: name.to_string(),
        };
        self.post_json(format!("{}/create/player", self.base_url), &request)
            .await
    }

    async fn active_games(
        &self,
        player_id: &PlayerId,
    ) -> Result<ActiveGamesResponse, TransportError> {
        self.get_json(format!(
            "{}/games/active?playerID={player_id}",
            self.base_url
        ))
        .await
    }
}

fn request_error(error: reqwest::Error) -> TransportError {
    TransportError::Request(error.to_string())
}

fn decode_error(error: reqwest::Error) -> TransportError {
    TransportError::Decode(error.to_string())
}
