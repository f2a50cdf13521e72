//! Game and player API handlers.
//!
//! # Examples
//!
//! Create a game and join it:
//! ```bash
//! curl -X POST http://localhost:8080/api/games \
//!   -H "Content-Type: application/json" -d '{"name": "Mesa 1"}'
//!
//! curl -X POST http://localhost:8080/api/games/GAME_ID/players \
//!   -H "Content-Type: application/json" -d '{"name": "Ana"}'
//! ```
//!
//! Play a card:
//! ```bash
//! curl -X POST http://localhost:8080/api/games/GAME_ID/players/PLAYER_ID/play \
//!   -H "Content-Type: application/json" -d '{"card": [7, "oro"]}'
//! ```

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use truco::{Card, Game, GameSummary, Player, PlayerSummary, StoreError};

use super::AppState;
use crate::logging::log_rejected_action;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayCardRequest {
    pub card: Card,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A rejected store action, rendered as `{"error": ...}` with a matching status.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl ApiError {
    /// Record why an action was rejected and wrap the error
    fn rejected(action: &str, game_id: Option<&str>, err: StoreError) -> Self {
        log_rejected_action(action, game_id, &err.to_string());
        ApiError(err)
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::GameFull { .. }
            | StoreError::InsufficientDeck { .. }
            | StoreError::AlreadyPlayed { .. } => StatusCode::CONFLICT,
            StoreError::CardNotInHand { .. } | StoreError::InvalidName { .. } => {
                StatusCode::BAD_REQUEST
            }
            StoreError::Creation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let StoreError::Creation(reason) = &self.0 {
            log::error!("Game creation failed: {}", reason);
        }

        let status = self.status();
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// List all games.
///
/// # Response
///
/// Returns `200 OK` with the game list in creation order:
/// ```json
/// [{"id": "…", "name": "Mesa 1", "player_count": 2, "max_players": 4}]
/// ```
pub async fn list_games(State(state): State<AppState>) -> Json<Vec<GameSummary>> {
    Json(state.store.game_summaries().await)
}

/// Create a game.
///
/// # Errors
///
/// - `400 Bad Request`: Blank name
/// - `500 Internal Server Error`: Deck could not be built
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<Game>), ApiError> {
    let game = state
        .store
        .create_game(&request.name)
        .await
        .map_err(|e| ApiError::rejected("create_game", None, e))?;

    Ok((StatusCode::CREATED, Json(game)))
}

/// Fetch one game's full state.
///
/// # Errors
///
/// - `404 Not Found`: Game doesn't exist
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Game>, ApiError> {
    let game = state
        .store
        .game(&game_id)
        .await
        .map_err(|e| ApiError::rejected("get_game", Some(&game_id), e))?;

    Ok(Json(game))
}

/// Delete a game.
///
/// # Errors
///
/// - `404 Not Found`: Game doesn't exist
pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_game(&game_id)
        .await
        .map_err(|e| ApiError::rejected("delete_game", Some(&game_id), e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the players seated in a game.
///
/// # Errors
///
/// - `404 Not Found`: Game doesn't exist
pub async fn list_players(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Vec<PlayerSummary>>, ApiError> {
    let players = state
        .store
        .player_summaries(&game_id)
        .await
        .map_err(|e| ApiError::rejected("list_players", Some(&game_id), e))?;

    Ok(Json(players))
}

/// Join a game.
///
/// # Errors
///
/// - `400 Bad Request`: Blank name
/// - `404 Not Found`: Game doesn't exist
/// - `409 Conflict`: Game is full, or its deck cannot make another hand
pub async fn create_player(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let player = state
        .store
        .create_player(&game_id, &request.name)
        .await
        .map_err(|e| ApiError::rejected("create_player", Some(&game_id), e))?;

    Ok((StatusCode::CREATED, Json(player)))
}

/// Leave a game.
///
/// # Errors
///
/// - `404 Not Found`: Game or player doesn't exist
pub async fn delete_player(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_player(&game_id, &player_id)
        .await
        .map_err(|e| ApiError::rejected("delete_player", Some(&game_id), e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Deal a new hand to every player in a game.
///
/// # Errors
///
/// - `404 Not Found`: Game doesn't exist
/// - `409 Conflict`: Deck cannot cover a hand for every player
pub async fn deal_cards(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .deal_cards(&game_id)
        .await
        .map_err(|e| ApiError::rejected("deal_cards", Some(&game_id), e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Play a card from a player's hand.
///
/// # Errors
///
/// - `400 Bad Request`: Card is not in the player's hand
/// - `404 Not Found`: Game or player doesn't exist
/// - `409 Conflict`: Card was already played
pub async fn play_card(
    State(state): State<AppState>,
    Path((game_id, player_id)): Path<(String, String)>,
    Json(request): Json<PlayCardRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .play_card(&game_id, &player_id, request.card)
        .await
        .map_err(|e| ApiError::rejected("play_card", Some(&game_id), e))?;

    Ok(StatusCode::NO_CONTENT)
}
