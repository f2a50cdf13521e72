//! HTTP/WebSocket API for the Truco server.
//!
//! Thin transport over [`truco::GameStore`]: handlers decode JSON, call one
//! store action, and map [`truco::StoreError`] to a status code.
//!
//! # Endpoints
//!
//! ```text
//! GET    /health                                          - Health check
//! GET    /api/games                                       - List games
//! POST   /api/games                                       - Create game
//! GET    /api/games/{game_id}                             - Fetch game
//! DELETE /api/games/{game_id}                             - Delete game
//! GET    /api/games/{game_id}/players                     - List players
//! POST   /api/games/{game_id}/players                     - Join game
//! DELETE /api/games/{game_id}/players/{player_id}         - Leave game
//! POST   /api/games/{game_id}/deal                        - Deal cards
//! POST   /api/games/{game_id}/players/{player_id}/play    - Play a card
//! GET    /ws                                              - Change events
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively for development.

pub mod games;
pub mod websocket;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use truco::{ChangeBroadcaster, GameStore};

/// Application state shared across all HTTP handlers and WebSocket connections.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<GameStore>,
    /// Same broadcaster the store notifies; WebSocket clients subscribe here
    pub broadcaster: Arc<ChangeBroadcaster>,
    pub notify_channel_capacity: usize,
}

impl AppState {
    /// Wire a store to a fresh broadcaster
    pub fn new(
        deck_factory: Arc<dyn truco::DeckFactory>,
        notify_channel_capacity: usize,
    ) -> Self {
        let broadcaster = Arc::new(ChangeBroadcaster::new());
        let store = Arc::new(GameStore::new(deck_factory, broadcaster.clone()));
        Self {
            store,
            broadcaster,
            notify_channel_capacity,
        }
    }
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/games", get(games::list_games).post(games::create_game))
        .route(
            "/games/{game_id}",
            get(games::get_game).delete(games::delete_game),
        )
        .route(
            "/games/{game_id}/players",
            get(games::list_players).post(games::create_player),
        )
        .route(
            "/games/{game_id}/players/{player_id}",
            delete(games::delete_player),
        )
        .route(
            "/games/{game_id}/players/{player_id}/play",
            post(games::play_card),
        )
        .route("/games/{game_id}/deal", post(games::deal_cards));

    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket::websocket_handler))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "games": state.store.game_count().await,
        "subscribers": state.broadcaster.subscriber_count(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
