//! Integration tests for the HTTP API.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use truco::{ChangeEvent, FixedDeck};
use truco_server::api::{self, AppState};

fn create_test_state(deck_size: usize) -> AppState {
    AppState::new(Arc::new(FixedDeck::first_of_spanish(deck_size)), 16)
}

async fn send(
    state: &AppState,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let app = api::create_router(state.clone());

    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // Extractor rejections come back as plain text
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn create_game(state: &AppState, name: &str) -> String {
    let (status, body) = send(state, "POST", "/api/games", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_player(state: &AppState, game_id: &str, name: &str) -> (StatusCode, Value) {
    send(
        state,
        "POST",
        &format!("/api/games/{game_id}/players"),
        Some(json!({ "name": name })),
    )
    .await
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_endpoint() {
    let state = create_test_state(40);
    create_game(&state, "Mesa").await;

    let (status, body) = send(&state, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["games"], 1);
}

// ============================================================================
// Game Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_list_games() {
    let state = create_test_state(40);

    let (status, body) = send(&state, "POST", "/api/games", Some(json!({ "name": "Mesa 1" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Mesa 1");
    assert_eq!(body["deck_size"], 40);
    assert_eq!(body["players"], json!([]));

    let (status, body) = send(&state, "GET", "/api/games", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["player_count"], 0);
    assert_eq!(body[0]["max_players"], 4);
}

#[tokio::test]
async fn test_create_game_blank_name_is_bad_request() {
    let state = create_test_state(40);

    let (status, body) = send(&state, "POST", "/api/games", Some(json!({ "name": "  " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_create_game_malformed_body_is_rejected() {
    let state = create_test_state(40);

    let (status, body) = send(&state, "POST", "/api/games", Some(json!({ "title": "Mesa" }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.as_str().unwrap().contains("name"));
    assert_eq!(state.store.game_count().await, 0);
}

#[tokio::test]
async fn test_play_card_unparseable_card_is_rejected() {
    let state = create_test_state(3);
    let game_id = create_game(&state, "Mesa").await;
    let (_, ana) = create_player(&state, &game_id, "Ana").await;
    let ana_id = ana["id"].as_str().unwrap();
    send(&state, "POST", &format!("/api/games/{game_id}/deal"), None).await;

    let (status, body) = send(
        &state,
        "POST",
        &format!("/api/games/{game_id}/players/{ana_id}/play"),
        Some(json!({ "card": [7, "hearts"] })),
    )
    .await;

    assert!(status.is_client_error());
    assert!(body.is_string());

    let (_, game) = send(&state, "GET", &format!("/api/games/{game_id}"), None).await;
    assert_eq!(game["players"][0]["card_indices_played"], json!([]));
}

#[tokio::test]
async fn test_get_missing_game_is_not_found() {
    let state = create_test_state(40);

    let (status, body) = send(&state, "GET", "/api/games/nope", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn test_delete_game() {
    let state = create_test_state(40);
    let game_id = create_game(&state, "Mesa").await;

    let (status, _) = send(&state, "DELETE", &format!("/api/games/{game_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&state, "GET", &format!("/api/games/{game_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Player Tests
// ============================================================================

#[tokio::test]
async fn test_join_until_full() {
    let state = create_test_state(40);
    let game_id = create_game(&state, "Mesa").await;

    for name in ["Ana", "Bo", "Cy", "Di"] {
        let (status, body) = create_player(&state, &game_id, name).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], name);
    }

    let (status, _) = create_player(&state, &game_id, "Ed").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&state, "GET", &format!("/api/games/{game_id}/players"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_delete_player() {
    let state = create_test_state(40);
    let game_id = create_game(&state, "Mesa").await;
    let (_, ana) = create_player(&state, &game_id, "Ana").await;
    create_player(&state, &game_id, "Bo").await;
    let ana_id = ana["id"].as_str().unwrap();

    let (status, _) = send(
        &state,
        "DELETE",
        &format!("/api/games/{game_id}/players/{ana_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&state, "GET", &format!("/api/games/{game_id}/players"), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Bo");

    let (status, _) = send(
        &state,
        "DELETE",
        &format!("/api/games/{game_id}/players/{ana_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Deal and Play Tests
// ============================================================================

#[tokio::test]
async fn test_deal_and_play() {
    let state = create_test_state(12);
    let game_id = create_game(&state, "Mesa").await;
    let (_, ana) = create_player(&state, &game_id, "Ana").await;
    let ana_id = ana["id"].as_str().unwrap().to_string();

    let (status, _) = send(&state, "POST", &format!("/api/games/{game_id}/deal"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, game) = send(&state, "GET", &format!("/api/games/{game_id}"), None).await;
    assert_eq!(game["deck_size"], 9);
    let card = game["players"][0]["hand"][1].clone();

    let play_uri = format!("/api/games/{game_id}/players/{ana_id}/play");
    let (status, _) = send(&state, "POST", &play_uri, Some(json!({ "card": card }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, game) = send(&state, "GET", &format!("/api/games/{game_id}"), None).await;
    assert_eq!(game["players"][0]["card_indices_played"], json!([1]));

    let (status, body) = send(&state, "POST", &play_uri, Some(json!({ "card": card }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already played"));
}

#[tokio::test]
async fn test_play_card_not_in_hand() {
    let state = create_test_state(3);
    let game_id = create_game(&state, "Mesa").await;
    let (_, ana) = create_player(&state, &game_id, "Ana").await;
    let ana_id = ana["id"].as_str().unwrap();
    send(&state, "POST", &format!("/api/games/{game_id}/deal"), None).await;

    let (status, _) = send(
        &state,
        "POST",
        &format!("/api/games/{game_id}/players/{ana_id}/play"),
        Some(json!({ "card": [12, "copa"] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deal_with_short_deck_is_conflict() {
    let state = create_test_state(5);
    let game_id = create_game(&state, "Mesa").await;
    create_player(&state, &game_id, "Ana").await;
    create_player(&state, &game_id, "Bo").await;

    let (status, body) = send(&state, "POST", &format!("/api/games/{game_id}/deal"), None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("deck not big enough"));
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_actions_reach_broadcaster_subscribers() {
    let state = create_test_state(40);
    let mut events = state.broadcaster.subscribe(16);

    let game_id = create_game(&state, "Mesa").await;
    create_player(&state, &game_id, "Ana").await;

    assert_eq!(events.recv().await, Some(ChangeEvent::GameListChanged));
    assert_eq!(
        events.recv().await,
        Some(ChangeEvent::PlayerListChanged {
            game_id: game_id.clone()
        })
    );
    assert_eq!(
        events.recv().await,
        Some(ChangeEvent::GameChanged { game_id })
    );
}
