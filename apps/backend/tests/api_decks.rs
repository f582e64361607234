//! Decks API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

use common::fixtures;
use common::TestContext;

/// Test list decks is empty for a new user.
#[tokio::test]
#[ignore = "requires database"]
async fn test_list_decks_empty() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user().await;

    let response = server
        .get("/api/decks")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["decks"].as_array().unwrap().is_empty());
    assert_eq!(body["total"], 0);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test list decks reports card and due counts.
#[tokio::test]
#[ignore = "requires database"]
async fn test_list_decks_with_due_counts() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user().await;
    let deck_name = fixtures::unique_deck_name("counts");
    let deck_id = ctx.create_deck(user_id, &deck_name).await;

    ctx.create_flashcard(user_id, deck_id, "New", &fixtures::new_card_state())
        .await;
    ctx.create_flashcard(
        user_id,
        deck_id,
        "Overdue",
        &fixtures::scheduled_state(ctx.now, 2, 7, -1),
    )
    .await;
    ctx.create_flashcard(
        user_id,
        deck_id,
        "Later",
        &fixtures::scheduled_state(ctx.now, 2, 1, 5),
    )
    .await;

    let response = server
        .get("/api/decks")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 1);

    let deck = &body["decks"][0];
    assert_eq!(deck["id"], deck_id);
    assert_eq!(deck["deck_name"], deck_name.as_str());
    assert_eq!(deck["flashcard_count"], 3);
    assert_eq!(deck["due_count"], 2);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test decks of other users are not listed.
#[tokio::test]
#[ignore = "requires database"]
async fn test_list_decks_scoped_to_user() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (owner_id, _) = ctx.create_test_user().await;
    let (user_id, token) = ctx.create_test_user().await;
    ctx.create_deck(owner_id, &fixtures::unique_deck_name("theirs"))
        .await;
    let mine = ctx
        .create_deck(user_id, &fixtures::unique_deck_name("mine"))
        .await;

    let response = server
        .get("/api/decks")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["decks"][0]["id"], mine);

    // Cleanup
    ctx.cleanup_user(owner_id).await;
    ctx.cleanup_user(user_id).await;
}

/// Test list decks requires authentication.
#[tokio::test]
#[ignore = "requires database"]
async fn test_list_decks_requires_auth() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/decks").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
