//! Integration tests for the gigbook-web API
//!
//! Every test runs against a fresh in-memory database with the real
//! schema, exercising the router end to end via `oneshot`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot` method

use gigbook_web::{build_router, AppState};

/// Test helper: fresh app over an in-memory database
async fn setup_app() -> axum::Router {
    let pool = gigbook_common::db::init_in_memory()
        .await
        .expect("in-memory database should initialize");
    build_router(AppState::new(pool))
}

/// Test helper: GET/DELETE request with no body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: urlencoded form POST
fn form_request(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    let body = pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("should read body");
    serde_json::from_slice(&bytes).expect("should parse JSON")
}

/// Test helper: create a venue, returning its id from the redirect
async fn create_venue(app: &axum::Router, name: &str, city: &str, state: &str) -> i64 {
    let request = form_request(
        "/venues/create",
        &[
            ("name", name),
            ("city", city),
            ("state", state),
            ("address", "1 Main St"),
            ("genres", "rock, jazz ,  , pop"),
            ("seeking_talent", "y"),
            ("seeking_description", "Looking for acts"),
        ],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    id_from_location(&response, "/venues/")
}

/// Test helper: create an artist, returning its id from the redirect
async fn create_artist(app: &axum::Router, name: &str) -> i64 {
    let request = form_request(
        "/artists/create",
        &[
            ("name", name),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("genres", "jazz"),
        ],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    id_from_location(&response, "/artists/")
}

/// Test helper: book a show; success is asserted via the redirect flash
async fn create_show(app: &axum::Router, artist_id: i64, venue_id: i64, start_time: &str) {
    let request = form_request(
        "/shows/create",
        &[
            ("artist_id", &artist_id.to_string()),
            ("venue_id", &venue_id.to_string()),
            ("start_time", start_time),
        ],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location_of(&response);
    assert!(
        location.contains("successfully"),
        "expected success flash, got {location}"
    );
}

fn location_of<B>(response: &axum::http::Response<B>) -> String {
    response
        .headers()
        .get("location")
        .expect("redirect should carry Location")
        .to_str()
        .unwrap()
        .to_string()
}

fn id_from_location<B>(response: &axum::http::Response<B>, prefix: &str) -> i64 {
    let location = location_of(response);
    let rest = location
        .strip_prefix(prefix)
        .unwrap_or_else(|| panic!("unexpected redirect target: {location}"));
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().expect("redirect should name the new id")
}

// =============================================================================
// Health and home page
// =============================================================================

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = setup_app().await;
    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "gigbook-web");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn home_page_is_served() {
    let app = setup_app().await;
    let response = app.oneshot(test_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Venues: browse, create, detail
// =============================================================================

#[tokio::test]
async fn empty_database_lists_no_areas() {
    let app = setup_app().await;
    let response = app.oneshot(test_request("GET", "/venues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["areas"], serde_json::json!([]));
}

#[tokio::test]
async fn created_venue_round_trips_through_detail() {
    let app = setup_app().await;
    let id = create_venue(&app, "Jazz Club West", "San Francisco", "CA").await;

    let response = app
        .oneshot(test_request("GET", &format!("/venues/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Jazz Club West");
    // Stored comma-joined string reconstructs the submitted list
    assert_eq!(body["genres"], serde_json::json!(["rock", "jazz", "pop"]));
    assert_eq!(body["seeking_talent"], true);
    assert_eq!(body["past_shows_count"], 0);
    assert_eq!(body["upcoming_shows_count"], 0);
}

#[tokio::test]
async fn venues_group_into_areas_by_city_and_state() {
    let app = setup_app().await;
    create_venue(&app, "The Room", "Reno", "NV").await;
    create_venue(&app, "Club House", "Austin", "TX").await;
    create_venue(&app, "The Annex", "Reno", "NV").await;

    let response = app.oneshot(test_request("GET", "/venues")).await.unwrap();
    let body = extract_json(response.into_body()).await;

    let areas = body["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0]["city"], "Reno");
    assert_eq!(areas[0]["venues"].as_array().unwrap().len(), 2);
    assert_eq!(areas[1]["city"], "Austin");
}

#[tokio::test]
async fn missing_venue_detail_is_404() {
    let app = setup_app().await;
    let response = app.oneshot(test_request("GET", "/venues/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn search_requires_every_token_to_match() {
    let app = setup_app().await;
    create_venue(&app, "Jazz Club West", "San Francisco", "CA").await;
    create_venue(&app, "Club House", "Austin", "TX").await;

    let response = app
        .clone()
        .oneshot(form_request("/venues/search", &[("search_term", "Jazz Club")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Jazz Club West");

    // Case-insensitive
    let response = app
        .oneshot(form_request("/venues/search", &[("search_term", "jazz club")]))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn empty_search_term_matches_nothing() {
    let app = setup_app().await;
    create_venue(&app, "Jazz Club West", "San Francisco", "CA").await;

    let response = app
        .oneshot(form_request("/venues/search", &[("search_term", "")]))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn artist_search_reports_upcoming_counts() {
    let app = setup_app().await;
    let venue_id = create_venue(&app, "The Room", "Reno", "NV").await;
    let artist_id = create_artist(&app, "Night Quartet").await;
    create_show(&app, artist_id, venue_id, "2030-01-01 20:00:00").await;

    let response = app
        .oneshot(form_request("/artists/search", &[("search_term", "night")]))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["num_upcoming_shows"], 1);
}

// =============================================================================
// Edit
// =============================================================================

#[tokio::test]
async fn edit_prefill_explodes_genres() {
    let app = setup_app().await;
    let id = create_venue(&app, "Jazz Club West", "San Francisco", "CA").await;

    let response = app
        .oneshot(test_request("GET", &format!("/venues/{id}/edit")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["name"], "Jazz Club West");
    assert_eq!(body["genres"], serde_json::json!(["rock", "jazz", "pop"]));
}

#[tokio::test]
async fn edit_overwrites_fields_but_not_id() {
    let app = setup_app().await;
    let id = create_artist(&app, "Night Quartet").await;

    let request = form_request(
        &format!("/artists/{id}/edit"),
        &[
            ("name", "Day Quintet"),
            ("city", "Portland"),
            ("state", "OR"),
            ("genres", "folk, blues"),
        ],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location_of(&response).starts_with(&format!("/artists/{id}")));

    let response = app
        .oneshot(test_request("GET", &format!("/artists/{id}")))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["name"], "Day Quintet");
    assert_eq!(body["city"], "Portland");
    assert_eq!(body["genres"], serde_json::json!(["folk", "blues"]));
}

#[tokio::test]
async fn editing_a_missing_artist_is_404() {
    let app = setup_app().await;
    let response = app
        .oneshot(test_request("GET", "/artists/7/edit"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_then_fetch_is_404() {
    let app = setup_app().await;
    let id = create_venue(&app, "The Room", "Reno", "NV").await;

    let response = app
        .clone()
        .oneshot(test_request("DELETE", &format!("/venues/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(test_request("GET", &format!("/venues/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_missing_venue_is_404() {
    let app = setup_app().await;
    let response = app
        .oneshot(test_request("DELETE", "/venues/9"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_venue_with_shows_is_blocked() {
    let app = setup_app().await;
    let venue_id = create_venue(&app, "The Room", "Reno", "NV").await;
    let artist_id = create_artist(&app, "Night Quartet").await;
    create_show(&app, artist_id, venue_id, "2030-01-01 20:00:00").await;

    let response = app
        .clone()
        .oneshot(test_request("DELETE", &format!("/venues/{venue_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Venue survives the blocked delete
    let response = app
        .oneshot(test_request("GET", &format!("/venues/{venue_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Shows
// =============================================================================

#[tokio::test]
async fn show_listing_joins_both_counterparties() {
    let app = setup_app().await;
    let venue_id = create_venue(&app, "The Room", "Reno", "NV").await;
    let artist_id = create_artist(&app, "Night Quartet").await;
    create_show(&app, artist_id, venue_id, "2030-01-01 20:00:00").await;

    let response = app.oneshot(test_request("GET", "/shows")).await.unwrap();
    let body = extract_json(response.into_body()).await;

    let shows = body["shows"].as_array().unwrap();
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0]["venue_name"], "The Room");
    assert_eq!(shows[0]["artist_name"], "Night Quartet");
    assert_eq!(shows[0]["artist_id"], artist_id);
}

#[tokio::test]
async fn detail_pages_partition_past_and_upcoming_shows() {
    let app = setup_app().await;
    let venue_id = create_venue(&app, "The Room", "Reno", "NV").await;
    let artist_id = create_artist(&app, "Night Quartet").await;
    create_show(&app, artist_id, venue_id, "2020-01-01 20:00:00").await;
    create_show(&app, artist_id, venue_id, "2030-01-01 20:00:00").await;

    let response = app
        .clone()
        .oneshot(test_request("GET", &format!("/venues/{venue_id}")))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["past_shows_count"], 1);
    assert_eq!(body["upcoming_shows_count"], 1);
    assert_eq!(body["past_shows"][0]["artist_name"], "Night Quartet");

    let response = app
        .oneshot(test_request("GET", &format!("/artists/{artist_id}")))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["past_shows_count"], 1);
    assert_eq!(body["upcoming_shows_count"], 1);
    assert_eq!(body["upcoming_shows"][0]["venue_name"], "The Room");
}

#[tokio::test]
async fn show_with_unknown_counterparty_fails_and_redirects_home() {
    let app = setup_app().await;

    let request = form_request(
        "/shows/create",
        &[
            ("artist_id", "41"),
            ("venue_id", "42"),
            ("start_time", "2030-01-01 20:00:00"),
        ],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = location_of(&response);
    assert!(location.starts_with("/?flash="));
    assert!(location.contains("error"));

    // Nothing was persisted
    let response = app.oneshot(test_request("GET", "/shows")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["shows"], serde_json::json!([]));
}

#[tokio::test]
async fn show_with_garbage_start_time_fails_and_redirects_home() {
    let app = setup_app().await;
    let venue_id = create_venue(&app, "The Room", "Reno", "NV").await;
    let artist_id = create_artist(&app, "Night Quartet").await;

    let request = form_request(
        "/shows/create",
        &[
            ("artist_id", &artist_id.to_string()),
            ("venue_id", &venue_id.to_string()),
            ("start_time", "next tuesday"),
        ],
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location_of(&response).starts_with("/?flash="));
}

// =============================================================================
// Artists index
// =============================================================================

#[tokio::test]
async fn artists_index_lists_id_and_name_only() {
    let app = setup_app().await;
    let id = create_artist(&app, "Night Quartet").await;

    let response = app.oneshot(test_request("GET", "/artists")).await.unwrap();
    let body = extract_json(response.into_body()).await;

    let artists = body["artists"].as_array().unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0], serde_json::json!({"id": id, "name": "Night Quartet"}));
}
