//! End-to-end router tests over an in-memory SQLite store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use zyscope::api::{create_router, AppState};
use zyscope::domain::Catalog;
use zyscope::infra::Database;
use zyscope::Config;

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
    }
}

async fn test_app() -> Router {
    let db = Arc::new(
        Database::connect(&test_config())
            .await
            .expect("in-memory database connects"),
    );
    let catalog = Arc::new(Catalog::embedded());
    create_router(AppState::from_config(db, catalog))
}

async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    let request = match body {
        Some(value) => builder.body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router handles request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

async fn login(app: &Router, username: &str) -> Value {
    let (status, body) = request(
        app,
        Method::POST,
        "/user/login",
        Some(json!({ "username": username })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn explore(app: &Router, user_id: i64, location: &str) -> (StatusCode, Value) {
    request(
        app,
        Method::POST,
        "/explore",
        Some(json!({ "user_id": user_id, "location": location })),
    )
    .await
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;
    let (status, body) = request(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn destinations_lists_catalog() {
    let app = test_app().await;
    let (status, body) = request(&app, Method::GET, "/destinations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().map(|a| !a.is_empty()).unwrap_or(false));
}

#[tokio::test]
async fn login_without_username_creates_guest() {
    let app = test_app().await;
    let (status, body) = request(&app, Method::POST, "/user/login", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["username"]
        .as_str()
        .map(|u| u.starts_with("guest_"))
        .unwrap_or(false));
    assert_eq!(body["level"], 1);
    assert_eq!(body["points"], 0);
}

#[tokio::test]
async fn login_twice_returns_same_account() {
    let app = test_app().await;
    let first = login(&app, "wanderer").await;
    let second = login(&app, "wanderer").await;
    assert_eq!(first["id"], second["id"]);
}

#[tokio::test]
async fn explore_awards_visit_xp() {
    let app = test_app().await;
    let user = login(&app, "explorer").await;
    let user_id = user["id"].as_i64().expect("user id");

    let before = chrono::Utc::now();
    let (status, body) = explore(&app, user_id, "Japan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["points"], 25);
    assert_eq!(body["user"]["level"], 1);
    assert_eq!(body["visit"]["location"], "Japan");
    assert_eq!(body["city"]["name"], "Japan");

    let visited_at: chrono::DateTime<chrono::Utc> = body["visit"]["visited_at"]
        .as_str()
        .expect("visited_at string")
        .parse()
        .expect("visited_at parses");
    assert!(visited_at >= before);
}

#[tokio::test]
async fn explore_levels_up_at_250_points() {
    let app = test_app().await;
    let user = login(&app, "grinder").await;
    let user_id = user["id"].as_i64().expect("user id");

    let mut last = Value::Null;
    for _ in 0..10 {
        let (status, body) = explore(&app, user_id, "Norway").await;
        assert_eq!(status, StatusCode::OK);
        last = body;
    }

    assert_eq!(last["user"]["points"], 250);
    assert_eq!(last["user"]["level"], 2);
}

#[tokio::test]
async fn explore_rejects_unknown_user_and_location() {
    let app = test_app().await;
    let user = login(&app, "cartographer").await;
    let user_id = user["id"].as_i64().expect("user id");

    let (status, _) = explore(&app, 9999, "Japan").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = explore(&app, user_id, "Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn visits_list_newest_first_with_catalog_data() {
    let app = test_app().await;
    let user = login(&app, "lister").await;
    let user_id = user["id"].as_i64().expect("user id");

    explore(&app, user_id, "Japan").await;
    explore(&app, user_id, "Norway").await;

    let (status, body) =
        request(&app, Method::GET, &format!("/visits?user_id={user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let visits = body["visits"].as_array().expect("visits array");
    assert_eq!(visits.len(), 2);
    assert_eq!(visits[0]["location"], "Norway");
    assert_eq!(visits[1]["location"], "Japan");
    assert!(visits[0]["city"].is_object());
    assert_eq!(body["user"]["points"], 50);
}

#[tokio::test]
async fn visits_for_unknown_user_is_not_found() {
    let app = test_app().await;
    let (status, _) = request(&app, Method::GET, "/visits?user_id=42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_out_of_range_rating_is_rejected_and_not_stored() {
    let app = test_app().await;
    let user = login(&app, "critic").await;
    let user_id = user["id"].as_i64().expect("user id");

    let (status, _) = request(
        &app,
        Method::POST,
        "/reviews",
        Some(json!({ "user_id": user_id, "location": "Japan", "rating": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(&app, Method::GET, "/reviews?location=Japan", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reviews"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn review_roundtrip_for_location() {
    let app = test_app().await;
    let user = login(&app, "reviewer").await;
    let user_id = user["id"].as_i64().expect("user id");

    let (status, body) = request(
        &app,
        Method::POST,
        "/reviews",
        Some(json!({
            "user_id": user_id,
            "location": "japan",
            "rating": 4,
            "comment": "Great food"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // Location is canonicalized through the catalog
    assert_eq!(body["review"]["location"], "Japan");
    assert_eq!(body["user"]["username"], "reviewer");

    let (status, body) = request(&app, Method::GET, "/reviews?location=Japan", None).await;
    assert_eq!(status, StatusCode::OK);
    let reviews = body["reviews"].as_array().expect("reviews array");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 4);
    assert_eq!(reviews[0]["comment"], "Great food");
}

#[tokio::test]
async fn recent_reviews_carry_author_and_city() {
    let app = test_app().await;
    let user = login(&app, "chronicler").await;
    let user_id = user["id"].as_i64().expect("user id");

    for (location, rating) in [("Japan", 5), ("Norway", 3)] {
        let (status, _) = request(
            &app,
            Method::POST,
            "/reviews",
            Some(json!({ "user_id": user_id, "location": location, "rating": rating })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = request(&app, Method::GET, "/reviews/recent?limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let reviews = body["reviews"].as_array().expect("reviews array");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["location"], "Norway");
    assert_eq!(reviews[0]["user"]["username"], "chronicler");
    assert_eq!(reviews[0]["city"]["name"], "Norway");
}

#[tokio::test]
async fn profile_update_rejects_taken_username() {
    let app = test_app().await;
    login(&app, "alpha").await;
    let beta = login(&app, "beta").await;
    let beta_id = beta["id"].as_i64().expect("user id");

    let (status, body) = request(
        &app,
        Method::PUT,
        "/user/update",
        Some(json!({ "user_id": beta_id, "username": "alpha" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_USERNAME");
}

#[tokio::test]
async fn profile_update_replaces_fields() {
    let app = test_app().await;
    let user = login(&app, "profiled").await;
    let user_id = user["id"].as_i64().expect("user id");

    let (status, body) = request(
        &app,
        Method::PUT,
        "/user/update",
        Some(json!({
            "user_id": user_id,
            "username": "renamed",
            "email": "traveler@example.com",
            "bio": "On the road"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "renamed");
    assert_eq!(body["email"], "traveler@example.com");
    assert_eq!(body["bio"], "On the road");
    // Fields omitted from the request are cleared, not kept
    assert_eq!(body["profile_pic"], Value::Null);
}

#[tokio::test]
async fn profile_update_unknown_user_is_not_found() {
    let app = test_app().await;
    let (status, _) = request(
        &app,
        Method::PUT,
        "/user/update",
        Some(json!({ "user_id": 404, "username": "ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_cascades_and_repeated_delete_is_not_found() {
    let app = test_app().await;
    let user = login(&app, "ephemeral").await;
    let user_id = user["id"].as_i64().expect("user id");
    explore(&app, user_id, "Japan").await;

    let (status, body) = request(
        &app,
        Method::DELETE,
        "/user/delete",
        Some(json!({ "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) =
        request(&app, Method::GET, &format!("/visits?user_id={user_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        Method::DELETE,
        "/user/delete",
        Some(json!({ "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn leaderboard_orders_by_points_and_honors_limit() {
    let app = test_app().await;

    let ids: Vec<i64> = {
        let mut ids = Vec::new();
        for name in ["bronze", "silver", "gold"] {
            let user = login(&app, name).await;
            ids.push(user["id"].as_i64().expect("user id"));
        }
        ids
    };

    // gold: 3 visits, silver: 2, bronze: 1
    for (index, id) in ids.iter().enumerate() {
        for _ in 0..=index {
            explore(&app, *id, "Peru").await;
        }
    }

    let (status, body) = request(&app, Method::GET, "/leaderboard?limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["users"].as_array().expect("users array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "gold");
    assert_eq!(users[0]["points"], 75);
    assert_eq!(users[0]["visits"], 3);
    assert_eq!(users[1]["username"], "silver");
}

#[tokio::test]
async fn minigame_xp_preserves_level() {
    let app = test_app().await;
    let user = login(&app, "gamer").await;
    let user_id = user["id"].as_i64().expect("user id");

    let (status, body) = request(
        &app,
        Method::POST,
        "/minigame/xp",
        Some(json!({ "userId": user_id, "xp": 300 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["xpAwarded"], 300);
    assert_eq!(body["totalPoints"], 300);

    // 300 points would be level 2 recomputed; the grant kept level 1
    let refreshed = login(&app, "gamer").await;
    assert_eq!(refreshed["points"], 300);
    assert_eq!(refreshed["level"], 1);
}

#[tokio::test]
async fn xp_add_recomputes_level() {
    let app = test_app().await;
    let user = login(&app, "phaser").await;
    let user_id = user["id"].as_i64().expect("user id");

    let (status, body) = request(
        &app,
        Method::POST,
        "/xp/add",
        Some(json!({ "userId": user_id, "xp": 300 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPoints"], 300);
    assert_eq!(body["level"], 2);
}

#[tokio::test]
async fn xp_grants_reject_negative_amounts() {
    let app = test_app().await;
    let user = login(&app, "cheater").await;
    let user_id = user["id"].as_i64().expect("user id");

    for uri in ["/minigame/xp", "/xp/add"] {
        let (status, _) = request(
            &app,
            Method::POST,
            uri,
            Some(json!({ "userId": user_id, "xp": -10 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn compare_matches_catalog_entries() {
    let app = test_app().await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/compare",
        Some(json!({ "city1": "japan", "city2": "Norway" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city1"]["name"], "Japan");
    assert_eq!(body["city2"]["name"], "Norway");

    let (status, _) = request(
        &app,
        Method::POST,
        "/compare",
        Some(json!({ "city1": "Japan" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request(
        &app,
        Method::POST,
        "/compare",
        Some(json!({ "city1": "Japan", "city2": "Atlantis" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
