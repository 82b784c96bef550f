//! Storefront and admin HTTP surface: books, orders, reviews, notifications,
//! dashboard aggregates.

mod common;

use axum::Router;
use axum::body::Body;
use http::{Request, Response, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use shared::models::{NotificationKind, ReviewCreate, ReviewStatus};
use store_server::core::ServerState;
use store_server::db::repository;

async fn send(app: &Router, req: Request<Body>) -> Response<axum::body::Body> {
    app.clone().oneshot(req).await.expect("Request failed")
}

fn request(method: &str, uri: &str) -> http::request::Builder {
    Request::builder().method(method).uri(uri)
}

fn with_json(builder: http::request::Builder, body: Value) -> Request<Body> {
    builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

async fn body_json(response: Response<axum::body::Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// Mint an admin access token without going through the login handler.
async fn admin_token(state: &ServerState) -> String {
    let user = common::create_admin(&state.pool).await;
    state
        .jwt_service
        .generate_access_token(user.id, &user.email)
        .expect("Failed to generate access token")
}

fn order_body() -> Value {
    json!({
        "book_title": "El Libro",
        "customer_name": "Ana Garcia",
        "email": "ana@example.com",
        "phone": "600111222",
        "address": "Calle Mayor 1",
        "city": "Madrid",
        "quantity": 2
    })
}

#[tokio::test]
async fn price_endpoint_is_public_and_reflects_updates() {
    let (_dir, state) = common::setup_state().await;
    let token = admin_token(&state).await;
    let app = common::app(&state);

    let response = send(
        &app,
        request("GET", "/api/books/price")
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "El Libro");
    assert_eq!(body["price"].as_f64(), Some(25.0));

    // Price update is admin-only
    let response = send(
        &app,
        with_json(request("PUT", "/api/books/price"), json!({ "price": 30.0 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        with_json(
            request("PUT", "/api/books/price")
                .header(header::AUTHORIZATION, format!("Bearer {token}")),
            json!({ "price": 30.0 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        request("GET", "/api/books/price")
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["price"].as_f64(), Some(30.0));
}

#[tokio::test]
async fn nonpositive_price_and_negative_stock_are_rejected() {
    let (_dir, state) = common::setup_state().await;
    let token = admin_token(&state).await;
    let app = common::app(&state);

    let response = send(
        &app,
        with_json(
            request("PUT", "/api/books/price")
                .header(header::AUTHORIZATION, format!("Bearer {token}")),
            json!({ "price": 0.0 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        with_json(
            request("PUT", "/api/books/stock")
                .header(header::AUTHORIZATION, format!("Bearer {token}")),
            json!({ "stock": -1 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn order_placement_is_public_and_notifies_the_admin() {
    let (_dir, state) = common::setup_state().await;
    let app = common::app(&state);

    let response = send(&app, with_json(request("POST", "/api/orders"), order_body())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["quantity"], 2);
    assert_eq!(body["total_price"].as_f64(), Some(50.0));
    assert!(
        body["order_number"]
            .as_str()
            .expect("Missing order number")
            .starts_with("BK-")
    );

    let notifications = repository::notification::find_all(&state.pool)
        .await
        .expect("Failed to list notifications");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Order);
    assert!(!notifications[0].is_read);
}

#[tokio::test]
async fn review_submission_is_blocked_by_the_marker_cookie() {
    let (_dir, state) = common::setup_state().await;
    let app = common::app(&state);

    let review = json!({ "name": "Ana", "rating": 5, "comment": "Me encantó" });

    let response = send(&app, with_json(request("POST", "/api/reviews"), review.clone())).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Submission must set the marker cookie")
        .to_str()
        .expect("Cookie is not ASCII")
        .split(';')
        .next()
        .expect("Empty cookie")
        .to_string();
    assert!(cookie.starts_with("review_submitted="));

    // Same client again: rejected with 429, nothing stored
    let response = send(
        &app,
        with_json(
            request("POST", "/api/reviews").header(header::COOKIE, &cookie),
            review,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM review")
        .fetch_one(&state.pool)
        .await
        .expect("Failed to count reviews");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn review_requires_rating_or_comment() {
    let (_dir, state) = common::setup_state().await;
    let app = common::app(&state);

    let response = send(
        &app,
        with_json(
            request("POST", "/api/reviews"),
            json!({ "name": "Ana", "is_anonymous": false }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        with_json(
            request("POST", "/api/reviews"),
            json!({ "rating": 9, "comment": "way too good" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn moderation_controls_the_public_listing() {
    let (_dir, state) = common::setup_state().await;
    let token = admin_token(&state).await;
    let app = common::app(&state);

    let review = repository::review::create(
        &state.pool,
        ReviewCreate {
            name: Some("Ana".to_string()),
            is_anonymous: true,
            rating: Some(4),
            comment: Some("Muy bueno".to_string()),
        },
    )
    .await
    .expect("Failed to create review");

    // Pending reviews are invisible
    let response = send(
        &app,
        request("GET", "/api/reviews/approved")
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);

    let response = send(
        &app,
        with_json(
            request("PUT", &format!("/api/reviews/{}/status", review.id))
                .header(header::AUTHORIZATION, format!("Bearer {token}")),
            json!({ "status": "approved" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        request("GET", "/api/reviews/approved")
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    // Anonymous reviews never expose the stored name
    assert!(body["items"][0]["name"].is_null());
    assert_eq!(body["items"][0]["rating"], 4);
}

#[tokio::test]
async fn helpful_vote_counts_once_per_client() {
    let (_dir, state) = common::setup_state().await;
    let app = common::app(&state);

    let review = repository::review::create(
        &state.pool,
        ReviewCreate {
            name: None,
            is_anonymous: true,
            rating: Some(5),
            comment: None,
        },
    )
    .await
    .expect("Failed to create review");
    repository::review::update_status(&state.pool, review.id, ReviewStatus::Approved)
        .await
        .expect("Failed to approve review");

    let uri = format!("/api/reviews/{}/helpful", review.id);
    let response = send(
        &app,
        request("PUT", &uri)
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Vote must set the marker cookie")
        .to_str()
        .expect("Cookie is not ASCII")
        .split(';')
        .next()
        .expect("Empty cookie")
        .to_string();
    assert_eq!(cookie, format!("review_liked_{}=1", review.id));

    let response = send(
        &app,
        request("PUT", &uri)
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let stored = repository::review::find_by_id(&state.pool, review.id)
        .await
        .expect("Failed to load review")
        .expect("Review missing");
    assert_eq!(stored.helpful_count, 1);
}

#[tokio::test]
async fn notification_inbox_marks_read() {
    let (_dir, state) = common::setup_state().await;
    let token = admin_token(&state).await;
    let app = common::app(&state);

    send(&app, with_json(request("POST", "/api/orders"), order_body())).await;
    send(&app, with_json(request("POST", "/api/orders"), order_body())).await;

    let response = send(
        &app,
        request("GET", "/api/notifications")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let first_id = body[0]["id"].as_i64().expect("Missing notification id");
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let response = send(
        &app,
        request("PUT", &format!("/api/notifications/{first_id}/read"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["is_read"], true);

    let response = send(
        &app,
        request("PUT", "/api/notifications/read-all")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["updated"], 1);

    let unread: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM notification WHERE is_read = 0")
            .fetch_one(&state.pool)
            .await
            .expect("Failed to count notifications");
    assert_eq!(unread, 0);
}

#[tokio::test]
async fn dashboard_aggregates_orders_and_reviews() {
    let (_dir, state) = common::setup_state().await;
    let token = admin_token(&state).await;
    let app = common::app(&state);

    repository::book::update_stock(&state.pool, 1, 10)
        .await
        .expect("Failed to set stock");

    let response = send(&app, with_json(request("POST", "/api/orders"), order_body())).await;
    let first = body_json(response).await;
    send(&app, with_json(request("POST", "/api/orders"), order_body())).await;

    let first_id = first["id"].as_i64().expect("Missing order id");
    store_server::orders::transition_status(&state.pool, first_id, "completed")
        .await
        .expect("Failed to complete order");

    let review = repository::review::create(
        &state.pool,
        ReviewCreate {
            name: None,
            is_anonymous: true,
            rating: Some(4),
            comment: None,
        },
    )
    .await
    .expect("Failed to create review");
    repository::review::update_status(&state.pool, review.id, ReviewStatus::Approved)
        .await
        .expect("Failed to approve review");

    let response = send(
        &app,
        request("GET", "/api/dashboard/stats")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["total_orders"], 2);
    assert_eq!(body["pending_orders"], 1);
    assert_eq!(body["completed_orders"], 1);
    assert_eq!(body["cancelled_orders"], 0);
    assert_eq!(body["revenue"].as_f64(), Some(50.0));
    assert_eq!(body["approved_reviews"], 1);
    assert_eq!(body["average_rating"].as_f64(), Some(4.0));
    // Two order notifications, none read yet
    assert_eq!(body["unread_notifications"], 2);
    // One completion of quantity 2 against stock 10
    assert_eq!(body["stock"], 8);
}

#[tokio::test]
async fn health_endpoint_pings_the_database() {
    let (_dir, state) = common::setup_state().await;
    let app = common::app(&state);

    let response = send(
        &app,
        request("GET", "/api/health")
            .body(Body::empty())
            .expect("Failed to build request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}
