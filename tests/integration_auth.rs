mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{create_test_user, generate_unique_email, setup_test_app};
use tutorium::authz::Role;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn register_creates_an_unapproved_profile(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    let response = app
        .oneshot(post_json(
            "/auth/register",
            json!({
                "full_name": "New Teacher",
                "email": email,
                "password": "password123",
                "role": "teacher"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "teacher");
    assert_eq!(body["is_approved"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn register_rejects_superadmin_role(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(post_json(
            "/auth/register",
            json!({
                "full_name": "Sneaky",
                "email": generate_unique_email(),
                "password": "password123",
                "role": "superadmin"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn register_rejects_duplicate_email(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Teacher, false).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(post_json(
            "/auth/register",
            json!({
                "full_name": "Duplicate",
                "email": email,
                "password": "password123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn login_returns_token_and_profile(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Sales, true).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({ "email": email, "password": "password123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body.get("access_token").is_some());
    assert_eq!(body["profile"]["email"], email);
    assert_eq!(body["profile"]["role"], "sales");
}

#[sqlx::test(migrations = "./migrations")]
async fn login_rejects_bad_credentials(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", Role::Sales, true).await;
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({ "email": email, "password": "wrongpass" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({ "email": "nobody@test.com", "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn login_rejects_invalid_email_format(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(post_json(
            "/auth/login",
            json!({ "email": "not-an-email", "password": "password123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
