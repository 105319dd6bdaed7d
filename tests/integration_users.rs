mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{create_test_user, generate_unique_email, setup_test_app, token_for};
use tutorium::authz::Role;

fn request(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header("content-type", "application/json");
    match body {
        Some(body) => builder
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn user_administration_is_superadmin_territory(pool: PgPool) {
    let admin = create_test_user(
        &pool,
        &generate_unique_email(),
        "pass12345",
        Role::Superadmin,
        true,
    )
    .await;
    let teacher =
        create_test_user(&pool, &generate_unique_email(), "pass12345", Role::Teacher, true).await;
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(request("GET", "/users", &token_for(&admin), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 2);

    let response = app
        .oneshot(request("GET", "/users", &token_for(&teacher), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[sqlx::test(migrations = "./migrations")]
async fn approval_toggle_takes_effect_without_a_new_token(pool: PgPool) {
    let admin = create_test_user(
        &pool,
        &generate_unique_email(),
        "pass12345",
        Role::Superadmin,
        true,
    )
    .await;
    let newcomer =
        create_test_user(&pool, &generate_unique_email(), "pass12345", Role::Teacher, false)
            .await;

    let newcomer_token = token_for(&newcomer);
    let app = setup_test_app(pool);

    // Gated at first - and this primes the newcomer's session cache.
    let response = app
        .clone()
        .oneshot(request("GET", "/students", &newcomer_token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Admin approves; the newcomer's cached session is invalidated.
    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/users/{}/approval", newcomer.id),
            &token_for(&admin),
            Some(json!({ "is_approved": true })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Same token, next navigation goes through.
    let response = app
        .oneshot(request("GET", "/students", &newcomer_token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn role_edit_invalidates_the_cached_session(pool: PgPool) {
    let admin = create_test_user(
        &pool,
        &generate_unique_email(),
        "pass12345",
        Role::Superadmin,
        true,
    )
    .await;
    let user =
        create_test_user(&pool, &generate_unique_email(), "pass12345", Role::Teacher, true).await;

    let user_token = token_for(&user);
    let app = setup_test_app(pool);

    // As a teacher, /leads is off limits.
    let response = app
        .clone()
        .oneshot(request("GET", "/leads", &user_token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Reassign to sales, with a sales id.
    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/users/{}", user.id),
            &token_for(&admin),
            Some(json!({ "role": "sales", "sales_id": "S-017" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], "sales");
    assert_eq!(body["sales_id"], "S-017");

    let response = app
        .oneshot(request("GET", "/leads", &user_token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_endpoint_fails_closed_without_an_id(pool: PgPool) {
    let admin = create_test_user(
        &pool,
        &generate_unique_email(),
        "pass12345",
        Role::Superadmin,
        true,
    )
    .await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(request(
            "POST",
            "/users/delete",
            &token_for(&admin),
            Some(json!({})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_removes_identity_and_profile_together(pool: PgPool) {
    let admin = create_test_user(
        &pool,
        &generate_unique_email(),
        "pass12345",
        Role::Superadmin,
        true,
    )
    .await;
    let doomed =
        create_test_user(&pool, &generate_unique_email(), "pass12345", Role::Teacher, true).await;

    let app = setup_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/users/delete",
            &token_for(&admin),
            Some(json!({ "id": doomed.id })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let identities: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM auth_identities WHERE id = $1")
            .bind(doomed.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE id = $1")
        .bind(doomed.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(identities, 0);
    assert_eq!(profiles, 0);

    // Deleting the same id again reports not-found.
    let response = app
        .oneshot(request(
            "POST",
            "/users/delete",
            &token_for(&admin),
            Some(json!({ "id": doomed.id })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
