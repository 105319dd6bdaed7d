mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use sqlx::PgPool;
use tower::ServiceExt;

use common::{create_test_user, generate_unique_email, setup_test_app, token_for};
use tutorium::authz::Role;

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[sqlx::test(migrations = "./migrations")]
async fn unauthenticated_protected_request_redirects_to_login(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app.oneshot(get("/students", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_paths_still_require_authentication(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app.oneshot(get("/no-such-page", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
}

#[sqlx::test(migrations = "./migrations")]
async fn unapproved_actor_is_redirected_to_pending_approval(pool: PgPool) {
    let user =
        create_test_user(&pool, &generate_unique_email(), "pass12345", Role::Teacher, false)
            .await;
    let token = token_for(&user);
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(get("/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/pending-approval");

    // The pending page itself is reachable.
    let response = app
        .oneshot(get("/auth/pending-approval", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn approved_actor_bounces_off_pending_and_login_pages(pool: PgPool) {
    let user =
        create_test_user(&pool, &generate_unique_email(), "pass12345", Role::Teacher, true)
            .await;
    let token = token_for(&user);
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(get("/auth/pending-approval", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app.oneshot(get("/auth/login", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[sqlx::test(migrations = "./migrations")]
async fn sales_actor_is_forbidden_on_the_teaching_student_namespace(pool: PgPool) {
    let user =
        create_test_user(&pool, &generate_unique_email(), "pass12345", Role::Sales, true).await;
    let token = token_for(&user);
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(get("/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/403");

    // Their own namespace works.
    let response = app
        .oneshot(get("/sales/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn teaching_actor_reaches_students_but_not_sales_routes(pool: PgPool) {
    let user =
        create_test_user(&pool, &generate_unique_email(), "pass12345", Role::Teacher, true)
            .await;
    let token = token_for(&user);
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(get("/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/leads", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/403");
}

#[sqlx::test(migrations = "./migrations")]
async fn superadmin_passes_every_namespace(pool: PgPool) {
    let user = create_test_user(
        &pool,
        &generate_unique_email(),
        "pass12345",
        Role::Superadmin,
        true,
    )
    .await;
    let token = token_for(&user);
    let app = setup_test_app(pool);

    for uri in [
        "/",
        "/users",
        "/students",
        "/tariffs",
        "/leads",
        "/reports/summary",
        "/settings",
        "/sales/students",
    ] {
        let response = app.clone().oneshot(get(uri, Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri {uri}");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn token_for_a_deleted_identity_defers_instead_of_failing_open(pool: PgPool) {
    let user =
        create_test_user(&pool, &generate_unique_email(), "pass12345", Role::Teacher, true)
            .await;
    let token = token_for(&user);

    // Remove the profile out from under the (still valid) token.
    sqlx::query("DELETE FROM auth_identities WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool);
    let response = app.oneshot(get("/students", Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[sqlx::test(migrations = "./migrations")]
async fn logout_clears_the_session(pool: PgPool) {
    let user =
        create_test_user(&pool, &generate_unique_email(), "pass12345", Role::Teacher, true)
            .await;
    let token = token_for(&user);
    let state = common::test_state(pool);
    let app = tutorium::router::init_router(state.clone());

    // Prime the session cache through the guard.
    let response = app
        .clone()
        .oneshot(get("/students", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.sessions.contains(user.id).await);

    let request = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!state.sessions.contains(user.id).await);
}
