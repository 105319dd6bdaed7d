#![allow(dead_code)]

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use tutorium::authz::Role;
use tutorium::config::cors::CorsConfig;
use tutorium::config::jwt::JwtConfig;
use tutorium::db::actor_tx;
use tutorium::router::init_router;
use tutorium::session::{PgProfileStore, Sessions};
use tutorium::state::AppState;
use tutorium::utils::jwt::create_access_token;
use tutorium::utils::password::hash_password;

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub fn test_state(pool: PgPool) -> AppState {
    dotenvy::dotenv().ok();
    AppState {
        db: pool.clone(),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        sessions: Arc::new(Sessions::new(Arc::new(PgProfileStore::new(pool)))),
    }
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    init_router(test_state(pool))
}

/// Insert an identity + profile pair the way registration does.
pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    role: Role,
    approved: bool,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO auth_identities (email, password_hash) VALUES ($1, $2) RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO profiles (id, email, full_name, role, is_approved)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(email)
    .bind("Test User")
    .bind(role)
    .bind(approved)
    .execute(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

/// Bearer token for a test user, minted directly with the same config the
/// app reads.
pub fn token_for(user: &TestUser) -> String {
    dotenvy::dotenv().ok();
    create_access_token(user.id, &user.email, &JwtConfig::from_env()).unwrap()
}

/// Insert a student owned by `manager`. Goes through an actor-scoped
/// transaction because the students table forces row security even on
/// fixtures.
pub async fn insert_student(pool: &PgPool, manager: &TestUser, full_name: &str) -> Uuid {
    let mut tx = actor_tx(pool, manager.id).await.unwrap();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO students (full_name, manager_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(full_name)
    .bind(manager.id)
    .fetch_one(&mut *tx)
    .await
    .unwrap();

    tx.commit().await.unwrap();
    id
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
