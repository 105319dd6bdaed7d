use std::sync::Arc;

use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::db::run_migrations;
use crate::session::{PgProfileStore, Sessions};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub sessions: Arc<Sessions>,
}

pub async fn init_app_state() -> AppState {
    let db = init_db_pool().await;
    run_migrations(&db).await;

    let sessions = Arc::new(Sessions::new(Arc::new(PgProfileStore::new(db.clone()))));

    AppState {
        db,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        sessions,
    }
}
