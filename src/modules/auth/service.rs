use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::authz::Role;
use crate::config::jwt::JwtConfig;
use crate::modules::users::model::Profile;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequestDto};

pub struct AuthService;

impl AuthService {
    /// Register a new identity and its profile in one transaction.
    ///
    /// The profile is born unapproved: until an admin flips `is_approved`,
    /// the guard keeps the actor on the pending-approval page.
    #[instrument(skip(db, dto))]
    pub async fn register(db: &PgPool, dto: RegisterRequestDto) -> Result<Profile, AppError> {
        let role = dto.role.unwrap_or(Role::Teacher);
        if role.is_admin() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Administrator accounts cannot be self-registered"
            )));
        }

        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM auth_identities WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email already registered"
            )));
        }

        let password_hash = hash_password(&dto.password)?;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        let (identity_id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO auth_identities (email, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(&dto.email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        let profile = sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles (id, email, full_name, role, is_approved)
             VALUES ($1, $2, $3, $4, FALSE)
             RETURNING id, email, full_name, role, is_approved, sales_id, created_at",
        )
        .bind(identity_id)
        .bind(&dto.email)
        .bind(&dto.full_name)
        .bind(role)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(profile)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct IdentityRow {
            id: Uuid,
            email: String,
            password_hash: String,
        }

        let identity = sqlx::query_as::<_, IdentityRow>(
            "SELECT id, email, password_hash FROM auth_identities WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &identity.password_hash)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, email, full_name, role, is_approved, sales_id, created_at
             FROM profiles WHERE id = $1",
        )
        .bind(identity.id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::internal(anyhow::anyhow!("Profile record missing")))?;

        let access_token = create_access_token(identity.id, &identity.email, jwt_config)?;

        Ok(LoginResponse {
            access_token,
            profile,
        })
    }
}
