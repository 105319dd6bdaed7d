use anyhow::Context;
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};
use crate::modules::users::model::Profile;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;

const STUDENT_COLUMNS: &str =
    "id, full_name, phone, email, tariff_id, manager_id, notes, created_at, updated_at";

/// Student queries. Every function takes a connection from an actor-scoped
/// transaction ([`crate::db::actor_tx`]): the explicit manager filters here
/// are the advisory half of the ownership rule, the row-security policies
/// re-derive the same rule underneath.
pub struct StudentService;

impl StudentService {
    #[instrument(skip(conn, actor, dto))]
    pub async fn create_student(
        conn: &mut PgConnection,
        actor: &Profile,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        // Admins may assign any manager; everyone else owns the record.
        let manager_id = if actor.role.is_admin() {
            dto.manager_id.unwrap_or(actor.id)
        } else {
            actor.id
        };

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (full_name, phone, email, tariff_id, manager_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&dto.full_name)
        .bind(&dto.phone)
        .bind(&dto.email)
        .bind(dto.tariff_id)
        .bind(manager_id)
        .bind(&dto.notes)
        .fetch_one(conn)
        .await
        .context("Failed to insert student")
        .map_err(AppError::database)?;

        Ok(student)
    }

    #[instrument(skip(conn, actor, params))]
    pub async fn list_students(
        conn: &mut PgConnection,
        actor: &Profile,
        params: &PaginationParams,
    ) -> Result<(Vec<Student>, i64), AppError> {
        if actor.role.is_admin() {
            Self::list_all(conn, params).await
        } else {
            Self::list_for_manager(conn, actor.id, params).await
        }
    }

    async fn list_all(
        conn: &mut PgConnection,
        params: &PaginationParams,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&mut *conn)
            .await
            .context("Failed to count students")
            .map_err(AppError::database)?;

        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             ORDER BY full_name
             LIMIT $1 OFFSET $2"
        ))
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(conn)
        .await
        .context("Failed to fetch students")
        .map_err(AppError::database)?;

        Ok((students, total))
    }

    #[instrument(skip(conn, params))]
    pub async fn list_for_manager(
        conn: &mut PgConnection,
        manager_id: Uuid,
        params: &PaginationParams,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE manager_id = $1")
                .bind(manager_id)
                .fetch_one(&mut *conn)
                .await
                .context("Failed to count students")
                .map_err(AppError::database)?;

        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             WHERE manager_id = $1
             ORDER BY full_name
             LIMIT $2 OFFSET $3"
        ))
        .bind(manager_id)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(conn)
        .await
        .context("Failed to fetch students")
        .map_err(AppError::database)?;

        Ok((students, total))
    }

    #[instrument(skip(conn, actor))]
    pub async fn get_student(
        conn: &mut PgConnection,
        actor: &Profile,
        id: Uuid,
    ) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             WHERE id = $1 AND ($2 OR manager_id = $3)"
        ))
        .bind(id)
        .bind(actor.role.is_admin())
        .bind(actor.id)
        .fetch_optional(conn)
        .await
        .context("Failed to fetch student")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(conn, actor, dto))]
    pub async fn update_student(
        conn: &mut PgConnection,
        actor: &Profile,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(&mut *conn, actor, id).await?;

        let full_name = dto.full_name.unwrap_or(existing.full_name);
        let phone = dto.phone.or(existing.phone);
        let email = dto.email.or(existing.email);
        let tariff_id = dto.tariff_id.or(existing.tariff_id);
        let notes = dto.notes.or(existing.notes);

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET full_name = $2, phone = $3, email = $4, tariff_id = $5, notes = $6,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&full_name)
        .bind(&phone)
        .bind(&email)
        .bind(tariff_id)
        .bind(&notes)
        .fetch_one(conn)
        .await
        .context("Failed to update student")
        .map_err(AppError::database)?;

        Ok(student)
    }

    #[instrument(skip(conn, actor))]
    pub async fn delete_student(
        conn: &mut PgConnection,
        actor: &Profile,
        id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM students WHERE id = $1 AND ($2 OR manager_id = $3)",
        )
        .bind(id)
        .bind(actor.role.is_admin())
        .bind(actor.id)
        .execute(conn)
        .await
        .context("Failed to delete student")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}
