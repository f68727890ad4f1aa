//! Saved-project store: ownership-tagged CRUD over the `projects` table
//!
//! Ownership is the only access-control axis. Every read of fragment
//! contents and every mutation is keyed on `id` AND `owner_id` in a single
//! statement, so the ownership check and the act are atomic: a project
//! deleted concurrently between a caller's check and its mutation simply
//! makes the conditional statement touch zero rows.

use common::error::{StoreError, StoreResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewProject, Project, ProjectSummary};

const PROJECT_COLUMNS: &str =
    "id, title, description, html_code, css_code, js_code, created_at, owner_id";

/// Repository over the `projects` table.
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new project snapshot. Fragments are stored verbatim;
    /// title validation happens at the handler.
    pub async fn create(&self, new_project: &NewProject) -> StoreResult<Project> {
        info!("Saving project for owner: {}", new_project.owner_id);

        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (id, title, description, html_code, css_code, js_code, created_at, owner_id)
            VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, now(), $6)
            RETURNING {PROJECT_COLUMNS}
            "#,
        ))
        .bind(&new_project.title)
        .bind(&new_project.description)
        .bind(&new_project.html_code)
        .bind(&new_project.css_code)
        .bind(&new_project.js_code)
        .bind(new_project.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Query)?;

        Ok(project)
    }

    /// List the caller's own projects, newest first. Summary projection
    /// only: fragments are never included in bulk listings.
    pub async fn list_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<ProjectSummary>> {
        let summaries = sqlx::query_as::<_, ProjectSummary>(
            r#"
            SELECT id, title, description, created_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Query)?;

        Ok(summaries)
    }

    /// Fetch a project with its fragments, but only for its owner.
    ///
    /// `None` covers both "does not exist" and "exists but is not yours";
    /// the caller cannot tell them apart, and must not.
    pub async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> StoreResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE id = $1 AND owner_id = $2
            "#,
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::Query)?;

        Ok(project)
    }

    /// Rename or re-describe a project. Only title and description are
    /// mutable; fragments and owner are fixed at creation. A payload that
    /// omits the description leaves the stored one untouched.
    pub async fn update_meta(
        &self,
        id: Uuid,
        owner_id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> StoreResult<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects
            SET title = $3, description = COALESCE($4, description)
            WHERE id = $1 AND owner_id = $2
            RETURNING {PROJECT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::Query)?;

        Ok(project)
    }

    /// Delete a project permanently. Returns whether a row was removed;
    /// `false` covers absent and foreign-owned alike.
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM projects
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::Query)?;

        if result.rows_affected() > 0 {
            info!("Deleted project {}", id);
        }

        Ok(result.rows_affected() > 0)
    }
}
