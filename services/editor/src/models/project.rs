//! Saved project model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Saved project entity: a titled snapshot of the three code fragments.
///
/// `owner_id` is set at creation and can never be reassigned. The fragments
/// are stored verbatim and are immutable after creation; only `title` and
/// `description` have an update path.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "htmlCode")]
    pub html_code: String,
    #[serde(rename = "cssCode")]
    pub css_code: String,
    #[serde(rename = "jsCode")]
    pub js_code: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "userId")]
    pub owner_id: Uuid,
}

/// Creation payload for a project, owner already resolved from the session.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub html_code: String,
    pub css_code: String,
    pub js_code: String,
}

/// Listing projection: metadata only, never the fragments.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}
