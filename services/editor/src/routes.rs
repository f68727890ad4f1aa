//! Editor service routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{clear_session_cookie, require_session, session_cookie},
    models::{NewProject, NewUser, Project, SessionUser},
    preview,
    session::SESSION_COOKIE,
    validation,
    AppState,
};

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Project creation payload. Fragments default to empty and are stored
/// verbatim, whatever they contain.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "htmlCode", default)]
    pub html_code: String,
    #[serde(rename = "cssCode", default)]
    pub css_code: String,
    #[serde(rename = "jsCode", default)]
    pub js_code: String,
}

/// Metadata update payload; fragments have no update path.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
}

/// Create the router for the editor service.
pub fn create_router(state: AppState) -> Router {
    let guarded = Router::new()
        .route("/save", post(save))
        .route("/savedCode", get(list_saved))
        .route(
            "/savedCode/:id",
            get(get_saved).patch(update_saved).delete(delete_saved),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/preview", post(preview::preview))
        .merge(guarded)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "editor-service"
    }))
}

/// Create a new identity.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_name(&payload.name).map_err(ApiError::Validation)?;
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;

    let user = state
        .users
        .create(&payload)
        .await?
        .ok_or(ApiError::DuplicateEmail)?;

    info!("Registered new user: {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": user.summary(),
        })),
    ))
}

/// Authenticate and issue a session.
///
/// An unknown email is `NotFound`; a known email with a wrong secret is
/// `InvalidCredential`. On success the session token rides back in the
/// HTTP-only `sid` cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or(ApiError::NotFound)?;

    if !state.users.verify_password(&user, &payload.password) {
        return Err(ApiError::InvalidCredential);
    }

    // The session holds a snapshot of the identity, not a live reference
    let snapshot = SessionUser::from(&user);
    let token = state.sessions.create_session(&snapshot).await?;

    info!("User logged in: {}", user.id);

    Ok((
        jar.add(session_cookie(token)),
        Json(json!({
            "message": "User logged in successfully",
            "user": user.summary(),
        })),
    ))
}

/// Destroy the current session, if any. Idempotent: logging out without a
/// session, or twice in a row, succeeds.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<impl IntoResponse> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value()).await?;
    }

    Ok((
        jar.remove(clear_session_cookie()),
        Json(json!({ "message": "Logged out successfully" })),
    ))
}

/// Save a new project under the calling session's identity.
pub async fn save(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Json(payload): Json<SaveRequest>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_title(&payload.title).map_err(ApiError::Validation)?;

    let project = state
        .projects
        .create(&NewProject {
            owner_id: user.id,
            title: payload.title,
            description: payload.description,
            html_code: payload.html_code,
            css_code: payload.css_code,
            js_code: payload.js_code,
        })
        .await?;

    Ok(Json(json!({
        "message": "Code saved successfully",
        "code": project,
    })))
}

/// List the caller's own projects, newest first. Never crosses owners and
/// never includes fragments.
pub async fn list_saved(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> ApiResult<impl IntoResponse> {
    let summaries = state.projects.list_for_owner(user.id).await?;
    Ok(Json(summaries))
}

/// Fetch one project's fragments. Absent and foreign-owned projects are
/// both reported as not found.
pub async fn get_saved(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let project: Project = state
        .projects
        .find_owned(id, user.id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(json!({
        "htmlCode": project.html_code,
        "cssCode": project.css_code,
        "jsCode": project.js_code,
        "title": project.title,
        "userId": project.owner_id,
    })))
}

/// Rename or re-describe a project. The ownership check and the update run
/// as one conditional statement.
pub async fn update_saved(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequest>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_title(&payload.title).map_err(ApiError::Validation)?;

    let project = state
        .projects
        .update_meta(id, user.id, &payload.title, payload.description.as_deref())
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(json!({
        "message": "Code updated successfully",
        "code": project,
    })))
}

/// Delete a project permanently.
pub async fn delete_saved(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.projects.delete(id, user.id).await?;
    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({ "message": "Code deleted successfully" })))
}
