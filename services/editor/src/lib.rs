//! Codepad editor backend
//!
//! A small service behind the three-pane code editor: identities with
//! hashed credentials, cookie-carried sessions in a shared Redis store,
//! owner-scoped CRUD for saved projects, and sandboxed preview composition.

pub mod error;
pub mod middleware;
pub mod models;
pub mod preview;
pub mod repositories;
pub mod routes;
pub mod session;
pub mod validation;

use crate::repositories::{ProjectRepository, UserRepository};
use crate::session::SessionManager;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub projects: ProjectRepository,
    pub sessions: SessionManager,
}
