//! Data models for the editor service

pub mod project;
pub mod session;
pub mod user;

pub use project::{NewProject, Project, ProjectSummary};
pub use session::SessionUser;
pub use user::{NewUser, User};
