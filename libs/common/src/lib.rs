//! Shared infrastructure for the Codepad backend
//!
//! This crate holds the pieces the editor service needs but that are not
//! specific to any one feature: the PostgreSQL connection pool, the Redis
//! pool backing the session store, and the persistence error taxonomy.

pub mod cache;
pub mod database;
pub mod error;
