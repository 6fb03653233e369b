// src/repo/mod.rs

//! Query functions, one module per aggregate.
//!
//! Every function takes a `&mut SqliteConnection` so callers decide the
//! transaction scope: handlers pass their request transaction, start-up code
//! passes a pooled connection.

pub mod chapters;
pub mod questions;
pub mod quizzes;
pub mod scores;
pub mod subjects;
pub mod users;

/// Whether a database error is a UNIQUE constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
