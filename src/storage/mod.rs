//! Persistence gateway for profiles and projects.
//!
//! Handlers only see the [`Store`] trait; the production adapter lives in
//! [`postgres`]. Every operation acquires its own connection and releases it on
//! all exit paths, so no handle is shared between requests.

pub mod postgres;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// SQLSTATE raised by `PostgreSQL` on unique constraint violations.
const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE raised by `PostgreSQL` on foreign key violations.
const SQLSTATE_FOREIGN_KEY_VIOLATION: &str = "23503";

/// A validated user ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub zipcode: String,
}

/// A validated project submission; `username` is resolved to an id by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub project: String,
    pub username: String,
}

/// Public profile fields returned by `GET /profile/{id}/`.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub email: String,
    pub zipcode: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The username or email is already taken.
    #[error("duplicate username or email")]
    Duplicate,
    /// No user matches the submitted username.
    #[error("no matching user found")]
    UserNotFound,
    /// The referenced user disappeared before the project row was written.
    #[error("referenced user does not exist")]
    Constraint,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user and return its generated id.
    async fn create_user(&self, user: &NewUser) -> Result<i64, StoreError>;

    /// Fetch a profile by id, `None` when no row matches.
    async fn get_user(&self, id: i64) -> Result<Option<Profile>, StoreError>;

    /// Attach a project to the user named in `project` and return the project id.
    async fn add_project(&self, project: &NewProject) -> Result<i64, StoreError>;

    /// Check that a connection can be acquired and answers.
    async fn ping(&self) -> Result<(), StoreError>;
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, SQLSTATE_UNIQUE_VIOLATION)
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, SQLSTATE_FOREIGN_KEY_VIOLATION)
}

fn has_sqlstate(err: &sqlx::Error, sqlstate: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == sqlstate),
        _ => false,
    }
}
