use crate::{api::validate::ValidationError, storage::StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

pub const PROFILE_NOT_FOUND: &str = "No result found";
pub const USER_NOT_FOUND: &str = "No matching user found";
pub const DUPLICATE_ENTRY: &str = "Failed to add entry: duplicate username or email";
pub const DATABASE_ERROR: &str = "Database error";

/// Request failures shared by all handlers.
#[derive(Debug)]
pub enum ApiError {
    Invalid(ValidationError),
    ProfileNotFound,
    Store(StoreError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::ProfileNotFound
            | Self::Store(StoreError::UserNotFound | StoreError::Constraint) => {
                StatusCode::NOT_FOUND
            }
            Self::Store(StoreError::Duplicate) => StatusCode::CONFLICT,
            Self::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    /// Database details are logged, never returned to the client.
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Invalid(err) => err.to_string(),
            Self::ProfileNotFound => PROFILE_NOT_FOUND.to_string(),
            Self::Store(StoreError::UserNotFound | StoreError::Constraint) => {
                USER_NOT_FOUND.to_string()
            }
            Self::Store(StoreError::Duplicate) => DUPLICATE_ENTRY.to_string(),
            Self::Store(StoreError::Database(err)) => {
                error!("Database error: {err}");
                DATABASE_ERROR.to_string()
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(ValidationError::InvalidZipcode),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::ProfileNotFound, StatusCode::NOT_FOUND),
            (
                ApiError::from(StoreError::UserNotFound),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::from(StoreError::Constraint), StatusCode::NOT_FOUND),
            (ApiError::from(StoreError::Duplicate), StatusCode::CONFLICT),
            (
                ApiError::from(StoreError::Database(sqlx::Error::PoolTimedOut)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err:?}");
            assert_eq!(err.into_response().status(), status);
        }
    }
}
