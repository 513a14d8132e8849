use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// AuthError
///
/// The reasons a presented session credential can be rejected. The distinction
/// matters internally (logs, tests), but every variant collapses to the same
/// client-visible "Unauthorized" so a forger learns nothing about which check
/// tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no session credential was presented")]
    MissingToken,
    #[error("session credential signature did not verify")]
    InvalidSignature,
    #[error("session credential has expired")]
    Expired,
    #[error("credential is not an admin-session token")]
    WrongType,
}

/// RepositoryError
///
/// Failure modes of the persistence layer. `Conflict` is reserved for uniqueness
/// violations so callers can implement retry-as-read (bootstrap seeding) or a
/// client-facing 409 (duplicate subscriber); everything else is an opaque
/// database failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("uniqueness conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// is_unique_violation
///
/// True when the underlying driver error is a Postgres uniqueness violation
/// (SQLSTATE 23505). Used to translate raw sqlx errors into
/// `RepositoryError::Conflict` at the repository boundary.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

/// ApiError
///
/// The single error type handlers return. Each variant maps to exactly one
/// client-facing status/body pair; internal detail never crosses the HTTP
/// boundary and is logged at construction or render time instead.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session signing secret is not configured. Every token operation
    /// must abort on this; it is never downgraded to an auth failure.
    #[error("session signing secret is not configured")]
    Configuration,

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Login failed. Unknown email and wrong password are indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A required field was missing or blank. Carries the field name only.
    #[error("{0} is required")]
    Validation(&'static str),

    /// No row matched the requested id. Carries the resource display name.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Uniqueness violation surfaced to the client (e.g. duplicate subscriber).
    #[error("{0}")]
    Conflict(String),

    /// Anything unexpected. `action` is the human phrase for the attempted
    /// operation ("create article"); the cause was already logged.
    #[error("failed to {action}")]
    Internal { action: &'static str },
}

impl ApiError {
    /// internal
    ///
    /// Wraps an unexpected failure, logging the full detail server-side while the
    /// client only ever sees "Failed to <action>".
    pub fn internal(action: &'static str, err: impl std::fmt::Display) -> Self {
        tracing::error!(%err, action, "request failed");
        Self::Internal { action }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(detail) => Self::Conflict(detail),
            RepositoryError::Database(e) => Self::internal("query the database", e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Configuration => {
                tracing::error!("session signing secret is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
            Self::Auth(reason) => {
                tracing::debug!(?reason, "rejected session credential");
                (StatusCode::UNAUTHORIZED, json!({"error": "Unauthorized"}))
            }
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Invalid email or password"}),
            ),
            Self::Validation(field) => (
                StatusCode::BAD_REQUEST,
                json!({"error": format!("{field} is required")}),
            ),
            Self::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                json!({"error": format!("{resource} not found")}),
            ),
            Self::Conflict(detail) => (StatusCode::CONFLICT, json!({"error": detail})),
            Self::Internal { action } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": format!("Failed to {action}")}),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn auth_errors_collapse_to_unauthorized() {
        for reason in [
            AuthError::MissingToken,
            AuthError::InvalidSignature,
            AuthError::Expired,
            AuthError::WrongType,
        ] {
            let (status, body) = render(ApiError::Auth(reason)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, json!({"error": "Unauthorized"}));
        }
    }

    #[tokio::test]
    async fn validation_names_the_field() {
        let (status, body) = render(ApiError::Validation("title")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "title is required"}));
    }

    #[tokio::test]
    async fn not_found_names_the_resource() {
        let (status, body) = render(ApiError::NotFound("Article")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Article not found"}));
    }

    #[tokio::test]
    async fn internal_hides_detail_behind_the_action() {
        let (status, body) = render(ApiError::internal("create article", "pk violation")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to create article"}));
    }

    #[tokio::test]
    async fn missing_secret_is_a_500_not_a_401() {
        let (status, _) = render(ApiError::Configuration).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
