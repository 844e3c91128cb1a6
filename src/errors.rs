// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Startup failures (config, connectivity) are fatal before the
/// listener opens. Per-request failures are tagged by the stage of row
/// retrieval that failed, which is the only diagnostic exposed to clients.
#[derive(Error, Debug)]
pub enum PostsError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("database unreachable: {0}")]
    ConnectivityError(String),

    #[error("query error: {0}")]
    QueryError(String),

    #[error("scan error: {0}")]
    ScanError(String),

    #[error("rows error: {0}")]
    RowsError(String),
}

impl PostsError {
    /// Short classification written to the `error` field of the response body
    pub fn stage(&self) -> &'static str {
        match self {
            PostsError::ConfigError(_) => "config error",
            PostsError::ConnectivityError(_) => "connectivity error",
            PostsError::QueryError(_) => "query error",
            PostsError::ScanError(_) => "scan error",
            PostsError::RowsError(_) => "rows error",
        }
    }

    /// Underlying driver message, written to the `detail` field
    pub fn detail(&self) -> &str {
        match self {
            PostsError::ConfigError(detail)
            | PostsError::ConnectivityError(detail)
            | PostsError::QueryError(detail)
            | PostsError::ScanError(detail)
            | PostsError::RowsError(detail) => detail,
        }
    }
}

/// Convert PostsError to HTTP response
/// DOCUMENTATION: Every variant is a server-side failure; the body keeps the
/// `{"error": ..., "detail": ...}` shape for all of them
impl ResponseError for PostsError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": self.stage(),
            "detail": self.detail(),
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_stage_tags_are_distinct() {
        let errors = [
            PostsError::QueryError("a".into()),
            PostsError::ScanError("b".into()),
            PostsError::RowsError("c".into()),
        ];
        let tags: Vec<&str> = errors.iter().map(|e| e.stage()).collect();

        assert_eq!(tags, vec!["query error", "scan error", "rows error"]);
    }

    #[actix_rt::test]
    async fn test_error_response_shape() {
        let err = PostsError::RowsError("connection reset by peer".into());
        let resp = err.error_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({"error": "rows error", "detail": "connection reset by peer"})
        );
    }
}
