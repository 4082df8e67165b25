//! Error types for the visualizer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Result type for visualizer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a graph or driving a session.
#[derive(Debug, Error)]
pub enum Error {
    /// A line that is not `src, dest, weight`
    #[error("line {line}: expected `src, dest, weight`, got {content:?}")]
    MalformedLine { line: usize, content: String },

    /// A node name with characters outside `[A-Za-z0-9]`
    #[error("line {line}: invalid node name {name:?}")]
    InvalidNodeName { line: usize, name: String },

    /// A weight that is not a signed integer
    #[error("line {line}: invalid weight {weight:?}")]
    InvalidWeight { line: usize, weight: String },

    /// No edges at all
    #[error("graph has no edges")]
    EmptyGraph,

    /// The source is not a vertex of the graph
    #[error("source {0:?} is not a vertex of the graph")]
    UnknownSource(String),

    /// The graph has no source to run from
    #[error("graph has no source vertex")]
    NoSource,

    /// More vertices or edges than a session replays
    #[error("graph too large: {count} {kind}, at most {limit} allowed")]
    GraphTooLarge {
        kind: &'static str,
        count: usize,
        limit: usize,
    },

    /// Stepping before a run exists
    #[error("no run started")]
    NotStarted,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MalformedLine { .. }
            | Error::InvalidNodeName { .. }
            | Error::InvalidWeight { .. }
            | Error::EmptyGraph
            | Error::UnknownSource(_)
            | Error::NoSource
            | Error::GraphTooLarge { .. } => StatusCode::BAD_REQUEST,
            Error::NotStarted => StatusCode::CONFLICT,
            Error::Config(_) | Error::Io(_) | Error::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_bad_requests() {
        let err = Error::InvalidWeight {
            line: 3,
            weight: "x".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "line 3: invalid weight \"x\"");
        assert_eq!(Error::EmptyGraph.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::NoSource.status_code(), StatusCode::BAD_REQUEST);

        let err = Error::GraphTooLarge {
            kind: "edges",
            count: 300,
            limit: 256,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "graph too large: 300 edges, at most 256 allowed");
    }

    #[test]
    fn stepping_early_is_a_conflict() {
        assert_eq!(Error::NotStarted.status_code(), StatusCode::CONFLICT);
        assert_eq!(Error::NotStarted.into_response().status(), StatusCode::CONFLICT);
    }
}
