//! HTTP error mapping
//!
//! Authorization failures never reach this module; they are redirects. What
//! remains is terminal: the request fails with a plain-text body.

use crate::contract::DashboardError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Terminal error response for a single request
#[derive(Debug)]
pub struct Problem {
    pub status: StatusCode,
    pub detail: String,
}

impl Problem {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        (self.status, self.detail).into_response()
    }
}

impl From<DashboardError> for Problem {
    fn from(error: DashboardError) -> Self {
        map_domain_error(error)
    }
}

/// Map dashboard errors to responses, logging the diagnostic
pub fn map_domain_error(error: DashboardError) -> Problem {
    match error {
        // The raw template error is the response body
        DashboardError::Render(message) => {
            tracing::error!(error = %message, "Failed to render page");
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
        DashboardError::InvalidSubmission(message) => {
            tracing::debug!(error = %message, "Rejected settings submission");
            Problem::new(StatusCode::BAD_REQUEST, format!("Malformed settings submission: {message}"))
        }
        DashboardError::Directory(e) => {
            tracing::error!(error = %e, "Guild directory lookup failed");
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Guild directory unavailable")
        }
        other => {
            tracing::error!(error = %other, "Unexpected dashboard error");
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
