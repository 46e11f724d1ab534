//! Error types for the Local Library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Error details attached to the response so the error page layer can render them.
///
/// `detail` carries the full error text and is only shown in development mode.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
    pub detail: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound(_) => "Not Found".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal Server Error".to_string()
            }
        };

        let page = ErrorPage {
            status,
            message: message.clone(),
            detail: self.to_string(),
        };

        let mut response = (status, message).into_response();
        response.extensions_mut().insert(page);
        response
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_with_page_details() {
        let response = AppError::NotFound("Book 42 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.message, "Not Found");
        assert_eq!(page.detail, "Not found: Book 42 not found");
    }

    #[test]
    fn bad_request_shows_its_message() {
        let response = AppError::BadRequest("Failed to deserialize form body".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.message, "Failed to deserialize form body");
    }

    #[test]
    fn database_errors_hide_their_cause() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.message, "Internal Server Error");
        assert!(page.detail.contains("pool timed out"));
    }
}
