//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use pvedash_domain::error::ParseError;

/// JSON error body, same shape as the management backend's.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps a malformed path parameter to `400 Bad Request`.
#[derive(Debug)]
pub struct HttpError(ParseError);

impl From<ParseError> for HttpError {
    fn from(err: ParseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.0, "rejecting request");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
