use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use serde::Serialize;

use crate::error::ServiceError;
use crate::http::codec::{encode_response, response_encoding};

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::UnknownField(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Decode => StatusCode::BAD_REQUEST,
        ServiceError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ServiceError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders `err` using the request's negotiated response encoding. Kept as
/// a free function (rather than `IntoResponse` on `ServiceError`) because
/// picking the encoding needs the request's `Accept` header.
pub fn render_error(headers: &HeaderMap, err: ServiceError) -> Response {
    let status = status_for(&err);
    tracing::warn!(%err, %status, "request failed");
    let body = ErrorBody { message: err.to_string() };
    encode_response(response_encoding(headers), status, &body)
}

/// The fixed body the panic-recovery middleware answers with, independent
/// of content negotiation (a panic means we can't trust much else).
pub fn panic_response() -> Response {
    let body = ErrorBody {
        message: "oops, something bad happened".to_string(),
    };
    encode_response(crate::http::codec::Encoding::Json, StatusCode::INTERNAL_SERVER_ERROR, &body)
}
