use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ServiceError;

/// Which wire format a request/response uses. `Yaml` is the default for
/// both directions; `Json` is selected by an explicit header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Yaml,
    Json,
}

/// Picks the request body's encoding from `Content-Type`. Absent header
/// defaults to YAML; anything naming neither yaml nor json is unsupported.
pub fn request_encoding(headers: &HeaderMap) -> Result<Encoding, ServiceError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Ok(Encoding::Yaml);
    };
    let value = value.to_str().unwrap_or("");
    if value.contains("json") {
        Ok(Encoding::Json)
    } else if value.is_empty() || value.contains("yaml") {
        Ok(Encoding::Yaml)
    } else {
        Err(ServiceError::UnsupportedMediaType)
    }
}

/// Picks the response encoding from `Accept`: JSON if the header mentions
/// it, YAML otherwise (including when the header is absent).
pub fn response_encoding(headers: &HeaderMap) -> Encoding {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.contains("json"))
        .map(|_| Encoding::Json)
        .unwrap_or(Encoding::Yaml)
}

pub fn decode_body<T: DeserializeOwned>(encoding: Encoding, body: &Bytes) -> Result<T, ServiceError> {
    match encoding {
        Encoding::Json => serde_json::from_slice(body).map_err(|_| ServiceError::Decode),
        Encoding::Yaml => serde_yaml::from_slice(body).map_err(|_| ServiceError::Decode),
    }
}

/// Serialises `value` per `encoding` into a full HTTP response with the
/// matching `Content-Type` and the given status.
pub fn encode_response<T: Serialize>(encoding: Encoding, status: StatusCode, value: &T) -> Response {
    let (content_type, body) = match encoding {
        Encoding::Json => ("application/json", serde_json::to_vec(value).ok()),
        Encoding::Yaml => (
            "application/x-yaml",
            serde_yaml::to_string(value).ok().map(String::into_bytes),
        ),
    };
    match body {
        Some(bytes) => {
            let mut response = (status, bytes).into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
            response
        }
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
