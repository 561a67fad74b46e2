use crate::model::DocumentId;
use thiserror::Error;

/// The error taxonomy shared by the service facade and the HTTP transport.
///
/// The transport layer maps each variant to a status code; the core crate
/// itself never depends on HTTP and only produces these values.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("metadata failed validation: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("'{0}' is not a valid search field")]
    UnknownField(String),

    #[error("document {0} not found")]
    NotFound(DocumentId),

    #[error("content does not match metadata schema")]
    Decode,

    #[error("application/x-yaml is the only supported content-type")]
    UnsupportedMediaType,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("delete is not supported")]
    Unimplemented,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
