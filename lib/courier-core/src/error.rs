//! Error types for courier.

use derive_more::{Display, Error, From};

use crate::ResponseMeta;

// ============================================================================
// API Error
// ============================================================================

/// The closed set of failures a courier request can end in.
///
/// Every outcome other than success maps onto exactly one variant, whichever
/// calling convention or client surface was used.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ApiError {
    /// The transport failed, or no body was received where one was expected.
    #[display("{description}")]
    Unknown {
        /// Description of the underlying cause.
        description: String,
    },

    /// The transport answered with something that is not an HTTP response.
    #[display("invalid response: no HTTP status received")]
    InvalidResponse {
        /// Whatever response metadata the transport reported.
        response: Option<ResponseMeta>,
    },

    /// The HTTP status code is outside `200..=300`.
    #[display("request failed with status {status}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
    },

    /// The body could not be decoded into the requested type.
    #[display("failed to deserialize response into `{type_name}`")]
    FailedDeserialization {
        /// Short name of the requested type.
        type_name: String,
    },

    /// The request descriptor could not be rendered into a transport request.
    #[display("invalid request")]
    InvalidRequest,
}

impl ApiError {
    /// Create an unknown error from a description.
    #[must_use]
    pub fn unknown(description: impl Into<String>) -> Self {
        Self::Unknown {
            description: description.into(),
        }
    }

    /// Create a deserialization failure for the given type name.
    #[must_use]
    pub fn failed_deserialization(type_name: impl Into<String>) -> Self {
        Self::FailedDeserialization {
            type_name: type_name.into(),
        }
    }

    /// Returns the HTTP status code if the request failed on status.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns the reported response metadata of an invalid response.
    #[must_use]
    pub const fn response(&self) -> Option<&ResponseMeta> {
        match self {
            Self::InvalidResponse { response } => response.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if the request could not be rendered.
    #[must_use]
    pub const fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest)
    }

    /// Returns `true` if decoding the body failed.
    #[must_use]
    pub const fn is_deserialization(&self) -> bool {
        matches!(self, Self::FailedDeserialization { .. })
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        Self::unknown(error.to_string())
    }
}

impl From<RenderError> for ApiError {
    fn from(_: RenderError) -> Self {
        Self::InvalidRequest
    }
}

// ============================================================================
// Transport Error
// ============================================================================

/// Failure reported by a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TransportError {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    Timeout,

    /// The rendered request could not be expressed by the transport.
    #[display("malformed request: {_0}")]
    Malformed(#[error(not(source))] String),
}

impl TransportError {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create a malformed request error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

// ============================================================================
// Render / Decode Errors
// ============================================================================

/// Why a [`Request`](crate::Request) could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum RenderError {
    /// The target did not resolve to a valid URL.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// The body could not be encoded and the request asked for a strict body.
    #[display("unencodable body: {_0}")]
    #[from(skip)]
    UnencodableBody(#[error(not(source))] String),
}

/// JSON decoding failure with path context.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("JSON deserialization error at '{path}': {message}")]
pub struct DecodeError {
    /// JSON path to the error (e.g., "results[3].url").
    pub path: String,
    /// Error message.
    pub message: String,
}
