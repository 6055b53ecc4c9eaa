//! Response classification.
//!
//! Turns the raw [`Outcome`] of a transport exchange into either a success
//! payload or an [`ApiError`]. The checks run in a fixed order, which is what
//! breaks ties between outcomes that would match more than one error:
//!
//! 1. a transport error → [`ApiError::Unknown`] with the error's description
//! 2. no HTTP status → [`ApiError::InvalidResponse`]
//! 3. status outside `200..=300` → [`ApiError::RequestFailed`]
//! 4. no body → [`ApiError::Unknown`] (`"No data received"`) when a body is
//!    required ([`classify_data`]), success otherwise ([`classify_empty`])
//! 5. success
//!
//! Decoding the body into a model is a separate stage, [`decode`].
//!
//! Every function here is pure: the same outcome always classifies the same way.

use std::ops::RangeInclusive;

use bytes::Bytes;

use crate::{ApiError, Received, ResponseMeta, TransportError, short_type_name};

/// Status codes treated as success. Note that 300 is included.
pub const ACCEPTED_STATUS: RangeInclusive<u16> = 200..=300;

/// Description of the error reported when a required body is missing.
pub const NO_DATA_RECEIVED: &str = "No data received";

/// Everything a transport exchange produced: body, response metadata, error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    body: Option<Bytes>,
    response: Option<ResponseMeta>,
    error: Option<TransportError>,
}

impl Outcome {
    /// Creates an outcome from its three parts.
    #[must_use]
    pub const fn new(
        body: Option<Bytes>,
        response: Option<ResponseMeta>,
        error: Option<TransportError>,
    ) -> Self {
        Self {
            body,
            response,
            error,
        }
    }

    /// An exchange that failed in the transport.
    #[must_use]
    pub const fn failed(error: TransportError) -> Self {
        Self::new(None, None, Some(error))
    }

    /// An exchange that produced a response.
    #[must_use]
    pub fn received(received: Received) -> Self {
        let (body, response) = received.into_parts();
        Self::new(body, response, None)
    }

    /// Body bytes.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Response metadata.
    #[must_use]
    pub const fn response(&self) -> Option<&ResponseMeta> {
        self.response.as_ref()
    }

    /// Transport error.
    #[must_use]
    pub const fn error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }
}

impl From<Result<Received, TransportError>> for Outcome {
    fn from(result: Result<Received, TransportError>) -> Self {
        match result {
            Ok(received) => Self::received(received),
            Err(error) => Self::failed(error),
        }
    }
}

/// Checks 1 to 3, returning the body (if any) of an accepted response.
///
/// # Errors
///
/// Returns the first failing check as an [`ApiError`].
pub fn classify(outcome: &Outcome) -> Result<Option<Bytes>, ApiError> {
    if let Some(error) = &outcome.error {
        return Err(ApiError::from(error.clone()));
    }

    let Some(status) = outcome.response.as_ref().and_then(ResponseMeta::status) else {
        return Err(ApiError::InvalidResponse {
            response: outcome.response.clone(),
        });
    };

    if !ACCEPTED_STATUS.contains(&status) {
        return Err(ApiError::RequestFailed { status });
    }

    Ok(outcome.body.clone())
}

/// Classify an exchange that must produce a body (GET, raw data, models).
///
/// # Errors
///
/// Returns the classified [`ApiError`]; a missing body is
/// [`ApiError::Unknown`] with [`NO_DATA_RECEIVED`].
pub fn classify_data(outcome: &Outcome) -> Result<Bytes, ApiError> {
    classify(outcome)?.ok_or_else(|| ApiError::unknown(NO_DATA_RECEIVED))
}

/// Classify an exchange whose body is not needed (POST without decoding).
///
/// # Errors
///
/// Returns the classified [`ApiError`]; a missing body is not an error.
pub fn classify_empty(outcome: &Outcome) -> Result<(), ApiError> {
    classify(outcome).map(|_| ())
}

/// Decode a JSON body into `T`.
///
/// # Errors
///
/// Returns [`ApiError::FailedDeserialization`] naming `T` if the bytes are not
/// valid JSON or do not match the shape of `T`.
pub fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    crate::from_json(body).map_err(|err| {
        let type_name = short_type_name::<T>();
        tracing::debug!(%type_name, path = %err.path, message = %err.message, "failed to decode response body");
        ApiError::failed_deserialization(type_name)
    })
}
