//! What a transport hands back.
//!
//! [`Received`] pairs the (optional) body bytes with the (optional)
//! [`ResponseMeta`] describing the response. Neither is interpreted here; the
//! [classifier](crate::classify) decides what they mean.

use std::collections::HashMap;

use bytes::Bytes;
use url::Url;

/// Response metadata reported by a transport.
///
/// A response is only an HTTP response if it carries a status code. Metadata
/// without one (for example, a non-HTTP scheme answered by the transport) is
/// classified as [`ApiError::InvalidResponse`](crate::ApiError::InvalidResponse).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseMeta {
    url: Option<Url>,
    status: Option<u16>,
    headers: HashMap<String, String>,
}

impl ResponseMeta {
    /// Metadata of an HTTP response with the given status code.
    #[must_use]
    pub fn http(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Metadata of a response that has no HTTP status.
    #[must_use]
    pub fn non_http(url: Option<Url>) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }

    /// Sets the URL the response was received from.
    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Adds a response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replaces the response headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// URL the response was received from.
    #[must_use]
    pub const fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// HTTP status code, if this is an HTTP response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Whether the metadata describes an HTTP response.
    #[must_use]
    pub const fn is_http(&self) -> bool {
        self.status.is_some()
    }
}

/// Raw result of a successful transport exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Received {
    body: Option<Bytes>,
    response: Option<ResponseMeta>,
}

impl Received {
    /// Creates a new exchange result.
    #[must_use]
    pub const fn new(body: Option<Bytes>, response: Option<ResponseMeta>) -> Self {
        Self { body, response }
    }

    /// An HTTP response with a status and a body.
    #[must_use]
    pub fn http(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(Some(body.into()), Some(ResponseMeta::http(status)))
    }

    /// Body bytes, if any were received.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Response metadata, if any was received.
    #[must_use]
    pub const fn response(&self) -> Option<&ResponseMeta> {
        self.response.as_ref()
    }

    /// Consume into (body, response).
    #[must_use]
    pub fn into_parts(self) -> (Option<Bytes>, Option<ResponseMeta>) {
        (self.body, self.response)
    }
}
