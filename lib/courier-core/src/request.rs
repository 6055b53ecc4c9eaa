//! Request descriptors.
//!
//! A [`Request`] describes what to send: target, method, query parameters,
//! header fields and an optional JSON body. It is immutable once built and is
//! turned into a transport-ready [`RenderedRequest`] by [`Request::render`].
//!
//! # Example
//!
//! ```
//! use courier_core::{Method, Request};
//!
//! let request = Request::get("https://pokeapi.co/api/v2/pokemon")
//!     .query("limit", "100")
//!     .header("Accept", "application/json")
//!     .build();
//!
//! let rendered = request.render().expect("renderable");
//! assert_eq!(rendered.method(), Method::Get);
//! assert_eq!(rendered.url().as_str(), "https://pokeapi.co/api/v2/pokemon?limit=100");
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use url::Url;

use crate::{Endpoint, Method, RenderError, RenderedRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    Encoded(Bytes),
    Unencodable(String),
}

/// An immutable description of an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    target: Result<Url, url::ParseError>,
    method: Method,
    parameters: HashMap<String, String>,
    headers: HashMap<String, String>,
    body: Option<Body>,
    strict_body: bool,
}

impl Request {
    /// A GET request to `target`, without parameters, headers or body.
    #[must_use]
    pub fn new(target: impl Endpoint) -> Self {
        Self::builder(Method::Get, target).build()
    }

    /// Creates a new [`RequestBuilder`].
    ///
    /// The endpoint is resolved immediately; a resolution failure is kept and
    /// reported when the request is rendered.
    #[must_use]
    pub fn builder(method: Method, target: impl Endpoint) -> RequestBuilder {
        RequestBuilder::new(method, target.url())
    }

    /// Shorthand for a GET [`RequestBuilder`].
    #[must_use]
    pub fn get(target: impl Endpoint) -> RequestBuilder {
        Self::builder(Method::Get, target)
    }

    /// Shorthand for a POST [`RequestBuilder`].
    #[must_use]
    pub fn post(target: impl Endpoint) -> RequestBuilder {
        Self::builder(Method::Post, target)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Resolved target URL, or why it could not be resolved.
    ///
    /// # Errors
    ///
    /// Returns the parse error of an unresolvable target.
    pub fn target(&self) -> Result<&Url, url::ParseError> {
        self.target.as_ref().map_err(Clone::clone)
    }

    /// Query parameters.
    #[must_use]
    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    /// Header fields.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Whether a body was supplied (encodable or not).
    #[must_use]
    pub const fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Render into a transport-ready request.
    ///
    /// Query parameters, when any are given, replace the target's own query.
    /// A body that could not be encoded is dropped (the request is sent
    /// without one) unless [`RequestBuilder::strict_body`] was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is not a valid URL, or if the body
    /// could not be encoded and the request is strict about it.
    pub fn render(&self) -> Result<RenderedRequest, RenderError> {
        let mut url = self.target.clone()?;

        if !self.parameters.is_empty() {
            url.set_query(None);
            let mut query = url.query_pairs_mut();
            for (name, value) in &self.parameters {
                query.append_pair(name, value);
            }
        }

        let body = match &self.body {
            None => None,
            Some(Body::Encoded(bytes)) => Some(bytes.clone()),
            Some(Body::Unencodable(reason)) if self.strict_body => {
                return Err(RenderError::UnencodableBody(reason.clone()));
            }
            Some(Body::Unencodable(reason)) => {
                tracing::warn!(%url, %reason, "request body could not be encoded, sending without body");
                None
            }
        };

        Ok(RenderedRequest::new(
            self.method,
            url,
            self.headers.clone(),
            body,
        ))
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    target: Result<Url, url::ParseError>,
    method: Method,
    parameters: HashMap<String, String>,
    headers: HashMap<String, String>,
    body: Option<Body>,
    strict_body: bool,
}

impl RequestBuilder {
    fn new(method: Method, target: Result<Url, url::ParseError>) -> Self {
        Self {
            target,
            method,
            parameters: HashMap::new(),
            headers: HashMap::new(),
            body: None,
            strict_body: false,
        }
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Sets multiple query parameters.
    #[must_use]
    pub fn parameters(mut self, parameters: impl IntoIterator<Item = (String, String)>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Sets a header. Names are case-insensitive: a later value for the same
    /// name replaces the earlier one, spelled as given last.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        for (name, value) in headers {
            self.set_header(name, value);
        }
        self
    }

    fn set_header(&mut self, name: String, value: String) {
        self.headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value);
    }

    /// Sets a JSON body.
    ///
    /// The value is encoded right away. No `Content-Type` header is added.
    #[must_use]
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.body = Some(match crate::to_json(value) {
            Ok(bytes) => Body::Encoded(bytes),
            Err(err) => Body::Unencodable(err.to_string()),
        });
        self
    }

    /// Fail rendering instead of dropping a body that could not be encoded.
    #[must_use]
    pub fn strict_body(mut self) -> Self {
        self.strict_body = true;
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            target: self.target,
            method: self.method,
            parameters: self.parameters,
            headers: self.headers,
            body: self.body,
            strict_body: self.strict_body,
        }
    }
}
