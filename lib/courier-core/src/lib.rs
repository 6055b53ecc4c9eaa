//! Core types for the courier HTTP client.
//!
//! This crate holds everything that does not touch the network:
//! - [`Method`] - HTTP method enum
//! - [`Endpoint`] - capability that produces a target URL
//! - [`Request`] and [`RequestBuilder`] - immutable request descriptors
//! - [`RenderedRequest`] - transport-ready form of a request
//! - [`Received`] and [`ResponseMeta`] - what a transport hands back
//! - [`Transport`] - the seam to the networking stack
//! - [`classify`] - the response classifier and decode stage
//! - [`ApiError`] - the closed error taxonomy surfaced to callers

mod body;
pub mod classify;
mod endpoint;
mod error;
mod method;
pub mod prelude;
mod rendered;
mod request;
mod response;
mod transport;
mod type_name;

pub use body::{JSON_CONTENT_TYPE, from_json, to_json};
pub use classify::{Outcome, classify_data, classify_empty, decode};
pub use endpoint::Endpoint;
pub use error::{ApiError, DecodeError, RenderError, TransportError};
pub use method::Method;
pub use rendered::RenderedRequest;
pub use request::{Request, RequestBuilder};
pub use response::{Received, ResponseMeta};
pub use transport::Transport;
pub use type_name::short_type_name;

// Re-export the URL type used throughout the API
pub use url::Url;
