//! Small HTTP client for JSON APIs.
//!
//! Fetch and post typed models, or send prepared requests and get raw bytes
//! back, either with `async`/`await` or with completion callbacks. Every
//! failure is reported as one [`ApiError`].
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Product {
//!     id: u64,
//!     title: String,
//! }
//!
//! let client = Client::new(HyperTransport::new());
//!
//! // async
//! let products: Vec<Product> = client.fetch("https://fakestoreapi.com/products").await?;
//!
//! // callback, run on the main queue
//! client.fetch_with("https://fakestoreapi.com/products/1", |result: Result<Product, ApiError>| {
//!     println!("{result:?}");
//! });
//! ```

mod client;
mod completion;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod transport;

// Re-export client types
pub use client::{Client, ClientBuilder};
pub use completion::{CompletionContext, Immediate, Job, MainQueue};
pub use config::{TransportConfig, TransportConfigBuilder};
pub use transport::{BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export url for endpoint implementations
pub use url;

// Re-export core types
pub use courier_core::{
    ApiError, DecodeError, Endpoint, JSON_CONTENT_TYPE, Method, Outcome, Received, RenderError,
    RenderedRequest, Request, RequestBuilder, ResponseMeta, Transport, TransportError, Url,
    classify, classify_data, classify_empty, decode, from_json, to_json,
};
