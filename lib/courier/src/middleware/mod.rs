//! Tower middleware for [`HyperTransport`](crate::HyperTransport).
//!
//! The transport stack is a Tower service from
//! [`RenderedRequest`](courier_core::RenderedRequest) to
//! [`Received`](courier_core::Received). Any layer over that service can be
//! added with [`HyperTransportBuilder::layer`](crate::HyperTransportBuilder::layer);
//! layers are applied in order, first added = outermost.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs exchanges using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use courier::HyperTransport;
//! use courier::middleware::LoggingLayer;
//!
//! let transport = HyperTransport::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
