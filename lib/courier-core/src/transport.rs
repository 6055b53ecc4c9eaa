//! The transport seam.
//!
//! Courier never performs I/O itself. A [`Transport`] takes a
//! [`RenderedRequest`] and eventually answers with what it received or with a
//! [`TransportError`]. The production implementation lives in the `courier`
//! crate (`HyperTransport`); tests substitute a double.

use std::future::Future;

use crate::{Received, RenderedRequest, TransportError};

/// Sends rendered requests over the network (or pretends to).
///
/// Implementations must complete exactly once per call. They may pool
/// connections, reorder, or cancel however their stack allows; courier does
/// not depend on any of it.
///
/// # Example
///
/// ```
/// use courier_core::{Received, RenderedRequest, Transport, TransportError};
///
/// /// Answers every request with `204 No Content`.
/// struct NoContent;
///
/// impl Transport for NoContent {
///     async fn send(&self, _request: RenderedRequest) -> Result<Received, TransportError> {
///         Ok(Received::http(204, ""))
///     }
/// }
/// ```
pub trait Transport: Send + Sync + 'static {
    /// Send a request and wait for what comes back.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response could be obtained:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Requests the transport cannot express
    fn send(
        &self,
        request: RenderedRequest,
    ) -> impl Future<Output = Result<Received, TransportError>> + Send;
}
