//! Shared test doubles.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use courier::{Received, RenderedRequest, ResponseMeta, Transport, TransportError};

/// Transport double: records every request and answers with a fixed reply.
pub struct MockTransport {
    reply: Result<Received, TransportError>,
    calls: AtomicUsize,
    requests: Mutex<Vec<RenderedRequest>>,
}

impl MockTransport {
    pub fn replying(reply: Result<Received, TransportError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// HTTP response with the given status and body.
    pub fn http(status: u16, body: impl Into<Bytes>) -> Self {
        Self::replying(Ok(Received::http(status, body)))
    }

    /// HTTP response with the given status and no body at all.
    pub fn http_without_body(status: u16) -> Self {
        Self::replying(Ok(Received::new(None, Some(ResponseMeta::http(status)))))
    }

    /// Transport failure.
    pub fn failing(error: TransportError) -> Self {
        Self::replying(Err(error))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RenderedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: RenderedRequest) -> Result<Received, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        self.reply.clone()
    }
}
