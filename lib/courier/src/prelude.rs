//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    ApiError, Client, CompletionContext, Endpoint, HyperTransport, MainQueue, Method, Received,
    Request, RequestBuilder, ResponseMeta, Transport, TransportError, Url,
};
pub use serde::{Deserialize, Serialize};
