//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    ApiError, Endpoint, Method, Received, RenderedRequest, Request, RequestBuilder, ResponseMeta,
    Transport, TransportError, Url,
};
