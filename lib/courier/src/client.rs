//! The HTTP client.
//!
//! [`Client`] drives every operation through the same pipeline: render the
//! request, send it through the injected [`Transport`], classify the outcome,
//! and decode the body when a model is asked for. Each operation comes in two
//! calling conventions:
//!
//! - `async` methods resolve to a `Result<_, ApiError>` in the caller's task
//! - `*_with` methods return immediately and hand the result to a callback,
//!   run on the client's [`CompletionContext`]
//!
//! Typed operations ([`fetch`](Client::fetch), [`post`](Client::post)) take an
//! [`Endpoint`]; raw operations ([`data`](Client::data), [`model`](Client::model))
//! take a prepared [`Request`].

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use courier_core::{
    ApiError, Endpoint, Outcome, RenderError, RenderedRequest, Request, Transport, classify_data,
    classify_empty, decode,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::runtime::Handle;
use tracing::Instrument;

use crate::completion::{CompletionContext, MainQueue};

const NO_RUNTIME: &str = "no Tokio runtime available to run the request";
const ABANDONED: &str = "request task ended before completing";

/// HTTP client over an injected [`Transport`].
///
/// Cloning is cheap: clones share the transport and the completion context.
///
/// # Example
///
/// ```ignore
/// use courier::{Client, HyperTransport};
///
/// #[derive(serde::Deserialize)]
/// struct Product { id: u32, title: String }
///
/// let client = Client::new(HyperTransport::new());
/// let products: Vec<Product> = client.fetch("https://fakestoreapi.com/products").await?;
/// ```
pub struct Client<T> {
    transport: Arc<T>,
    completion: Arc<dyn CompletionContext>,
    runtime: Option<Handle>,
    // Runtime current when the client was built, used when the call site has none
    ambient: Option<Handle>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            completion: Arc::clone(&self.completion),
            runtime: self.runtime.clone(),
            ambient: self.ambient.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &std::any::type_name::<T>())
            .field("runtime", &self.runtime.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Client<T> {
    /// Create a client around `transport`.
    ///
    /// Callbacks run on [`MainQueue::global`]. Callback-style requests are
    /// spawned on the Tokio runtime current at the call site, falling back to
    /// the one current at construction time.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::builder(transport).build()
    }

    /// Create a client builder around `transport`.
    #[must_use]
    pub fn builder(transport: T) -> ClientBuilder<T> {
        ClientBuilder::new(transport)
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ========================================================================
    // Typed operations
    // ========================================================================

    /// GET `endpoint` and decode the JSON body into `M`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a missing body is [`ApiError::Unknown`].
    pub async fn fetch<M>(&self, endpoint: impl Endpoint) -> Result<M, ApiError>
    where
        M: DeserializeOwned,
    {
        let rendered = Request::new(endpoint).render();
        let body = self.execute(rendered, classify_data).await?;
        decode(&body)
    }

    /// Callback form of [`fetch`](Self::fetch).
    pub fn fetch_with<M, F>(&self, endpoint: impl Endpoint, completion: F)
    where
        M: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<M, ApiError>) + Send + 'static,
    {
        let rendered = Request::new(endpoint).render();
        self.spawn(rendered, decode_data::<M>, completion);
    }

    /// POST `body` as JSON to `endpoint`, with optional extra headers.
    ///
    /// The response body, if any, is ignored. No `Content-Type` is added;
    /// pass it in `headers` when the server needs one.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] but [`ApiError::FailedDeserialization`]. A response
    /// without body is a success.
    pub async fn post<B>(
        &self,
        endpoint: impl Endpoint,
        body: &B,
        headers: Option<HashMap<String, String>>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let rendered = post_request(endpoint, body, headers).render();
        self.execute(rendered, classify_empty).await
    }

    /// Callback form of [`post`](Self::post).
    pub fn post_with<B, F>(
        &self,
        endpoint: impl Endpoint,
        body: &B,
        headers: Option<HashMap<String, String>>,
        completion: F,
    ) where
        B: Serialize + ?Sized,
        F: FnOnce(Result<(), ApiError>) + Send + 'static,
    {
        let rendered = post_request(endpoint, body, headers).render();
        self.spawn(rendered, classify_empty, completion);
    }

    // ========================================================================
    // Raw operations
    // ========================================================================

    /// Send `request` and return the raw body bytes.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidRequest`] if the request cannot be rendered (the
    /// transport is not called), otherwise any classification error.
    pub async fn data(&self, request: &Request) -> Result<Bytes, ApiError> {
        self.execute(request.render(), classify_data).await
    }

    /// Callback form of [`data`](Self::data).
    pub fn data_with<F>(&self, request: &Request, completion: F)
    where
        F: FnOnce(Result<Bytes, ApiError>) + Send + 'static,
    {
        self.spawn(request.render(), classify_data, completion);
    }

    /// Send `request` and decode the JSON body into `M`.
    ///
    /// # Errors
    ///
    /// Same as [`data`](Self::data), plus [`ApiError::FailedDeserialization`].
    pub async fn model<M>(&self, request: &Request) -> Result<M, ApiError>
    where
        M: DeserializeOwned,
    {
        let body = self.execute(request.render(), classify_data).await?;
        decode(&body)
    }

    /// Callback form of [`model`](Self::model).
    pub fn model_with<M, F>(&self, request: &Request, completion: F)
    where
        M: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<M, ApiError>) + Send + 'static,
    {
        self.spawn(request.render(), decode_data::<M>, completion);
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    async fn execute<R>(
        &self,
        rendered: Result<RenderedRequest, RenderError>,
        classify: fn(&Outcome) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let rendered = rendered.inspect_err(|err| {
            tracing::debug!(error = %err, "request cannot be rendered");
        })?;
        let outcome = exchange(self.transport.as_ref(), rendered).await;
        classify(&outcome)
    }

    fn spawn<R, F>(
        &self,
        rendered: Result<RenderedRequest, RenderError>,
        classify: fn(&Outcome) -> Result<R, ApiError>,
        completion: F,
    ) where
        R: Send + 'static,
        F: FnOnce(Result<R, ApiError>) + Send + 'static,
    {
        let pending = Pending::new(Arc::clone(&self.completion), completion);

        let rendered = match rendered {
            Ok(rendered) => rendered,
            Err(err) => {
                tracing::debug!(error = %err, "request cannot be rendered");
                pending.complete(Err(err.into()));
                return;
            }
        };

        let Some(runtime) = self.resolve_runtime() else {
            tracing::warn!(url = %rendered.url(), "{NO_RUNTIME}");
            pending.complete(Err(ApiError::unknown(NO_RUNTIME)));
            return;
        };

        // A task that never runs, or panics, drops `pending`, which still completes
        let transport = Arc::clone(&self.transport);
        runtime.spawn(async move {
            let outcome = exchange(transport.as_ref(), rendered).await;
            pending.complete(classify(&outcome));
        });
    }

    /// Configured runtime, else the one current here, else the one current at build time.
    fn resolve_runtime(&self) -> Option<Handle> {
        self.runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .or_else(|| self.ambient.clone())
    }
}

/// A completion callback that is delivered exactly once.
///
/// Dropped without [`complete`](Self::complete), it reports
/// [`ApiError::Unknown`] instead.
struct Pending<R: Send + 'static> {
    context: Arc<dyn CompletionContext>,
    callback: Option<Box<dyn FnOnce(Result<R, ApiError>) + Send>>,
}

impl<R: Send + 'static> Pending<R> {
    fn new<F>(context: Arc<dyn CompletionContext>, callback: F) -> Self
    where
        F: FnOnce(Result<R, ApiError>) + Send + 'static,
    {
        Self {
            context,
            callback: Some(Box::new(callback)),
        }
    }

    fn complete(mut self, result: Result<R, ApiError>) {
        if let Some(callback) = self.callback.take() {
            self.context.execute(Box::new(move || callback(result)));
        }
    }
}

impl<R: Send + 'static> Drop for Pending<R> {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            tracing::warn!("{ABANDONED}");
            self.context
                .execute(Box::new(move || callback(Err(ApiError::unknown(ABANDONED)))));
        }
    }
}

async fn exchange<T: Transport>(transport: &T, request: RenderedRequest) -> Outcome {
    let span = tracing::debug_span!("courier_request", method = %request.method(), url = %request.url());

    async move {
        tracing::debug!("sending request");
        let outcome = Outcome::from(transport.send(request).await);
        tracing::debug!(
            status = outcome.response().and_then(courier_core::ResponseMeta::status),
            body_len = outcome.body().map(Bytes::len),
            failed = outcome.error().is_some(),
            "exchange finished"
        );
        outcome
    }
    .instrument(span)
    .await
}

fn decode_data<M: DeserializeOwned>(outcome: &Outcome) -> Result<M, ApiError> {
    classify_data(outcome).and_then(|body| decode(&body))
}

fn post_request<B: Serialize + ?Sized>(
    endpoint: impl Endpoint,
    body: &B,
    headers: Option<HashMap<String, String>>,
) -> Request {
    Request::post(endpoint)
        .json(body)
        .headers(headers.unwrap_or_default())
        .build()
}

/// Builder for [`Client`].
///
/// # Example
///
/// ```ignore
/// use courier::{Client, HyperTransport, Immediate};
///
/// let client = Client::builder(HyperTransport::new())
///     .completion(Immediate)
///     .runtime(tokio::runtime::Handle::current())
///     .build();
/// ```
pub struct ClientBuilder<T> {
    transport: T,
    completion: Option<Arc<dyn CompletionContext>>,
    runtime: Option<Handle>,
}

impl<T> std::fmt::Debug for ClientBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("transport", &std::any::type_name::<T>())
            .field("custom_completion", &self.completion.is_some())
            .field("runtime", &self.runtime.is_some())
            .finish()
    }
}

impl<T: Transport> ClientBuilder<T> {
    fn new(transport: T) -> Self {
        Self {
            transport,
            completion: None,
            runtime: None,
        }
    }

    /// Run callbacks on `context` instead of [`MainQueue::global`].
    #[must_use]
    pub fn completion(mut self, context: impl CompletionContext) -> Self {
        self.completion = Some(Arc::new(context));
        self
    }

    /// Spawn callback-style requests on `runtime`.
    ///
    /// Without one, requests go to the runtime current at the call site, or
    /// failing that the one current when [`build`](Self::build) was called.
    #[must_use]
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> Client<T> {
        let completion = self
            .completion
            .unwrap_or_else(|| Arc::new(MainQueue::global()) as Arc<dyn CompletionContext>);
        Client {
            transport: Arc::new(self.transport),
            completion,
            runtime: self.runtime,
            ambient: Handle::try_current().ok(),
        }
    }
}
