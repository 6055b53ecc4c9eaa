//! Client pipeline tests against a recording transport.

mod common;

use std::collections::HashMap;
use std::thread;

use assert2::{check, let_assert};
use bytes::Bytes;
use common::MockTransport;
use courier::{ApiError, Client, Immediate, MainQueue, Method, Request, ResponseMeta, TransportError};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Product {
    id: u32,
    title: String,
    price: f64,
}

fn product() -> Product {
    Product {
        id: 7,
        title: "Backpack".to_string(),
        price: 109.95,
    }
}

const PRODUCT_JSON: &str = r#"{"id":7,"title":"Backpack","price":109.95}"#;

/// Run a callback-style call and wait for its completion, returning the
/// result and the name of the thread the callback ran on.
async fn completed<R, S>(start: S) -> (R, Option<String>)
where
    R: Send + 'static,
    S: FnOnce(Box<dyn FnOnce(R) + Send>),
{
    let (tx, rx) = oneshot::channel();
    start(Box::new(move |result| {
        let name = thread::current().name().map(str::to_string);
        let _ = tx.send((result, name));
    }));
    rx.await.expect("completion called")
}

// ============================================================================
// Typed client
// ============================================================================

#[tokio::test]
async fn fetch_decodes_model() {
    let client = Client::new(MockTransport::http(200, PRODUCT_JSON));

    let result: Result<Product, ApiError> = client.fetch("https://fakestoreapi.com/products/7").await;

    check!(result == Ok(product()));
    let_assert!(Some(request) = client.transport().last_request());
    check!(request.method() == Method::Get);
    check!(request.url().as_str() == "https://fakestoreapi.com/products/7");
    check!(request.body().is_none());
}

#[tokio::test]
async fn fetch_with_runs_on_main_queue() {
    let client = Client::new(MockTransport::http(200, PRODUCT_JSON));

    let (result, thread): (Result<Product, ApiError>, _) = completed(|done| {
        client.fetch_with("https://fakestoreapi.com/products/7", done);
    })
    .await;

    check!(result == Ok(product()));
    check!(thread.as_deref() == Some(MainQueue::THREAD_NAME));
}

#[tokio::test]
async fn fetch_with_wrong_shape_names_the_type() {
    let client = Client::new(MockTransport::http(200, r#"{"id":"seven"}"#));

    let result = client.fetch::<Product>("https://fakestoreapi.com/products/7").await;

    check!(result == Err(ApiError::failed_deserialization("Product")));
}

#[tokio::test]
async fn fetch_without_body_is_unknown() {
    let client = Client::new(MockTransport::http_without_body(200));

    let result = client.fetch::<Product>("https://fakestoreapi.com/products/7").await;

    check!(result == Err(ApiError::unknown("No data received")));
}

#[tokio::test]
async fn fetch_reports_status() {
    let client = Client::new(MockTransport::http(404, "not found"));

    let result = client.fetch::<Product>("https://fakestoreapi.com/products/999").await;

    check!(result == Err(ApiError::RequestFailed { status: 404 }));
}

#[tokio::test]
async fn post_sends_body_and_exact_headers() {
    let client = Client::new(MockTransport::http(201, ""));
    let headers = HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("X-Api-Key".to_string(), "secret".to_string()),
    ]);

    let result = client
        .post("https://fakestoreapi.com/products", &product(), Some(headers.clone()))
        .await;

    check!(result == Ok(()));
    let_assert!(Some(request) = client.transport().last_request());
    check!(request.method() == Method::Post);
    check!(request.headers() == &headers);
    let_assert!(Some(body) = request.body());
    let sent: Product = serde_json::from_slice(body).expect("json body");
    check!(sent == product());
}

#[tokio::test]
async fn post_without_headers_adds_none() {
    let client = Client::new(MockTransport::http(200, ""));

    client
        .post("https://fakestoreapi.com/products", &product(), None)
        .await
        .expect("posted");

    let_assert!(Some(request) = client.transport().last_request());
    check!(request.headers().is_empty());
}

#[tokio::test]
async fn post_without_response_body_succeeds() {
    let client = Client::new(MockTransport::http_without_body(204));

    let result = client.post("https://fakestoreapi.com/products", &product(), None).await;

    check!(result == Ok(()));
}

#[tokio::test]
async fn post_ignores_undecodable_response() {
    let client = Client::new(MockTransport::http(200, "<html>ok</html>"));

    let result = client.post("https://fakestoreapi.com/products", &product(), None).await;

    check!(result == Ok(()));
}

#[tokio::test]
async fn post_with_runs_on_main_queue() {
    let client = Client::new(MockTransport::http(500, ""));

    let (result, thread): (Result<(), ApiError>, _) = completed(|done| {
        client.post_with("https://fakestoreapi.com/products", &product(), None, done);
    })
    .await;

    check!(result == Err(ApiError::RequestFailed { status: 500 }));
    check!(thread.as_deref() == Some(MainQueue::THREAD_NAME));
}

#[tokio::test]
async fn transport_error_becomes_unknown() {
    let error = TransportError::connection("connection refused");
    let client = Client::new(MockTransport::failing(error.clone()));

    let result = client.fetch::<Product>("https://fakestoreapi.com/products").await;

    check!(result == Err(ApiError::unknown(error.to_string())));
}

#[tokio::test]
async fn non_http_response_is_invalid_response() {
    let meta = ResponseMeta::non_http(None);
    let client = Client::new(MockTransport::replying(Ok(courier::Received::new(
        Some(Bytes::from_static(PRODUCT_JSON.as_bytes())),
        Some(meta.clone()),
    ))));

    let result = client.fetch::<Product>("https://fakestoreapi.com/products/7").await;

    check!(result == Err(ApiError::InvalidResponse { response: Some(meta) }));
}

// ============================================================================
// Raw client
// ============================================================================

#[tokio::test]
async fn data_returns_raw_bytes() {
    let client = Client::new(MockTransport::http(200, "plain text"));
    let request = Request::get("https://example.com/raw").query("format", "txt").build();

    let result = client.data(&request).await;

    check!(result == Ok(Bytes::from_static(b"plain text")));
    let_assert!(Some(sent) = client.transport().last_request());
    check!(sent.url().as_str() == "https://example.com/raw?format=txt");
}

#[tokio::test]
async fn data_accepts_status_300() {
    let client = Client::new(MockTransport::http(300, "choices"));

    let result = client.data(&Request::new("https://example.com/raw")).await;

    check!(result == Ok(Bytes::from_static(b"choices")));
}

#[tokio::test]
async fn data_rejects_status_301() {
    let client = Client::new(MockTransport::http(301, "moved"));

    let result = client.data(&Request::new("https://example.com/raw")).await;

    check!(result == Err(ApiError::RequestFailed { status: 301 }));
}

#[tokio::test]
async fn data_without_body_is_unknown() {
    let client = Client::new(MockTransport::http_without_body(200));

    let result = client.data(&Request::new("https://example.com/raw")).await;

    check!(result == Err(ApiError::unknown("No data received")));
}

#[tokio::test]
async fn unrenderable_request_never_reaches_transport() {
    let client = Client::builder(MockTransport::http(200, PRODUCT_JSON))
        .completion(Immediate)
        .build();
    let request = Request::new("");

    let async_result = client.data(&request).await;
    let (callback_result, _): (Result<Bytes, ApiError>, _) =
        completed(|done| client.data_with(&request, done)).await;

    check!(async_result == Err(ApiError::InvalidRequest));
    check!(callback_result == Err(ApiError::InvalidRequest));
    check!(client.transport().calls() == 0);
}

#[tokio::test]
async fn invalid_request_is_delivered_on_main_queue() {
    let client = Client::new(MockTransport::http(200, PRODUCT_JSON));

    let (result, thread): (Result<Bytes, ApiError>, _) =
        completed(|done| client.data_with(&Request::new("Hola"), done)).await;

    check!(result == Err(ApiError::InvalidRequest));
    check!(thread.as_deref() == Some(MainQueue::THREAD_NAME));
    check!(client.transport().calls() == 0);
}

#[tokio::test]
async fn data_with_runs_on_main_queue() {
    let client = Client::new(MockTransport::http(200, "bytes"));

    let (result, thread): (Result<Bytes, ApiError>, _) =
        completed(|done| client.data_with(&Request::new("https://example.com/raw"), done)).await;

    check!(result == Ok(Bytes::from_static(b"bytes")));
    check!(thread.as_deref() == Some(MainQueue::THREAD_NAME));
}

#[tokio::test]
async fn model_decodes_and_round_trips() {
    let encoded = serde_json::to_vec(&product()).expect("encodable");
    let client = Client::new(MockTransport::http(200, encoded));
    let request = Request::new("https://fakestoreapi.com/products/7");

    let async_result = client.model::<Product>(&request).await;
    let (callback_result, thread): (Result<Product, ApiError>, _) =
        completed(|done| client.model_with(&request, done)).await;

    check!(async_result == Ok(product()));
    check!(callback_result == Ok(product()));
    check!(thread.as_deref() == Some(MainQueue::THREAD_NAME));
}

#[tokio::test]
async fn model_with_wrong_shape_names_the_type() {
    let client = Client::new(MockTransport::http(200, "[1, 2, 3]"));

    let result = client
        .model::<Vec<Product>>(&Request::new("https://fakestoreapi.com/products"))
        .await;

    check!(result == Err(ApiError::failed_deserialization("Vec<Product>")));
}

#[tokio::test]
async fn custom_completion_context_is_used() {
    let client = Client::builder(MockTransport::http(200, "ok"))
        .completion(Immediate)
        .build();

    let (result, thread): (Result<Bytes, ApiError>, _) =
        completed(|done| client.data_with(&Request::new("https://example.com/raw"), done)).await;

    check!(result == Ok(Bytes::from_static(b"ok")));
    check!(thread.as_deref() != Some(MainQueue::THREAD_NAME));
}

#[test]
fn callback_without_runtime_fails_fast() {
    let client = Client::builder(MockTransport::http(200, "ok"))
        .completion(Immediate)
        .build();
    let (tx, rx) = std::sync::mpsc::channel();

    client.data_with(&Request::new("https://example.com/raw"), move |result| {
        let _ = tx.send(result);
    });

    let_assert!(Ok(Err(ApiError::Unknown { description })) = rx.try_recv());
    check!(description.contains("runtime"));
    check!(client.transport().calls() == 0);
}

#[test]
fn callback_uses_runtime_current_at_call_site() {
    let client = Client::builder(MockTransport::http(200, "late runtime"))
        .completion(Immediate)
        .build();
    let runtime = tokio::runtime::Runtime::new().expect("runtime");

    let result: Result<Bytes, ApiError> = runtime.block_on(async {
        let (tx, rx) = oneshot::channel();
        client.data_with(&Request::new("https://example.com/raw"), move |result| {
            let _ = tx.send(result);
        });
        rx.await.expect("completion called")
    });

    check!(result == Ok(Bytes::from_static(b"late runtime")));
    check!(client.transport().calls() == 1);
}
