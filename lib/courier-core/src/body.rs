//! JSON body encoding and decoding.

use bytes::Bytes;

use crate::DecodeError;

/// MIME type of the bodies courier encodes.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use courier_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Product { title: String }
///
/// let product = Product { title: "Backpack".to_string() };
/// let bytes = to_json(&product).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"title":"Backpack"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes, serde_json::Error> {
    serde_json::to_vec(value).map(Bytes::from)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the exact field that failed
/// to deserialize.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the path to the
/// problematic field (e.g., "results[3].url").
///
/// # Example
///
/// ```
/// use courier_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Product { title: String }
///
/// let product: Product = from_json(br#"{"title":"Backpack"}"#).expect("deserialize");
/// assert_eq!(product, Product { title: "Backpack".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| DecodeError {
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })?;

    // Only whitespace may follow the document
    deserializer.end().map_err(|e| DecodeError {
        path: ".".to_string(),
        message: e.to_string(),
    })?;

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Product {
        id: Option<u32>,
        title: String,
        price: f64,
        category: String,
    }

    #[test]
    fn json_round_trip() {
        let product = Product {
            id: None,
            title: "Fjallraven Backpack".to_string(),
            price: 109.95,
            category: "men's clothing".to_string(),
        };

        let bytes = to_json(&product).expect("serialize");
        let decoded: Product = from_json(&bytes).expect("deserialize");

        assert_eq!(decoded, product);
    }

    #[test]
    fn to_json_unsized_value() {
        let bytes = to_json("plain").expect("serialize");
        assert_eq!(bytes.as_ref(), br#""plain""#);
    }

    #[test]
    fn to_json_rejects_non_string_keys() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "pair");

        assert!(to_json(&map).is_err());
    }

    #[test]
    fn from_json_reports_path() {
        let err = from_json::<Vec<Product>>(
            br#"[{"id":1,"title":"a","price":1.0,"category":"c"},{"id":2,"title":7,"price":1.0,"category":"c"}]"#,
        )
        .expect_err("title has the wrong type");

        assert_eq!(err.path, "[1].title");
        assert!(err.message.contains("expected a string"), "{err}");
    }

    #[test]
    fn from_json_rejects_trailing_data() {
        assert!(from_json::<Vec<u8>>(b"[1, 2] ").is_ok());
        assert!(from_json::<Vec<u8>>(b"[1, 2] [3]").is_err());
    }

    #[test]
    fn from_json_rejects_invalid_json() {
        let err = from_json::<Product>(b"not json").expect_err("invalid json");
        assert!(!err.message.is_empty());
    }
}
