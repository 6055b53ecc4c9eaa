//! Endpoint capability.
//!
//! An [`Endpoint`] is anything that can produce the absolute URL a request
//! targets. Courier never looks at how the URL is composed (host, path, query
//! scheme); it only asks for the result.
//!
//! # Example
//!
//! ```
//! use courier_core::Endpoint;
//! use url::Url;
//!
//! enum PokeApi {
//!     PokemonList { limit: u32 },
//! }
//!
//! impl Endpoint for PokeApi {
//!     fn url(&self) -> Result<Url, url::ParseError> {
//!         match self {
//!             Self::PokemonList { limit } => Url::parse(&format!(
//!                 "https://pokeapi.co/api/v2/pokemon?limit={limit}&offset=0"
//!             )),
//!         }
//!     }
//! }
//!
//! let url = PokeApi::PokemonList { limit: 100 }.url().expect("valid url");
//! assert_eq!(url.path(), "/api/v2/pokemon");
//! ```

use url::Url;

/// A value able to produce the URL of a request.
///
/// Implemented for [`Url`], `str` and `String`, so plain URLs and endpoint
/// enums are accepted by the same APIs. A string that does not parse as an
/// absolute URL yields an error, which courier reports as
/// [`ApiError::InvalidRequest`](crate::ApiError::InvalidRequest).
pub trait Endpoint {
    /// Resolve the target URL.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid absolute URL can be produced.
    fn url(&self) -> Result<Url, url::ParseError>;
}

impl Endpoint for Url {
    fn url(&self) -> Result<Url, url::ParseError> {
        Ok(self.clone())
    }
}

impl Endpoint for str {
    fn url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self)
    }
}

impl Endpoint for String {
    fn url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self)
    }
}

impl<E: Endpoint + ?Sized> Endpoint for &E {
    fn url(&self) -> Result<Url, url::ParseError> {
        (**self).url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_is_its_own_endpoint() {
        let url = Url::parse("https://fakestoreapi.com/products").expect("valid URL");
        assert_eq!(url.url(), Ok(url.clone()));
    }

    #[test]
    fn str_endpoint_parses() {
        let url = "https://fakestoreapi.com/products/1".url().expect("valid URL");
        assert_eq!(url.host_str(), Some("fakestoreapi.com"));
        assert_eq!(url.path(), "/products/1");
    }

    #[test]
    fn empty_string_is_not_an_endpoint() {
        assert_eq!("".url(), Err(url::ParseError::RelativeUrlWithoutBase));
        assert!(String::new().url().is_err());
    }

    #[test]
    fn relative_string_is_not_an_endpoint() {
        assert!("Hola".url().is_err());
        assert!("/products".url().is_err());
    }
}
