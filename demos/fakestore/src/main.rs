//! Fake Store / PokeAPI demo
//!
//! Shows the four calling conventions of the courier client against two
//! public JSON APIs.

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]
#![allow(dead_code)]

use courier::prelude::*;
use tokio::sync::oneshot;

// ============================================================================
// Data Types
// ============================================================================

/// A page of Pokémon names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonList {
    pub count: u32,
    pub results: Vec<Pokemon>,
}

/// A Pokémon reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    pub url: String,
}

/// A Fake Store product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<u32>,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub category: String,
}

impl Product {
    fn sample() -> Self {
        Self {
            id: None,
            title: "Hola".to_string(),
            price: 300.0,
            description: "Prueba".to_string(),
            image: "https://i.pravatar.cc".to_string(),
            category: "electronic".to_string(),
        }
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// PokeAPI endpoints.
#[derive(Debug, Clone)]
pub enum PokeApi {
    PokemonList { limit: u32, offset: u32 },
}

impl Endpoint for PokeApi {
    fn url(&self) -> Result<Url, courier::url::ParseError> {
        match self {
            Self::PokemonList { limit, offset } => Url::parse_with_params(
                "https://pokeapi.co/api/v2/pokemon",
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            ),
        }
    }
}

/// Fake Store endpoints, relative to a base URL.
#[derive(Debug, Clone)]
pub struct FakeStore {
    base: String,
    route: FakeStoreRoute,
}

#[derive(Debug, Clone, Copy)]
pub enum FakeStoreRoute {
    Products,
    Product(u32),
}

impl FakeStore {
    const BASE_URL: &'static str = "https://fakestoreapi.com";

    pub fn new(route: FakeStoreRoute) -> Self {
        Self::with_base(Self::BASE_URL, route)
    }

    pub fn with_base(base: impl Into<String>, route: FakeStoreRoute) -> Self {
        Self {
            base: base.into(),
            route,
        }
    }
}

impl Endpoint for FakeStore {
    fn url(&self) -> Result<Url, courier::url::ParseError> {
        let base = Url::parse(&self.base)?;
        match self.route {
            FakeStoreRoute::Products => base.join("/products"),
            FakeStoreRoute::Product(id) => base.join(&format!("/products/{id}")),
        }
    }
}

// ============================================================================
// Main: Demonstrate usage
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    let transport = HyperTransport::builder().with_logging().build();
    let client = Client::new(transport);

    // async fetch
    let pokemons: PokemonList = client
        .fetch(PokeApi::PokemonList {
            limit: 5,
            offset: 0,
        })
        .await?;
    println!("{} Pokémon, first page:", pokemons.count);
    for pokemon in &pokemons.results {
        println!("  - {}", pokemon.name);
    }

    // callback post, completed on the main queue
    let (tx, rx) = oneshot::channel();
    client.post_with(
        FakeStore::new(FakeStoreRoute::Products),
        &Product::sample(),
        None,
        move |result| {
            let _ = tx.send(result);
        },
    );
    match rx.await {
        Ok(Ok(())) => println!("\nProduct created"),
        Ok(Err(err)) => println!("\nProduct creation failed: {err}"),
        Err(_) => println!("\nProduct creation was dropped"),
    }

    // raw request with a custom header
    let request = Request::get(FakeStore::new(FakeStoreRoute::Product(1)))
        .header("Accept", "application/json")
        .build();
    let product: Product = client.model(&request).await?;
    println!("\nProduct #1: {} ({:.2})", product.title, product.price);

    Ok(())
}

// ============================================================================
// Tests using wiremock
// ============================================================================
