//! Client for the TMDB v3 REST API.

/// HTTP calls and url building.
mod client;
/// Response bodies.
mod types;

pub use client::TmdbClient;
pub use types::{MovieDetail, SearchResultItem, SearchResults};
