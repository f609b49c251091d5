//! `tmdb-client`: async client for the handful of TMDb endpoints the pitch
//! timer draws from.
//!
//! The API key stays on the server side: browsers talk to the pitch server,
//! the pitch server talks to TMDb through this crate.
//!
//! # Architecture
//!
//! ```text
//! TmdbClient      ← reqwest client + api key + seeded RNG
//!     │
//!     ├── genres()          GET genre/movie/list
//!     │
//!     ├── random_movie()    GET movie/{popular|now_playing|top_rated}
//!     │                     page 1 for total_pages, then ≤5 random pages
//!     │                     until a movie with a poster turns up
//!     │
//!     └── popular_actors()  GET person/popular
//!                           three popularity tiers × 3 actors, filtered
//!                           against RecentActors (bounded id window)
//! ```
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tmdb_client::TmdbClient;
//!
//! let client = TmdbClient::new(std::env::var("TMDB_API_KEY").ok());
//! let movie = client.random_movie().await?;
//! println!("{} ({})", movie.title, client.image_url(movie.poster_path.as_deref().unwrap_or("")));
//! ```

pub mod actors;
pub mod client;
pub mod error;
pub mod movie;
pub mod types;

#[cfg(test)]
mod tests;

pub use actors::RecentActors;
pub use client::TmdbClient;
pub use error::TmdbError;
pub use types::{Actor, Genre, KnownFor, Movie, MovieSource, Page};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, TmdbError>;
