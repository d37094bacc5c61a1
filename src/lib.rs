//! Artpair - pair a random museum artwork with a music track
//!
//! This library fetches a random artwork from the Art Institute of Chicago
//! listing API and a track from the iTunes search API, renders both and
//! builds a short caption connecting them.

/// Caption text for an artwork and track pair
pub mod caption;
/// Client modules for the upstream music and artwork APIs
pub mod clients;
/// Configuration assembled from the environment
pub mod config;
/// The search-by-artist and surprise flows
pub mod pairing;
/// Random artwork selection with bounded retries
pub mod picker;
/// Display payloads for the music and art panels
pub mod render;
/// HTTP page serving the pairing widget
pub mod server;
/// Display regions written by the flows
pub mod surface;
