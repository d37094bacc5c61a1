use std::future::Future;

use log::debug;

use crate::clients::{
    endpoint_base,
    entities::{Track, TrackSearchResponse},
    errors::Result,
    get_json,
};

/// Result count used when the caller has no preference.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

const ENDPOINT: &str = "music search";

/// Anything that can answer a keyword search with a list of tracks.
pub trait TrackSource {
    /// Up to `limit` tracks matching `term`, best match first.
    fn search(&self, term: &str, limit: u32) -> impl Future<Output = Result<Vec<Track>>> + Send;
}

/// Client for the iTunes search endpoint, filtered to music tracks.
#[derive(Clone, Debug)]
pub struct ItunesClient {
    http: reqwest::Client,
    base_url: String,
}

impl ItunesClient {
    /// Client for the search API rooted at `base_url`.
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        ItunesClient {
            http,
            base_url: endpoint_base(base_url),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

impl TrackSource for ItunesClient {
    // Single request, no retry. A missing `results` field is an empty list.
    async fn search(&self, term: &str, limit: u32) -> Result<Vec<Track>> {
        let limit = limit.to_string();
        let query = [
            ("term", term),
            ("media", "music"),
            ("entity", "musicTrack"),
            ("limit", limit.as_str()),
        ];
        let response: TrackSearchResponse =
            get_json(&self.http, ENDPOINT, &self.search_url(), &query).await?;
        let tracks = response.results.unwrap_or_default();
        debug!("Music search for {term:?} returned {} tracks", tracks.len());
        Ok(tracks)
    }
}
