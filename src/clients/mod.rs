/// Museum artwork listing client
pub mod artic;
/// Data entities for tracks and artworks
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Music search client
pub mod itunes;

pub use artic::{ArticClient, ArtworkSource};
pub use itunes::{ItunesClient, TrackSource};

use log::debug;
use serde::{Serialize, de::DeserializeOwned};

use crate::clients::errors::{Error, Result};

// Shared GET + JSON decode used by both upstream clients.
// Non-success statuses are reported as `Error::UnexpectedStatus` so callers can
// tell them apart from transport or decoding failures.
pub(crate) async fn get_json<Q, T>(
    http: &reqwest::Client,
    endpoint: &'static str,
    url: &str,
    query: &Q,
) -> Result<T>
where
    Q: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = http.get(url).query(query).send().await?;
    let status = response.status();
    debug!("{endpoint} GET {url} -> {status}");
    if !status.is_success() {
        return Err(Error::UnexpectedStatus {
            endpoint,
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

pub(crate) fn endpoint_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
