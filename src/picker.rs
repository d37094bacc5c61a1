use log::{debug, info, warn};
use rand::Rng;

use crate::clients::{
    ArtworkSource,
    entities::Artwork,
    errors::{Error, Result},
};

/// Attempts made before giving up on finding an artwork with an image.
/// Also the upper bound: a picker never requests more pages than this.
pub const DEFAULT_ATTEMPTS: u32 = 6;

/// Highest listing page sampled.
pub const MAX_PAGE: u32 = 100;

/// What to do when a listing page answers with a non-success status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// A failed page counts as an empty page; an exhausted run yields `None`.
    #[default]
    TreatAsEmpty,
    /// Like `TreatAsEmpty`, except a run where every attempt failed returns
    /// the last error instead of `None`.
    Surface,
}

impl std::str::FromStr for FailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" | "treat-as-empty" => Ok(FailurePolicy::TreatAsEmpty),
            "error" | "surface" => Ok(FailurePolicy::Surface),
            other => Err(Error::ConfigurationError(format!(
                "unknown artwork failure policy {other:?}, expected \"empty\" or \"error\""
            ))),
        }
    }
}

/// Samples random listing pages until one carries an artwork with an image.
#[derive(Clone, Debug)]
pub struct ArtworkPicker<S> {
    source: S,
    attempts: u32,
    policy: FailurePolicy,
}

impl<S: ArtworkSource> ArtworkPicker<S> {
    /// Picker with the default attempt count and [`FailurePolicy::TreatAsEmpty`].
    pub fn new(source: S) -> Self {
        ArtworkPicker {
            source,
            attempts: DEFAULT_ATTEMPTS,
            policy: FailurePolicy::default(),
        }
    }

    /// Sets the attempt count, capped at [`DEFAULT_ATTEMPTS`].
    #[must_use]
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        if attempts > DEFAULT_ATTEMPTS {
            warn!("Capping artwork attempts {attempts} at {DEFAULT_ATTEMPTS}");
        }
        self.attempts = attempts.min(DEFAULT_ATTEMPTS);
        self
    }

    /// Sets how failed listing pages are treated.
    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Maximum number of page requests per pick.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Configured failure policy.
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Returns a random artwork that has a non-empty `image_id`, or `None`
    /// when no attempt produced one. Transport and decoding errors propagate;
    /// status errors are handled according to the configured policy.
    pub async fn pick(&self) -> Result<Option<Artwork>> {
        let mut last_failure = None;
        let mut failed = 0;

        for attempt in 1..=self.attempts {
            let page = random_page();
            let artworks = match self.source.fetch_page(page).await {
                Ok(artworks) => artworks,
                Err(e) if e.is_status() => {
                    warn!("Artwork page {page} failed on attempt {attempt}: {e}");
                    failed += 1;
                    last_failure = Some(e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let usable: Vec<Artwork> = artworks.into_iter().filter(Artwork::has_image).collect();
            if let Some(artwork) = pick_one(usable) {
                debug!(
                    "Picked artwork {} from page {page} on attempt {attempt}",
                    artwork.id
                );
                return Ok(Some(artwork));
            }
            debug!("Artwork page {page} had no usable images");
        }

        match last_failure {
            Some(e) if self.policy == FailurePolicy::Surface && failed == self.attempts => Err(e),
            _ => {
                info!(
                    "No artwork with an image after {} attempts ({failed} failed requests)",
                    self.attempts
                );
                Ok(None)
            }
        }
    }
}

fn random_page() -> u32 {
    rand::rng().random_range(1..=MAX_PAGE)
}

/// Removes and returns a uniformly random element.
pub(crate) fn pick_one<T>(mut items: Vec<T>) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..items.len());
    Some(items.swap_remove(index))
}
