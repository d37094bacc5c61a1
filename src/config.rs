use std::{env::VarError, time::Duration};

use log::debug;

use crate::{
    clients::{
        ArticClient, ItunesClient,
        errors::{Error, Result},
    },
    pairing::Pairing,
    picker::{ArtworkPicker, DEFAULT_ATTEMPTS, FailurePolicy},
    surface::Surface,
};

/// Music search API used when nothing else is configured.
pub const DEFAULT_MUSIC_URL: &str = "https://itunes.apple.com";
/// Artwork listing API used when nothing else is configured.
pub const DEFAULT_ARTWORKS_URL: &str = "https://api.artic.edu/api/v1";
/// Image service used when nothing else is configured.
pub const DEFAULT_IMAGE_URL: &str = "https://www.artic.edu";

const MUSIC_URL_VAR: &str = "ARTPAIR_MUSIC_URL";
const ARTWORKS_URL_VAR: &str = "ARTPAIR_ARTWORKS_URL";
const IMAGE_URL_VAR: &str = "ARTPAIR_IMAGE_URL";
const ATTEMPTS_VAR: &str = "ARTPAIR_ARTWORK_ATTEMPTS";
const FAILURES_VAR: &str = "ARTPAIR_ARTWORK_FAILURES";
const TIMEOUT_VAR: &str = "ARTPAIR_REQUEST_TIMEOUT_SECS";

/// Resolved settings, with the clients already built.
pub struct Config {
    /// Music search client.
    pub music: ItunesClient,
    /// Artwork picker over the listing client.
    pub picker: ArtworkPicker<ArticClient>,
    /// Base URL of the image service.
    pub image_url: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Wires the clients to a display surface.
    pub fn into_pairing<S: Surface>(self, surface: S) -> Pairing<ItunesClient, ArticClient, S> {
        Pairing::new(self.music, self.picker, surface, &self.image_url)
    }
}

/// Builds a [`Config`]; anything not set explicitly comes from the
/// environment, then from the built-in defaults.
#[derive(Default)]
pub struct ConfigBuilder {
    music_url: Option<String>,
    artworks_url: Option<String>,
    image_url: Option<String>,
    attempts: Option<u32>,
    policy: Option<FailurePolicy>,
    timeout: Option<Duration>,
}

impl ConfigBuilder {
    /// Empty builder; every setting falls back to env or defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the music search base URL.
    #[must_use]
    pub fn music_url(mut self, url: impl Into<String>) -> Self {
        self.music_url = Some(url.into());
        self
    }

    /// Overrides the artwork listing base URL.
    #[must_use]
    pub fn artworks_url(mut self, url: impl Into<String>) -> Self {
        self.artworks_url = Some(url.into());
        self
    }

    /// Overrides the image service base URL.
    #[must_use]
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Overrides the picker's attempt count (capped at [`DEFAULT_ATTEMPTS`]).
    #[must_use]
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts);
        self
    }

    /// Overrides how failed listing pages are treated.
    #[must_use]
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the config, reading unset values from the process environment.
    pub fn build(self) -> Result<Config> {
        self.build_with(|key| std::env::var(key))
    }

    // `lookup` stands in for the environment so parsing can be tested.
    fn build_with(
        self,
        lookup: impl Fn(&str) -> std::result::Result<String, VarError>,
    ) -> Result<Config> {
        let music_url = setting(self.music_url, &lookup, MUSIC_URL_VAR, DEFAULT_MUSIC_URL)?;
        let artworks_url = setting(
            self.artworks_url,
            &lookup,
            ARTWORKS_URL_VAR,
            DEFAULT_ARTWORKS_URL,
        )?;
        let image_url = setting(self.image_url, &lookup, IMAGE_URL_VAR, DEFAULT_IMAGE_URL)?;
        let attempts = match self.attempts {
            Some(a) => a,
            None => parse_var(&lookup, ATTEMPTS_VAR)?.unwrap_or(DEFAULT_ATTEMPTS),
        };
        let policy = match self.policy {
            Some(p) => p,
            None => parse_var(&lookup, FAILURES_VAR)?.unwrap_or_default(),
        };
        let request_timeout = match self.timeout {
            Some(t) => Some(t),
            None => parse_var::<u64>(&lookup, TIMEOUT_VAR)?.map(Duration::from_secs),
        };

        let mut http = reqwest::Client::builder()
            .user_agent(concat!("artpair/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = request_timeout {
            http = http.timeout(timeout);
        }
        let http = http.build()?;

        let picker = ArtworkPicker::new(ArticClient::new(http.clone(), &artworks_url))
            .with_attempts(attempts)
            .with_policy(policy);
        debug!(
            "Config: music={music_url} artworks={artworks_url} images={image_url} attempts={} policy={policy:?} timeout={request_timeout:?}",
            picker.attempts()
        );
        Ok(Config {
            music: ItunesClient::new(http, &music_url),
            picker,
            image_url,
            request_timeout,
        })
    }
}

// Unset is `None`; set but not valid unicode is an error, never a silent default.
fn read_var(
    lookup: impl Fn(&str) -> std::result::Result<String, VarError>,
    key: &str,
) -> Result<Option<String>> {
    match lookup(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(Error::ConfigurationError(format!("invalid {key}: {e}"))),
    }
}

fn setting(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> std::result::Result<String, VarError>,
    key: &str,
    default: &str,
) -> Result<String> {
    match explicit {
        Some(value) => Ok(value),
        None => Ok(read_var(lookup, key)?.unwrap_or_else(|| default.to_string())),
    }
}

fn parse_var<T>(
    lookup: impl Fn(&str) -> std::result::Result<String, VarError>,
    key: &str,
) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    read_var(lookup, key)?
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| Error::ConfigurationError(format!("invalid {key}={raw:?}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, ffi::OsString};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> std::result::Result<String, VarError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = ConfigBuilder::new().build_with(env(&[])).unwrap();
        assert_eq!(config.image_url, DEFAULT_IMAGE_URL);
        assert_eq!(config.picker.attempts(), DEFAULT_ATTEMPTS);
        assert_eq!(config.picker.policy(), FailurePolicy::TreatAsEmpty);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ConfigBuilder::new()
            .build_with(env(&[
                (IMAGE_URL_VAR, "http://localhost:9000"),
                (ATTEMPTS_VAR, " 3 "),
                (FAILURES_VAR, "error"),
                (TIMEOUT_VAR, "10"),
            ]))
            .unwrap();
        assert_eq!(config.image_url, "http://localhost:9000");
        assert_eq!(config.picker.attempts(), 3);
        assert_eq!(config.picker.policy(), FailurePolicy::Surface);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let config = ConfigBuilder::new()
            .image_url("http://explicit")
            .attempts(2)
            .timeout(Duration::from_millis(1500))
            .build_with(env(&[
                (IMAGE_URL_VAR, "http://env"),
                (ATTEMPTS_VAR, "nope"),
                (TIMEOUT_VAR, "10"),
            ]))
            .unwrap();
        assert_eq!(config.image_url, "http://explicit");
        assert_eq!(config.picker.attempts(), 2);
        assert_eq!(config.request_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn attempts_above_the_limit_are_capped() {
        let config = ConfigBuilder::new()
            .build_with(env(&[(ATTEMPTS_VAR, "50")]))
            .unwrap();
        assert_eq!(config.picker.attempts(), DEFAULT_ATTEMPTS);
    }

    #[test]
    fn invalid_values_are_configuration_errors() {
        let result = ConfigBuilder::new().build_with(env(&[(ATTEMPTS_VAR, "six")]));
        assert!(matches!(result, Err(Error::ConfigurationError(msg)) if msg.contains(ATTEMPTS_VAR)));

        let result = ConfigBuilder::new().build_with(env(&[(FAILURES_VAR, "maybe")]));
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn non_unicode_values_are_configuration_errors() {
        let not_unicode = |key: &str| -> std::result::Result<String, VarError> {
            if key == ATTEMPTS_VAR {
                Err(VarError::NotUnicode(OsString::from("\u{fffd}\u{fffd}")))
            } else {
                Err(VarError::NotPresent)
            }
        };
        let result = ConfigBuilder::new().build_with(not_unicode);
        assert!(matches!(result, Err(Error::ConfigurationError(msg)) if msg.contains(ATTEMPTS_VAR)));

        let not_unicode_url = |key: &str| -> std::result::Result<String, VarError> {
            if key == MUSIC_URL_VAR {
                Err(VarError::NotUnicode(OsString::from("x")))
            } else {
                Err(VarError::NotPresent)
            }
        };
        let result = ConfigBuilder::new().build_with(not_unicode_url);
        assert!(matches!(result, Err(Error::ConfigurationError(msg)) if msg.contains(MUSIC_URL_VAR)));
    }
}
