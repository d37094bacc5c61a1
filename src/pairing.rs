//! The two user-triggered flows.
//!
//! Each flow is a linear sequence of awaited calls that writes its progress to
//! a [`Surface`]. Every invocation takes a sequence token when it starts; a
//! write only lands while that token is still the latest one, so when flows
//! overlap the most recently started one owns the display.

use std::sync::{Mutex, PoisonError};

use log::{debug, error, info};
use rand::{Rng, seq::IndexedRandom};

use crate::{
    caption::build_caption,
    clients::{
        ArtworkSource, TrackSource,
        entities::Artwork,
        errors::Error,
        itunes::DEFAULT_SEARCH_LIMIT,
    },
    picker::{ArtworkPicker, pick_one},
    render::{NO_ARTWORK_FOR_MUSIC, Panel, render_artwork, render_track},
    surface::Surface,
};

/// Result count requested when searching by a title keyword.
pub const SURPRISE_SEARCH_LIMIT: u32 = 15;

/// Keyword used when an artwork title has no usable word.
pub const FALLBACK_KEYWORD: &str = "music";

/// How a flow invocation ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input, nothing was done.
    Ignored,
    /// Both panels and the caption were written.
    Completed,
    /// The picker found no artwork; no track search was made.
    NoArtwork,
    /// A request failed and the error placeholders were shown.
    Failed,
    /// A later invocation started before this one finished.
    Superseded,
}

enum Halt {
    Superseded,
    Failed(Error),
}

impl From<Error> for Halt {
    fn from(err: Error) -> Self {
        Halt::Failed(err)
    }
}

type Step<T> = std::result::Result<T, Halt>;

/// The two flows over a music source, an artwork picker and a surface.
pub struct Pairing<M, A, S> {
    music: M,
    picker: ArtworkPicker<A>,
    surface: S,
    image_base: String,
    latest: Mutex<u64>,
}

impl<M, A, S> Pairing<M, A, S>
where
    M: TrackSource,
    A: ArtworkSource,
    S: Surface,
{
    /// `image_base` is the root of the image service used for artwork URLs.
    pub fn new(music: M, picker: ArtworkPicker<A>, surface: S, image_base: &str) -> Self {
        Pairing {
            music,
            picker,
            surface,
            image_base: image_base.to_string(),
            latest: Mutex::new(0),
        }
    }

    /// The surface the flows write to.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Music first: the best match for `input`, then a random artwork.
    pub async fn search_by_artist(&self, input: &str) -> Outcome {
        let artist = input.trim();
        if artist.is_empty() {
            debug!("Ignoring search with blank artist name");
            return Outcome::Ignored;
        }
        let token = self.begin();
        info!("Searching pairing for artist {artist:?} (run {token})");
        match self.run_search(token, artist).await {
            Ok(outcome) => outcome,
            Err(halt) => self.halted(token, halt),
        }
    }

    /// Art first: a random artwork, then a track found by a word of its title.
    pub async fn surprise(&self) -> Outcome {
        let token = self.begin();
        info!("Starting surprise pairing (run {token})");
        match self.run_surprise(token).await {
            Ok(outcome) => outcome,
            Err(halt) => self.halted(token, halt),
        }
    }

    async fn run_search(&self, token: u64, artist: &str) -> Step<Outcome> {
        let tracks = self.music.search(artist, DEFAULT_SEARCH_LIMIT).await?;
        let track = tracks.into_iter().next();
        self.write(token, |s| s.show_music(render_track(track.as_ref())))?;

        let art = self.picker.pick().await?;
        self.write(token, |s| {
            s.show_art(render_artwork(art.as_ref(), &self.image_base));
        })?;

        let fallback = Artwork::default();
        let caption = build_caption(art.as_ref().unwrap_or(&fallback), track.as_ref());
        self.write(token, |s| s.show_caption(&caption))?;
        Ok(Outcome::Completed)
    }

    async fn run_surprise(&self, token: u64) -> Step<Outcome> {
        let art = self.picker.pick().await?;
        self.write(token, |s| {
            s.show_art(render_artwork(art.as_ref(), &self.image_base));
        })?;
        let Some(art) = art else {
            self.write(token, |s| s.show_music(Panel::Empty(NO_ARTWORK_FOR_MUSIC)))?;
            return Ok(Outcome::NoArtwork);
        };

        let keyword = random_keyword(art.title.as_deref().unwrap_or_default());
        debug!("Surprise keyword {keyword:?} from artwork {}", art.id);
        let tracks = self.music.search(&keyword, SURPRISE_SEARCH_LIMIT).await?;
        let track = pick_one(tracks);
        self.write(token, |s| s.show_music(render_track(track.as_ref())))?;

        let caption = build_caption(&art, track.as_ref());
        self.write(token, |s| s.show_caption(&caption))?;
        Ok(Outcome::Completed)
    }

    // Takes the next token and shows the loading state under the same lock,
    // so no stale write can slip in between.
    fn begin(&self) -> u64 {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *latest += 1;
        self.surface.show_music(Panel::Loading);
        self.surface.show_art(Panel::Loading);
        self.surface.show_caption("");
        *latest
    }

    fn write(&self, token: u64, f: impl FnOnce(&S)) -> Step<()> {
        let latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if *latest != token {
            return Err(Halt::Superseded);
        }
        f(&self.surface);
        Ok(())
    }

    fn halted(&self, token: u64, halt: Halt) -> Outcome {
        match halt {
            Halt::Superseded => {
                debug!("Run {token} superseded, dropping its results");
                Outcome::Superseded
            }
            Halt::Failed(e) => {
                error!("Run {token} failed: {e}");
                let shown = self.write(token, |s| {
                    s.show_music(Panel::Error);
                    s.show_art(Panel::Error);
                    s.show_caption("");
                });
                match shown {
                    Ok(()) => Outcome::Failed,
                    Err(_) => Outcome::Superseded,
                }
            }
        }
    }
}

/// Words of `title` longer than three characters.
pub fn keyword_candidates(title: &str) -> Vec<&str> {
    title
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .collect()
}

/// A random candidate word of `title`, or [`FALLBACK_KEYWORD`].
pub fn pick_keyword<R: Rng + ?Sized>(title: &str, rng: &mut R) -> String {
    keyword_candidates(title)
        .choose(rng)
        .map_or_else(|| FALLBACK_KEYWORD.to_string(), |word| (*word).to_string())
}

fn random_keyword(title: &str) -> String {
    pick_keyword(title, &mut rand::rng())
}
