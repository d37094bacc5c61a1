use std::fmt::Write;

use crate::clients::{
    artic::image_url,
    entities::{Artwork, Track, non_empty},
};

/// Music panel text when the search found nothing.
pub const NO_MUSIC: &str = "No music found for that query.";
/// Art panel text when the picker found nothing.
pub const NO_ARTWORK: &str = "No artwork available.";
/// Music panel text when a surprise run found no artwork.
pub const NO_ARTWORK_FOR_MUSIC: &str = "No artwork found.";
/// Text of the error placeholder.
pub const LOAD_ERROR: &str = "Error loading data.";
const LOADING: &str = "Loading...";

/// Display payload for the music panel.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackCard {
    /// Artist heading.
    pub artist: String,
    /// Album art image URL.
    pub album_art: Option<String>,
    /// Track title, `—` when missing.
    pub track: String,
    /// Album name.
    pub collection: Option<String>,
    /// Genre label.
    pub genre: Option<String>,
    /// Audio preview URL.
    pub preview: Option<String>,
}

/// Display payload for the art panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtworkCard {
    /// Artwork title.
    pub title: String,
    /// Full image URL.
    pub image: String,
    /// Artist line, `Unknown artist` when missing.
    pub artist: String,
    /// Object type, e.g. `Painting`.
    pub kind: Option<String>,
}

/// What one display region currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Panel {
    /// Nothing requested yet.
    #[default]
    Blank,
    /// A flow is waiting on this region.
    Loading,
    /// The flow failed.
    Error,
    /// The lookup succeeded but found nothing.
    Empty(&'static str),
    /// A track card.
    Track(TrackCard),
    /// An artwork card.
    Artwork(ArtworkCard),
}

/// Music panel for the best track, or the no-music placeholder.
pub fn render_track(track: Option<&Track>) -> Panel {
    let Some(track) = track else {
        return Panel::Empty(NO_MUSIC);
    };
    Panel::Track(TrackCard {
        artist: track.artist_name.clone().unwrap_or_default(),
        album_art: non_empty(track.artwork_url100.as_deref()).map(str::to_string),
        track: non_empty(track.track_name.as_deref())
            .unwrap_or("—")
            .to_string(),
        collection: non_empty(track.collection_name.as_deref()).map(str::to_string),
        genre: non_empty(track.primary_genre_name.as_deref()).map(str::to_string),
        preview: non_empty(track.preview_url.as_deref()).map(str::to_string),
    })
}

/// Art panel for a picked artwork, or the no-artwork placeholder.
pub fn render_artwork(art: Option<&Artwork>, image_base: &str) -> Panel {
    let Some(art) = art else {
        return Panel::Empty(NO_ARTWORK);
    };
    Panel::Artwork(ArtworkCard {
        title: art.title.clone().unwrap_or_default(),
        image: image_url(image_base, art.image_id.as_deref().unwrap_or_default()),
        artist: non_empty(art.artist_display.as_deref())
            .unwrap_or("Unknown artist")
            .to_string(),
        kind: non_empty(art.artwork_type_title.as_deref()).map(str::to_string),
    })
}

impl Panel {
    /// True for everything except a track or artwork card.
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Panel::Track(_) | Panel::Artwork(_))
    }

    /// Markup fragment for the panel. All text is HTML-escaped.
    pub fn to_html(&self) -> String {
        match self {
            Panel::Blank => String::new(),
            Panel::Loading => LOADING.to_string(),
            Panel::Error => format!("<p>{LOAD_ERROR}</p>"),
            Panel::Empty(message) => format!("<p>{}</p>", escape(message)),
            Panel::Track(card) => {
                let mut html = format!("<h3>{}</h3>", escape(&card.artist));
                if let Some(art) = &card.album_art {
                    let _ = write!(html, "<img src=\"{}\" alt=\"Album art\">", escape(art));
                }
                let _ = write!(html, "<p><strong>Track:</strong> {}", escape(&card.track));
                if let Some(collection) = &card.collection {
                    let _ = write!(html, " • {}", escape(collection));
                }
                html.push_str("</p>");
                let _ = write!(
                    html,
                    "<p><em>{}</em></p>",
                    escape(card.genre.as_deref().unwrap_or_default())
                );
                if let Some(preview) = &card.preview {
                    let _ = write!(html, "<audio controls src=\"{}\"></audio>", escape(preview));
                }
                html
            }
            Panel::Artwork(card) => {
                let title = escape(&card.title);
                let mut html = format!(
                    "<h3>{title}</h3><img src=\"{}\" alt=\"{title}\"><p>{}</p>",
                    escape(&card.image),
                    escape(&card.artist)
                );
                let _ = write!(
                    html,
                    "<p>{}</p>",
                    escape(card.kind.as_deref().unwrap_or_default())
                );
                html
            }
        }
    }

    /// Plain-text rendering used by the command line.
    pub fn to_text(&self) -> String {
        match self {
            Panel::Blank => String::new(),
            Panel::Loading => LOADING.to_string(),
            Panel::Error => LOAD_ERROR.to_string(),
            Panel::Empty(message) => (*message).to_string(),
            Panel::Track(card) => {
                let mut text = format!("{}\nTrack: {}", card.artist, card.track);
                if let Some(collection) = &card.collection {
                    let _ = write!(text, " • {collection}");
                }
                if let Some(genre) = &card.genre {
                    let _ = write!(text, "\nGenre: {genre}");
                }
                if let Some(preview) = &card.preview {
                    let _ = write!(text, "\nPreview: {preview}");
                }
                text
            }
            Panel::Artwork(card) => {
                let mut text = format!("{}\n{}", card.title, card.artist);
                if let Some(kind) = &card.kind {
                    let _ = write!(text, "\n{kind}");
                }
                let _ = write!(text, "\nImage: {}", card.image);
                text
            }
        }
    }
}

pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
