use crate::clients::entities::{Artwork, Track, non_empty};

const FALLBACK_FEATURE: &str = "composition and color";
const NO_TRACK_NOTE: &str =
    "Related note: try searching an artist to compare their music with this work.";

/// Builds the 3-line caption pairing an artwork with an optional track.
///
/// The result is plain text and is not escaped; callers rendering it into
/// markup must escape it themselves.
pub fn build_caption(art: &Artwork, track: Option<&Track>) -> String {
    let title = non_empty(art.title.as_deref()).unwrap_or("Untitled");
    let date = non_empty(art.date_display.as_deref())
        .map(|date| format!(" ({date})"))
        .unwrap_or_default();
    let artist = non_empty(art.artist_display.as_deref()).unwrap_or("Unknown artist");
    let line1 = format!("{title}{date} — {artist}.");

    let feature = art
        .term_titles
        .as_ref()
        .and_then(|terms| non_empty(terms.first().map(String::as_str)))
        .or_else(|| non_empty(art.artwork_type_title.as_deref()))
        .unwrap_or(FALLBACK_FEATURE);
    let line2 = format!(
        "This work focuses on {}, composition and visual mood.",
        feature.to_lowercase()
    );

    let line3 = match track {
        Some(track) => format!(
            "Related note: the soundtrack \"{}\" by {} shares mood elements (genre: {}).",
            track.track_name.as_deref().unwrap_or("—"),
            track.artist_name.as_deref().unwrap_or("—"),
            non_empty(track.primary_genre_name.as_deref()).unwrap_or("unknown"),
        ),
        None => NO_TRACK_NOTE.to_string(),
    };

    format!(
        "{}\n{}\n{}",
        single_line(&line1),
        single_line(&line2),
        single_line(&line3)
    )
}

// Catalog fields such as `artist_display` carry embedded newlines, which
// would otherwise break the three-line shape. Only line breaks are replaced;
// other whitespace is left as given.
fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starry_night() -> Artwork {
        Artwork {
            id: 1,
            title: Some("The Starry Night".into()),
            date_display: Some("1889".into()),
            artist_display: Some("Vincent van Gogh".into()),
            image_id: Some("abc".into()),
            term_titles: Some(vec!["Landscape".into(), "Night".into()]),
            artwork_type_title: Some("Painting".into()),
        }
    }

    fn track() -> Track {
        Track {
            artist_name: Some("Don McLean".into()),
            track_name: Some("Vincent".into()),
            primary_genre_name: Some("Pop".into()),
            ..Track::default()
        }
    }

    fn lines(caption: &str) -> Vec<&str> {
        caption.split('\n').collect()
    }

    #[test]
    fn caption_always_has_three_lines() {
        for art in [starry_night(), Artwork::default()] {
            for t in [Some(track()), None, Some(Track::default())] {
                let caption = build_caption(&art, t.as_ref());
                assert_eq!(caption.matches('\n').count(), 2, "{caption}");
            }
        }
    }

    #[test]
    fn first_line_includes_date_and_artist() {
        let caption = build_caption(&starry_night(), None);
        assert_eq!(lines(&caption)[0], "The Starry Night (1889) — Vincent van Gogh.");
    }

    #[test]
    fn embedded_newlines_are_flattened() {
        let art = Artwork {
            artist_display: Some("Vincent van Gogh\nDutch, 1853-1890".into()),
            ..starry_night()
        };
        let caption = build_caption(&art, None);
        assert_eq!(caption.matches('\n').count(), 2);
        assert_eq!(
            lines(&caption)[0],
            "The Starry Night (1889) — Vincent van Gogh Dutch, 1853-1890."
        );
    }

    #[test]
    fn surrounding_spaces_survive_without_line_breaks() {
        let art = Artwork {
            title: Some("  Nocturne  ".into()),
            date_display: None,
            ..starry_night()
        };
        let caption = build_caption(&art, None);
        assert_eq!(lines(&caption)[0], "  Nocturne   — Vincent van Gogh.");
    }

    #[test]
    fn crlf_breaks_collapse_to_one_space() {
        let art = Artwork {
            artist_display: Some("Vincent van Gogh\r\nDutch".into()),
            ..starry_night()
        };
        let caption = build_caption(&art, None);
        assert_eq!(caption.matches('\n').count(), 2);
        assert_eq!(
            lines(&caption)[0],
            "The Starry Night (1889) — Vincent van Gogh Dutch."
        );
    }

    #[test]
    fn first_line_defaults_for_empty_artwork() {
        let caption = build_caption(&Artwork::default(), None);
        assert_eq!(lines(&caption)[0], "Untitled — Unknown artist.");
    }

    #[test]
    fn feature_prefers_first_term_lowercased() {
        let caption = build_caption(&starry_night(), None);
        assert_eq!(
            lines(&caption)[1],
            "This work focuses on landscape, composition and visual mood."
        );
    }

    #[test]
    fn feature_falls_back_to_type_title() {
        let art = Artwork {
            term_titles: None,
            artwork_type_title: Some("Print".into()),
            ..starry_night()
        };
        assert!(build_caption(&art, None).contains("focuses on print,"));

        let art = Artwork {
            term_titles: Some(vec![]),
            artwork_type_title: Some("Print".into()),
            ..starry_night()
        };
        assert!(build_caption(&art, None).contains("focuses on print,"));
    }

    #[test]
    fn feature_falls_back_to_literal() {
        let art = Artwork {
            term_titles: None,
            artwork_type_title: None,
            ..starry_night()
        };
        assert!(build_caption(&art, None).contains("focuses on composition and color,"));
    }

    #[test]
    fn third_line_without_track_is_fixed() {
        let caption = build_caption(&starry_night(), None);
        assert_eq!(lines(&caption)[2], NO_TRACK_NOTE);
    }

    #[test]
    fn third_line_mentions_track() {
        let caption = build_caption(&starry_night(), Some(&track()));
        assert_eq!(
            lines(&caption)[2],
            "Related note: the soundtrack \"Vincent\" by Don McLean shares mood elements (genre: Pop)."
        );
    }

    #[test]
    fn missing_genre_reads_unknown() {
        let t = Track {
            primary_genre_name: Some(String::new()),
            ..track()
        };
        let caption = build_caption(&starry_night(), Some(&t));
        assert!(lines(&caption)[2].ends_with("(genre: unknown)."));
    }
}
