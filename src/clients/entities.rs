use serde::Deserialize;

/// One recording as returned by the music search endpoint.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Performing artist.
    pub artist_name: Option<String>,
    /// Track title.
    pub track_name: Option<String>,
    /// Album the track belongs to.
    pub collection_name: Option<String>,
    /// Genre label, e.g. `Classical`.
    pub primary_genre_name: Option<String>,
    /// 100x100 album art URL.
    pub artwork_url100: Option<String>,
    /// Short audio preview URL.
    pub preview_url: Option<String>,
}

/// One museum catalog entry. `image_id` is required for display.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Artwork {
    /// Catalog id.
    #[serde(default)]
    pub id: u64,
    /// Artwork title.
    pub title: Option<String>,
    /// Free-form date text, e.g. `c. 1889`.
    pub date_display: Option<String>,
    /// Artist name and origin; may span several lines.
    pub artist_display: Option<String>,
    /// Identifier on the IIIF image service.
    pub image_id: Option<String>,
    /// Subject and style terms, most relevant first.
    pub term_titles: Option<Vec<String>>,
    /// Kind of object, e.g. `Painting`.
    pub artwork_type_title: Option<String>,
}

impl Artwork {
    /// True when the artwork can be displayed.
    pub fn has_image(&self) -> bool {
        non_empty(self.image_id.as_deref()).is_some()
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct TrackSearchResponse {
    pub results: Option<Vec<Track>>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ArtworkPageResponse {
    pub data: Option<Vec<Artwork>>,
}

/// Treats empty strings the same as missing values.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
