use std::future::Future;

use log::debug;

use crate::clients::{
    endpoint_base,
    entities::{Artwork, ArtworkPageResponse},
    errors::Result,
    get_json,
};

/// Records requested per listing page.
pub const PAGE_SIZE: u32 = 20;

/// Field projection requested from the listing endpoint.
pub const ARTWORK_FIELDS: &str =
    "id,title,image_id,artist_display,date_display,term_titles,artwork_type_title";

const ENDPOINT: &str = "artwork listing";

/// A paged listing of artworks.
pub trait ArtworkSource {
    /// Every artwork on the 1-based `page`, with or without an image.
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<Vec<Artwork>>> + Send;
}

/// Client for the Art Institute of Chicago artwork listing endpoint.
#[derive(Clone, Debug)]
pub struct ArticClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArticClient {
    /// Client for the listing API rooted at `base_url`.
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        ArticClient {
            http,
            base_url: endpoint_base(base_url),
        }
    }

    fn artworks_url(&self) -> String {
        format!("{}/artworks", self.base_url)
    }
}

impl ArtworkSource for ArticClient {
    // Returns the raw page. Filtering on `image_id` is the picker's job.
    async fn fetch_page(&self, page: u32) -> Result<Vec<Artwork>> {
        let page = page.to_string();
        let limit = PAGE_SIZE.to_string();
        let query = [
            ("page", page.as_str()),
            ("limit", limit.as_str()),
            ("fields", ARTWORK_FIELDS),
        ];
        let response: ArtworkPageResponse =
            get_json(&self.http, ENDPOINT, &self.artworks_url(), &query).await?;
        let artworks = response.data.unwrap_or_default();
        debug!("Artwork page {page} returned {} records", artworks.len());
        Ok(artworks)
    }
}

/// Builds the display URL for an artwork image on the IIIF image service.
pub fn image_url(image_base: &str, image_id: &str) -> String {
    format!(
        "{}/iiif/2/{image_id}/full/843,/0/default.jpg",
        endpoint_base(image_base)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_follows_iiif_pattern() {
        assert_eq!(
            image_url("https://www.artic.edu/", "2d484387-2509-5e8e-2c43-22f9981972eb"),
            "https://www.artic.edu/iiif/2/2d484387-2509-5e8e-2c43-22f9981972eb/full/843,/0/default.jpg"
        );
    }

    #[test]
    fn artworks_url_joins_base() {
        let client = ArticClient::new(reqwest::Client::new(), "https://api.artic.edu/api/v1");
        assert_eq!(client.artworks_url(), "https://api.artic.edu/api/v1/artworks");
    }
}
