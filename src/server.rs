use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{Query, State},
    response::{Html, Redirect},
    routing::get,
};
use log::info;
use serde::Deserialize;

use crate::{
    clients::{ArtworkSource, TrackSource, errors::Result},
    pairing::Pairing,
    render::escape,
    surface::{Board, PanelBoard},
};

type Shared<M, A> = Arc<Pairing<M, A, PanelBoard>>;

#[derive(Deserialize, Debug)]
struct SearchParams {
    #[serde(default)]
    artist: String,
}

/// Routes of the pairing page. All requests share one board, so the page
/// always shows the latest started pairing.
pub fn router<M, A>(pairing: Shared<M, A>) -> Router
where
    M: TrackSource + Send + Sync + 'static,
    A: ArtworkSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index::<M, A>))
        .route("/search", get(search::<M, A>))
        .route("/surprise", get(surprise::<M, A>))
        .route("/theme", get(toggle_theme::<M, A>))
        .with_state(pairing)
}

/// Binds `addr` and serves the pairing page until the process exits.
pub async fn serve<M, A>(pairing: Pairing<M, A, PanelBoard>, addr: SocketAddr) -> Result<()>
where
    M: TrackSource + Send + Sync + 'static,
    A: ArtworkSource + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving pairing page on http://{}", listener.local_addr()?);
    axum::serve(listener, router(Arc::new(pairing))).await?;
    Ok(())
}

async fn index<M, A>(State(pairing): State<Shared<M, A>>) -> Html<String>
where
    M: TrackSource + Send + Sync + 'static,
    A: ArtworkSource + Send + Sync + 'static,
{
    Html(page(&pairing.surface().snapshot(), ""))
}

async fn search<M, A>(
    State(pairing): State<Shared<M, A>>,
    Query(params): Query<SearchParams>,
) -> Html<String>
where
    M: TrackSource + Send + Sync + 'static,
    A: ArtworkSource + Send + Sync + 'static,
{
    let outcome = pairing.search_by_artist(&params.artist).await;
    info!("GET /search artist={:?} -> {outcome:?}", params.artist);
    Html(page(&pairing.surface().snapshot(), params.artist.trim()))
}

async fn surprise<M, A>(State(pairing): State<Shared<M, A>>) -> Html<String>
where
    M: TrackSource + Send + Sync + 'static,
    A: ArtworkSource + Send + Sync + 'static,
{
    let outcome = pairing.surprise().await;
    info!("GET /surprise -> {outcome:?}");
    Html(page(&pairing.surface().snapshot(), ""))
}

async fn toggle_theme<M, A>(State(pairing): State<Shared<M, A>>) -> Redirect
where
    M: TrackSource + Send + Sync + 'static,
    A: ArtworkSource + Send + Sync + 'static,
{
    let theme = pairing.surface().toggle_theme();
    info!("GET /theme -> {theme:?}");
    Redirect::to("/")
}

fn page(board: &Board, artist: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Art &amp; Music Pairing</title>
<style>
body {{ background: #111; color: #eee; font-family: sans-serif; }}
body.light-mode {{ background: #fafafa; color: #111; }}
#connectionMessage {{ white-space: pre-line; }}
</style>
</head>
<body class="{theme_class}">
<a id="toggleTheme" href="/theme">{theme_label}</a>
<form action="/search" method="get">
<input id="artistInput" name="artist" value="{artist}" placeholder="Artist name">
<button id="searchButton" type="submit">Search</button>
</form>
<a id="surpriseButton" href="/surprise">Surprise pairing</a>
<section id="musicResult">{music}</section>
<section id="artResult">{art}</section>
<p id="connectionMessage">{caption}</p>
</body>
</html>
"#,
        theme_class = board.theme.css_class(),
        theme_label = board.theme.toggle_label(),
        artist = escape(artist),
        music = board.music.to_html(),
        art = board.art.to_html(),
        caption = escape(&board.caption),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render::Panel, surface::Theme};

    #[test]
    fn page_reflects_board() {
        let board = Board {
            music: Panel::Error,
            art: Panel::Loading,
            caption: "line <1>\nline 2".into(),
            theme: Theme::Light,
        };
        let html = page(&board, "Nina \"Simone\"");
        assert!(html.contains(r#"<body class="light-mode">"#));
        assert!(html.contains(r#"<a id="toggleTheme" href="/theme">Dark</a>"#));
        assert!(html.contains(r#"value="Nina &quot;Simone&quot;""#));
        assert!(html.contains("<section id=\"musicResult\"><p>Error loading data.</p></section>"));
        assert!(html.contains("<section id=\"artResult\">Loading...</section>"));
        assert!(html.contains("line &lt;1&gt;\nline 2"));
    }
}
