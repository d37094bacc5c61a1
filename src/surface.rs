use std::sync::{Arc, Mutex, PoisonError};

use crate::render::Panel;

/// Light or dark display mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    /// Default mode.
    #[default]
    Dark,
    /// Light mode.
    Light,
}

impl Theme {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Body class applied for this mode.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Dark => "",
            Theme::Light => "light-mode",
        }
    }

    /// Label of the toggle control, naming the mode it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light",
            Theme::Light => "Dark",
        }
    }
}

/// The display regions a flow writes into.
///
/// Implementations are shared between concurrent flows, hence `&self`.
pub trait Surface {
    /// Replaces the music region.
    fn show_music(&self, panel: Panel);
    /// Replaces the art region.
    fn show_art(&self, panel: Panel);
    /// Replaces the caption text.
    fn show_caption(&self, caption: &str);
}

/// Everything currently on display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    /// Music region.
    pub music: Panel,
    /// Art region.
    pub art: Panel,
    /// Caption text, empty when cleared.
    pub caption: String,
    /// Display mode.
    pub theme: Theme,
}

/// In-memory surface. Clones share the same regions.
#[derive(Clone, Debug, Default)]
pub struct PanelBoard {
    state: Arc<Mutex<Board>>,
}

impl PanelBoard {
    /// Blank board in dark mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of what is currently shown.
    pub fn snapshot(&self) -> Board {
        self.with(|board| board.clone())
    }

    /// Flips the display mode and returns the new one.
    pub fn toggle_theme(&self) -> Theme {
        self.with(|board| {
            board.theme = board.theme.toggled();
            board.theme
        })
    }

    fn with<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R {
        // A panicked writer leaves a whole board behind, so keep using it.
        let mut board = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut board)
    }
}

impl Surface for PanelBoard {
    fn show_music(&self, panel: Panel) {
        self.with(|board| board.music = panel);
    }

    fn show_art(&self, panel: Panel) {
        self.with(|board| board.art = panel);
    }

    fn show_caption(&self, caption: &str) {
        self.with(|board| caption.clone_into(&mut board.caption));
    }
}
