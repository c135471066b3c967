//! Theme and Colors
//!
//! AdForge ships two palettes: a dark one (the default) and a light one for
//! bright terminals. `Ctrl+T` toggles between them at runtime and the choice
//! is persisted to `theme.toml` in the user's config directory, so the next
//! launch starts where the last one left off.
//!
//! A missing or unreadable theme file is never an error; the app falls back
//! to the dark palette and keeps running.

use std::path::PathBuf;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Which of the two palettes is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    /// Light copy on near-black slate.
    Dark,
    /// Dark copy on pale gray.
    Light,
}

impl ThemeKind {
    /// The other palette.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// A resolved color palette, ready for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Which palette this is.
    pub kind: ThemeKind,
    /// Screen background.
    pub background: Color,
    /// Background for the status bar.
    pub panel: Color,
    /// Unfocused panel borders.
    pub border: Color,
    /// Primary copy.
    pub text: Color,
    /// Secondary copy: hints, metadata, footers.
    pub text_dim: Color,
    /// Titles, focused borders, highlights.
    pub accent: Color,
    /// Success notices.
    pub success: Color,
    /// Warnings and over-length markers.
    pub warning: Color,
    /// Error panel and error notices.
    pub error: Color,
}

// ============================================================================
// Palettes
// ============================================================================

/// Dark palette - indigo accents on near-black slate.
const DARK: Theme = Theme {
    kind: ThemeKind::Dark,
    background: Color::Rgb(17, 24, 39), // Near-black slate
    panel: Color::Rgb(31, 41, 55),
    border: Color::Rgb(55, 65, 81),
    text: Color::Rgb(229, 231, 235),
    text_dim: Color::Rgb(156, 163, 175),
    accent: Color::Rgb(129, 140, 248), // Soft indigo
    success: Color::Rgb(74, 222, 128),
    warning: Color::Rgb(250, 204, 21),
    error: Color::Rgb(248, 113, 113),
};

/// Light palette - deeper indigo on pale gray.
const LIGHT: Theme = Theme {
    kind: ThemeKind::Light,
    background: Color::Rgb(243, 244, 246), // Pale gray
    panel: Color::Rgb(229, 231, 235),
    border: Color::Rgb(209, 213, 219),
    text: Color::Rgb(31, 41, 55),
    text_dim: Color::Rgb(107, 114, 128),
    accent: Color::Rgb(79, 70, 229), // Deep indigo
    success: Color::Rgb(22, 163, 74),
    warning: Color::Rgb(202, 138, 4),
    error: Color::Rgb(220, 38, 38),
};

impl Theme {
    /// The palette for a given kind.
    #[must_use]
    pub const fn of(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => DARK,
            ThemeKind::Light => LIGHT,
        }
    }

    /// The other palette.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self::of(self.kind.toggled())
    }

    /// Load the persisted palette choice, falling back to dark.
    #[must_use]
    pub fn load() -> Self {
        load_from_path(theme_config_path())
    }
}

impl Default for Theme {
    fn default() -> Self {
        DARK
    }
}

// ============================================================================
// Persistence
// ============================================================================

/// On-disk shape of `theme.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ThemeToml {
    /// The persisted palette choice.
    theme: Option<ThemeKind>,
}

/// Where the palette choice is persisted:
/// `{config_dir}/adforge/theme.toml`.
#[must_use]
pub fn theme_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("adforge").join("theme.toml"))
}

/// Persist the palette choice, best effort. Failures are logged and the
/// session keeps the toggled palette either way.
pub fn persist(kind: ThemeKind) {
    persist_to_path(kind, theme_config_path());
}

fn load_from_path(path: Option<PathBuf>) -> Theme {
    let Some(path) = path else {
        return Theme::default();
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No theme file, using dark palette");
            return Theme::default();
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Could not read theme file");
            return Theme::default();
        }
    };

    match toml::from_str::<ThemeToml>(&raw) {
        Ok(parsed) => {
            let kind = parsed.theme.unwrap_or(ThemeKind::Dark);
            tracing::debug!(theme = ?kind, "Loaded theme choice");
            Theme::of(kind)
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "Ignoring malformed theme file");
            Theme::default()
        }
    }
}

fn persist_to_path(kind: ThemeKind, path: Option<PathBuf>) {
    let Some(path) = path else {
        return;
    };

    let rendered = match toml::to_string_pretty(&ThemeToml { theme: Some(kind) }) {
        Ok(rendered) => rendered,
        Err(e) => {
            tracing::warn!(error = %e, "Could not render theme file");
            return;
        }
    };

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!(error = %e, path = %parent.display(), "Could not create config directory");
            return;
        }
    }

    match std::fs::write(&path, rendered) {
        Ok(()) => tracing::debug!(path = %path.display(), theme = ?kind, "Theme choice saved"),
        Err(e) => tracing::warn!(error = %e, path = %path.display(), "Could not save theme choice"),
    }
}
