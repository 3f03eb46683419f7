//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! Specifically, we try to find a metaninza-docs.toml, and if present we load settings from there.
//! This provides the starting topic, the compact layout threshold and diagram preferences.

use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "metaninza-docs.toml";

#[derive(Facet, Clone, Debug)]
/// Reader preferences loaded from metaninza-docs.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "introduction".to_string())]
    /// Topic shown at start-up.
    pub initial_topic: String,
    #[facet(default = 100)]
    /// Terminal width below which the sidebar becomes an overlay.
    pub compact_width: u16,
    #[facet(default = "base16-ocean.dark".to_string())]
    /// syntect theme used for payload samples.
    pub theme: String,
    #[facet(default = 24.0)]
    /// Spacing of the dotted diagram background, in diagram units.
    pub grid_gap: f64,
    #[facet(default = true)]
    /// Whether full-screen diagrams start with the minimap visible.
    pub show_minimap: bool,
    #[facet(default = 18)]
    /// Rows given to a diagram drawn inside a page.
    pub diagram_height: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    #[must_use]
    /// Every field at its default.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn defaults() -> Self {
        facet_toml::from_str::<Self>("").unwrap()
    }

    #[must_use]
    /// Load configuration from metaninza-docs.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::defaults();
        };
        match facet_toml::from_str::<Self>(&contents) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "invalid config, using defaults");
                Self::defaults()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
