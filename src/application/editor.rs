//! Bootstrap payload for the embedded rich-text editor.
//!
//! The widget itself is third-party and loaded from its CDN; this module only
//! serializes the static configuration the dashboard hands to it.

use serde::Serialize;

use crate::config::EditorSettings;

/// Configuration serialized into the editor page for the adapter script.
#[derive(Debug, Clone, Serialize)]
pub struct EditorBootstrap<'a> {
    pub height: u32,
    pub menubar: bool,
    pub plugins: &'a [String],
    pub toolbar: &'a str,
    pub content_css: &'a str,
}

impl<'a> EditorBootstrap<'a> {
    pub fn from_settings(settings: &'a EditorSettings) -> Self {
        Self {
            height: settings.height,
            menubar: settings.menubar,
            plugins: &settings.plugins,
            toolbar: &settings.toolbar,
            content_css: &settings.content_css,
        }
    }
}

/// Render the bootstrap as the JSON blob embedded in the editor template.
pub fn bootstrap_json(settings: &EditorSettings) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EditorBootstrap::from_settings(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_carries_configured_surface() {
        let settings = EditorSettings::default();
        let json = bootstrap_json(&settings).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");

        assert_eq!(value["height"], u64::from(settings.height));
        assert!(value["plugins"].as_array().is_some_and(|p| !p.is_empty()));
        assert!(value["toolbar"].as_str().is_some_and(|t| !t.is_empty()));
    }
}
