//! Presentation model handed to the GUI shell
//!
//! Built once per load from the merged shortcuts document. Serializes with
//! the PascalCase keys the web frontend binds to.

pub mod icon;
pub mod layout;

use serde::Serialize;

use crate::constants::{layout as geometry, nav};
pub use icon::{FsIconSource, IconSource, InlineIcon};

/// App icon shown in the navigation bar
const APP_ICON: &[u8] = include_bytes!("../../assets/icon.png");

/// Everything the shell needs to render the launcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PresentationConfig {
    #[serde(rename = "UI")]
    pub ui: Ui,
    pub shortcuts: Vec<PresentationEntry>,
    /// False when loading failed; the shell must not render anything else
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ui {
    pub nav: Nav,
    pub content: Content,
}

/// Title bar settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Nav {
    pub title: String,
    pub app_icon: InlineIcon,
    pub icon_size: u32,
    pub icon_url: String,
    pub menu_height: u32,
}

/// Icon grid geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Content {
    pub icon_columns: u32,
    pub icons_per_row: u32,
    /// Icon edge length in pixels
    pub icon_size: u32,
    /// Margin in spacing units
    pub margin: u32,
}

/// A resolved, launchable shortcut
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PresentationEntry {
    pub id: usize,
    pub name: String,
    pub icon: InlineIcon,
    pub command: String,
    pub command_args: Vec<String>,
    pub url: String,
}

impl PresentationConfig {
    /// Default configuration sized for `shortcut_count` entries
    pub fn new(shortcut_count: usize) -> Self {
        Self {
            ui: Ui::new(shortcut_count),
            shortcuts: Vec::new(),
            valid: true,
        }
    }

    /// Placeholder returned alongside a fatal load error
    pub fn invalid() -> Self {
        Self {
            valid: false,
            ..Self::new(0)
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Ui {
    pub fn new(shortcut_count: usize) -> Self {
        Self {
            nav: Nav::default(),
            content: Content::new(shortcut_count),
        }
    }

    pub fn width(&self) -> u32 {
        layout::width(&self.content)
    }

    pub fn height(&self, shortcut_count: usize) -> u32 {
        layout::height(&self.content, shortcut_count)
    }
}

impl Default for Nav {
    fn default() -> Self {
        Self {
            title: nav::DEFAULT_TITLE.to_string(),
            app_icon: InlineIcon::from_bytes(APP_ICON),
            icon_size: nav::APP_ICON_SIZE,
            icon_url: nav::APP_ICON_URL.to_string(),
            menu_height: nav::MENU_HEIGHT,
        }
    }
}

impl Content {
    pub fn new(shortcut_count: usize) -> Self {
        let (icon_columns, icons_per_row) = layout::columns_and_per_row(shortcut_count);
        Self {
            icon_columns,
            icons_per_row,
            icon_size: geometry::ICON_SIZE * geometry::SPACING_SCALE,
            margin: geometry::MARGIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PresentationConfig::default();
        assert!(config.valid);
        assert!(config.shortcuts.is_empty());
        assert_eq!(config.ui.nav.title, "Launchdock");
        assert_eq!(config.ui.nav.icon_size, 23);
        assert_eq!(config.ui.nav.menu_height, 8);
        assert_eq!(config.ui.content.icon_size, 32);
        assert_eq!(config.ui.content.margin, 5);
        assert_eq!(config.ui.width(), 282);
        assert_eq!(config.ui.height(0), 105);
    }

    #[test]
    fn test_app_icon_is_embedded_png() {
        let nav = Nav::default();
        assert!(nav.app_icon.data_uri.starts_with("data:image/png;base64,iVBOR"));
        assert!(nav.app_icon.source_path.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let config = PresentationConfig::invalid();
        assert!(!config.valid);
        assert_eq!(config.ui, Ui::new(0));
    }

    #[test]
    fn test_serializes_frontend_keys() {
        let json = serde_json::to_value(PresentationConfig::new(3)).unwrap();
        assert_eq!(json["Valid"], true);
        assert_eq!(json["UI"]["Nav"]["Title"], "Launchdock");
        assert_eq!(json["UI"]["Content"]["IconColumns"], 3);
        assert_eq!(json["UI"]["Content"]["IconsPerRow"], 5);
        assert!(json["UI"]["Nav"]["AppIcon"]["Base64"].is_string());
        assert!(json["UI"]["Nav"]["AppIcon"].get("RawBytes").is_none());
        assert_eq!(json["Shortcuts"], serde_json::json!([]));
    }
}
