//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Config file discovery constants
pub mod config {
    /// Subdirectory appended to the system and user config roots
    pub const APP_DIR: &str = "launchdock";

    /// Config file candidates, probed in this order
    pub const FILENAMES: [&str; 2] = ["launchdock.yml", "launchdock.yaml"];

    /// System config root on Linux
    pub const LINUX_SYSTEM_ROOT: &str = "/etc";

    /// System config root on macOS
    pub const MACOS_SYSTEM_ROOT: &str = "/Library/Application Support";

    /// Environment variable holding the system config root on Windows
    pub const WINDOWS_SYSTEM_ROOT_VAR: &str = "PROGRAMDATA";
}

/// Patch directive values accepted in the `$patch` key
pub mod patch {
    pub const REPLACE: &str = "replace";
    pub const MERGE: &str = "merge";
    pub const DELETE: &str = "delete";
}

/// Navigation bar defaults
pub mod nav {
    /// Window title used when no layer sets one
    pub const DEFAULT_TITLE: &str = "Launchdock";

    /// App icon size in the title bar (pixels)
    pub const APP_ICON_SIZE: u32 = 23;

    /// Link opened when the app icon is clicked
    pub const APP_ICON_URL: &str = "https://github.com/launchdock/launchdock";

    /// Menu bar height in spacing units
    pub const MENU_HEIGHT: u32 = 8;
}

/// Window and icon grid geometry
pub mod layout {
    /// Window border width (pixels)
    pub const BORDER: u32 = 1;

    /// Pixels per spacing unit
    pub const SPACING_SCALE: u32 = 4;

    /// Shortcut icon size in spacing units
    pub const ICON_SIZE: u32 = 8;

    /// Margin between icons in spacing units
    pub const MARGIN: u32 = 5;

    /// Columns used when there are no shortcuts
    pub const DEFAULT_ICON_COLUMNS: u32 = 1;

    /// Narrowest row, also the minimum icon count used for height
    pub const MIN_ICONS_PER_ROW: u32 = 5;

    /// Widest row
    pub const MAX_ICONS_PER_ROW: u32 = 20;
}

/// Icon encoding constants
pub mod icon {
    /// MIME type for unknown extensions and empty payloads
    pub const DEFAULT_MIME_TYPE: &str = "image/png";

    /// Extension (lowercase, no dot) to MIME type
    pub const MIME_TYPES: &[(&str, &str)] = &[
        ("apng", "image/apng"),
        ("avif", "image/avif"),
        ("bmp", "image/bmp"),
        ("gif", "image/gif"),
        ("ico", "image/x-icon"),
        ("jpeg", "image/jpeg"),
        ("jpg", "image/jpeg"),
        ("png", "image/png"),
        ("svg", "image/svg+xml"),
        ("tif", "image/tiff"),
        ("tiff", "image/tiff"),
        ("webp", "image/webp"),
    ];
}

/// Config validation limits
pub mod validation {
    /// Minimum title/name length in code points
    pub const MIN_NAME_LENGTH: usize = 3;

    /// Maximum title/name length in code points
    pub const MAX_NAME_LENGTH: usize = 30;

    /// Largest accepted icon file (1 MiB)
    pub const MAX_ICON_SIZE: u64 = 1 << 20;
}
