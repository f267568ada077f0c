//! Inline icon encoding
//!
//! Icons are shipped to the frontend as `data:` URIs so the web view never
//! touches the filesystem. Resolution never fails: anything unreadable turns
//! into an empty PNG payload.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;
use std::fs;
use tracing::debug;

use crate::constants::icon::{DEFAULT_MIME_TYPE, MIME_TYPES};

/// Source of icon bytes
pub trait IconSource: Send + Sync {
    /// Read the file at `path`, or `None` when it is missing or unreadable
    fn read(&self, path: &str) -> Option<Vec<u8>>;
}

/// Reads icons straight from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FsIconSource;

impl IconSource for FsIconSource {
    fn read(&self, path: &str) -> Option<Vec<u8>> {
        fs::read(path)
            .inspect_err(|e| debug!(path = %path, error = %e, "Icon not readable"))
            .ok()
    }
}

/// Icon resolved into a displayable data URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InlineIcon {
    #[serde(rename = "Path")]
    pub source_path: String,
    #[serde(skip)]
    pub raw_bytes: Vec<u8>,
    #[serde(rename = "Base64")]
    pub data_uri: String,
}

impl InlineIcon {
    /// Resolve an icon file through `source`
    pub fn from_path(path: &str, source: &dyn IconSource) -> Self {
        let raw_bytes = if path.is_empty() {
            Vec::new()
        } else {
            source.read(path).unwrap_or_default()
        };
        Self::encode(path.to_string(), raw_bytes)
    }

    /// Wrap bytes that are already in memory (e.g. embedded assets)
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::encode(String::new(), bytes.to_vec())
    }

    fn encode(source_path: String, raw_bytes: Vec<u8>) -> Self {
        let data_uri = if raw_bytes.is_empty() {
            empty_data_uri()
        } else {
            format!("data:{};base64,{}", mime_type(&source_path), BASE64.encode(&raw_bytes))
        };
        Self {
            source_path,
            raw_bytes,
            data_uri,
        }
    }
}

fn empty_data_uri() -> String {
    format!("data:{DEFAULT_MIME_TYPE};base64,")
}

/// Text after the last `.` of the final path segment
///
/// A leading dot counts (`.png` has extension `png`) and a trailing separator
/// leaves an empty final segment.
fn extension(path: &str) -> String {
    let name = path.rsplit(std::path::is_separator).next().unwrap_or_default();
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

fn lookup(ext: &str) -> Option<&'static str> {
    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

fn mime_type(path: &str) -> &'static str {
    lookup(&extension(path)).unwrap_or(DEFAULT_MIME_TYPE)
}

/// Whether `path` has one of the supported image extensions
pub fn is_valid_extension(path: &str) -> bool {
    lookup(&extension(path)).is_some()
}

/// Supported extensions, sorted and joined for error messages
pub fn supported_extensions() -> String {
    let mut extensions: Vec<&str> = MIME_TYPES.iter().map(|(ext, _)| *ext).collect();
    extensions.sort_unstable();
    extensions.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapIconSource(HashMap<String, Vec<u8>>);

    impl IconSource for MapIconSource {
        fn read(&self, path: &str) -> Option<Vec<u8>> {
            self.0.get(path).cloned()
        }
    }

    #[test]
    fn test_missing_file_gives_empty_png() {
        let icon = InlineIcon::from_path("/definitely/not/here.svg", &FsIconSource);
        assert_eq!(icon.data_uri, "data:image/png;base64,");
        assert!(icon.raw_bytes.is_empty());
        assert_eq!(icon.source_path, "/definitely/not/here.svg");
    }

    #[test]
    fn test_no_path_no_bytes_gives_empty_png() {
        assert_eq!(InlineIcon::from_path("", &FsIconSource).data_uri, "data:image/png;base64,");
        assert_eq!(InlineIcon::from_bytes(&[]).data_uri, "data:image/png;base64,");
    }

    #[test]
    fn test_existing_file_uses_extension_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.SVG");
        fs::write(&path, b"<svg/>").unwrap();

        let icon = InlineIcon::from_path(path.to_str().unwrap(), &FsIconSource);
        assert!(icon.data_uri.starts_with("data:image/svg+xml;base64,"));
        assert!(icon.data_uri.len() > "data:image/svg+xml;base64,".len());
        assert_eq!(icon.raw_bytes, b"<svg/>");
    }

    #[test]
    fn test_bytes_are_base64_encoded() {
        let source = MapIconSource(HashMap::from([("a.gif".to_string(), b"hello".to_vec())]));
        let icon = InlineIcon::from_path("a.gif", &source);
        assert_eq!(icon.data_uri, "data:image/gif;base64,aGVsbG8=");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_png() {
        let source = MapIconSource(HashMap::from([("notes.doc".to_string(), vec![1, 2, 3])]));
        let icon = InlineIcon::from_path("notes.doc", &source);
        assert_eq!(icon.data_uri, "data:image/png;base64,AQID");

        let embedded = InlineIcon::from_bytes(&[1, 2, 3]);
        assert_eq!(embedded.data_uri, "data:image/png;base64,AQID");
    }

    #[test]
    fn test_is_valid_extension() {
        for ext in ["apng", "avif", "bmp", "gif", "ico", "jpeg", "jpg", "png", "svg", "tif", "tiff", "webp"] {
            assert!(is_valid_extension(&format!("icons/app.{ext}")), "{ext} should be valid");
        }
        assert!(is_valid_extension("icons/APP.PNG"));
        assert!(is_valid_extension("/icons/.png"));
        assert!(is_valid_extension("app.tar.svg"));
        for path in ["", "icons/app", "icons/app.doc", "icons/app.pdf", "/icons/dir.png/", "icons.png/app"] {
            assert!(!is_valid_extension(path), "{path:?} should be invalid");
        }
    }

    #[test]
    fn test_supported_extensions_sorted() {
        assert_eq!(
            supported_extensions(),
            "apng, avif, bmp, gif, ico, jpeg, jpg, png, svg, tif, tiff, webp"
        );
    }
}
