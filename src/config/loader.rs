//! Config layer discovery and the load pipeline
//!
//! Each layer is read, parsed, trimmed and validated on its own. The system
//! layer is then sanitized and the user layer merged on top of it before the
//! result is projected into the presentation model.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::document::ShortcutsDocument;
use super::merge::{merge, sanitize};
use super::validate::{validate, ExecutableProbe, PathProbe};
use crate::constants::config::*;
use crate::presentation::{FsIconSource, IconSource, PresentationConfig};

/// Locates the config layers
pub trait ConfigPaths: Send + Sync {
    /// System-wide config file, if one exists
    fn system_config(&self) -> Option<PathBuf>;
    /// Per-user config file, if one exists
    fn user_config(&self) -> Option<PathBuf>;
}

/// Platform-specific config locations
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigPaths;

/// System-wide config root for `os`
///
/// Windows reads it from `PROGRAMDATA`; an unset or empty value means there is
/// no system layer.
pub fn system_root(os: &str, program_data: Option<OsString>) -> Option<PathBuf> {
    match os {
        "windows" => program_data.filter(|root| !root.is_empty()).map(PathBuf::from),
        "macos" => Some(PathBuf::from(MACOS_SYSTEM_ROOT)),
        "linux" => Some(PathBuf::from(LINUX_SYSTEM_ROOT)),
        _ => None,
    }
}

/// Per-user config root for `os`
pub fn user_root(os: &str, config_dir: Option<PathBuf>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    match os {
        "windows" | "macos" => home_dir,
        _ => config_dir,
    }
}

impl ConfigPaths for SystemConfigPaths {
    fn system_config(&self) -> Option<PathBuf> {
        system_root(std::env::consts::OS, std::env::var_os(WINDOWS_SYSTEM_ROOT_VAR))
            .and_then(|root| find_config_file(&root))
    }

    fn user_config(&self) -> Option<PathBuf> {
        user_root(std::env::consts::OS, dirs::config_dir(), dirs::home_dir())
            .and_then(|root| find_config_file(&root))
    }
}

/// First existing `<root>/launchdock/launchdock.{yml,yaml}`
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    FILENAMES
        .iter()
        .map(|filename| root.join(APP_DIR).join(filename))
        .find(|path| path.is_file())
}

/// Drives the load pipeline with injected collaborators
#[derive(Clone)]
pub struct ConfigLoader {
    paths: Arc<dyn ConfigPaths>,
    probe: Arc<dyn ExecutableProbe>,
    icons: Arc<dyn IconSource>,
}

impl ConfigLoader {
    pub fn new(
        paths: Arc<dyn ConfigPaths>,
        probe: Arc<dyn ExecutableProbe>,
        icons: Arc<dyn IconSource>,
    ) -> Self {
        Self { paths, probe, icons }
    }

    /// Loader backed by the real filesystem and `PATH`
    pub fn system() -> Self {
        Self::new(
            Arc::new(SystemConfigPaths),
            Arc::new(PathProbe),
            Arc::new(FsIconSource),
        )
    }

    /// Load a single, explicitly chosen config file
    pub fn load_from(&self, path: &Path) -> Result<PresentationConfig> {
        let document = read_layer(path, self.probe.as_ref())?;
        Ok(self.project(document.map(sanitize)))
    }

    /// Load and merge the system and user layers
    pub async fn load_default(&self) -> Result<PresentationConfig> {
        let system_path = self.paths.system_config();
        let user_path = self.paths.user_config();
        info!(system = ?system_path, user = ?user_path, "Loading config layers");

        let system_task = self.spawn_read(system_path);
        let user_task = self.spawn_read(user_path);
        let (system, user) = tokio::join!(system_task, user_task);
        let system = system.context("System config reader panicked")??;
        let user = user.context("User config reader panicked")??;

        let document = match (system, user) {
            (Some(system), user) => merge(Some(sanitize(system)), user),
            (None, user) => user.map(sanitize),
        };
        Ok(self.project(document))
    }

    fn spawn_read(
        &self,
        path: Option<PathBuf>,
    ) -> tokio::task::JoinHandle<Result<Option<ShortcutsDocument>>> {
        let probe = Arc::clone(&self.probe);
        tokio::task::spawn_blocking(move || match path {
            Some(path) => read_layer(&path, probe.as_ref()),
            None => Ok(None),
        })
    }

    fn project(&self, document: Option<ShortcutsDocument>) -> PresentationConfig {
        match document {
            Some(document) => document.to_presentation(self.icons.as_ref()),
            None => PresentationConfig::default(),
        }
    }
}

/// Read, parse, trim and validate one layer; a missing file is no layer
pub fn read_layer(path: &Path, probe: &dyn ExecutableProbe) -> Result<Option<ShortcutsDocument>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Config file not found, skipping layer");
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Could not read {}", path.display()));
        }
    };

    let document = parse_document(&contents)
        .with_context(|| format!("Could not parse {}", path.display()))?;
    let Some(mut document) = document else {
        return Ok(None);
    };
    document.trim();
    validate(Some(&document), probe)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    info!(path = %path.display(), shortcuts = document.entries.len(), "Loaded config layer");
    Ok(Some(document))
}

/// An empty or `null` document is treated like a missing file
fn parse_document(contents: &str) -> Result<Option<ShortcutsDocument>, serde_norway::Error> {
    if contents.trim().is_empty() {
        return Ok(None);
    }
    serde_norway::from_str(contents)
}
