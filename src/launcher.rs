//! Application object handed to the GUI shell
//!
//! Owns the loaded presentation model and sizes the window to fit it. The
//! window and the error dialog are injected so the startup sequence runs the
//! same way under test as in production.

use anyhow::Error;
use std::path::PathBuf;
use tracing::{error, info};

use crate::config::ConfigLoader;
use crate::presentation::PresentationConfig;

/// The shell window the launcher draws into
pub trait Window {
    fn set_title(&mut self, title: &str);
    fn set_size(&mut self, width: u32, height: u32);
    fn set_min_size(&mut self, width: u32, height: u32);
    fn set_max_size(&mut self, width: u32, height: u32);
    fn quit(&mut self);
}

/// User-facing error reporting
pub trait ErrorDialog {
    fn show(&mut self, message: &str, err: &Error);
}

/// Window stand-in used when no renderer is attached
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeadlessWindow {
    pub title: String,
    pub size: (u32, u32),
    pub min_size: (u32, u32),
    pub max_size: (u32, u32),
    pub quit: bool,
}

impl Window for HeadlessWindow {
    fn set_title(&mut self, title: &str) {
        info!(title = %title, "Window title set");
        self.title = title.to_string();
    }

    fn set_size(&mut self, width: u32, height: u32) {
        info!(width, height, "Window size set");
        self.size = (width, height);
    }

    fn set_min_size(&mut self, width: u32, height: u32) {
        self.min_size = (width, height);
    }

    fn set_max_size(&mut self, width: u32, height: u32) {
        self.max_size = (width, height);
    }

    fn quit(&mut self) {
        info!("Window quit requested");
        self.quit = true;
    }
}

/// Reports errors through the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDialog;

impl ErrorDialog for LogDialog {
    fn show(&mut self, message: &str, err: &Error) {
        error!(error = ?err, "{message}");
    }
}

pub struct Launcher {
    loader: ConfigLoader,
    custom_config_path: Option<PathBuf>,
    config: PresentationConfig,
}

impl Launcher {
    pub fn new(loader: ConfigLoader, custom_config_path: Option<PathBuf>) -> Self {
        Self {
            loader,
            custom_config_path,
            config: PresentationConfig::default(),
        }
    }

    /// Load the config and size `window` for it
    ///
    /// A failed load is reported through `dialog`, leaves an invalid config
    /// behind and asks the window to quit.
    pub async fn startup(&mut self, window: &mut dyn Window, dialog: &mut dyn ErrorDialog) {
        let loaded = match &self.custom_config_path {
            Some(path) => self.loader.load_from(path),
            None => self.loader.load_default().await,
        };

        match loaded {
            Ok(config) => {
                self.config = config;
                self.apply_geometry(window);
            }
            Err(err) => {
                self.config = PresentationConfig::invalid();
                dialog.show("Error occurred during application startup", &err);
                window.quit();
            }
        }
    }

    fn apply_geometry(&self, window: &mut dyn Window) {
        let width = self.config.ui.width();
        let height = self.config.ui.height(self.config.shortcuts.len());
        window.set_title(&self.config.ui.nav.title);
        window.set_size(width, height);
        window.set_min_size(width, height);
        window.set_max_size(width, height);
    }

    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    pub fn custom_config_path(&self) -> Option<&PathBuf> {
        self.custom_config_path.as_ref()
    }

    pub fn app_version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::ConfigPaths;
    use crate::config::validate::ExecutableProbe;
    use crate::presentation::FsIconSource;
    use std::fs;
    use std::sync::Arc;

    struct StubPaths(Option<PathBuf>);

    impl ConfigPaths for StubPaths {
        fn system_config(&self) -> Option<PathBuf> {
            self.0.clone()
        }

        fn user_config(&self) -> Option<PathBuf> {
            None
        }
    }

    struct AnyCommand;

    impl ExecutableProbe for AnyCommand {
        fn is_executable(&self, _command: &str) -> bool {
            true
        }
    }

    #[derive(Default)]
    struct RecordingDialog(Vec<String>);

    impl ErrorDialog for RecordingDialog {
        fn show(&mut self, message: &str, err: &Error) {
            self.0.push(format!("{message}: {err}"));
        }
    }

    fn launcher(system: Option<PathBuf>, custom: Option<PathBuf>) -> Launcher {
        let loader = ConfigLoader::new(
            Arc::new(StubPaths(system)),
            Arc::new(AnyCommand),
            Arc::new(FsIconSource),
        );
        Launcher::new(loader, custom)
    }

    #[tokio::test]
    async fn test_startup_sizes_window() {
        let dir = tempfile::tempdir().unwrap();
        let icon = dir.path().join("app.png");
        fs::write(&icon, b"png").unwrap();
        let system = dir.path().join("launchdock.yml");
        fs::write(
            &system,
            format!("title: Work Dock\nshortcuts:\n  - name: Terminal\n    icon: {}\n    command: kitty\n", icon.display()),
        )
        .unwrap();

        let mut launcher = launcher(Some(system), None);
        let mut window = HeadlessWindow::default();
        let mut dialog = RecordingDialog::default();
        launcher.startup(&mut window, &mut dialog).await;

        assert!(launcher.config().valid);
        assert!(dialog.0.is_empty());
        assert_eq!(window.title, "Work Dock");
        assert_eq!(window.size, (282, 105));
        assert_eq!(window.min_size, (282, 105));
        assert_eq!(window.max_size, (282, 105));
        assert!(!window.quit);
    }

    #[tokio::test]
    async fn test_startup_failure_quits() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("custom.yml");
        fs::write(&custom, "title: ab\n").unwrap();

        let mut launcher = launcher(None, Some(custom.clone()));
        let mut window = HeadlessWindow::default();
        let mut dialog = RecordingDialog::default();
        launcher.startup(&mut window, &mut dialog).await;

        assert!(!launcher.config().valid);
        assert!(window.quit);
        assert!(window.title.is_empty());
        assert_eq!(dialog.0.len(), 1);
        assert!(dialog.0[0].starts_with("Error occurred during application startup: Invalid config"));
        assert_eq!(launcher.custom_config_path(), Some(&custom));
    }

    #[tokio::test]
    async fn test_startup_without_layers_uses_defaults() {
        let mut launcher = launcher(None, None);
        let mut window = HeadlessWindow::default();
        launcher.startup(&mut window, &mut LogDialog).await;

        assert_eq!(launcher.config(), &PresentationConfig::default());
        assert_eq!(window.title, "Launchdock");
        assert!(!launcher.app_version().is_empty());
    }
}
