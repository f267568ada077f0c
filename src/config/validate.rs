//! Validation rules applied to each config layer before it is trusted
//!
//! Rules run in a fixed order and stop at the first failure: title, then for
//! every shortcut name, patch, icon, command/url, command, command args, url.

use std::fs;
use thiserror::Error;

use super::document::{PatchMode, ShortcutEntry, ShortcutsDocument};
use crate::constants::validation::{MAX_ICON_SIZE, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::presentation::icon::{is_valid_extension, supported_extensions};

/// Reports whether a command can be launched
pub trait ExecutableProbe: Send + Sync {
    fn is_executable(&self, command: &str) -> bool;
}

/// Resolves commands against `PATH` (or as a path when they contain a separator)
#[derive(Debug, Default, Clone, Copy)]
pub struct PathProbe;

impl ExecutableProbe for PathProbe {
    fn is_executable(&self, command: &str) -> bool {
        which::which(command).is_ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(
        "Title \"{title}\" must be between {min} and {max} characters long (got {length})",
        min = MIN_NAME_LENGTH, max = MAX_NAME_LENGTH
    )]
    TitleLength { title: String, length: usize },

    #[error(
        "Name of \"{name}\" Shortcut must be between {min} and {max} characters long (got {length})",
        min = MIN_NAME_LENGTH, max = MAX_NAME_LENGTH
    )]
    NameLength { name: String, length: usize },

    #[error("Patch of \"{name}\" Shortcut must be either \"replace\", \"merge\" or \"delete\" (got \"{patch}\")")]
    UnknownPatch { name: String, patch: String },

    #[error("Icon of \"{name}\" Shortcut must be set")]
    MissingIcon { name: String },

    #[error("Icon of \"{name}\" Shortcut does not exist under: \"{icon}\"")]
    IconNotFound { name: String, icon: String },

    #[error("Icon of \"{name}\" Shortcut is not a valid Icon: \"{icon}\". Supported extensions: {exts}", exts = supported_extensions())]
    UnsupportedIcon { name: String, icon: String },

    #[error("Icon of \"{name}\" Shortcut is larger than 1 MB ({size} bytes)")]
    IconTooLarge { name: String, size: u64 },

    #[error("Either Command or URL of \"{name}\" Shortcut must be set")]
    MissingTarget { name: String },

    #[error("\"{name}\" Shortcut cannot have both a Command and a URL set, choose one (got Command: \"{command}\" and URL: \"{url}\")")]
    CommandAndUrl { name: String, command: String, url: String },

    #[error("Command of \"{name}\" Shortcut is not a valid Command (got \"{command}\")")]
    CommandNotFound { name: String, command: String },

    #[error("Command Args of \"{name}\" Shortcut not allowed without a Command (got \"{args}\")")]
    ArgsWithoutCommand { name: String, args: String },

    #[error("URL of \"{name}\" Shortcut must start with \"http://\" or \"https://\" (got \"{url}\")")]
    UnsupportedUrl { name: String, url: String },
}

/// Validate a parsed layer; an absent layer is always valid
pub fn validate(
    document: Option<&ShortcutsDocument>,
    probe: &dyn ExecutableProbe,
) -> Result<(), ValidationError> {
    let Some(document) = document else {
        return Ok(());
    };
    validate_title(&document.title)?;
    document
        .entries
        .iter()
        .try_for_each(|entry| validate_entry(entry, probe))
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let length = title.chars().count();
    if length != 0 && !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        return Err(ValidationError::TitleLength {
            title: title.to_string(),
            length,
        });
    }
    Ok(())
}

fn validate_entry(entry: &ShortcutEntry, probe: &dyn ExecutableProbe) -> Result<(), ValidationError> {
    validate_name(entry)?;
    validate_patch(entry)?;
    validate_icon(entry)?;
    validate_target(entry)?;
    validate_command(entry, probe)?;
    validate_command_args(entry)?;
    validate_url(entry)
}

fn validate_name(entry: &ShortcutEntry) -> Result<(), ValidationError> {
    let length = entry.name.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        return Err(ValidationError::NameLength {
            name: entry.name.clone(),
            length,
        });
    }
    Ok(())
}

fn validate_patch(entry: &ShortcutEntry) -> Result<(), ValidationError> {
    if PatchMode::parse(&entry.patch).is_none() {
        return Err(ValidationError::UnknownPatch {
            name: entry.name.clone(),
            patch: entry.patch.clone(),
        });
    }
    Ok(())
}

fn validate_icon(entry: &ShortcutEntry) -> Result<(), ValidationError> {
    if entry.icon.is_empty() {
        if entry.is_patch_mode() {
            return Ok(());
        }
        return Err(ValidationError::MissingIcon {
            name: entry.name.clone(),
        });
    }

    let Ok(metadata) = fs::metadata(&entry.icon) else {
        return Err(ValidationError::IconNotFound {
            name: entry.name.clone(),
            icon: entry.icon.clone(),
        });
    };
    if !is_valid_extension(&entry.icon) {
        return Err(ValidationError::UnsupportedIcon {
            name: entry.name.clone(),
            icon: entry.icon.clone(),
        });
    }
    if metadata.len() > MAX_ICON_SIZE {
        return Err(ValidationError::IconTooLarge {
            name: entry.name.clone(),
            size: metadata.len(),
        });
    }
    Ok(())
}

fn validate_target(entry: &ShortcutEntry) -> Result<(), ValidationError> {
    match (entry.command.is_empty(), entry.url.is_empty()) {
        (true, true) if !entry.is_patch_mode() => Err(ValidationError::MissingTarget {
            name: entry.name.clone(),
        }),
        (false, false) => Err(ValidationError::CommandAndUrl {
            name: entry.name.clone(),
            command: entry.command.clone(),
            url: entry.url.clone(),
        }),
        _ => Ok(()),
    }
}

fn validate_command(entry: &ShortcutEntry, probe: &dyn ExecutableProbe) -> Result<(), ValidationError> {
    if !entry.command.is_empty() && !probe.is_executable(&entry.command) {
        return Err(ValidationError::CommandNotFound {
            name: entry.name.clone(),
            command: entry.command.clone(),
        });
    }
    Ok(())
}

fn validate_command_args(entry: &ShortcutEntry) -> Result<(), ValidationError> {
    if !entry.command_args.is_empty() && entry.command.is_empty() {
        return Err(ValidationError::ArgsWithoutCommand {
            name: entry.name.clone(),
            args: entry.command_args.clone(),
        });
    }
    Ok(())
}

fn validate_url(entry: &ShortcutEntry) -> Result<(), ValidationError> {
    if entry.url.is_empty() {
        return Ok(());
    }
    let url = entry.url.to_lowercase();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::UnsupportedUrl {
            name: entry.name.clone(),
            url: entry.url.clone(),
        });
    }
    Ok(())
}
