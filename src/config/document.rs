//! Shortcuts document as written in a YAML config layer

use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::constants::patch;
use crate::presentation::{IconSource, InlineIcon, PresentationConfig, PresentationEntry};
use crate::shell_words;

/// One config layer (system-wide or per-user)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShortcutsDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "shortcuts", default, deserialize_with = "null_as_default")]
    pub entries: Vec<ShortcutEntry>,
}

/// A single shortcut, possibly a patch against the other layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub command: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub command_args: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Raw directive; checked by the validator
    #[serde(rename = "$patch", default, deserialize_with = "null_as_default")]
    pub patch: String,
}

/// How an overlay entry combines with the base entry of the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchMode {
    Replace,
    Merge,
    Delete,
}

impl PatchMode {
    /// Parse a directive; empty means replace, unknown values give `None`
    pub fn parse(directive: &str) -> Option<Self> {
        match directive {
            "" | patch::REPLACE => Some(Self::Replace),
            patch::MERGE => Some(Self::Merge),
            patch::DELETE => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replace => patch::REPLACE,
            Self::Merge => patch::MERGE,
            Self::Delete => patch::DELETE,
        }
    }
}

/// Treat an explicit YAML `null` (e.g. `icon:` with no value) like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ShortcutsDocument {
    /// Strip surrounding whitespace from every string field
    pub fn trim(&mut self) {
        trim_in_place(&mut self.title);
        for entry in &mut self.entries {
            entry.trim();
        }
    }

    /// Project into the presentation model the shell renders
    pub fn to_presentation(&self, icons: &dyn IconSource) -> PresentationConfig {
        let mut config = PresentationConfig::new(self.entries.len());
        if !self.title.is_empty() {
            config.ui.nav.title = self.title.clone();
        }
        config.shortcuts = self
            .entries
            .iter()
            .enumerate()
            .map(|(id, entry)| entry.to_presentation(id, icons))
            .collect();
        config
    }
}

impl ShortcutEntry {
    fn trim(&mut self) {
        for field in [
            &mut self.name,
            &mut self.icon,
            &mut self.command,
            &mut self.command_args,
            &mut self.url,
            &mut self.patch,
        ] {
            trim_in_place(field);
        }
    }

    /// Merge and delete entries only make sense against another layer
    pub fn is_patch_mode(&self) -> bool {
        matches!(
            PatchMode::parse(&self.patch),
            Some(PatchMode::Merge | PatchMode::Delete)
        )
    }

    /// `commandArgs` split into argv words
    pub fn parsed_command_args(&self) -> Vec<String> {
        if self.command_args.is_empty() {
            return Vec::new();
        }
        shell_words::split(&self.command_args).unwrap_or_else(|e| {
            warn!(name = %self.name, args = %self.command_args, error = %e, "Ignoring unparsable command args");
            Vec::new()
        })
    }

    fn to_presentation(&self, id: usize, icons: &dyn IconSource) -> PresentationEntry {
        PresentationEntry {
            id,
            name: self.name.clone(),
            icon: InlineIcon::from_path(&self.icon, icons),
            command: self.command.clone(),
            command_args: self.parsed_command_args(),
            url: self.url.clone(),
        }
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
