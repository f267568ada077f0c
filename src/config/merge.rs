//! Layer merging
//!
//! The system layer is the base, the user layer the overlay. Overlay entries
//! match base entries by name and carry a `$patch` directive:
//! - `replace` (or nothing): the overlay entry takes the base entry's slot
//! - `merge`: non-empty overlay fields are copied onto the base entry
//! - `delete`: the base entry is dropped
//!
//! Unmatched overlay entries are appended unless they are merge/delete
//! patches, which have nothing to apply to.

use std::collections::{HashMap, HashSet};
use tracing::info;

use super::document::{PatchMode, ShortcutEntry, ShortcutsDocument};

/// Drop duplicate names (first wins) and patch-only entries
pub fn sanitize(mut document: ShortcutsDocument) -> ShortcutsDocument {
    let mut seen = HashSet::new();
    document
        .entries
        .retain(|entry| !entry.is_patch_mode() && seen.insert(entry.name.clone()));
    document
}

/// Apply `overlay` on top of `base`
///
/// Without a base there is nothing to patch, so the result is `None` even
/// when an overlay is present; without an overlay the base is returned as is.
pub fn merge(
    base: Option<ShortcutsDocument>,
    overlay: Option<ShortcutsDocument>,
) -> Option<ShortcutsDocument> {
    let base = base?;
    let Some(overlay) = overlay else {
        return Some(base);
    };

    let title = if overlay.title.is_empty() {
        base.title
    } else {
        overlay.title
    };
    let entries = if overlay.entries.is_empty() {
        base.entries
    } else {
        merge_entries(base.entries, &overlay.entries)
    };
    Some(ShortcutsDocument { title, entries })
}

fn merge_entries(base: Vec<ShortcutEntry>, overlay: &[ShortcutEntry]) -> Vec<ShortcutEntry> {
    // Later overlay entries shadow earlier ones with the same name
    let by_name: HashMap<&str, &ShortcutEntry> = overlay
        .iter()
        .map(|entry| (entry.name.as_str(), entry))
        .collect();
    let mut processed: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(base.len() + overlay.len());

    info!(base = base.len(), overlay = overlay.len(), "Configuration merge started");
    for entry in base {
        let Some(patch) = by_name.get(entry.name.as_str()).copied() else {
            info!(name = %entry.name, "Keeping base shortcut");
            merged.push(entry);
            continue;
        };
        processed.insert(entry.name.clone());

        match PatchMode::parse(&patch.patch) {
            Some(PatchMode::Delete) => {
                info!(name = %entry.name, "Deleting shortcut");
            }
            Some(PatchMode::Merge) => {
                let entry = merge_fields(entry, patch);
                info!(name = %entry.name, icon = %entry.icon, command = %entry.command, url = %entry.url, "Merged shortcut");
                merged.push(entry);
            }
            _ => {
                info!(name = %patch.name, "Replacing shortcut");
                merged.push(patch.clone());
            }
        }
    }

    for entry in overlay {
        if entry.is_patch_mode() || processed.contains(&entry.name) {
            continue;
        }
        info!(name = %entry.name, "Adding overlay shortcut");
        processed.insert(entry.name.clone());
        merged.push(entry.clone());
    }
    info!(shortcuts = merged.len(), "Configuration merge finished");

    merged
}

/// Copy the non-empty fields of `overlay` onto `base`
fn merge_fields(mut base: ShortcutEntry, overlay: &ShortcutEntry) -> ShortcutEntry {
    base.patch = PatchMode::Merge.as_str().to_string();
    if !overlay.icon.is_empty() {
        base.icon = overlay.icon.clone();
    }
    if !overlay.command.is_empty() {
        base.command = overlay.command.clone();
        if !overlay.command_args.is_empty() {
            base.command_args = overlay.command_args.clone();
        }
        base.url.clear();
    } else if !overlay.url.is_empty() {
        base.url = overlay.url.clone();
        base.command.clear();
        base.command_args.clear();
    }
    base
}
