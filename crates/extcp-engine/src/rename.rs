//! Alternate destination names for renamed collisions
//!
//! `photo.jpg` becomes `photo(1).jpg`, then `photo(2).jpg`, with one counter
//! per base name for the whole run.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Generates `name(N).ext` names with a counter per base name
#[derive(Debug, Default)]
pub struct RenameSequencer {
    counters: HashMap<OsString, u32>,
    probe_existing: bool,
}

impl RenameSequencer {
    /// Create a sequencer that does not look at the destination
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep incrementing while the generated name already exists on disk
    pub fn with_probe_existing(mut self, probe_existing: bool) -> Self {
        self.probe_existing = probe_existing;
        self
    }

    /// Next alternate name for `file_name`
    ///
    /// The base name is everything before the last dot; leading dots belong to
    /// it, so `.hidden` becomes `.hidden(1)`.
    pub fn next_name(&mut self, file_name: &OsStr) -> OsString {
        let name = Path::new(file_name);
        let base = name.file_stem().unwrap_or(file_name);
        let counter = self.counters.entry(base.to_os_string()).or_insert(1);

        let mut renamed = base.to_os_string();
        renamed.push(format!("({})", counter));
        if let Some(extension) = name.extension() {
            renamed.push(".");
            renamed.push(extension);
        }
        *counter += 1;
        renamed
    }

    /// Next alternate path for `file_name` inside `directory`
    ///
    /// Without probing, the first generated name is returned even if a file
    /// with that name exists; the copy then replaces it.
    pub fn next_path(&mut self, directory: &Path, file_name: &OsStr) -> PathBuf {
        loop {
            let candidate = directory.join(self.next_name(file_name));
            if !self.probe_existing || !candidate.exists() {
                return candidate;
            }
        }
    }
}
