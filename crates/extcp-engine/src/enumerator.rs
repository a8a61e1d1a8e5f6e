//! Work set enumeration
//!
//! Only direct children of each source folder are considered. A file is
//! selected when its name ends with the extension as typed, lowercased or
//! uppercased. Like a shell `*` glob, names starting with a dot never match.

use extcp_types::Extension;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files selected for one run, iterated in lexicographic path order
pub type WorkSet = BTreeSet<PathBuf>;

/// Collects the files of a run from the configured source folders
#[derive(Debug, Clone)]
pub struct FileEnumerator {
    extension: Extension,
}

impl FileEnumerator {
    /// Create an enumerator for `extension`
    pub fn new(extension: Extension) -> Self {
        Self { extension }
    }

    /// Union of the matching files of every folder, without duplicates
    pub fn enumerate<P: AsRef<Path>>(&self, folders: &[P]) -> WorkSet {
        let mut work_set = WorkSet::new();
        for folder in folders {
            self.scan_folder(folder.as_ref(), &mut work_set);
        }
        debug!(
            "Enumerated {} file(s) with extension {} across {} folder(s)",
            work_set.len(),
            self.extension,
            folders.len()
        );
        work_set
    }

    /// Whether a file name is selected by this enumerator
    pub fn is_candidate(&self, file_name: &str) -> bool {
        !file_name.starts_with('.') && self.extension.matches(file_name)
    }

    fn scan_folder(&self, folder: &Path, work_set: &mut WorkSet) {
        let entries = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", folder.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            // names that are not UTF-8 keep their ASCII suffix through the lossy form
            if self.is_candidate(&entry.file_name().to_string_lossy()) {
                work_set.insert(entry.into_path());
            }
        }
    }
}
