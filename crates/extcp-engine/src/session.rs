//! User-configured copy state that persists across runs

use crate::enumerator::{FileEnumerator, WorkSet};
use extcp_types::{Error, Extension, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Source folders, destination and extension chosen by the user
#[derive(Debug, Clone, Default)]
pub struct CopySession {
    sources: Vec<PathBuf>,
    destination: Option<PathBuf>,
    extension: Extension,
}

/// Everything a run needs, checked and enumerated
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Files to copy
    pub work_set: WorkSet,
    /// Folder receiving the files
    pub destination: PathBuf,
    /// Extension the work set was selected with
    pub extension: Extension,
    /// Source folders dropped because they were the destination
    pub removed_sources: Vec<PathBuf>,
}

impl CopySession {
    /// Create an empty session using `extension`
    pub fn new(extension: Extension) -> Self {
        Self {
            sources: Vec::new(),
            destination: None,
            extension,
        }
    }

    /// Source folders in the order they were added
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Destination folder, if set
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Extension of the files to copy
    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    /// Add a source folder; returns `false` if it was already present
    pub fn add_source<P: AsRef<Path>>(&mut self, folder: P) -> bool {
        let folder = absolutize(folder.as_ref());
        if self.sources.contains(&folder) {
            debug!("Source {} already present", folder.display());
            return false;
        }
        debug!("Added source {}", folder.display());
        self.sources.push(folder);
        true
    }

    /// Remove a source folder by path; returns `false` if it was absent
    pub fn remove_source<P: AsRef<Path>>(&mut self, folder: P) -> bool {
        let folder = absolutize(folder.as_ref());
        let before = self.sources.len();
        self.sources.retain(|source| source != &folder);
        before != self.sources.len()
    }

    /// Remove the source folder at `index`
    pub fn remove_source_at(&mut self, index: usize) -> Option<PathBuf> {
        (index < self.sources.len()).then(|| self.sources.remove(index))
    }

    /// Set the destination folder
    pub fn set_destination<P: AsRef<Path>>(&mut self, folder: P) {
        self.destination = Some(absolutize(folder.as_ref()));
    }

    /// Set the extension from user input; empty input selects `default`
    pub fn set_extension(&mut self, input: &str, default: &Extension) -> Result<()> {
        self.extension = Extension::parse_or(input, default.as_str()).map_err(Error::config)?;
        Ok(())
    }

    /// Drop every source folder that is the destination itself
    pub fn remove_destination_from_sources(&mut self) -> Vec<PathBuf> {
        let Some(destination) = self.destination.clone() else {
            return Vec::new();
        };

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.sources)
            .into_iter()
            .partition(|source| same_folder(source, &destination));
        self.sources = kept;

        for folder in &removed {
            info!(
                "Source {} is the destination and was removed",
                folder.display()
            );
        }
        removed
    }

    /// Validate the session and compute the work set of the next run
    pub fn prepare(&mut self) -> Result<RunPlan> {
        if self.sources.is_empty() {
            return Err(Error::NoSourceFolders);
        }
        let destination = self.destination.clone().ok_or(Error::NoDestination)?;

        let removed_sources = self.remove_destination_from_sources();
        if self.sources.is_empty() {
            return Err(Error::NoSourceFolders);
        }

        let enumerator = FileEnumerator::new(self.extension.clone());
        let work_set = enumerator.enumerate(self.sources.as_slice());
        if work_set.is_empty() {
            return Err(Error::NoMatchingFiles {
                extension: self.extension.to_string(),
            });
        }

        Ok(RunPlan {
            work_set,
            destination,
            extension: self.extension.clone(),
            removed_sources,
        })
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn same_folder(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extcp_types::ErrorKind;
    use tempfile::TempDir;

    fn session() -> CopySession {
        CopySession::new(Extension::parse(".jpg").unwrap())
    }

    #[test]
    fn test_add_source_ignores_duplicates() {
        let dir = TempDir::new().unwrap();
        let mut session = session();
        assert!(session.add_source(dir.path()));
        assert!(!session.add_source(dir.path()));
        assert_eq!(session.sources(), &[dir.path().to_path_buf()]);
    }

    #[test]
    fn test_relative_paths_are_absolutized() {
        let mut session = session();
        session.add_source("photos");
        session.set_destination("backup");
        assert!(session.sources()[0].is_absolute());
        assert!(session.destination().unwrap().is_absolute());
    }

    #[test]
    fn test_remove_source() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let mut session = session();
        session.add_source(first.path());
        session.add_source(second.path());

        assert!(session.remove_source(first.path()));
        assert!(!session.remove_source(first.path()));
        assert_eq!(session.remove_source_at(0), Some(second.path().to_path_buf()));
        assert_eq!(session.remove_source_at(0), None);
    }

    #[test]
    fn test_set_extension() {
        let default = Extension::default();
        let mut session = session();

        session.set_extension("png", &default).unwrap();
        assert_eq!(session.extension().as_str(), ".png");

        session.set_extension("  ", &default).unwrap();
        assert_eq!(session.extension().as_str(), ".JPG");

        let err = session.set_extension(".", &default).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(session.extension().as_str(), ".JPG");
    }

    #[test]
    fn test_prepare_requires_sources_then_destination() {
        let mut session = session();
        assert_eq!(session.prepare().unwrap_err(), Error::NoSourceFolders);

        let dir = TempDir::new().unwrap();
        session.add_source(dir.path());
        assert_eq!(session.prepare().unwrap_err(), Error::NoDestination);
    }

    #[test]
    fn test_destination_is_removed_from_sources() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();
        fs::write(source.path().join("a.jpg"), b"a").unwrap();
        fs::write(destination.path().join("b.jpg"), b"b").unwrap();

        let mut session = session();
        session.add_source(source.path());
        session.add_source(destination.path());
        session.set_destination(destination.path());

        let plan = session.prepare().unwrap();
        assert_eq!(plan.removed_sources, vec![destination.path().to_path_buf()]);
        assert_eq!(plan.work_set.len(), 1);
        assert!(plan.work_set.contains(&source.path().join("a.jpg")));
        assert_eq!(session.sources(), &[source.path().to_path_buf()]);
    }

    #[test]
    fn test_only_source_is_destination() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();

        let mut session = session();
        session.add_source(dir.path());
        session.set_destination(dir.path());

        assert_eq!(session.prepare().unwrap_err(), Error::NoSourceFolders);
        assert!(session.sources().is_empty());
    }

    #[test]
    fn test_destination_matched_through_dot_segment() {
        let dir = TempDir::new().unwrap();
        let mut session = session();
        session.add_source(dir.path().join("."));
        session.set_destination(dir.path());

        assert_eq!(session.remove_destination_from_sources().len(), 1);
    }

    #[test]
    fn test_no_matching_files() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();
        fs::write(source.path().join("a.png"), b"a").unwrap();

        let mut session = session();
        session.add_source(source.path());
        session.set_destination(destination.path());

        let err = session.prepare().unwrap_err();
        assert_eq!(
            err,
            Error::NoMatchingFiles {
                extension: ".jpg".to_string()
            }
        );
    }
}
