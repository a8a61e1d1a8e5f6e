//! Unified test utilities for extcp tests
//!
//! This module provides the fixtures shared by the integration tests.

use async_trait::async_trait;
use extcp_engine::{ConflictPrompt, ProgressView};
use extcp_types::{ConflictChoice, FileFailure, ProgressUpdate, RunSummary};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary folder populated with named files
pub struct Folder {
    dir: TempDir,
}

impl Folder {
    /// Create an empty folder
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Create a folder holding `names`, each file containing its own name
    pub fn with_files(names: &[&str]) -> Self {
        let folder = Self::new();
        for name in names {
            folder.write(name, name);
        }
        folder
    }

    /// Path of the folder
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the folder
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` to `name`
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Contents of `name`
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.join(name)).expect("Failed to read test file")
    }

    /// Sorted names of the files in the folder
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .expect("Failed to list folder")
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }
}

impl Default for Folder {
    fn default() -> Self {
        Self::new()
    }
}

/// Conflict prompt answering from a fixed script
///
/// Answers `Cancel` once the script is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<ConflictChoice>,
    /// File names the prompt was asked about, in order
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    /// Create a prompt that gives `answers` in order
    pub fn new(answers: &[ConflictChoice]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

#[async_trait]
impl ConflictPrompt for ScriptedPrompt {
    async fn choose(&mut self, file_name: &str) -> ConflictChoice {
        self.asked.push(file_name.to_string());
        self.answers.pop_front().unwrap_or(ConflictChoice::Cancel)
    }
}

/// Progress view that records everything it is shown
#[derive(Debug, Default)]
pub struct RecordingView {
    /// Total announced at start
    pub started: Option<u64>,
    /// Updates in arrival order
    pub updates: Vec<ProgressUpdate>,
    /// Reported failures
    pub failures: Vec<FileFailure>,
    /// Number of `finish` calls
    pub finished: usize,
}

impl RecordingView {
    /// Last update received
    pub fn last_update(&self) -> Option<ProgressUpdate> {
        self.updates.last().copied()
    }
}

impl ProgressView for RecordingView {
    fn start(&mut self, total: u64) {
        self.started = Some(total);
    }

    fn update(&mut self, update: &ProgressUpdate) {
        self.updates.push(*update);
    }

    fn file_failed(&mut self, failure: &FileFailure) {
        self.failures.push(failure.clone());
    }

    fn finish(&mut self, _summary: &RunSummary) {
        self.finished += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_with_files() {
        let folder = Folder::with_files(&["b.jpg", "a.jpg"]);
        assert_eq!(folder.file_names(), vec!["a.jpg", "b.jpg"]);
        assert_eq!(folder.read("a.jpg"), "a.jpg");
    }

    #[tokio::test]
    async fn test_scripted_prompt_falls_back_to_cancel() {
        let mut prompt = ScriptedPrompt::new(&[ConflictChoice::Skip]);
        assert_eq!(prompt.choose("a.jpg").await, ConflictChoice::Skip);
        assert_eq!(prompt.choose("b.jpg").await, ConflictChoice::Cancel);
        assert_eq!(prompt.asked, vec!["a.jpg", "b.jpg"]);
    }
}
