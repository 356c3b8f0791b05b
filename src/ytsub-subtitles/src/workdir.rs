//! Per-request scratch directory.
//!
//! Provides an RAII guard over a uniquely named temporary directory: it is
//! removed recursively when the guard is dropped, whichever way the request
//! ends.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::{Result, SubtitleError};

/// Name prefix of every working directory.
pub const WORKDIR_PREFIX: &str = "ytsub-";

/// An exclusively owned temporary directory.
#[derive(Debug)]
pub struct WorkDir {
    dir: TempDir,
}

impl WorkDir {
    /// Create a fresh directory under `root`, or under the OS temp root when `None`.
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKDIR_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(SubtitleError::WorkDir)?;

        debug!(path = %dir.path().display(), "Created working directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Regular files in the directory, sorted by file name.
    pub async fn files(&self) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(self.path())
            .await
            .map_err(SubtitleError::WorkDir)?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(SubtitleError::WorkDir)? {
            let file_type = entry.file_type().await.map_err(SubtitleError::WorkDir)?;
            if file_type.is_file() {
                files.push(entry.path());
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(files)
    }

    /// Remove the directory now, logging instead of failing if removal errors.
    ///
    /// Dropping the guard removes it as well, silently.
    pub fn close(self) {
        let path = self.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => debug!(path = %path.display(), "Removed working directory"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove working directory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_created_under_root_with_prefix() {
        let root = tempfile::tempdir().unwrap();
        let workdir = WorkDir::create(Some(root.path())).unwrap();

        assert!(workdir.path().starts_with(root.path()));
        let name = workdir.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(WORKDIR_PREFIX));
    }

    #[tokio::test]
    async fn test_unique_per_request() {
        let root = tempfile::tempdir().unwrap();
        let a = WorkDir::create(Some(root.path())).unwrap();
        let b = WorkDir::create(Some(root.path())).unwrap();

        assert_ne!(a.path(), b.path());
    }

    #[tokio::test]
    async fn test_files_sorted_and_skips_directories() {
        let root = tempfile::tempdir().unwrap();
        let workdir = WorkDir::create(Some(root.path())).unwrap();
        std::fs::write(workdir.path().join("b.en.srt"), "b").unwrap();
        std::fs::write(workdir.path().join("a.en.srt"), "a").unwrap();
        std::fs::create_dir(workdir.path().join("nested")).unwrap();

        let names: Vec<_> = workdir
            .files()
            .await
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.en.srt", "b.en.srt"]);
    }

    #[test]
    fn test_drop_removes_directory_recursively() {
        let root = tempfile::tempdir().unwrap();
        let path = {
            let workdir = WorkDir::create(Some(root.path())).unwrap();
            std::fs::create_dir(workdir.path().join("sub")).unwrap();
            std::fs::write(workdir.path().join("sub/file.srt"), "x").unwrap();
            workdir.path().to_path_buf()
        };

        assert!(!path.exists());
    }

    #[test]
    fn test_close_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        let workdir = WorkDir::create(Some(root.path())).unwrap();
        let path = workdir.path().to_path_buf();

        workdir.close();
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let err = WorkDir::create(Some(&root.path().join("does-not-exist"))).unwrap_err();
        assert!(matches!(err, SubtitleError::WorkDir(_)));
    }
}
