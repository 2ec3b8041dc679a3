use std::path::{Path, PathBuf};

use crate::manifest::ManifestRecord;

#[derive(Debug, Clone)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final location of `record`'s artifact.
    pub fn artifact_path(&self, record: &ManifestRecord) -> PathBuf {
        self.root.join(&record.arch).join(&record.file_name)
    }
}
