//! Scoped working directory for one run: the input copy and the produced
//! output live in a temp dir removed on every exit path.

use crate::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct StagedRun {
    dir: TempDir,
}

impl StagedRun {
    pub fn create() -> Result<Self, Error> {
        let dir = TempDir::new()?;
        tracing::debug!("StagedRun: created {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copies the caller's file into the staging directory under its original
    /// file name and returns the staged path.
    pub fn stage_input(&self, original: &Path) -> Result<PathBuf, Error> {
        if !original.is_file() {
            return Err(Error::UnreadableSource {
                path: original.display().to_string(),
            });
        }
        let name = original.file_name().ok_or_else(|| Error::UnreadableSource {
            path: original.display().to_string(),
        })?;

        let staged = self.dir.path().join(name);
        fs::copy(original, &staged)?;
        Ok(staged)
    }

    /// Where the pipeline writes its output within this run.
    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("output.mp4")
    }

    /// Copies the produced output out of the staging directory.
    pub fn persist(&self, dest: &Path) -> Result<(), Error> {
        fs::copy(self.output_path(), dest)?;
        Ok(())
    }
}
