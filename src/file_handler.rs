use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::raster::Snapshot;
use crate::util::time;

const FILE_PREFIX: &str = "whiteboard";

/// Writes exported canvas bitmaps to a directory as PNG files
#[derive(Debug, Clone)]
pub struct FileHandler {
    export_dir: PathBuf,
    last_saved: Option<PathBuf>,
}

impl FileHandler {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
            last_saved: None,
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Path of the most recent successful save
    pub fn last_saved(&self) -> Option<&Path> {
        self.last_saved.as_deref()
    }

    /// Save `snapshot` under a timestamped name and return the written path
    pub fn save(&mut self, snapshot: &Snapshot) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.export_dir)?;
        let path = self.next_file_name(time::timestamp_secs());

        match snapshot.save_png(&path) {
            Ok(()) => {
                log::info!(
                    "Saved {}x{} canvas to {}",
                    snapshot.width(),
                    snapshot.height(),
                    path.display()
                );
                self.last_saved = Some(path.clone());
                Ok(path)
            }
            Err(err) => {
                log::warn!("Failed to save canvas to {}: {}", path.display(), err);
                Err(err)
            }
        }
    }

    /// Save the canvas bitmap if it has been laid out
    pub fn save_optional(&mut self, snapshot: Option<Snapshot>) -> Result<PathBuf, ExportError> {
        let snapshot = snapshot.ok_or(ExportError::NotLaidOut)?;
        self.save(&snapshot)
    }

    /// First free `whiteboard-<secs>[-n].png` in the export directory
    fn next_file_name(&self, secs: u64) -> PathBuf {
        let mut path = self.export_dir.join(format!("{FILE_PREFIX}-{secs}.png"));
        let mut n = 1;
        while path.exists() {
            path = self.export_dir.join(format!("{FILE_PREFIX}-{secs}-{n}.png"));
            n += 1;
        }
        path
    }
}
