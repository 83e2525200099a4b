//! Flat content root holding original uploads and derived artifacts
//!
//! Saves overwrite silently (last write wins). There is no locking; two
//! requests naming the same file race, and the later write is kept.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::domain::filename::Filename;
use crate::error::FileError;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the content root if missing. Safe to call repeatedly.
    pub async fn ensure_root(&self) -> Result<(), FileError> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            FileError::io(format!("creating content root {}", self.root.display()), e)
        })
    }

    /// Join the root and a sanitized name. Does not touch the filesystem.
    pub fn path_for(&self, filename: &Filename) -> PathBuf {
        self.root.join(filename.as_str())
    }

    /// Write `content`, replacing any file of the same name.
    ///
    /// Content goes to a hidden temp sibling first and is renamed into place,
    /// so a failed write never leaves a truncated file under the real name.
    pub async fn save(&self, filename: &Filename, content: &str) -> Result<PathBuf, FileError> {
        self.ensure_root().await?;

        let path = self.path_for(filename);
        // Fixed-length temp name, so any name `Filename` accepts can be staged
        let tmp = self
            .root
            .join(format!(".{}.tmp", Uuid::new_v4().simple()));

        if let Err(e) = fs::write(&tmp, content).await {
            tracing::error!(error = %e, path = %path.display(), "Failed to save file");
            let _ = fs::remove_file(&tmp).await;
            return Err(FileError::io(format!("writing {}", filename), e));
        }

        if let Err(e) = fs::rename(&tmp, &path).await {
            tracing::error!(error = %e, path = %path.display(), "Failed to save file");
            let _ = fs::remove_file(&tmp).await;
            return Err(FileError::io(format!("replacing {}", filename), e));
        }

        tracing::info!(path = %path.display(), "File saved");
        Ok(path)
    }

    /// Read a stored file as UTF-8 text
    pub async fn read(&self, filename: &Filename) -> Result<String, FileError> {
        let path = self.path_for(filename);

        let bytes = fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FileError::NotFound(filename.to_string()),
            _ => FileError::io(format!("reading {}", filename), e),
        })?;

        String::from_utf8(bytes).map_err(|e| {
            FileError::io(
                format!("decoding {}", filename),
                std::io::Error::new(ErrorKind::InvalidData, e),
            )
        })
    }

    /// Whether a regular file with this name exists
    pub async fn exists(&self, filename: &Filename) -> Result<bool, FileError> {
        match fs::metadata(self.path_for(filename)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FileError::io(format!("inspecting {}", filename), e)),
        }
    }

    /// Names of all stored files, originals and derived, sorted.
    ///
    /// Hidden entries (in-flight temp files) are skipped. A missing root is
    /// an empty store.
    pub async fn list(&self) -> Result<Vec<String>, FileError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FileError::io("listing content root", e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FileError::io("listing content root", e))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if is_file && !name.starts_with('.') {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}
