//! Local filesystem storage for uploaded audio and cover-art files.
//!
//! Files live under `<upload_dir>/audio/` and `<upload_dir>/covers/` with
//! generated `<uuid>.<ext>` names. The original client filename is only used
//! to validate and extract the extension.

use std::path::PathBuf;

use singleaudio_core::upload::{self, FileKind};

use crate::error::{AppError, AppResult};

/// File store rooted at the configured upload directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn dir_for(&self, kind: FileKind) -> PathBuf {
        self.root.join(kind.subdir())
    }

    /// Validate the original filename, persist the bytes under a generated
    /// name, and return that stored name.
    pub async fn save(
        &self,
        kind: FileKind,
        original_filename: &str,
        bytes: &[u8],
    ) -> AppResult<String> {
        let stored = upload::stored_filename(kind, original_filename).map_err(AppError::Core)?;

        let dir = self.dir_for(kind);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

        let path = dir.join(&stored);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored uploaded file");
        Ok(stored)
    }

    /// Read a stored file back for serving. Returns the bytes and the
    /// content type derived from the extension.
    pub async fn read(&self, kind: FileKind, filename: &str) -> AppResult<(Vec<u8>, &'static str)> {
        if !upload::is_safe_stored_name(filename) {
            return Err(AppError::BadRequest("Invalid file name".into()));
        }

        let path = self.dir_for(kind).join(filename);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound(format!("No stored file named {filename}"))
            } else {
                AppError::InternalError(format!("Failed to read file: {e}"))
            }
        })?;

        Ok((bytes, upload::content_type_for(filename)))
    }

    /// Delete a stored file, ignoring files that are already gone.
    pub async fn delete(&self, kind: FileKind, filename: &str) -> AppResult<()> {
        if !upload::is_safe_stored_name(filename) {
            return Err(AppError::BadRequest("Invalid file name".into()));
        }

        let path = self.dir_for(kind).join(filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::InternalError(format!(
                "Failed to delete file: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_and_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let stored = store
            .save(FileKind::Audio, "demo.mp3", b"not really audio")
            .await
            .unwrap();
        assert!(stored.ends_with(".mp3"));

        let (bytes, content_type) = store.read(FileKind::Audio, &stored).await.unwrap();
        assert_eq!(bytes, b"not really audio");
        assert_eq!(content_type, "audio/mpeg");
    }

    #[tokio::test]
    async fn save_rejects_bad_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store
            .save(FileKind::Audio, "evil.exe", b"nope")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[tokio::test]
    async fn read_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store
            .read(FileKind::Audio, "../secrets.txt")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid file name"));
    }

    #[tokio::test]
    async fn read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let err = store
            .read(FileKind::Audio, "11111111-2222-3333-4444-555555555555.mp3")
            .await
            .unwrap_err();
        assert_matches::assert_matches!(err, AppError::NotFound(_));
    }

    #[tokio::test]
    async fn delete_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store
            .delete(FileKind::CoverArt, "gone.png")
            .await
            .unwrap();
    }
}
