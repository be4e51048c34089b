//! Upload file policy: accepted formats, storage subdirectories, generated
//! filenames, and served content types.

use uuid::Uuid;

use crate::error::CoreError;

/// The two kinds of files a track upload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Audio,
    CoverArt,
}

/// Accepted audio file extensions (lowercase).
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg"];

/// Accepted cover-art file extensions (lowercase).
pub const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

impl FileKind {
    /// Storage subdirectory under the upload root.
    pub fn subdir(self) -> &'static str {
        match self {
            FileKind::Audio => "audio",
            FileKind::CoverArt => "covers",
        }
    }

    fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Audio => AUDIO_EXTENSIONS,
            FileKind::CoverArt => COVER_EXTENSIONS,
        }
    }

    /// Human-readable list for error messages.
    fn allowed_list(self) -> String {
        self.allowed_extensions().join(", ")
    }
}

/// Extract the lowercase extension from an uploaded filename.
fn extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit_once('.')?.1;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Validate an uploaded filename against the kind's accepted extensions and
/// return a collision-free stored name (`<uuid>.<ext>`).
///
/// The original filename is never used for storage, so path separators or
/// duplicate names in client uploads cannot affect the upload directory.
pub fn stored_filename(kind: FileKind, original: &str) -> Result<String, CoreError> {
    let ext = extension(original).ok_or_else(|| {
        CoreError::Validation(format!(
            "File has no extension; accepted: {}",
            kind.allowed_list()
        ))
    })?;

    if !kind.allowed_extensions().contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported file type .{ext}; accepted: {}",
            kind.allowed_list()
        )));
    }

    Ok(format!("{}.{ext}", Uuid::new_v4()))
}

/// Content type for serving a stored file back, keyed on its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension(filename).as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Reject stored filenames that could escape the upload directory.
///
/// Stored names are always `<uuid>.<ext>`, so anything with a path separator
/// or leading dot is an attempt to read outside the tree.
pub fn is_safe_stored_name(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.starts_with('.')
        && !filename.contains('/')
        && !filename.contains('\\')
        && !filename.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_filename_keeps_extension_only() {
        let name = stored_filename(FileKind::Audio, "My Song (final).MP3").unwrap();
        assert!(name.ends_with(".mp3"));
        assert!(!name.contains(' '));
        // uuid (36 chars) + ".mp3"
        assert_eq!(name.len(), 40);
    }

    #[test]
    fn audio_rejects_image_extension() {
        let err = stored_filename(FileKind::Audio, "cover.png").unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn cover_rejects_missing_extension() {
        let err = stored_filename(FileKind::CoverArt, "cover").unwrap_err();
        assert!(err.to_string().contains("no extension"));
    }

    #[test]
    fn content_types_map_known_extensions() {
        assert_eq!(content_type_for("a.flac"), "audio/flac");
        assert_eq!(content_type_for("b.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("c.bin"), "application/octet-stream");
    }

    #[test]
    fn traversal_names_are_rejected() {
        assert!(!is_safe_stored_name("../etc/passwd"));
        assert!(!is_safe_stored_name(".hidden"));
        assert!(!is_safe_stored_name("a/b.mp3"));
        assert!(is_safe_stored_name("3f2a.mp3"));
    }
}
