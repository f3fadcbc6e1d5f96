//! Upload storage - kind-specific directories under a single upload root
//!
//! Uploaded files live on local disk; the database stores paths relative to
//! the upload root. Names are regenerated on save so user-supplied filenames
//! never reach the filesystem.

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Category of uploaded file, each with its own subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Material,
    ProfileImage,
    ProofDocument,
}

impl FileKind {
    /// Subdirectory under the upload root
    pub const fn dir(&self) -> &'static str {
        match self {
            Self::Material => "materials",
            Self::ProfileImage => "profile",
            Self::ProofDocument => "proofs",
        }
    }
}

/// Handle to the upload root directory
#[derive(Debug, Clone)]
pub struct UploadStorage {
    root: PathBuf,
}

impl UploadStorage {
    /// Create a storage handle rooted at `upload_dir`
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: upload_dir.into(),
        }
    }

    /// Persist file contents, returning the relative path to store
    ///
    /// The stored name is `<uuid>.<ext>` under `<kind>/<owner_id>/`; only the
    /// extension of the original filename survives.
    ///
    /// # Errors
    /// Returns a storage error if the directory or file cannot be written
    pub async fn save(
        &self,
        kind: FileKind,
        owner_id: i64,
        original_name: &str,
        contents: &[u8],
    ) -> Result<String, AppError> {
        let relative = format!(
            "{}/{}/{}",
            kind.dir(),
            owner_id,
            generated_name(original_name)
        );
        let absolute = self.root.join(&relative);

        if let Some(parent) = absolute.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("create {}: {e}", parent.display())))?;
        }

        tokio::fs::write(&absolute, contents)
            .await
            .map_err(|e| AppError::Storage(format!("write {}: {e}", absolute.display())))?;

        Ok(relative)
    }

    /// Resolve a stored relative path to an absolute one
    ///
    /// # Errors
    /// Rejects paths that try to escape the upload root
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, AppError> {
        let path = Path::new(relative);
        if path.is_absolute()
            || path
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(AppError::Storage(format!("unsafe path: {relative}")));
        }
        Ok(self.root.join(path))
    }

    /// Remove a stored file; missing files are not an error
    pub async fn remove(&self, relative: &str) -> Result<(), AppError> {
        let absolute = self.resolve(relative)?;
        match tokio::fs::remove_file(&absolute).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "remove {}: {e}",
                absolute.display()
            ))),
        }
    }
}

/// Build a collision-free stored filename keeping only the extension
fn generated_name(original_name: &str) -> String {
    let id = uuid::Uuid::new_v4();
    match extension(original_name) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Extract a safe ASCII-alphanumeric extension, if any
fn extension(name: &str) -> Option<&str> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.len() <= 16 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_dirs() {
        assert_eq!(FileKind::Material.dir(), "materials");
        assert_eq!(FileKind::ProfileImage.dir(), "profile");
        assert_eq!(FileKind::ProofDocument.dir(), "proofs");
    }

    #[test]
    fn test_generated_name_keeps_extension() {
        let name = generated_name("report.pdf");
        assert!(name.ends_with(".pdf"));

        let name = generated_name("no_extension");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_extension_rejects_odd_input() {
        assert_eq!(extension("x.tar.gz"), Some("gz"));
        assert_eq!(extension("weird.p/df"), None);
        assert_eq!(extension("dotfile."), None);
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let storage = UploadStorage::new("/tmp/uploads");
        assert!(storage.resolve("materials/1/a.pdf").is_ok());
        assert!(storage.resolve("../etc/passwd").is_err());
        assert!(storage.resolve("/etc/passwd").is_err());
    }

    #[tokio::test]
    async fn test_save_and_remove() {
        let dir = std::env::temp_dir().join(format!("archive-test-{}", uuid::Uuid::new_v4()));
        let storage = UploadStorage::new(&dir);

        let relative = storage
            .save(FileKind::Material, 42, "week1.pdf", b"content")
            .await
            .unwrap();
        assert!(relative.starts_with("materials/42/"));

        let absolute = storage.resolve(&relative).unwrap();
        assert_eq!(tokio::fs::read(&absolute).await.unwrap(), b"content");

        storage.remove(&relative).await.unwrap();
        assert!(tokio::fs::metadata(&absolute).await.is_err());

        // Removing again is fine
        storage.remove(&relative).await.unwrap();

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
