//! File store for uploaded images.
//!
//! Uploads live under `<root>/<category>/<generated name>`, one category
//! directory per resource. Stored names come from
//! [`sanstha_core::naming::generated_upload_name`]; every caller-supplied
//! name passes through [`sanstha_core::naming::sanitize_file_name`] before
//! it touches the filesystem, so a stored value can never resolve outside
//! its category directory.

use std::path::{Path, PathBuf};

use chrono::Utc;
use sanstha_core::naming::{generated_upload_name, sanitize_file_name};
use sanstha_db::registry::UPLOAD_CATEGORIES;

/// Manages the per-category upload directories.
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload root and every category directory.
    ///
    /// Called at startup; `store` also creates its directory on demand so
    /// a category removed underneath a running server heals itself.
    pub fn ensure_categories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        for category in UPLOAD_CATEGORIES {
            std::fs::create_dir_all(self.root.join(category))?;
        }
        Ok(())
    }

    /// Write an uploaded payload and return its generated stored name.
    ///
    /// Names are timestamp-qualified so concurrent uploads to the same
    /// category cannot collide and an existing file is never overwritten.
    pub async fn store(
        &self,
        category: &str,
        bytes: &[u8],
        original_name: &str,
    ) -> std::io::Result<String> {
        let name = generated_upload_name(Utc::now().timestamp_millis(), original_name);
        let dir = self.root.join(category);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&name), bytes).await?;
        Ok(name)
    }

    /// Remove a stored file.
    ///
    /// An already-absent file is success. Any other failure is logged and
    /// swallowed: a stale file on disk must never block the record
    /// mutation that triggered the delete.
    pub async fn delete(&self, category: &str, stored_name: &str) {
        let Some(path) = self.file_path(category, stored_name) else {
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(category, file = stored_name, error = %err, "Failed to delete upload");
            }
        }
    }

    /// Resolve a stored name to the on-disk path, or `None` when the name
    /// sanitizes away to nothing.
    pub fn file_path(&self, category: &str, stored_name: &str) -> Option<PathBuf> {
        let clean = sanitize_file_name(stored_name)?;
        Some(self.root.join(category).join(clean))
    }

    /// The public URL path a stored name is served under. No I/O.
    pub fn resolve_url(category: &str, stored_name: &str) -> String {
        format!("/uploads/{category}/{stored_name}")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_writes_under_category_with_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let name = store.store("events", b"png-bytes", "poster image.png").await.unwrap();

        assert!(name.ends_with("-poster_image.png"));
        let written = std::fs::read(dir.path().join("events").join(&name)).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn delete_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let name = store.store("hero", b"x", "a.png").await.unwrap();
        store.delete("hero", &name).await;

        assert!(!dir.path().join("hero").join(&name).exists());
    }

    #[tokio::test]
    async fn delete_of_absent_file_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        // Must not panic or error.
        store.delete("hero", "never-existed.png").await;
    }

    #[tokio::test]
    async fn delete_cannot_escape_the_category_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path());

        let outside = dir.path().join("outside.txt");
        std::fs::write(&outside, b"keep me").unwrap();

        store.delete("events", "../outside.txt").await;

        // Sanitization reduces the name to "outside.txt" inside events/,
        // which does not exist; the file outside the category survives.
        assert!(outside.exists());
    }

    #[test]
    fn ensure_categories_creates_all_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads"));

        store.ensure_categories().unwrap();

        for category in UPLOAD_CATEGORIES {
            assert!(dir.path().join("uploads").join(category).is_dir());
        }
    }

    #[test]
    fn resolve_url_is_deterministic() {
        assert_eq!(
            UploadStore::resolve_url("gallery", "123-a.png"),
            "/uploads/gallery/123-a.png"
        );
    }

    #[test]
    fn file_path_rejects_unusable_names() {
        let store = UploadStore::new("/tmp/uploads");
        assert!(store.file_path("events", "..").is_none());
        assert!(store.file_path("events", "").is_none());
    }
}
