// ABOUTME: Local-disk photo storage for uploaded progress photos
// ABOUTME: Writes photo bytes under a configured root and maps them to public URLs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Studio Server Contributors

//! Photo storage
//!
//! Uploaded photos are written to local disk under a configured root
//! directory and served statically under [`PUBLIC_PREFIX`]. Stored file
//! names are prefixed with a UUID so uploads never collide.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// URL prefix under which stored photos are served
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Metadata for a photo written to disk
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    /// Public URL path for the photo
    pub url: String,
    /// Original file name as uploaded
    pub file_name: String,
    /// Size in bytes
    pub file_size: i64,
    /// MIME type as reported by the upload
    pub content_type: String,
}

/// Local-disk photo store
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    /// Create a store rooted at `root`
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Directory the store writes into
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the storage root exists
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created
    pub async fn init(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create photo storage root {}", self.root.display()))
    }

    /// Write photo bytes to disk and return its public metadata
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub async fn save(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredPhoto> {
        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(file_name));
        let path = self.root.join(&stored_name);

        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write photo to {}", path.display()))?;

        Ok(StoredPhoto {
            url: format!("{PUBLIC_PREFIX}/{stored_name}"),
            file_name: file_name.to_owned(),
            file_size: bytes.len() as i64,
            content_type: content_type.to_owned(),
        })
    }

    /// Remove a stored photo by its public URL
    ///
    /// Unknown URLs and already-deleted files are ignored so group deletion
    /// stays idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed
    pub async fn delete(&self, url: &str) -> Result<()> {
        let Some(stored_name) = url.strip_prefix(&format!("{PUBLIC_PREFIX}/")) else {
            return Ok(());
        };
        // Stored names never contain separators; refuse anything that does
        if stored_name.contains('/') || stored_name.contains('\\') {
            return Ok(());
        }

        let path = self.root.join(stored_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to delete photo {}", path.display()))
            }
        }
    }
}

/// Restrict stored file names to a safe character set
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "photo".to_owned()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path().to_path_buf());
        store.init().await.unwrap();

        let stored = store
            .save("front view.jpg", "image/jpeg", b"not really a jpeg")
            .await
            .unwrap();

        assert!(stored.url.starts_with("/uploads/"));
        assert_eq!(stored.file_name, "front view.jpg");
        assert_eq!(stored.file_size, 17);

        let on_disk = dir.path().join(stored.url.strip_prefix("/uploads/").unwrap());
        assert!(on_disk.exists());

        store.delete(&stored.url).await.unwrap();
        assert!(!on_disk.exists());

        // Deleting again is a no-op
        store.delete(&stored.url).await.unwrap();
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("front view.jpg"), "front_view.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name(""), "photo");
    }

    #[tokio::test]
    async fn test_delete_ignores_foreign_urls() {
        let dir = tempfile::tempdir().unwrap();
        let store = PhotoStore::new(dir.path().to_path_buf());

        store.delete("https://elsewhere/x.jpg").await.unwrap();
        store.delete("/uploads/../escape.jpg").await.unwrap();
    }
}
