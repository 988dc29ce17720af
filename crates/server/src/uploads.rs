// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! File storage for employee documents and site images.
//!
//! Files live under the upload root as
//! `<category>/<owner_id>/<uuid>-<sanitized name>` and are served back from
//! `/uploads/<relative path>`.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Extensions accepted for upload, lowercase.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "webp", "doc", "docx"];

/// Longest sanitized file name kept after the UUID prefix.
const MAX_FILE_NAME_LEN: usize = 100;

/// URL prefix under which stored files are served.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Errors raised while storing or reading uploads.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Uploaded file '{0}' is empty")]
    EmptyFile(String),
    #[error("Uploaded file is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },
    #[error("File type '{0}' is not allowed; use pdf, png, jpg, jpeg, webp, doc or docx")]
    UnsupportedType(String),
    #[error("Invalid upload path: {0}")]
    InvalidPath(String),
    #[error("Upload not found: {0}")]
    NotFound(String),
    #[error("Upload storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// What an upload belongs to; also its top-level directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadCategory {
    EmployeeDocuments,
    SiteImages,
}

impl UploadCategory {
    /// Directory name for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmployeeDocuments => "employees",
            Self::SiteImages => "sites",
        }
    }
}

/// A file written to the upload store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Path relative to the upload root, `/`-separated.
    pub relative_path: String,
    /// URL the file is served from.
    pub url: String,
}

/// Upload directory plus its size limit.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    /// Creates a store rooted at `root`. The directory is created lazily.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// Largest accepted file, in bytes.
    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Checks an upload against the size limit and the type allow list
    /// without writing anything.
    ///
    /// Returns the sanitized file name the upload would be stored under.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is empty, over the size limit, or of a
    /// type not on the allow list.
    pub fn check(&self, original_name: &str, bytes: &[u8]) -> Result<String, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::EmptyFile(original_name.to_string()));
        }
        if bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let file_name: String = sanitize_file_name(original_name);
        let extension: String = extension_of(&file_name);
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(UploadError::UnsupportedType(extension));
        }
        Ok(file_name)
    }

    /// Validates and writes one uploaded file.
    ///
    /// # Errors
    ///
    /// Returns an error if [`UploadStore::check`] rejects the file or it
    /// cannot be written.
    pub async fn store(
        &self,
        category: UploadCategory,
        owner_id: i64,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        let file_name: String = self.check(original_name, bytes)?;

        let directory: String = format!("{}/{owner_id}", category.as_str());
        let relative_path: String = format!("{directory}/{}-{file_name}", Uuid::new_v4());

        tokio::fs::create_dir_all(self.root.join(&directory)).await?;
        tokio::fs::write(self.root.join(&relative_path), bytes).await?;

        info!(
            category = category.as_str(),
            owner_id,
            path = %relative_path,
            size = bytes.len(),
            "Stored upload"
        );

        Ok(StoredUpload {
            url: format!("{UPLOAD_URL_PREFIX}/{relative_path}"),
            relative_path,
        })
    }

    /// Deletes the file behind a URL returned by [`UploadStore::store`].
    ///
    /// Returns `false` when the URL is not an upload URL or the file is
    /// already gone.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for paths that leave the upload root, or `Io`
    /// if the file exists but cannot be removed.
    pub async fn remove(&self, url: &str) -> Result<bool, UploadError> {
        let Some(relative_path) = url
            .strip_prefix(UPLOAD_URL_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return Ok(false);
        };
        let path: PathBuf = self.resolve(relative_path)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %relative_path, "Removed upload");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(UploadError::Io(e)),
        }
    }

    /// Reads a stored file and returns its bytes and content type.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for paths that leave the upload root,
    /// `NotFound` if no such file exists, or `Io` if it cannot be read.
    pub async fn read(&self, relative_path: &str) -> Result<(Vec<u8>, &'static str), UploadError> {
        let path: PathBuf = self.resolve(relative_path)?;
        debug!(path = %path.display(), "Reading upload");

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok((bytes, content_type_for(relative_path))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(UploadError::NotFound(relative_path.to_string()))
            }
            Err(e) => Err(UploadError::Io(e)),
        }
    }

    /// Maps a relative path onto the upload root, rejecting anything that
    /// is not a plain sequence of names.
    fn resolve(&self, relative_path: &str) -> Result<PathBuf, UploadError> {
        let candidate: &Path = Path::new(relative_path);
        let plain: bool = !relative_path.is_empty()
            && !relative_path.contains('\\')
            && candidate
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !plain {
            return Err(UploadError::InvalidPath(relative_path.to_string()));
        }
        Ok(self.root.join(candidate))
    }
}

/// Reduces a client-supplied name to a safe final path segment.
///
/// Directory parts are dropped and anything outside `[A-Za-z0-9._-]`
/// becomes `_`. Leading dots are stripped so the result is never hidden.
#[must_use]
pub fn sanitize_file_name(original_name: &str) -> String {
    let base: &str = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed: &str = cleaned.trim_start_matches('.');

    let mut name: String = if trimmed.is_empty() {
        String::from("file")
    } else {
        trimmed.to_string()
    };

    if name.len() > MAX_FILE_NAME_LEN {
        let extension: String = extension_of(&name);
        let keep: usize = MAX_FILE_NAME_LEN.saturating_sub(extension.len() + 1);
        name.truncate(keep);
        if !extension.is_empty() {
            name.push('.');
            name.push_str(&extension);
        }
    }
    name
}

/// Lowercase extension without the dot, or empty.
fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

fn content_type_for(path: &str) -> &'static str {
    match extension_of(path).as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> UploadStore {
        UploadStore::new(dir.path(), 1_024)
    }

    #[test]
    fn test_sanitize_drops_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\mona\\My CV.pdf"), "My_CV.pdf");
        assert_eq!(sanitize_file_name(".hidden.png"), "hidden.png");
        assert_eq!(sanitize_file_name(""), "file");
    }

    #[test]
    fn test_sanitize_keeps_extension_when_truncating() {
        let long_name: String = format!("{}.docx", "a".repeat(300));
        let sanitized: String = sanitize_file_name(&long_name);
        assert_eq!(sanitized.len(), MAX_FILE_NAME_LEN);
        assert!(sanitized.ends_with(".docx"));
    }

    #[tokio::test]
    async fn test_store_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store: UploadStore = store_in(&dir);

        let stored: StoredUpload = store
            .store(UploadCategory::EmployeeDocuments, 7, "cv.PDF", b"%PDF-1.7")
            .await
            .unwrap();

        assert!(stored.relative_path.starts_with("employees/7/"));
        assert!(stored.relative_path.ends_with("-cv.PDF"));
        assert_eq!(stored.url, format!("/uploads/{}", stored.relative_path));
        assert!(dir.path().join(&stored.relative_path).is_file());

        let (bytes, content_type) = store.read(&stored.relative_path).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.7");
        assert_eq!(content_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_store_rejects_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let store: UploadStore = store_in(&dir);

        assert!(matches!(
            store
                .store(UploadCategory::SiteImages, 1, "run.sh", b"echo")
                .await,
            Err(UploadError::UnsupportedType(ext)) if ext == "sh"
        ));
        assert!(matches!(
            store.store(UploadCategory::SiteImages, 1, "pond.png", b"").await,
            Err(UploadError::EmptyFile(_))
        ));
        assert!(matches!(
            store
                .store(UploadCategory::SiteImages, 1, "pond.png", &[0_u8; 1_025])
                .await,
            Err(UploadError::TooLarge {
                size: 1_025,
                limit: 1_024
            })
        ));
    }

    #[tokio::test]
    async fn test_check_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store: UploadStore = store_in(&dir);

        assert_eq!(store.check("My CV.pdf", b"%PDF").unwrap(), "My_CV.pdf");
        assert!(matches!(
            store.check("run.sh", b"echo"),
            Err(UploadError::UnsupportedType(_))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_remove_deletes_stored_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let store: UploadStore = store_in(&dir);
        let stored: StoredUpload = store
            .store(UploadCategory::SiteImages, 3, "pond.png", b"png")
            .await
            .unwrap();

        assert!(store.remove(&stored.url).await.unwrap());
        assert!(!dir.path().join(&stored.relative_path).exists());
        assert!(!store.remove(&stored.url).await.unwrap());
        assert!(!store.remove("https://cdn.example.com/pond.png").await.unwrap());
        assert!(matches!(
            store.remove("/uploads/../outside.png").await,
            Err(UploadError::InvalidPath(_))
        ));
    }

    #[tokio::test]
    async fn test_read_rejects_traversal_and_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store: UploadStore = store_in(&dir);

        for path in ["../secret.pdf", "/etc/passwd", "sites/../../x.png", "a\\..\\b.png", ""] {
            assert!(
                matches!(store.read(path).await, Err(UploadError::InvalidPath(_))),
                "{path} should be rejected"
            );
        }
        assert!(matches!(
            store.read("sites/1/missing.png").await,
            Err(UploadError::NotFound(_))
        ));
    }
}
