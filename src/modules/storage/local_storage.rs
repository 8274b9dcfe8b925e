use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::core::config::UploadConfig;
use crate::core::error::AppError;
use crate::shared::validation::sanitize_filename;

/// Result of writing an attachment to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated file name inside the upload directory
    pub stored_name: String,
    /// Path the file is publicly served from, e.g. `/uploads/1700000000000-report.pdf`
    pub public_path: String,
}

/// Local filesystem attachment store
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    base_path: PathBuf,
    public_prefix: String,
}

impl LocalFileStore {
    /// Create the store, making sure the upload directory exists
    pub async fn new(config: &UploadConfig) -> Result<Self, AppError> {
        let base_path = PathBuf::from(&config.dir);

        fs::create_dir_all(&base_path).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        info!("Upload directory ready: {}", base_path.display());

        Ok(Self {
            base_path,
            public_prefix: config.public_prefix.clone(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Build the stored name for an upload: `{unix_millis}-{sanitized name}`
    pub fn generate_name(original_filename: &str) -> String {
        format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_filename(original_filename)
        )
    }

    /// Public path for a stored name
    pub fn public_path(&self, stored_name: &str) -> String {
        format!("{}/{}", self.public_prefix, stored_name)
    }

    fn name_to_path(&self, stored_name: &str) -> Result<PathBuf, AppError> {
        if stored_name.is_empty()
            || stored_name == "."
            || stored_name == ".."
            || stored_name.contains(['/', '\\'])
        {
            return Err(AppError::BadRequest(format!(
                "Invalid stored file name '{}'",
                stored_name
            )));
        }
        Ok(self.base_path.join(stored_name))
    }

    /// Write an uploaded file; the write is flushed before returning
    pub async fn store(
        &self,
        original_filename: &str,
        data: &[u8],
    ) -> Result<StoredFile, AppError> {
        let stored_name = Self::generate_name(original_filename);
        let path = self.name_to_path(&stored_name)?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            AppError::Internal(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            AppError::Internal(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            AppError::Internal(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        debug!(
            path = %path.display(),
            size_bytes = data.len(),
            "Attachment stored"
        );

        Ok(StoredFile {
            public_path: self.public_path(&stored_name),
            stored_name,
        })
    }

    /// Read a stored file back by its generated name
    #[cfg(test)]
    pub async fn read(&self, stored_name: &str) -> Result<Vec<u8>, AppError> {
        let path = self.name_to_path(stored_name)?;

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(
                format!("File '{}' not found", stored_name),
            )),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Extract the stored name from a public path produced by this store
    #[cfg(test)]
    pub fn stored_name_from_path<'a>(&self, public_path: &'a str) -> Option<&'a str> {
        public_path
            .strip_prefix(self.public_prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_in(dir: &tempfile::TempDir) -> LocalFileStore {
        LocalFileStore::new(&UploadConfig {
            dir: dir.path().join("uploads").to_string_lossy().into_owned(),
            public_prefix: "/uploads".to_string(),
        })
        .await
        .expect("store should initialise")
    }

    #[test]
    fn test_generate_name_sanitizes_original() {
        let name = LocalFileStore::generate_name("a b#.txt");
        let (millis, rest) = name.split_once('-').expect("name has a timestamp prefix");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(rest, "a_b_.txt");
        assert!(name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
    }

    #[tokio::test]
    async fn test_new_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        assert!(store.base_path().is_dir());
        assert_eq!(store.public_prefix(), "/uploads");
    }

    #[tokio::test]
    async fn test_store_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;

        let stored = store.store("memo final.pdf", b"%PDF-1.4 body").await.unwrap();
        assert!(stored.stored_name.ends_with("-memo_final.pdf"));
        assert_eq!(stored.public_path, format!("/uploads/{}", stored.stored_name));
        assert_eq!(
            store.stored_name_from_path(&stored.public_path),
            Some(stored.stored_name.as_str())
        );

        let data = store.read(&stored.stored_name).await.unwrap();
        assert_eq!(data, b"%PDF-1.4 body");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        assert!(matches!(
            store.read("123-missing.txt").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_read_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir).await;
        assert!(matches!(
            store.read("../secret").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(store.read("..").await, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_stored_name_from_foreign_path() {
        let store = LocalFileStore {
            base_path: PathBuf::from("uploads"),
            public_prefix: "/uploads".to_string(),
        };
        assert_eq!(store.stored_name_from_path("/static/a.txt"), None);
        assert_eq!(store.stored_name_from_path("/uploads/"), None);
        assert_eq!(store.stored_name_from_path(""), None);
    }
}
