//! Upload storage
//!
//! The HTTP layer hands uploaded bytes to an [`UploadStore`] and returns the
//! URL it reports. [`LocalUploadStore`] writes files to a directory and
//! builds URLs from a configured public base.

use crate::error::{CopilotError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Storage seam for uploaded files
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Persist `data` and return a URL the plugin can fetch it from
    async fn store(&self, filename: &str, data: &[u8]) -> Result<String>;
}

/// Upload store writing into a local directory
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    dir: PathBuf,
    public_base_url: String,
    max_bytes: usize,
}

impl LocalUploadStore {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into(),
            max_bytes,
        }
    }

    /// Directory files are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Reduce a client-supplied filename to a safe final path component
///
/// # Examples
///
/// ```
/// use comfy_copilot::upload::sanitize_filename;
///
/// assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_filename("C:\\Users\\me\\cat.png"), "cat.png");
/// assert_eq!(sanitize_filename(""), "upload.bin");
/// ```
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        "upload.bin".to_string()
    } else {
        name.to_string()
    }
}

#[async_trait]
impl UploadStore for LocalUploadStore {
    async fn store(&self, filename: &str, data: &[u8]) -> Result<String> {
        if data.len() > self.max_bytes {
            return Err(CopilotError::Validation(format!(
                "File exceeds upload limit of {} bytes",
                self.max_bytes
            ))
            .into());
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CopilotError::Upload(format!("Failed to create upload directory: {}", e)))?;

        let stored_name = format!("{}-{}", uuid::Uuid::new_v4(), sanitize_filename(filename));
        let path = self.dir.join(&stored_name);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| CopilotError::Upload(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::info!(file = %stored_name, bytes = data.len(), "Stored upload");

        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            stored_name
        ))
    }
}
