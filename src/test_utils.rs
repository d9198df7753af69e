//! Test utilities for comfy-copilot
//!
//! This module provides common test utilities including temporary directory
//! management, test file creation, and assertion helpers.

use crate::config::Config;
use crate::error::CopilotError;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Arguments
///
/// * `dir` - Directory to create the file in
/// * `name` - Name of the file
/// * `content` - Content to write to the file
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: anyhow::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Assert that a result failed with a validation error
pub fn assert_validation_error<T>(result: anyhow::Result<T>) {
    match result {
        Ok(_) => panic!("Expected validation error but got Ok"),
        Err(e) => assert!(
            e.downcast_ref::<CopilotError>()
                .is_some_and(CopilotError::is_validation),
            "Expected validation error, got '{}'",
            e
        ),
    }
}

/// Configuration rooted in `dir` with no streaming delay
pub fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.stream.char_delay_ms = 0;
    config.templates.dir = dir.path().join("workflows");
    config.upload.dir = dir.path().join("uploads");
    config.upload.public_base_url = "http://localhost:8000/uploads".to_string();
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: anyhow::Result<()> =
            Err(CopilotError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: anyhow::Result<()> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: anyhow::Result<()> =
            Err(CopilotError::Config("different error".to_string()).into());
        assert_error_contains(result, "not present");
    }

    #[test]
    fn test_assert_validation_error() {
        let result: anyhow::Result<()> =
            Err(CopilotError::Validation("Node type is required".to_string()).into());
        assert_validation_error(result);
    }

    #[test]
    #[should_panic(expected = "Expected validation error")]
    fn test_assert_validation_error_rejects_other_kinds() {
        let result: anyhow::Result<()> = Err(CopilotError::Stream("gone".to_string()).into());
        assert_validation_error(result);
    }

    #[test]
    fn test_test_config() {
        let dir = temp_dir();
        let config = test_config(&dir);
        assert_eq!(config.stream.char_delay_ms, 0);
        assert!(config.templates.dir.starts_with(dir.path()));
        assert!(config.validate().is_ok());
    }
}
