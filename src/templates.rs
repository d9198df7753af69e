//! Workflow template catalog
//!
//! Templates are JSON documents stored one per file in a directory. The
//! directory is rescanned on every request so new files show up without a
//! restart. When the directory does not exist the compiled-in catalog is
//! served instead.

use crate::error::{CopilotError, Result};
use crate::reply::rules::basic_image_gen_workflow;
use crate::reply::Workflow;
use std::path::{Path, PathBuf};

/// Source of workflow templates
#[derive(Debug, Clone)]
pub struct WorkflowCatalog {
    dir: PathBuf,
}

impl WorkflowCatalog {
    /// Catalog backed by `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the catalog reads from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every `*.json` template, ordered by file name
    ///
    /// # Errors
    ///
    /// Returns a catalog error if the directory cannot be checked or listed,
    /// or a template file cannot be read or parsed
    pub async fn load(&self) -> Result<Vec<Workflow>> {
        let exists = tokio::fs::try_exists(&self.dir).await.map_err(|e| {
            CopilotError::Catalog(format!("Failed to access {}: {}", self.dir.display(), e))
        })?;
        if !exists {
            tracing::warn!(
                dir = %self.dir.display(),
                "Template directory not found, serving builtin catalog"
            );
            return Ok(builtin_templates());
        }

        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            CopilotError::Catalog(format!("Failed to list {}: {}", self.dir.display(), e))
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CopilotError::Catalog(format!("Failed to list {}: {}", self.dir.display(), e)))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut templates = Vec::with_capacity(paths.len());
        for path in paths {
            templates.push(load_template(&path).await?);
        }

        tracing::debug!(count = templates.len(), dir = %self.dir.display(), "Loaded workflow templates");
        Ok(templates)
    }
}

async fn load_template(path: &Path) -> Result<Workflow> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CopilotError::Catalog(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&contents).map_err(|e| {
        CopilotError::Catalog(format!("Failed to parse {}: {}", path.display(), e)).into()
    })
}

/// Templates served when no template directory exists
pub fn builtin_templates() -> Vec<Workflow> {
    let mut workflow = basic_image_gen_workflow();
    workflow.id = Some(1);
    vec![workflow]
}
