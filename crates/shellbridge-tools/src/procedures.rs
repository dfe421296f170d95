//! JSON persistence of recorded procedures
//!
//! A captured recording window is only useful if it can be replayed or
//! referenced later; the store keeps each one as a small named JSON
//! document under a configured directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::base::ToolError;

/// A saved recording window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Procedure {
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// The captured transcript span, chronological order
    pub transcript: String,
}

/// Directory-backed store of [`Procedure`] documents
#[derive(Debug, Clone)]
pub struct ProcedureStore {
    dir: PathBuf,
}

impl ProcedureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a captured span under `name`, returning the file path
    pub fn save(&self, name: &str, transcript: &str) -> Result<PathBuf, ToolError> {
        let path = self.path_for(name)?;
        std::fs::create_dir_all(&self.dir)?;
        let procedure = Procedure {
            name: name.to_string(),
            created_at: Utc::now(),
            transcript: transcript.to_string(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&procedure)?)?;
        info!(name, path = %path.display(), "saved procedure");
        Ok(path)
    }

    /// Load a procedure by name
    pub fn load(&self, name: &str) -> Result<Procedure, ToolError> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(ToolError::NotFound(format!("procedure {name:?}")));
        }
        Ok(serde_json::from_str(&std::fs::read_to_string(&path)?)?)
    }

    /// Names of all saved procedures, sorted
    pub fn list(&self) -> Result<Vec<String>, ToolError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ToolError> {
        if name.is_empty()
            || name
                .chars()
                .any(|c| !c.is_ascii_alphanumeric() && c != '-' && c != '_')
        {
            return Err(ToolError::InvalidArguments(format!(
                "procedure name {name:?} must be non-empty and use only [A-Za-z0-9_-]"
            )));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}
