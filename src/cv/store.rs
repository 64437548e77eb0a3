//! Loading and saving CV documents
//!
//! Documents are plain JSON files. Saves go through a temp file in the target
//! directory so a failed write never truncates an existing document.

use crate::cv::model::Cv;
use crate::error::{CvEnhancerError, Result};
use log::info;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a CV document from a JSON file.
pub fn load_cv(path: &Path) -> Result<Cv> {
    if !path.exists() {
        return Err(CvEnhancerError::InvalidInput(format!(
            "CV document does not exist: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let cv: Cv = serde_json::from_str(&content)?;
    info!("Loaded CV document '{}' from {}", cv.title, path.display());
    Ok(cv)
}

/// Write a CV document to `path`, replacing any existing file in one step.
pub fn save_cv(path: &Path, cv: &Cv) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let json = serde_json::to_string_pretty(cv)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .map_err(|e| CvEnhancerError::Io(e.error))?;

    info!("Saved CV document to {}", path.display());
    Ok(())
}
