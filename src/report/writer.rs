//! Report files on disk

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::error::{ReportError, Result};
use super::markdown::Reports;
use crate::config::OutputConfig;

/// Write the three reports into `dir` and return their paths
pub fn write_reports(dir: &Path, names: &OutputConfig, reports: &Reports) -> Result<Vec<PathBuf>> {
    let files = [
        (&names.comments_file, &reports.comments),
        (&names.student_file, &reports.student_corrections),
        (&names.examiner_file, &reports.examiner_questions),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, body) in files {
        let path = dir.join(name);
        info!("Writing {}", path.display());
        fs::write(&path, body).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}
