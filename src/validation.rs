//! Input and output path checks
//!
//! Run before any document is opened or any report is written.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::LimitsConfig;
use crate::error::{AppError, Result};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const WRITE_PROBE: &str = ".write_test";

/// Resolve `path` and check it names an existing `.pdf` file
pub fn validate_pdf_path(path: &Path) -> Result<PathBuf> {
    let resolved = path.canonicalize().map_err(|source| match source.kind() {
        ErrorKind::NotFound => AppError::FileNotFound(path.to_path_buf()),
        _ => AppError::InvalidPath {
            path: path.to_path_buf(),
            source,
        },
    })?;

    if !resolved.is_file() {
        return Err(AppError::NotAFile(resolved));
    }

    let is_pdf = resolved
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(AppError::NotPdf(resolved));
    }

    Ok(resolved)
}

/// Reject files over the configured size
pub fn check_file_size(path: &Path, limits: &LimitsConfig) -> Result<u64> {
    let bytes = fs::metadata(path)?.len();
    let size_mb = bytes as f64 / BYTES_PER_MB;
    if size_mb > limits.max_file_size_mb as f64 {
        return Err(AppError::FileTooLarge {
            size_mb,
            max_mb: limits.max_file_size_mb,
        });
    }
    Ok(bytes)
}

/// Reject documents with more pages than configured
pub fn check_page_count(count: usize, limits: &LimitsConfig) -> Result<()> {
    if count > limits.max_page_count {
        return Err(AppError::TooManyPages {
            count,
            max: limits.max_page_count,
        });
    }
    Ok(())
}

/// Make sure the output directory exists and accepts new files.
///
/// Existing paths must be writable directories; missing ones are created
/// along with their parents.
pub fn prepare_output_dir(path: &Path) -> Result<PathBuf> {
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    if resolved.exists() {
        if !resolved.is_dir() {
            return Err(AppError::OutputNotDirectory(resolved));
        }
        probe_writable(&resolved)?;
    } else {
        info!("Creating output directory: {}", resolved.display());
        fs::create_dir_all(&resolved).map_err(|source| AppError::CreateOutputDir {
            path: resolved.clone(),
            source,
        })?;
    }

    Ok(resolved)
}

fn probe_writable(dir: &Path) -> Result<()> {
    let probe = dir.join(WRITE_PROBE);
    let not_writable = |source| AppError::OutputNotWritable {
        path: dir.to_path_buf(),
        source,
    };

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&probe)
        .map_err(not_writable)?;
    fs::remove_file(&probe).map_err(not_writable)
}
