//! Configuration management for pdf-comments

use std::env;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub limits: LimitsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    pub max_file_size_mb: u64,
    pub max_page_count: usize,
}

/// Report file names inside the output directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    pub comments_file: String,
    pub student_file: String,
    pub examiner_file: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

impl Default for LimitsConfig {
    fn default() -> Self {
        LimitsConfig {
            max_file_size_mb: 500,
            max_page_count: 10_000,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            comments_file: "comments.md".to_string(),
            student_file: "student_corrections.md".to_string(),
            examiner_file: "examiner_questions.md".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let limits = LimitsConfig::default();
        let output = OutputConfig::default();

        Ok(Config {
            limits: LimitsConfig {
                max_file_size_mb: number(&lookup, "PDF_COMMENTS_MAX_FILE_SIZE_MB", limits.max_file_size_mb)?,
                max_page_count: number(&lookup, "PDF_COMMENTS_MAX_PAGES", limits.max_page_count)?,
            },
            output: OutputConfig {
                comments_file: file_name(&lookup, "PDF_COMMENTS_COMMENTS_FILE", output.comments_file)?,
                student_file: file_name(&lookup, "PDF_COMMENTS_STUDENT_FILE", output.student_file)?,
                examiner_file: file_name(&lookup, "PDF_COMMENTS_EXAMINER_FILE", output.examiner_file)?,
            },
        })
    }
}

fn number<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        None => Ok(default),
    }
}

fn file_name<F>(lookup: &F, var: &'static str, default: String) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(value) => Ok(value.trim().to_string()),
        None => Ok(default),
    }
}
