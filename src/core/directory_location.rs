// src/core/directory_location.rs

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::CalcConfig;
use crate::error::CliError;
use crate::matrix::Operation;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Where matrices are read from and results written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLocations {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl DirectoryLocations {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input_dir: P, output_dir: Q) -> Self {
        DirectoryLocations {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn from_config(config: &CalcConfig) -> Self {
        Self::new(&config.input_dir, &config.output_dir)
    }

    /// Lists the `*.txt` files of the input directory, sorted by name
    pub fn list_matrix_files(&self) -> Result<Vec<PathBuf>, CliError> {
        if !self.input_dir.is_dir() {
            return Err(CliError::MissingDirectory(self.input_dir.clone()));
        }

        let escaped = glob::Pattern::escape(&self.input_dir.to_string_lossy());
        let pattern = Path::new(&escaped).join("*.txt");
        let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(CliError::NoInputFiles(self.input_dir.clone()));
        }
        Ok(files)
    }

    pub fn ensure_output_dir(&self) -> Result<(), CliError> {
        fs::create_dir_all(&self.output_dir).map_err(|source| CliError::Io {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// `<output_dir>/result_<operation>_<YYYYMMDD_HHMMSS>.txt`
    pub fn result_filepath(&self, operation: Operation, timestamp: &DateTime<Local>) -> PathBuf {
        self.output_dir
            .join(Self::result_filename(operation, timestamp))
    }

    pub fn result_filename(operation: Operation, timestamp: &DateTime<Local>) -> String {
        format!(
            "result_{}_{}.txt",
            operation.name(),
            timestamp.format(TIMESTAMP_FORMAT)
        )
    }
}

impl Default for DirectoryLocations {
    fn default() -> Self {
        Self::from_config(&CalcConfig::default())
    }
}
