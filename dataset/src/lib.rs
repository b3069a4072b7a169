//! Input set loading
//!
//! Reads the records to check from a file before any worker starts:
//!
//! - `.sdf` / `.sd`: one record per block terminated by a `$$$$` line
//! - anything else: one record per non-blank line (SMILES and similar)

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::fs;
use std::path::{Path, PathBuf};

use compliance_bench_core::InputSet;
use thiserror::Error;

/// Line terminating a record in SD files
const SDF_DELIMITER: &str = "$$$$";

/// Errors while loading an input set
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be read
    #[error("failed to read input file {}: {source}", path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file holds no records
    #[error("no records found in input file {}", .0.display())]
    Empty(PathBuf),
}

/// Record layout of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One record per non-blank line
    Lines,
    /// `$$$$`-terminated blocks
    Sdf,
}

impl InputFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("sdf") | Some("sd") => InputFormat::Sdf,
            _ => InputFormat::Lines,
        }
    }

    /// Split file content into record sources
    pub fn split(&self, content: &str) -> Vec<String> {
        match self {
            InputFormat::Lines => content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| line.trim_end().to_string())
                .collect(),
            InputFormat::Sdf => split_sdf(content),
        }
    }
}

fn split_sdf(content: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut block = String::new();

    for line in content.lines() {
        if line.trim_end() == SDF_DELIMITER {
            if !block.trim().is_empty() {
                records.push(std::mem::take(&mut block));
            }
            block.clear();
        } else {
            block.push_str(line);
            block.push('\n');
        }
    }

    // Last block may lack its terminator
    if !block.trim().is_empty() {
        records.push(block);
    }

    records
}

/// Load every record of `path` into an input set
///
/// # Errors
/// Fails when the file cannot be read or holds no records.
pub fn load_input_set(path: impl AsRef<Path>) -> Result<InputSet, DatasetError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = InputFormat::from_path(path);
    let sources = format.split(&content);
    if sources.is_empty() {
        return Err(DatasetError::Empty(path.to_path_buf()));
    }

    tracing::debug!(
        path = %path.display(),
        format = ?format,
        records = sources.len(),
        "Input file loaded"
    );

    Ok(InputSet::from_sources(sources))
}
