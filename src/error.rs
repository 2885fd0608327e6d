//! Error types for the file and CLI boundaries
//!
//! The engine itself never fails: malformed markup degrades to plain
//! text and missing values render empty. Errors only arise around it,
//! when loading a fill file from disk.

use thiserror::Error;

/// Errors from loading or parsing a fill file.
#[derive(Error, Debug)]
pub enum FillError {
    #[error("failed to read fill file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse fill file TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
