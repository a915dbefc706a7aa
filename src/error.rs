// Fri Oct 16 2026 - Alex

use crate::database::{BuildError, ScanError};
use crate::pattern::CompileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no patterns specified")]
    NoPatterns,
    #[error("database not loaded")]
    NotLoaded,
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
