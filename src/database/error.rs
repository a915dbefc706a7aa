// Fri Oct 16 2026 - Alex

use regex_automata::hybrid;
use regex_automata::nfa::thompson;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("error updating pattern database: no patterns to build")]
    NoPatterns,
    #[error("error updating pattern database: {0}")]
    Nfa(#[from] thompson::BuildError),
    #[error("error updating pattern database: {0}")]
    Dfa(#[from] hybrid::BuildError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("scan could not start: {0}")]
    Start(String),
    #[error("scan aborted: {0}")]
    Cache(String),
}
