// Fri Oct 16 2026 - Alex

use crate::error::{Error, Result};
use crate::pattern::PatternFlags;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flags applied to patterns written without `/.../` delimiters.
    pub default_flags: String,
    /// Skip ahead with a literal prefilter when the host has a vector unit.
    pub accelerate: bool,
    pub nfa_size_limit: Option<usize>,
    /// Bytes of lazily built DFA states kept per concurrent scan.
    pub cache_capacity: usize,
    /// Scan threads for batch matching.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_flags: String::new(),
            accelerate: true,
            nfa_size_limit: Some(64 << 20),
            cache_capacity: 8 << 20,
            threads: num_cpus::get(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_flags(mut self, flags: &str) -> Self {
        self.default_flags = flags.to_string();
        self
    }

    pub fn with_acceleration(mut self, enabled: bool) -> Self {
        self.accelerate = enabled;
        self
    }

    pub fn with_nfa_size_limit(mut self, limit: Option<usize>) -> Self {
        self.nfa_size_limit = limit;
        self
    }

    pub fn with_cache_capacity(mut self, bytes: usize) -> Self {
        self.cache_capacity = bytes;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn default_pattern_flags(&self) -> Result<PatternFlags> {
        PatternFlags::parse(&self.default_flags)
            .map_err(|c| Error::Config(format!("unsupported default flag `{}`", c)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(Error::Config("threads must be greater than 0".to_string()));
        }
        self.default_pattern_flags()?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }
}
