// Fri Oct 16 2026 - Alex

use crate::config::Config;
use crate::database::accel::Accelerator;
use crate::database::{BuildError, Platform, VectoredDatabase};
use crate::pattern::{CompiledPattern, PatternFlags};
use regex_automata::hybrid::dfa::DFA;
use regex_automata::nfa::thompson;
use regex_automata::MatchKind;

pub struct DatabaseBuilder {
    accelerate: bool,
    nfa_size_limit: Option<usize>,
    cache_capacity: usize,
}

impl DatabaseBuilder {
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            accelerate: config.accelerate,
            nfa_size_limit: config.nfa_size_limit,
            cache_capacity: config.cache_capacity,
        }
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

    /// Builds a vectored-mode database. Every match of every pattern is
    /// reported, so pattern ids in hits map straight back into `patterns`.
    ///
    /// Only the NFA is built here; DFA states are created on demand during
    /// scans, so build time grows linearly with the pattern set.
    pub fn build(&self, patterns: &[CompiledPattern], platform: Platform) -> Result<VectoredDatabase, BuildError> {
        if patterns.is_empty() {
            return Err(BuildError::NoPatterns);
        }

        let hirs: Vec<_> = patterns.iter().map(|p| p.hir()).collect();

        // utf8(false) keeps the unanchored prefix byte-oriented so arbitrary
        // binary corpora can be scanned.
        let nfa = thompson::Compiler::new()
            .configure(
                thompson::Config::new()
                    .utf8(false)
                    .nfa_size_limit(self.nfa_size_limit),
            )
            .build_many_from_hir(&hirs)?;
        let nfa_bytes = nfa.memory_usage();

        let accelerator = if self.accelerate && platform.has_vector_unit() {
            Accelerator::from_hirs(&hirs)
        } else {
            None
        };

        let dfa = DFA::builder()
            .configure(
                DFA::config()
                    .match_kind(MatchKind::All)
                    .cache_capacity(self.cache_capacity)
                    .specialize_start_states(accelerator.is_some()),
            )
            .build_from_nfa(nfa)?;

        let single_match = patterns.iter()
            .map(|p| p.pattern().flags().contains(PatternFlags::SINGLEMATCH))
            .collect();

        log::debug!(
            "built database: {} patterns, {} NFA bytes, platform {}, acceleration {}",
            patterns.len(),
            nfa_bytes,
            platform,
            if accelerator.is_some() { "on" } else { "off" },
        );

        Ok(VectoredDatabase::new(dfa, accelerator, single_match, platform))
    }
}

impl Default for DatabaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile_patterns;

    #[test]
    fn test_build_reports_pattern_count() {
        let patterns = compile_patterns(&["abc", "d.f"]).unwrap();
        let db = DatabaseBuilder::new().build(&patterns, Platform::populate()).unwrap();
        assert_eq!(db.pattern_count(), 2);
    }

    #[test]
    fn test_build_rejects_empty_set() {
        let err = DatabaseBuilder::new().build(&[], Platform::populate()).unwrap_err();
        assert!(matches!(err, BuildError::NoPatterns));
    }

    #[test]
    fn test_nfa_size_limit_is_a_build_error() {
        let patterns = compile_patterns(&["x{5000}"]).unwrap();
        let err = DatabaseBuilder::new()
            .with_nfa_size_limit(Some(4096))
            .build(&patterns, Platform::populate())
            .unwrap_err();
        assert!(matches!(err, BuildError::Nfa(_)));
        assert!(err.to_string().starts_with("error updating pattern database"));
    }

    #[test]
    fn test_tiny_cache_is_a_build_error() {
        let patterns = compile_patterns(&["abc"]).unwrap();
        let err = DatabaseBuilder::new()
            .with_cache_capacity(0)
            .build(&patterns, Platform::populate())
            .unwrap_err();
        assert!(matches!(err, BuildError::Dfa(_)));
    }

    #[test]
    fn test_large_sets_build() {
        let sources: Vec<String> = (0..500).map(|i| format!("/union.{{0,20}}select{}/i", i)).collect();
        let patterns = compile_patterns(&sources).unwrap();
        let db = DatabaseBuilder::new().build(&patterns, Platform::populate()).unwrap();
        assert_eq!(db.pattern_count(), 500);
    }

    #[test]
    fn test_no_acceleration_without_vector_unit() {
        let patterns = compile_patterns(&["needle"]).unwrap();
        let db = DatabaseBuilder::new()
            .with_acceleration(true)
            .build(&patterns, Platform::generic())
            .unwrap();
        assert!(!db.info().accelerated);
    }
}
