// Fri Oct 16 2026 - Alex

use crate::database::{MatchHit, Matching};
use crate::pattern::{Pattern, PatternId};
use ahash::AHashSet;

/// Per-scan accumulator of pattern ids.
///
/// Hits arrive repeated and unordered; only the set of ids is kept so memory
/// stays bounded by the pattern count no matter how often a pattern fires.
#[derive(Debug, Default)]
pub struct MatchCollector {
    matched: AHashSet<PatternId>,
    hits: usize,
}

impl MatchCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, hit: MatchHit) -> Matching {
        self.hits += 1;
        self.matched.insert(hit.id);
        Matching::Continue
    }

    /// Raw hit count, duplicates included.
    pub fn hit_count(&self) -> usize {
        self.hits
    }

    pub fn unique_count(&self) -> usize {
        self.matched.len()
    }

    /// Maps the collected ids onto `patterns`, which must be the list the
    /// scanned database was built from.
    pub fn finish(self, patterns: &[Pattern]) -> Vec<String> {
        collect(self.matched, patterns)
    }
}

/// Deduplicates `hits` and resolves them to expressions, ordered by id.
pub fn collect<I>(hits: I, patterns: &[Pattern]) -> Vec<String>
where
    I: IntoIterator<Item = PatternId>,
{
    let mut ids: Vec<PatternId> = hits.into_iter()
        .collect::<AHashSet<_>>()
        .into_iter()
        .collect();
    ids.sort_unstable();

    ids.into_iter()
        .filter_map(|id| {
            let pattern = patterns.get(id);
            debug_assert!(pattern.is_some(), "pattern id {} outside its batch", id);
            pattern
        })
        .map(|pattern| pattern.expression().to_string())
        .collect()
}
