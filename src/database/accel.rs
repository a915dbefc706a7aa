// Fri Oct 16 2026 - Alex

use regex_automata::util::prefilter::Prefilter;
use regex_automata::{MatchKind, Span};
use regex_syntax::hir::literal::{Extractor, Seq};
use regex_syntax::hir::Hir;

/// Prefix-literal skipper for the scan's idle state.
///
/// While the automaton sits in its start state nothing is in progress, so the
/// scan may jump straight to the next place where some pattern's prefix
/// literal occurs.
#[derive(Debug)]
pub(crate) struct Accelerator {
    prefilter: Prefilter,
    max_needle_len: usize,
}

impl Accelerator {
    /// `None` unless every pattern starts with a finite, non-empty set of
    /// literals.
    pub(crate) fn from_hirs(hirs: &[&Hir]) -> Option<Self> {
        let extractor = Extractor::new();
        let mut needles = Seq::empty();

        for hir in hirs {
            let mut prefixes = extractor.extract(hir);
            needles.union(&mut prefixes);
        }

        if needles.min_literal_len()? == 0 {
            return None;
        }
        let max_needle_len = needles.max_literal_len()?;

        let literals: Vec<&[u8]> = needles.literals()?
            .iter()
            .map(|lit| lit.as_bytes())
            .collect();
        let prefilter = Prefilter::new(MatchKind::All, &literals)?;

        Some(Self {
            prefilter,
            max_needle_len,
        })
    }

    /// Earliest position in `haystack[at..]` where a match could begin.
    ///
    /// When no needle is found the last `max_needle_len - 1` bytes are kept,
    /// since a needle may continue into the next fragment.
    pub(crate) fn skip(&self, haystack: &[u8], at: usize) -> usize {
        match self.prefilter.find(haystack, Span::from(at..haystack.len())) {
            Some(span) => span.start,
            None => haystack.len()
                .saturating_sub(self.max_needle_len - 1)
                .max(at),
        }
    }
}
