// Fri Oct 16 2026 - Alex

use crate::database::accel::Accelerator;
use crate::database::{Platform, ScanError};
use crate::pattern::PatternId;
use ahash::AHashSet;
use regex_automata::hybrid::dfa::{Cache, DFA};
use regex_automata::hybrid::LazyStateID;
use regex_automata::util::pool::Pool;
use regex_automata::util::start;
use regex_automata::Anchored;
use std::fmt;

/// One raw report from a scan: pattern `id` has a match ending at byte
/// offset `to` of the logical corpus. The same id may be reported many times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchHit {
    pub id: PatternId,
    pub to: usize,
}

/// Returned by a match callback to continue or stop the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    Continue,
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Completed,
    Terminated,
}

#[derive(Debug, Clone, Copy)]
pub struct DatabaseInfo {
    pub patterns: usize,
    pub memory_usage: usize,
    pub platform: Platform,
    pub accelerated: bool,
}

impl fmt::Display for DatabaseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} patterns, {} bytes, {}{}",
            self.patterns,
            self.memory_usage,
            self.platform,
            if self.accelerated { ", accelerated" } else { "" },
        )
    }
}

type CacheFn = Box<dyn Fn() -> Cache + Send + Sync>;

/// Immutable compiled database for scanning a corpus split over several
/// buffers. Automaton state is carried from one buffer into the next, so a
/// match may straddle a boundary.
///
/// The automaton is determinized lazily while scanning. Each scan borrows a
/// transition cache from a pool, so concurrent scans never share one.
#[derive(Debug)]
pub struct VectoredDatabase {
    dfa: DFA,
    caches: Pool<Cache, CacheFn>,
    accelerator: Option<Accelerator>,
    single_match: Vec<bool>,
    platform: Platform,
}

impl VectoredDatabase {
    pub(crate) fn new(
        dfa: DFA,
        accelerator: Option<Accelerator>,
        single_match: Vec<bool>,
        platform: Platform,
    ) -> Self {
        let create: CacheFn = {
            let dfa = dfa.clone();
            Box::new(move || dfa.create_cache())
        };

        Self {
            dfa,
            caches: Pool::new(create),
            accelerator,
            single_match,
            platform,
        }
    }

    pub fn pattern_count(&self) -> usize {
        self.dfa.pattern_len()
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn info(&self) -> DatabaseInfo {
        DatabaseInfo {
            patterns: self.pattern_count(),
            memory_usage: self.dfa.memory_usage() + self.dfa.get_nfa().memory_usage(),
            platform: self.platform,
            accelerated: self.accelerator.is_some(),
        }
    }

    /// Scans `corpus` as one logical stream, calling `on_match` for every hit.
    /// Patterns flagged `H` are reported at most once per scan.
    ///
    /// An empty corpus is scanned as the empty stream. Only patterns built
    /// with the `V` flag can match it.
    pub fn scan<B, F>(&self, corpus: &[B], mut on_match: F) -> Result<ScanStatus, ScanError>
    where
        B: AsRef<[u8]>,
        F: FnMut(MatchHit) -> Matching,
    {
        let mut guard = self.caches.get();
        let cache: &mut Cache = &mut guard;
        let mut fired = AHashSet::new();

        let config = start::Config::new().anchored(Anchored::No);
        let mut sid = self.dfa.start_state(cache, &config)
            .map_err(|e| ScanError::Start(e.to_string()))?;
        let mut base = 0;

        for fragment in corpus {
            let bytes = fragment.as_ref();
            let mut at = 0;

            while at < bytes.len() {
                if sid.is_start() {
                    if let Some(accel) = &self.accelerator {
                        let next = accel.skip(bytes, at);
                        if next > at {
                            at = next;
                            let restart = config.clone().look_behind(Some(bytes[at - 1]));
                            sid = self.dfa.start_state(cache, &restart)
                                .map_err(|e| ScanError::Start(e.to_string()))?;
                            continue;
                        }
                    }
                }

                sid = self.dfa.next_state(cache, sid, bytes[at])
                    .map_err(|e| ScanError::Cache(e.to_string()))?;

                if sid.is_tagged() {
                    // Matches are delayed by one byte: this one ended before `at`.
                    if sid.is_match() {
                        if self.report(cache, sid, base + at, &mut fired, &mut on_match) == Matching::Terminate {
                            return Ok(ScanStatus::Terminated);
                        }
                    } else if sid.is_dead() {
                        return Ok(ScanStatus::Completed);
                    }
                }

                at += 1;
            }

            base += bytes.len();
        }

        sid = self.dfa.next_eoi_state(cache, sid)
            .map_err(|e| ScanError::Cache(e.to_string()))?;
        if sid.is_match() && self.report(cache, sid, base, &mut fired, &mut on_match) == Matching::Terminate {
            return Ok(ScanStatus::Terminated);
        }

        Ok(ScanStatus::Completed)
    }

    fn report<F>(
        &self,
        cache: &Cache,
        sid: LazyStateID,
        to: usize,
        fired: &mut AHashSet<PatternId>,
        on_match: &mut F,
    ) -> Matching
    where
        F: FnMut(MatchHit) -> Matching,
    {
        for index in 0..self.dfa.match_len(cache, sid) {
            let id = self.dfa.match_pattern(cache, sid, index).as_usize();
            if self.single_match[id] && !fired.insert(id) {
                continue;
            }
            if on_match(MatchHit { id, to }) == Matching::Terminate {
                return Matching::Terminate;
            }
        }

        Matching::Continue
    }
}
