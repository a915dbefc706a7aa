// Fri Oct 16 2026 - Alex

use crate::config::Config;
use crate::database::{DatabaseBuilder, DatabaseInfo, Platform, VectoredDatabase};
use crate::engine::buffer::to_views;
use crate::engine::collector::MatchCollector;
use crate::engine::matcher::Matcher;
use crate::error::{Error, Result};
use crate::pattern::{CompiledPattern, Pattern, PatternCompiler};
use crate::utils::logging::scoped_timer;
use parking_lot::RwLock;
use rayon::prelude::*;
use std::sync::Arc;

/// A published database paired with the exact pattern list it was built
/// from. Never modified once published.
struct Snapshot {
    database: VectoredDatabase,
    patterns: Vec<Pattern>,
    generation: u64,
}

impl Snapshot {
    fn scan<B: AsRef<[u8]>>(&self, corpus: &[B]) -> Result<Vec<String>> {
        let mut collector = MatchCollector::new();
        self.database.scan(corpus, |hit| collector.record(hit))?;

        log::trace!(
            "scan of {} fragments: {} hits, {} unique",
            corpus.len(),
            collector.hit_count(),
            collector.unique_count(),
        );

        Ok(collector.finish(&self.patterns))
    }
}

/// Multi-pattern matcher with a hot-swappable database.
///
/// Readers take a reference to the current snapshot and release the lock
/// before scanning. `update` compiles and builds without holding the lock
/// and only takes the write lock to swap the snapshot pointer.
pub struct Engine {
    config: Config,
    compiler: PatternCompiler,
    builder: DatabaseBuilder,
    pool: rayon::ThreadPool,
    state: RwLock<Option<Arc<Snapshot>>>,
}

impl Engine {
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let compiler = PatternCompiler::new().with_default_flags(config.default_pattern_flags()?);
        let builder = DatabaseBuilder::from_config(&config);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("hypermatcher-scan-{}", i))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            config,
            compiler,
            builder,
            pool,
            state: RwLock::new(None),
        })
    }

    /// Replaces the pattern database.
    ///
    /// Pattern ids are positions in `patterns` and are only valid until the
    /// next successful update. On error the current database is kept.
    pub fn update<S: AsRef<str>>(&self, patterns: &[S]) -> Result<()> {
        if patterns.is_empty() {
            return Err(Error::NoPatterns);
        }

        let (database, patterns) = match self.prepare(patterns) {
            Ok(prepared) => prepared,
            Err(e) => {
                log::warn!("pattern update rejected, keeping current database: {}", e);
                return Err(e);
            }
        };

        let info = database.info();
        let generation = self.publish(database, patterns);
        log::info!("published pattern database generation {} ({})", generation, info);

        Ok(())
    }

    fn prepare<S: AsRef<str>>(&self, sources: &[S]) -> Result<(VectoredDatabase, Vec<Pattern>)> {
        let _timer = scoped_timer("pattern database build");

        let compiled = self.compiler.compile(sources)?;
        let database = self.builder.build(&compiled, Platform::populate())?;
        let patterns = compiled.into_iter().map(CompiledPattern::into_pattern).collect();

        Ok((database, patterns))
    }

    fn publish(&self, database: VectoredDatabase, patterns: Vec<Pattern>) -> u64 {
        let mut state = self.state.write();
        let generation = state.as_ref().map_or(0, |s| s.generation) + 1;

        *state = Some(Arc::new(Snapshot {
            database,
            patterns,
            generation,
        }));

        generation
    }

    fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.state.read().clone().ok_or(Error::NotLoaded)
    }

    /// Scans a vectored byte corpus. An empty corpus is not an error.
    pub fn match_bytes<B: AsRef<[u8]>>(&self, corpus: &[B]) -> Result<Vec<String>> {
        self.snapshot()?.scan(corpus)
    }

    pub fn match_strings<S: AsRef<str>>(&self, corpus: &[S]) -> Result<Vec<String>> {
        let views = to_views(corpus);
        self.match_bytes(&views)
    }

    /// Scans independent corpora in parallel against a single snapshot.
    /// Fails if any scan fails.
    pub fn match_batch<C, B>(&self, corpora: &[C]) -> Result<Vec<Vec<String>>>
    where
        C: AsRef<[B]> + Sync,
        B: AsRef<[u8]> + Sync,
    {
        let snapshot = self.snapshot()?;

        self.pool.install(|| {
            corpora.par_iter()
                .map(|corpus| snapshot.scan(corpus.as_ref()))
                .collect()
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().is_some()
    }

    /// Number of successful updates so far; 0 while unloaded.
    pub fn generation(&self) -> u64 {
        self.state.read().as_ref().map_or(0, |s| s.generation)
    }

    pub fn pattern_count(&self) -> usize {
        self.state.read().as_ref().map_or(0, |s| s.patterns.len())
    }

    /// Patterns of the current database, in id order.
    pub fn patterns(&self) -> Vec<Pattern> {
        self.state.read().as_ref().map(|s| s.patterns.clone()).unwrap_or_default()
    }

    pub fn database_info(&self) -> Option<DatabaseInfo> {
        self.state.read().as_ref().map(|s| s.database.info())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Matcher for Engine {
    fn update(&self, patterns: &[&str]) -> Result<()> {
        Engine::update(self, patterns)
    }

    fn match_bytes(&self, corpus: &[&[u8]]) -> Result<Vec<String>> {
        Engine::match_bytes(self, corpus)
    }

    fn match_strings(&self, corpus: &[&str]) -> Result<Vec<String>> {
        Engine::match_strings(self, corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::with_config(Config::default().with_threads(2)).unwrap()
    }

    #[test]
    fn test_example_flow() {
        let engine = engine();
        engine.update(&["abc", "d.f"]).unwrap();

        assert_eq!(engine.match_bytes(&[b"xxabcxx"]).unwrap(), vec!["abc"]);
        assert_eq!(engine.match_bytes(&[b"dxf"]).unwrap(), vec!["d.f"]);
        assert!(engine.match_bytes(&[b"zzz"]).unwrap().is_empty());
    }

    #[test]
    fn test_match_before_update() {
        let engine = engine();
        assert!(matches!(engine.match_bytes(&[b"abc"]), Err(Error::NotLoaded)));
        assert!(matches!(engine.match_strings(&["abc"]), Err(Error::NotLoaded)));
        assert!(!engine.is_loaded());
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn test_empty_update_keeps_database() {
        let engine = engine();
        let empty: [&str; 0] = [];
        assert!(matches!(engine.update(&empty), Err(Error::NoPatterns)));
        assert!(!engine.is_loaded());

        engine.update(&["abc"]).unwrap();
        assert!(matches!(engine.update(&empty), Err(Error::NoPatterns)));
        assert_eq!(engine.match_strings(&["abc"]).unwrap(), vec!["abc"]);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_bad_pattern_keeps_database() {
        let engine = engine();
        engine.update(&["abc"]).unwrap();

        let err = engine.update(&["xyz", "a(b"]).unwrap_err();
        match err {
            Error::Compile(e) => assert_eq!(e.pattern(), "a(b"),
            other => panic!("unexpected error: {}", other),
        }

        assert_eq!(engine.match_strings(&["abc"]).unwrap(), vec!["abc"]);
        assert!(engine.match_strings(&["xyz"]).unwrap().is_empty());
        assert_eq!(engine.pattern_count(), 1);
    }

    #[test]
    fn test_build_error_keeps_database() {
        let config = Config::default().with_threads(1).with_nfa_size_limit(Some(4096));
        let engine = Engine::with_config(config).unwrap();
        engine.update(&["abc"]).unwrap();

        assert!(matches!(engine.update(&["x{5000}"]), Err(Error::Build(_))));
        assert_eq!(engine.match_strings(&["abc"]).unwrap(), vec!["abc"]);
    }

    #[test]
    fn test_update_is_idempotent() {
        let engine = engine();
        let patterns = ["abc", "/hello/i", "[0-9]{3}"];
        let corpus = ["HeLLo 12", "3 abc"];

        engine.update(&patterns).unwrap();
        let first = engine.match_strings(&corpus).unwrap();
        engine.update(&patterns).unwrap();
        let second = engine.match_strings(&corpus).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, vec!["abc", "hello", "[0-9]{3}"]);
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn test_repeated_match_reported_once() {
        let engine = engine();
        engine.update(&["ab", "zz"]).unwrap();
        let result = engine.match_strings(&["abababab", "ab", "xab"]).unwrap();
        assert_eq!(result, vec!["ab"]);
    }

    #[test]
    fn test_ids_are_renumbered_on_update() {
        let engine = engine();
        engine.update(&["one", "two"]).unwrap();
        engine.update(&["two"]).unwrap();

        assert_eq!(engine.match_strings(&["two"]).unwrap(), vec!["two"]);
        assert_eq!(engine.patterns()[0].id(), 0);
        assert_eq!(engine.patterns()[0].expression(), "two");
    }

    #[test]
    fn test_empty_corpus_is_no_match() {
        let engine = engine();
        engine.update(&["abc"]).unwrap();
        let none: [&[u8]; 0] = [];
        assert!(engine.match_bytes(&none).unwrap().is_empty());
        let none: [&str; 0] = [];
        assert!(engine.match_strings(&none).unwrap().is_empty());
    }

    #[test]
    fn test_unicode_word_boundary_rejected() {
        let engine = engine();
        engine.update(&["abc"]).unwrap();

        assert!(matches!(engine.update(&["abc", "/\\bfoo\\b/W"]), Err(Error::Compile(_))));
        assert_eq!(engine.match_strings(&["abc é"]).unwrap(), vec!["abc"]);

        engine.update(&["abc", "/(?-u:\\b)foo(?-u:\\b)/W"]).unwrap();
        assert_eq!(engine.match_strings(&["abc é", " foo"]).unwrap(), vec!["abc", "(?-u:\\b)foo(?-u:\\b)"]);
    }

    #[test]
    fn test_large_unbounded_set_loads() {
        let patterns: Vec<String> = (0..300).map(|i| format!("a{}.*b{}", i, i)).collect();
        let engine = engine();
        engine.update(&patterns).unwrap();

        assert_eq!(engine.pattern_count(), 300);
        assert_eq!(engine.match_strings(&["xx a7 yy b7 zz"]).unwrap(), vec!["a7.*b7"]);
        assert_eq!(engine.match_strings(&["a12 b120", "x b12"]).unwrap(), vec!["a1.*b1", "a12.*b12"]);
    }

    #[test]
    fn test_match_batch() {
        let engine = engine();
        engine.update(&["abc", "d.f"]).unwrap();

        let corpora: Vec<Vec<&[u8]>> = vec![
            vec![&b"xxab"[..], &b"cxx"[..]],
            vec![&b"dxf"[..]],
            vec![],
        ];
        let results = engine.match_batch(&corpora).unwrap();
        assert_eq!(results, vec![vec!["abc".to_string()], vec!["d.f".to_string()], vec![]]);
    }

    #[test]
    fn test_trait_object() {
        let engine: Box<dyn Matcher> = Box::new(engine());
        engine.update(&["abc"]).unwrap();
        assert_eq!(engine.match_bytes(&[b"abc".as_slice()]).unwrap(), vec!["abc"]);
        assert_eq!(engine.match_strings(&["ab", "c"]).unwrap(), vec!["abc"]);
    }

    #[test]
    fn test_concurrent_matches_on_stable_database() {
        let engine = engine();
        engine.update(&["abc", "d.f"]).unwrap();

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..200 {
                        assert_eq!(engine.match_strings(&["xxabcxx"]).unwrap(), vec!["abc"]);
                        assert_eq!(engine.match_strings(&["d", "xf"]).unwrap(), vec!["d.f"]);
                    }
                });
            }
        });
    }

    #[test]
    fn test_concurrent_update_never_tears() {
        let engine = engine();
        let first = ["alpha", "beta"];
        let second = ["gamma", "delta"];
        engine.update(&first).unwrap();

        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..100 {
                    let patterns = if i % 2 == 0 { &second } else { &first };
                    engine.update(patterns).unwrap();
                }
            });

            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..500 {
                        // A database paired with the other list would report
                        // "gamma" or "beta" here.
                        let alpha = engine.match_strings(&["alpha"]).unwrap();
                        assert!(alpha.is_empty() || alpha == vec!["alpha"], "{:?}", alpha);

                        let delta = engine.match_strings(&["delta"]).unwrap();
                        assert!(delta.is_empty() || delta == vec!["delta"], "{:?}", delta);
                    }
                });
            }
        });

        assert_eq!(engine.generation(), 101);
    }

    #[test]
    fn test_completed_update_is_visible() {
        let engine = engine();

        for round in 0..50 {
            let pattern = format!("token{}", round);
            engine.update(&[pattern.as_str()]).unwrap();

            let seen = std::thread::scope(|s| {
                s.spawn(|| engine.match_strings(&[pattern.as_str()]).unwrap())
                    .join()
                    .unwrap()
            });
            assert_eq!(seen, vec![pattern]);
        }
    }
}
