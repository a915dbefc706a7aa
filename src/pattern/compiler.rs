// Fri Oct 16 2026 - Alex

use crate::pattern::{CompileError, Pattern, PatternFlags, PatternId};
use regex_syntax::hir::Hir;
use regex_syntax::ParserBuilder;

/// Turns raw signature strings into parsed, numbered patterns.
pub struct PatternCompiler {
    default_flags: PatternFlags,
}

impl PatternCompiler {
    pub fn new() -> Self {
        Self {
            default_flags: PatternFlags::empty(),
        }
    }

    pub fn with_default_flags(mut self, flags: PatternFlags) -> Self {
        self.default_flags = flags;
        self
    }

    /// Compiles a whole batch. Ids are assigned by position; the first
    /// failure aborts the batch and nothing is returned for it.
    pub fn compile<S: AsRef<str>>(&self, sources: &[S]) -> Result<Vec<CompiledPattern>, CompileError> {
        sources.iter()
            .enumerate()
            .map(|(id, source)| self.compile_one(id, source.as_ref()))
            .collect()
    }

    pub fn compile_one(&self, id: PatternId, source: &str) -> Result<CompiledPattern, CompileError> {
        let pattern = Pattern::parse_with_defaults(source, self.default_flags)?.with_id(id);
        let hir = self.translate(source, &pattern)?;

        Ok(CompiledPattern { pattern, hir })
    }

    fn translate(&self, source: &str, pattern: &Pattern) -> Result<Hir, CompileError> {
        let flags = pattern.flags();
        let unicode = flags.is_unicode();

        let hir = ParserBuilder::new()
            .case_insensitive(flags.contains(PatternFlags::CASELESS))
            .multi_line(flags.contains(PatternFlags::MULTILINE))
            .dot_matches_new_line(flags.contains(PatternFlags::DOTALL))
            .unicode(unicode)
            .utf8(unicode)
            .build()
            .parse(pattern.expression())
            .map_err(|e| CompileError::new(source, e.to_string()))?;

        if hir.properties().minimum_len() == Some(0) && !flags.contains(PatternFlags::ALLOWEMPTY) {
            return Err(CompileError::new(
                source,
                "pattern matches the empty buffer; add the V flag to allow it",
            ));
        }

        if hir.properties().look_set().contains_word_unicode() {
            return Err(CompileError::new(
                source,
                "Unicode word boundaries are not supported; use (?-u:\\b) for an ASCII boundary",
            ));
        }

        Ok(hir)
    }
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// A pattern together with the syntax tree the database is built from.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: Pattern,
    hir: Hir,
}

impl CompiledPattern {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn id(&self) -> PatternId {
        self.pattern.id()
    }

    pub fn hir(&self) -> &Hir {
        &self.hir
    }

    pub fn into_pattern(self) -> Pattern {
        self.pattern
    }
}
