// Fri Oct 16 2026 - Alex

use crate::pattern::CompileError;
use bitflags::bitflags;
use std::fmt;

/// Position of a pattern inside the batch it was compiled with.
///
/// Identifiers are dense (`0..N`) and only meaningful for the database built
/// from that batch. A later `update` renumbers everything, so callers must
/// never keep an id across updates.
pub type PatternId = usize;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PatternFlags: u32 {
        const CASELESS = 1 << 0;
        const MULTILINE = 1 << 1;
        const DOTALL = 1 << 2;
        const SINGLEMATCH = 1 << 3;
        const ALLOWEMPTY = 1 << 4;
        const UTF8 = 1 << 5;
        const UCP = 1 << 6;
    }
}

const FLAG_CHARS: [(char, PatternFlags); 7] = [
    ('i', PatternFlags::CASELESS),
    ('m', PatternFlags::MULTILINE),
    ('s', PatternFlags::DOTALL),
    ('H', PatternFlags::SINGLEMATCH),
    ('V', PatternFlags::ALLOWEMPTY),
    ('8', PatternFlags::UTF8),
    ('W', PatternFlags::UCP),
];

impl PatternFlags {
    /// Parses a flag string such as `"is"`. Returns the first unknown flag
    /// character on failure.
    pub fn parse(flags: &str) -> Result<Self, char> {
        let mut parsed = PatternFlags::empty();

        for c in flags.chars() {
            let (_, flag) = FLAG_CHARS.iter()
                .find(|(ch, _)| *ch == c)
                .ok_or(c)?;
            parsed |= *flag;
        }

        Ok(parsed)
    }

    pub fn is_unicode(&self) -> bool {
        self.intersects(PatternFlags::UTF8 | PatternFlags::UCP)
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (c, flag) in FLAG_CHARS.iter() {
            if self.contains(*flag) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// A signature expression with its batch-scoped identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    id: PatternId,
    expression: String,
    flags: PatternFlags,
}

impl Pattern {
    pub fn new(expression: &str, flags: PatternFlags) -> Self {
        Self {
            id: 0,
            expression: expression.to_string(),
            flags,
        }
    }

    /// Parses `expr`, `/expr/flags` or `id:/expr/flags`.
    ///
    /// An `id:` prefix is accepted for compatibility with signature files that
    /// carry one, but the compiler always renumbers by batch position.
    pub fn parse(source: &str) -> Result<Self, CompileError> {
        Self::parse_with_defaults(source, PatternFlags::empty())
    }

    /// Like [`Pattern::parse`], with `defaults` applied to bare expressions.
    pub fn parse_with_defaults(source: &str, defaults: PatternFlags) -> Result<Self, CompileError> {
        let mut rest = source;

        if let Some(colon) = rest.find(":/") {
            let prefix = &rest[..colon];
            let delimited = rest.rfind('/').is_some_and(|slash| slash > colon + 1);

            if colon > 0 && delimited && prefix.bytes().all(|b| b.is_ascii_digit()) {
                prefix.parse::<u32>()
                    .map_err(|e| CompileError::new(source, format!("invalid pattern id `{}`: {}", prefix, e)))?;
                rest = &rest[colon + 1..];
            }
        }

        if rest.starts_with('/') {
            if let Some(end) = rest.rfind('/').filter(|&end| end > 0) {
                let flags = PatternFlags::parse(&rest[end + 1..])
                    .map_err(|c| CompileError::new(source, format!("unsupported flag `{}`", c)))?;
                return Ok(Self::new(&rest[1..end], flags));
            }
        }

        Ok(Self::new(rest, defaults))
    }

    pub fn with_id(mut self, id: PatternId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> PatternId {
        self.id
    }

    /// Expression text without delimiters or flags; this is what scans report.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flags.is_empty() {
            write!(f, "{}", self.expression)
        } else {
            write!(f, "/{}/{}", self.expression, self.flags)
        }
    }
}
