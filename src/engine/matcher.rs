// Fri Oct 16 2026 - Alex

use crate::error::Result;

/// Object-safe surface of a hot-swappable signature matcher.
pub trait Matcher: Send + Sync {
    /// Rebuilds the pattern database. All-or-nothing.
    fn update(&self, patterns: &[&str]) -> Result<()>;

    /// Scans a vectored byte corpus and returns the matched expressions.
    fn match_bytes(&self, corpus: &[&[u8]]) -> Result<Vec<String>>;

    /// Same as [`Matcher::match_bytes`] over text fragments.
    fn match_strings(&self, corpus: &[&str]) -> Result<Vec<String>>;
}
