// Fri Oct 16 2026 - Alex

pub mod pattern;
pub mod compiler;
pub mod error;

pub use pattern::{Pattern, PatternFlags, PatternId};
pub use compiler::{CompiledPattern, PatternCompiler};
pub use error::CompileError;

/// Compiles `sources` with default settings.
pub fn compile_patterns<S: AsRef<str>>(sources: &[S]) -> Result<Vec<CompiledPattern>, CompileError> {
    PatternCompiler::new().compile(sources)
}
