// Fri Oct 16 2026 - Alex

pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod input;
pub mod pattern;
pub mod utils;

pub use config::Config;
pub use database::{DatabaseBuilder, Platform, VectoredDatabase};
pub use engine::{Engine, Matcher};
pub use error::{Error, Result};
pub use pattern::{Pattern, PatternCompiler, PatternFlags, PatternId};
