// Fri Oct 16 2026 - Alex

pub mod core;
pub mod buffer;
pub mod collector;
pub mod matcher;

pub use self::core::Engine;
pub use buffer::to_views;
pub use collector::{collect, MatchCollector};
pub use matcher::Matcher;
