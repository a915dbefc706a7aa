// Fri Oct 16 2026 - Alex

mod accel;
pub mod builder;
pub mod error;
pub mod platform;
pub mod vectored;

pub use builder::DatabaseBuilder;
pub use error::{BuildError, ScanError};
pub use platform::{CpuFeatures, Platform};
pub use vectored::{DatabaseInfo, MatchHit, Matching, ScanStatus, VectoredDatabase};

