// Fri Oct 16 2026 - Alex

use bitflags::bitflags;
use std::fmt;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CpuFeatures: u32 {
        const SSE2 = 1 << 0;
        const SSSE3 = 1 << 1;
        const AVX2 = 1 << 2;
        const AVX512BW = 1 << 3;
        const NEON = 1 << 4;
    }
}

/// Capabilities of the host a database is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    arch: &'static str,
    features: CpuFeatures,
}

impl Platform {
    /// Probes the executing CPU. Not cached: every build asks again.
    pub fn populate() -> Self {
        Self {
            arch: std::env::consts::ARCH,
            features: probe_features(),
        }
    }

    /// A platform with no vector unit, used to force scalar scanning.
    pub fn generic() -> Self {
        Self {
            arch: std::env::consts::ARCH,
            features: CpuFeatures::empty(),
        }
    }

    pub fn arch(&self) -> &'static str {
        self.arch
    }

    pub fn features(&self) -> CpuFeatures {
        self.features
    }

    pub fn has_vector_unit(&self) -> bool {
        !self.features.is_empty()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arch)?;

        let names: Vec<_> = self.features.iter_names().map(|(name, _)| name.to_lowercase()).collect();
        if names.is_empty() {
            write!(f, " (scalar)")
        } else {
            write!(f, " ({})", names.join(", "))
        }
    }
}

#[cfg(target_arch = "x86_64")]
fn probe_features() -> CpuFeatures {
    let mut features = CpuFeatures::empty();

    if is_x86_feature_detected!("sse2") {
        features |= CpuFeatures::SSE2;
    }
    if is_x86_feature_detected!("ssse3") {
        features |= CpuFeatures::SSSE3;
    }
    if is_x86_feature_detected!("avx2") {
        features |= CpuFeatures::AVX2;
    }
    if is_x86_feature_detected!("avx512bw") {
        features |= CpuFeatures::AVX512BW;
    }

    features
}

#[cfg(target_arch = "aarch64")]
fn probe_features() -> CpuFeatures {
    if std::arch::is_aarch64_feature_detected!("neon") {
        CpuFeatures::NEON
    } else {
        CpuFeatures::empty()
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn probe_features() -> CpuFeatures {
    CpuFeatures::empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_has_no_vector_unit() {
        let platform = Platform::generic();
        assert!(!platform.has_vector_unit());
        assert!(platform.to_string().ends_with("(scalar)"));
    }

    #[test]
    fn test_populate_is_stable_on_one_host() {
        assert_eq!(Platform::populate(), Platform::populate());
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_x86_64_always_has_sse2() {
        assert!(Platform::populate().features().contains(CpuFeatures::SSE2));
    }
}
