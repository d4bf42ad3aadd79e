//! Runtime processor capability probe.

/// Whether the running processor (and OS) can execute the 256-bit
/// double-precision vector instructions used by the 16-wide kernel.
///
/// Has no side effects and is cheap enough to call once per frame. Reports
/// `false` on architectures without the probe.
pub fn supports_wide_vector() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        is_x86_feature_detected!("avx")
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_is_stable_across_calls() {
        let first = supports_wide_vector();
        for _ in 0..8 {
            assert_eq!(supports_wide_vector(), first);
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    #[test]
    fn unsupported_architectures_report_false() {
        assert!(!supports_wide_vector());
    }
}
