//! Host platform capability check.

/// Whether certificate generation is available on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformSupport {
    Supported,
    /// Generation is unavailable; `os` names the host for diagnostics.
    Unsupported { os: &'static str },
}

impl PlatformSupport {
    /// Evaluate the compiled target. macOS is the only supported platform.
    pub fn detect() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(target_os = "macos")] {
                Self::Supported
            } else {
                Self::Unsupported { os: std::env::consts::OS }
            }
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_matches_target_os() {
        let support = PlatformSupport::detect();
        if cfg!(target_os = "macos") {
            assert_eq!(support, PlatformSupport::Supported);
        } else {
            assert_eq!(
                support,
                PlatformSupport::Unsupported {
                    os: std::env::consts::OS
                }
            );
            assert!(!support.is_supported());
        }
    }
}
