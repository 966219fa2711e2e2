//! Host operating system detection.
use std::fmt;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// macOS, the desktop platform the launcher templates target.
    MacOs,
    /// Linux and other Unix-like systems.
    Linux,
    /// Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS (used to simulate other hosts).
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this is the recognised desktop platform (macOS).
    #[must_use]
    pub fn is_desktop(&self) -> bool {
        self.os == Os::MacOs
    }

    /// Whether this is Windows.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    /// Default `git` binary for this platform.
    #[must_use]
    pub fn default_git(&self) -> &'static str {
        if self.is_windows() {
            "C:\\Git\\bin\\git"
        } else {
            "git"
        }
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "macos") {
            Os::MacOs
        } else if cfg!(target_os = "windows") {
            Os::Windows
        } else {
            // Other Unix-like systems behave like Linux here
            Os::Linux
        }
    }
}
