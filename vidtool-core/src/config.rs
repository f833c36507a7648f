// ============================================================================
// vidtool-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: External Toolchain Resolution
//
// vidtool never looks ffmpeg or ffprobe up on its own while running an
// operation. The consumer resolves a `Toolchain` once (usually from PATH, or
// from explicit paths passed on the command line) and hands it to every
// `MediaFile`. Tests build a `Toolchain` pointing at stand-in scripts.
//
// KEY COMPONENTS:
// - Toolchain: resolved encoder/prober executable paths
// - ToolchainReport: per-tool availability, used for the startup check

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Executable name of the encoder.
pub const FFMPEG: &str = "ffmpeg";

/// Executable name of the prober.
pub const FFPROBE: &str = "ffprobe";

/// Resolved paths of the external tools vidtool drives.
///
/// # Examples
///
/// ```rust
/// use vidtool_core::Toolchain;
///
/// let toolchain = Toolchain::new("/usr/bin/ffmpeg", "/usr/bin/ffprobe");
/// assert_eq!(toolchain.ffprobe().to_str(), Some("/usr/bin/ffprobe"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

/// Availability of a single tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub name: &'static str,
    /// Where the tool was found, `None` if it was not.
    pub path: Option<PathBuf>,
}

/// Outcome of looking up both tools, without failing on a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainReport {
    pub ffmpeg: ToolStatus,
    pub ffprobe: ToolStatus,
}

impl ToolchainReport {
    pub fn all_found(&self) -> bool {
        self.ffmpeg.path.is_some() && self.ffprobe.path.is_some()
    }

    /// Names of the tools that could not be found.
    pub fn missing(&self) -> Vec<&'static str> {
        [&self.ffmpeg, &self.ffprobe]
            .into_iter()
            .filter(|status| status.path.is_none())
            .map(|status| status.name)
            .collect()
    }

    /// Converts the report into a usable toolchain, failing with
    /// `DependencyNotFound` for the first missing tool.
    pub fn into_toolchain(self) -> CoreResult<Toolchain> {
        let ffmpeg = self
            .ffmpeg
            .path
            .ok_or_else(|| CoreError::DependencyNotFound(FFMPEG.to_string()))?;
        let ffprobe = self
            .ffprobe
            .path
            .ok_or_else(|| CoreError::DependencyNotFound(FFPROBE.to_string()))?;
        Ok(Toolchain { ffmpeg, ffprobe })
    }
}

impl Toolchain {
    /// Uses the given paths as-is, without checking that they exist.
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// Looks both tools up on PATH.
    pub fn from_path() -> CoreResult<Self> {
        Self::resolve(None, None)
    }

    /// Resolves both tools, preferring the configured paths over a PATH lookup.
    pub fn resolve(ffmpeg: Option<&Path>, ffprobe: Option<&Path>) -> CoreResult<Self> {
        Self::check(ffmpeg, ffprobe).into_toolchain()
    }

    /// Like [`Toolchain::resolve`] but reports every miss instead of failing.
    pub fn check(ffmpeg: Option<&Path>, ffprobe: Option<&Path>) -> ToolchainReport {
        ToolchainReport {
            ffmpeg: ToolStatus {
                name: FFMPEG,
                path: locate_tool(FFMPEG, ffmpeg),
            },
            ffprobe: ToolStatus {
                name: FFPROBE,
                path: locate_tool(FFPROBE, ffprobe),
            },
        }
    }

    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    pub fn ffprobe(&self) -> &Path {
        &self.ffprobe
    }

    /// Confirms the encoder is still reachable before a command is built for it.
    pub fn require_ffmpeg(&self) -> CoreResult<&Path> {
        if is_executable_available(&self.ffmpeg) {
            Ok(&self.ffmpeg)
        } else {
            log::warn!("ffmpeg not found at {}", self.ffmpeg.display());
            Err(CoreError::DependencyNotFound(FFMPEG.to_string()))
        }
    }
}

/// Finds `name`, trying `configured` first and falling back to PATH.
fn locate_tool(name: &str, configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if is_executable_available(path) {
            log::debug!("Using configured {}: {}", name, path.display());
            return Some(path.to_path_buf());
        }
        log::warn!(
            "Configured {} path '{}' not found, searching PATH",
            name,
            path.display()
        );
    }

    match which::which(name) {
        Ok(path) => {
            log::debug!("Found {} on PATH: {}", name, path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("{} not found on PATH: {}", name, e);
            None
        }
    }
}

/// A bare program name is searched on PATH, anything with a directory
/// component has to exist as a file.
fn is_executable_available(path: &Path) -> bool {
    if path.components().count() > 1 {
        path.is_file()
    } else {
        which::which(path).is_ok()
    }
}
