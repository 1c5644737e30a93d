//! Error types for the AgentSkills server.
//!
//! This module provides the full error taxonomy shared by every crate in
//! the workspace. Per-skill failures (a malformed manifest, a missing
//! reference file) are ordinary values the caller can reason about; only
//! a root-level configuration failure is allowed to stop the server.
//!
//! # Examples
//!
//! ```
//! use agentskills_core::{Error, Result};
//!
//! fn check_root(path: &str) -> Result<()> {
//!     if path.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "skill root path cannot be empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_root("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::Path;
use thiserror::Error;

/// Main error type for the AgentSkills server.
///
/// All errors in the system use this type, providing consistent error
/// handling across all crates in the workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Fatal configuration error.
    ///
    /// Raised when the skill root is unreadable or yields zero valid
    /// skills. This is the only error allowed to prevent startup.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// A skill manifest failed to parse.
    ///
    /// Recorded per-skill during discovery; the offending skill is
    /// excluded from the registry and every other skill still loads.
    #[error("Malformed manifest at {path}: {reason}")]
    MalformedManifest {
        /// Path of the manifest that failed to parse (home dir sanitized)
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// Unknown skill name.
    ///
    /// The caller supplied a name that is not present in the registry.
    /// Names are matched exactly and case-sensitively.
    #[error("No such skill: '{name}'")]
    SkillNotFound {
        /// The name that was looked up
        name: String,
    },

    /// A reference file or script does not exist inside the skill.
    ///
    /// The path resolved safely within the skill root but nothing is
    /// there. Distinct from [`Error::PathTraversal`] by contract: an
    /// in-root miss is never reported as a traversal.
    #[error("File '{path}' not found in skill '{skill}'")]
    FileNotFound {
        /// The skill the lookup was scoped to
        skill: String,
        /// The relative path the caller asked for
        path: String,
    },

    /// A caller-supplied path escapes the skill's root directory.
    ///
    /// Always an explicit refusal, never silently clamped. Logged as a
    /// potential security event at the point of detection.
    #[error("Refused: path '{path}' escapes skill '{skill}'")]
    PathTraversal {
        /// The skill the access was scoped to
        skill: String,
        /// The offending caller-supplied path
        path: String,
    },

    /// OS-level failure reading a reference file.
    #[error("I/O error while {context}")]
    Io {
        /// What the server was doing when the failure occurred
        context: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// A bundled script could not be started.
    ///
    /// Covers a missing executable bit, an absent interpreter, or any
    /// other spawn-time failure. A script that starts and exits non-zero
    /// is *not* this error; the exit code is reported as data.
    #[error("Failed to start script '{script}'")]
    SpawnFailed {
        /// Script path relative to the skill root
        script: String,
        /// Underlying OS error from the spawn attempt
        #[source]
        source: std::io::Error,
    },

    /// A bundled script exceeded its wall-clock time budget.
    ///
    /// The child process (and its process group on Unix) is terminated
    /// before this error is returned.
    #[error("Script '{script}' timed out after {timeout_secs}s")]
    ScriptTimeout {
        /// Script path relative to the skill root
        script: String,
        /// The budget that was exceeded, in seconds
        timeout_secs: u64,
    },
}

impl Error {
    /// Returns `true` if this is a fatal configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a per-skill manifest parse failure.
    #[must_use]
    pub const fn is_malformed_manifest(&self) -> bool {
        matches!(self, Self::MalformedManifest { .. })
    }

    /// Returns `true` if this is a missing skill or missing file.
    ///
    /// # Examples
    ///
    /// ```
    /// use agentskills_core::Error;
    ///
    /// let err = Error::SkillNotFound { name: "pdf".to_string() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SkillNotFound { .. } | Self::FileNotFound { .. })
    }

    /// Returns `true` if this is a path-traversal refusal.
    ///
    /// # Examples
    ///
    /// ```
    /// use agentskills_core::Error;
    ///
    /// let err = Error::PathTraversal {
    ///     skill: "pdf".to_string(),
    ///     path: "../../etc/passwd".to_string(),
    /// };
    /// assert!(err.is_traversal());
    /// assert!(!err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_traversal(&self) -> bool {
        matches!(self, Self::PathTraversal { .. })
    }

    /// Returns `true` if this is an OS-level I/O failure.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` if a script failed to even start.
    #[must_use]
    pub const fn is_spawn_failed(&self) -> bool {
        matches!(self, Self::SpawnFailed { .. })
    }

    /// Returns `true` if a script exceeded its time budget.
    ///
    /// # Examples
    ///
    /// ```
    /// use agentskills_core::Error;
    ///
    /// let err = Error::ScriptTimeout {
    ///     script: "scripts/extract.sh".to_string(),
    ///     timeout_secs: 30,
    /// };
    /// assert!(err.is_timeout());
    /// ```
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::ScriptTimeout { .. })
    }
}

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Sanitize a filesystem path for error messages.
///
/// Replaces the home directory with `~` to avoid leaking usernames and
/// full filesystem paths to the calling agent.
#[must_use]
pub fn sanitize_path(path: &Path) -> String {
    dirs::home_dir().map_or_else(
        || path.display().to_string(),
        |home| {
            let path_str = path.display().to_string();
            path_str.replace(&home.display().to_string(), "~")
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_detection() {
        let err = Error::ConfigError {
            message: "no skills found".to_string(),
        };
        assert!(err.is_config_error());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_malformed_manifest_detection() {
        let err = Error::MalformedManifest {
            path: "~/skills/bad/SKILL.md".to_string(),
            reason: "missing description".to_string(),
        };
        assert!(err.is_malformed_manifest());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_not_found_covers_skill_and_file() {
        let skill = Error::SkillNotFound {
            name: "missing".to_string(),
        };
        let file = Error::FileNotFound {
            skill: "pdf".to_string(),
            path: "reference.md".to_string(),
        };
        assert!(skill.is_not_found());
        assert!(file.is_not_found());
    }

    #[test]
    fn test_traversal_is_not_a_miss() {
        let err = Error::PathTraversal {
            skill: "pdf".to_string(),
            path: "../../etc/passwd".to_string(),
        };
        assert!(err.is_traversal());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_timeout_detection() {
        let err = Error::ScriptTimeout {
            script: "scripts/slow.sh".to_string(),
            timeout_secs: 1,
        };
        assert!(err.is_timeout());
        assert!(!err.is_spawn_failed());
    }

    #[test]
    fn test_spawn_failed_carries_source() {
        let err = Error::SpawnFailed {
            script: "scripts/none.sh".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.is_spawn_failed());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_display() {
        let err = Error::PathTraversal {
            skill: "pdf".to_string(),
            path: "../secret".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("Refused"));
        assert!(display.contains("pdf"));
    }

    #[test]
    fn test_sanitize_path_replaces_home() {
        if let Some(home) = dirs::home_dir() {
            let inside = home.join("skills").join("pdf");
            let sanitized = sanitize_path(&inside);
            assert!(sanitized.starts_with('~'), "got: {sanitized}");
        }
    }
}
