//! Server configuration for the skill engine.
//!
//! The only required setting is the skill root directory; everything
//! else (script timeout, bounded-read cap, duplicate-name policy) has a
//! default. Transport selection and process startup live in the server
//! binary, outside this core.
//!
//! # Examples
//!
//! ```
//! use agentskills_core::SkillsConfig;
//! use std::time::Duration;
//!
//! let config = SkillsConfig::builder("/srv/skills")
//!     .script_timeout(Duration::from_secs(10))
//!     .build();
//!
//! assert_eq!(config.script_timeout(), Duration::from_secs(10));
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default wall-clock budget for bundled script execution.
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on a single reference-file read, in bytes (1 MiB).
pub const DEFAULT_MAX_READ_BYTES: u64 = 1024 * 1024;

/// What to do when two skill directories claim the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the first-registered skill, log and skip the duplicate.
    #[default]
    FirstWins,
    /// Treat a duplicate name as a fatal configuration error.
    Reject,
}

/// Configuration consumed by the skill discovery and access engine.
#[derive(Debug, Clone)]
pub struct SkillsConfig {
    root: PathBuf,
    script_timeout: Duration,
    max_read_bytes: u64,
    duplicate_policy: DuplicatePolicy,
}

impl SkillsConfig {
    /// Starts building a configuration rooted at `root`.
    #[must_use]
    pub fn builder(root: impl Into<PathBuf>) -> SkillsConfigBuilder {
        SkillsConfigBuilder {
            root: root.into(),
            script_timeout: DEFAULT_SCRIPT_TIMEOUT,
            max_read_bytes: DEFAULT_MAX_READ_BYTES,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    /// The skill root directory all discovery starts from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Wall-clock budget applied to each script invocation.
    #[must_use]
    pub const fn script_timeout(&self) -> Duration {
        self.script_timeout
    }

    /// Upper bound on a single reference-file read.
    #[must_use]
    pub const fn max_read_bytes(&self) -> u64 {
        self.max_read_bytes
    }

    /// Duplicate-name handling during registry construction.
    #[must_use]
    pub const fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }
}

/// Builder for [`SkillsConfig`].
#[derive(Debug)]
pub struct SkillsConfigBuilder {
    root: PathBuf,
    script_timeout: Duration,
    max_read_bytes: u64,
    duplicate_policy: DuplicatePolicy,
}

impl SkillsConfigBuilder {
    /// Overrides the per-invocation script timeout.
    #[must_use]
    pub const fn script_timeout(mut self, timeout: Duration) -> Self {
        self.script_timeout = timeout;
        self
    }

    /// Overrides the reference-file read cap.
    #[must_use]
    pub const fn max_read_bytes(mut self, bytes: u64) -> Self {
        self.max_read_bytes = bytes;
        self
    }

    /// Overrides the duplicate-name policy.
    #[must_use]
    pub const fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Finalizes the configuration.
    #[must_use]
    pub fn build(self) -> SkillsConfig {
        SkillsConfig {
            root: self.root,
            script_timeout: self.script_timeout,
            max_read_bytes: self.max_read_bytes,
            duplicate_policy: self.duplicate_policy,
        }
    }
}
