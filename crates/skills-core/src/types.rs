//! Strong domain types for the AgentSkills server.
//!
//! This module implements the newtype pattern to provide type safety for
//! domain primitives. A [`SkillName`] is validated at construction so
//! that a name can never smuggle a path separator or hidden-file prefix
//! into filesystem lookups.
//!
//! # Examples
//!
//! ```
//! use agentskills_core::SkillName;
//!
//! let name = SkillName::new("pdf").unwrap();
//! assert_eq!(name.as_str(), "pdf");
//!
//! // Path separators are rejected outright
//! assert!(SkillName::new("../etc").is_err());
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum accepted length of a skill name, in bytes.
pub const MAX_SKILL_NAME_LEN: usize = 128;

/// Validated skill identifier (newtype over String).
///
/// Names come from manifest frontmatter (or the containing directory
/// when the manifest omits one) and are used as map keys and in log
/// lines. Validation rejects anything that could double as a path
/// component trick: separators, parent-dir segments, leading dots,
/// control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillName(String);

impl SkillName {
    /// Creates a validated skill name.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the name is empty, too long,
    /// starts with a dot, or contains a path separator, NUL byte, or
    /// control character.
    ///
    /// # Examples
    ///
    /// ```
    /// use agentskills_core::SkillName;
    ///
    /// assert!(SkillName::new("pdf-tools").is_ok());
    /// assert!(SkillName::new("").is_err());
    /// assert!(SkillName::new(".hidden").is_err());
    /// assert!(SkillName::new("a/b").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let name = name.trim();

        if name.is_empty() {
            return Err(invalid("skill name is empty"));
        }
        if name.len() > MAX_SKILL_NAME_LEN {
            return Err(invalid(&format!(
                "skill name exceeds {MAX_SKILL_NAME_LEN} bytes"
            )));
        }
        if name.starts_with('.') {
            return Err(invalid("skill name may not start with a dot"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("skill name may not contain a path separator"));
        }
        if name.chars().any(char::is_control) {
            return Err(invalid("skill name may not contain control characters"));
        }

        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `SkillName` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn invalid(reason: &str) -> Error {
    Error::ConfigError {
        message: reason.to_string(),
    }
}

/// How a skill was found during discovery.
///
/// Informational only: once registered, every skill behaves identically
/// regardless of where it sat in the directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// The skill is an immediate child of the skill root.
    Flat,
    /// The skill sits one level down, under a category directory.
    Nested,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Nested => write!(f, "nested"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_name_accepts_valid() {
        let valid = ["pdf", "pdf-tools", "web_search", "Skill123", "数据分析"];
        for name in valid {
            assert!(SkillName::new(name).is_ok(), "'{name}' should be accepted");
        }
    }

    #[test]
    fn test_skill_name_trims_whitespace() {
        let name = SkillName::new("  pdf  ").unwrap();
        assert_eq!(name.as_str(), "pdf");
    }

    #[test]
    fn test_skill_name_rejects_empty_and_whitespace() {
        for name in ["", "   ", "\t", "\n"] {
            assert!(SkillName::new(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_skill_name_rejects_separators() {
        for name in ["a/b", "a\\b", "../etc", "..\\etc", "/root"] {
            let result = SkillName::new(name);
            assert!(result.is_err(), "'{name}' should be rejected");
        }
    }

    #[test]
    fn test_skill_name_rejects_hidden() {
        for name in [".hidden", "..", ".git"] {
            assert!(SkillName::new(name).is_err(), "'{name}' should be rejected");
        }
    }

    #[test]
    fn test_skill_name_rejects_control_chars() {
        for name in ["a\0b", "a\nb", "a\rb"] {
            assert!(SkillName::new(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_skill_name_rejects_too_long() {
        let too_long = "a".repeat(MAX_SKILL_NAME_LEN + 1);
        assert!(SkillName::new(&too_long).is_err());

        let max = "a".repeat(MAX_SKILL_NAME_LEN);
        assert!(SkillName::new(&max).is_ok());
    }

    #[test]
    fn test_skill_name_case_sensitive() {
        let lower = SkillName::new("pdf").unwrap();
        let upper = SkillName::new("PDF").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_skill_name_serde_transparent() {
        let name = SkillName::new("pdf").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"pdf\"");
    }

    #[test]
    fn test_layout_kind_display() {
        assert_eq!(LayoutKind::Flat.to_string(), "flat");
        assert_eq!(LayoutKind::Nested.to_string(), "nested");
    }

    #[test]
    fn test_skill_name_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<SkillName>();
        assert_sync::<SkillName>();
    }
}
