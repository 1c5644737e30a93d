//! The addressable skill index.
//!
//! [`SkillRegistry::build`] composes the directory scanner and manifest
//! parser into a name → record map. The registry is constructed once
//! before any request is served and is read-only afterwards; the lazy
//! body cache inside each record is the only mutable state, filled
//! at-most-once even under concurrent first access.
//!
//! One bad skill never aborts discovery of the others: per-skill
//! failures are collected as [`DiscoveryWarning`]s and the offending
//! directory is skipped. Only an unreadable root, a zero-skill root, or
//! (under [`DuplicatePolicy::Reject`]) a duplicate name is fatal.

use crate::manifest::{self, MAX_MANIFEST_SIZE};
use crate::scanner;
use agentskills_core::{
    DuplicatePolicy, Error, LayoutKind, Result, SkillName, SkillsConfig, sanitize_path,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A non-fatal problem recorded while building the registry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DiscoveryWarning {
    /// A manifest existed but failed to parse; the skill was skipped.
    #[error("malformed manifest at {path}: {reason}")]
    MalformedManifest {
        /// Manifest location (home dir sanitized)
        path: String,
        /// Parse failure detail
        reason: String,
    },

    /// A second directory claimed an already-registered name.
    #[error("duplicate skill name '{name}': kept {kept}, skipped {skipped}")]
    DuplicateName {
        /// The contested name
        name: String,
        /// Directory of the first-registered skill
        kept: String,
        /// Directory that was skipped
        skipped: String,
    },

    /// The manifest or directory produced an unusable skill name.
    #[error("invalid skill name at {path}: {reason}")]
    InvalidName {
        /// Skill directory (home dir sanitized)
        path: String,
        /// Why the name was rejected
        reason: String,
    },

    /// A skill directory could not be read at registration time.
    #[error("unreadable skill directory {path}: {reason}")]
    UnreadableDirectory {
        /// Skill directory (home dir sanitized)
        path: String,
        /// Underlying OS error text
        reason: String,
    },
}

/// One registered skill.
///
/// Records are immutable after registration except for the lazily filled
/// body cache, and live exactly as long as the registry that owns them.
#[derive(Debug)]
pub struct SkillRecord {
    name: SkillName,
    description: String,
    root: PathBuf,
    manifest_path: PathBuf,
    layout: LayoutKind,
    body: OnceCell<Arc<str>>,
}

impl SkillRecord {
    /// The skill's unique name.
    #[must_use]
    pub fn name(&self) -> &SkillName {
        &self.name
    }

    /// Short human-readable summary from the manifest.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Canonical root directory owned by this skill.
    ///
    /// All reference-file and script access resolves relative to it.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// How the skill was found during discovery (informational).
    #[must_use]
    pub const fn layout(&self) -> LayoutKind {
        self.layout
    }

    /// Full instructional body of the skill.
    ///
    /// Loaded from the manifest on first access and cached for the
    /// registry's lifetime; the underlying file is read at most once
    /// even when several callers hit an unloaded record concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the manifest has become unreadable since
    /// discovery. A failed fill is not cached, so a later call retries.
    pub async fn body(&self) -> Result<Arc<str>> {
        self.body
            .get_or_try_init(|| async {
                let content = tokio::fs::read_to_string(&self.manifest_path)
                    .await
                    .map_err(|e| Error::Io {
                        context: format!(
                            "reading skill body from {}",
                            sanitize_path(&self.manifest_path)
                        ),
                        source: e,
                    })?;
                tracing::debug!(skill = %self.name, "loaded skill body");
                Ok(Arc::from(manifest::strip_frontmatter(&content)))
            })
            .await
            .cloned()
    }
}

/// A `(name, description)` pair for the metadata listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkillMetadata {
    /// Unique skill name
    pub name: String,

    /// Short summary from the manifest
    pub description: String,
}

/// Name → skill record index, built once at startup.
#[derive(Debug)]
pub struct SkillRegistry {
    skills: BTreeMap<SkillName, Arc<SkillRecord>>,
    warnings: Vec<DiscoveryWarning>,
}

impl SkillRegistry {
    /// Scan the configured root and register every valid skill.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the root is inaccessible,
    /// when zero valid skills are found (progressive disclosure with no
    /// skills is meaningless), or when a duplicate name is encountered
    /// under [`DuplicatePolicy::Reject`].
    pub fn build(config: &SkillsConfig) -> Result<Self> {
        let root = fs::canonicalize(config.root()).map_err(|e| Error::ConfigError {
            message: format!(
                "skill root {} is not accessible: {e}",
                sanitize_path(config.root())
            ),
        })?;

        let candidates = scanner::scan(&root)?;
        let mut skills: BTreeMap<SkillName, Arc<SkillRecord>> = BTreeMap::new();
        let mut warnings = Vec::new();

        for candidate in candidates {
            match register(&candidate, config.duplicate_policy(), &skills)? {
                Registration::Skill(record) => {
                    tracing::info!(
                        skill = %record.name,
                        layout = %record.layout,
                        "registered skill"
                    );
                    skills.insert(record.name.clone(), Arc::new(record));
                }
                Registration::Skipped(warning) => {
                    tracing::warn!("{warning}");
                    warnings.push(warning);
                }
            }
        }

        if skills.is_empty() {
            return Err(Error::ConfigError {
                message: format!("no valid skills found under {}", sanitize_path(&root)),
            });
        }

        tracing::info!(
            skills = skills.len(),
            warnings = warnings.len(),
            "skill registry built"
        );
        Ok(Self { skills, warnings })
    }

    /// Ordered `(name, description)` pairs for the metadata operation.
    ///
    /// Order is lexicographic by name and stable across calls.
    #[must_use]
    pub fn list_metadata(&self) -> Vec<SkillMetadata> {
        self.skills
            .values()
            .map(|record| SkillMetadata {
                name: record.name.as_str().to_string(),
                description: record.description.clone(),
            })
            .collect()
    }

    /// Exact, case-sensitive lookup by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SkillNotFound`] for unknown names. No fuzzy
    /// matching: callers are expected to use a name previously obtained
    /// from [`Self::list_metadata`].
    pub fn get(&self, name: &str) -> Result<&Arc<SkillRecord>> {
        let key = SkillName::new(name).map_err(|_| Error::SkillNotFound {
            name: name.to_string(),
        })?;
        self.skills.get(&key).ok_or_else(|| Error::SkillNotFound {
            name: name.to_string(),
        })
    }

    /// Non-fatal problems recorded during construction.
    #[must_use]
    pub fn warnings(&self) -> &[DiscoveryWarning] {
        &self.warnings
    }

    /// Number of registered skills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Returns `true` if no skills are registered.
    ///
    /// Never observed through the public API: `build` fails instead of
    /// producing an empty registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[derive(Debug)]
enum Registration {
    Skill(SkillRecord),
    Skipped(DiscoveryWarning),
}

fn register(
    candidate: &scanner::CandidateSkill,
    policy: DuplicatePolicy,
    registered: &BTreeMap<SkillName, Arc<SkillRecord>>,
) -> Result<Registration> {
    let manifest_path = &candidate.manifest_path;

    let oversize = fs::metadata(manifest_path)
        .map(|m| m.len() > MAX_MANIFEST_SIZE)
        .unwrap_or(false);
    if oversize {
        return Ok(Registration::Skipped(DiscoveryWarning::MalformedManifest {
            path: sanitize_path(manifest_path),
            reason: format!("manifest exceeds {MAX_MANIFEST_SIZE} bytes"),
        }));
    }

    let content = match fs::read_to_string(manifest_path) {
        Ok(content) => content,
        Err(e) => {
            return Ok(Registration::Skipped(DiscoveryWarning::UnreadableDirectory {
                path: sanitize_path(&candidate.dir),
                reason: e.to_string(),
            }));
        }
    };

    let parsed = match manifest::parse_manifest(&content, manifest_path) {
        Ok(parsed) => parsed,
        Err(Error::MalformedManifest { path, reason }) => {
            return Ok(Registration::Skipped(DiscoveryWarning::MalformedManifest {
                path,
                reason,
            }));
        }
        Err(other) => return Err(other),
    };

    // Manifest name wins; the directory name is the fallback.
    let raw_name = parsed.name.unwrap_or_else(|| {
        candidate
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let name = match SkillName::new(raw_name) {
        Ok(name) => name,
        Err(e) => {
            return Ok(Registration::Skipped(DiscoveryWarning::InvalidName {
                path: sanitize_path(&candidate.dir),
                reason: e.to_string(),
            }));
        }
    };

    if let Some(existing) = registered.get(&name) {
        let warning = DiscoveryWarning::DuplicateName {
            name: name.as_str().to_string(),
            kept: sanitize_path(&existing.root),
            skipped: sanitize_path(&candidate.dir),
        };
        return match policy {
            DuplicatePolicy::FirstWins => Ok(Registration::Skipped(warning)),
            DuplicatePolicy::Reject => Err(Error::ConfigError {
                message: warning.to_string(),
            }),
        };
    }

    let root = match fs::canonicalize(&candidate.dir) {
        Ok(root) => root,
        Err(e) => {
            return Ok(Registration::Skipped(DiscoveryWarning::UnreadableDirectory {
                path: sanitize_path(&candidate.dir),
                reason: e.to_string(),
            }));
        }
    };

    let manifest_path = root.join(manifest::MANIFEST_FILE_NAME);
    Ok(Registration::Skill(SkillRecord {
        name,
        description: parsed.description,
        root,
        manifest_path,
        layout: candidate.layout,
        body: OnceCell::new(),
    }))
}
