//! Skill directory discovery.
//!
//! Walks the configured skill root and yields every directory that
//! directly contains a `SKILL.md` manifest. Both supported layouts are
//! detected from the tree itself, with no configuration:
//!
//! - **flat**: each immediate child of the root is a skill
//! - **nested**: skills sit one level down, under category directories
//!
//! The scanner never looks deeper than two levels; deeper nesting is a
//! bundle-authoring error, not something to silently flatten.

use crate::manifest::MANIFEST_FILE_NAME;
use agentskills_core::{Error, LayoutKind, Result, sanitize_path};
use std::fs;
use std::path::{Path, PathBuf};

/// A directory identified as a skill by the presence of a manifest.
#[derive(Debug, Clone)]
pub struct CandidateSkill {
    /// The skill's root directory.
    pub dir: PathBuf,

    /// Location of the `SKILL.md` inside it.
    pub manifest_path: PathBuf,

    /// Where in the tree the skill was found.
    pub layout: LayoutKind,
}

/// Scan `root` for candidate skill directories.
///
/// Candidates are returned sorted lexicographically by path so that
/// registration order is reproducible across runs. Directories that are
/// neither skills nor categories are ignored; an unreadable subdirectory
/// is logged and skipped.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] only when the root itself cannot be
/// read.
pub fn scan(root: &Path) -> Result<Vec<CandidateSkill>> {
    let entries = fs::read_dir(root).map_err(|e| Error::ConfigError {
        message: format!("cannot read skill root {}: {e}", sanitize_path(root)),
    })?;

    let mut children: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!("skipping unreadable entry under skill root: {e}");
                None
            }
        })
        .filter(|path| path.is_dir())
        .collect();
    children.sort();

    let mut candidates = Vec::new();
    for child in children {
        let manifest = child.join(MANIFEST_FILE_NAME);
        if manifest.is_file() {
            candidates.push(CandidateSkill {
                dir: child,
                manifest_path: manifest,
                layout: LayoutKind::Flat,
            });
            continue;
        }

        // Not a skill itself; treat it as a category directory and apply
        // the same test one level down. Never recurse further.
        let grandchildren = match fs::read_dir(&child) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "skipping unreadable directory {}: {e}",
                    sanitize_path(&child)
                );
                continue;
            }
        };

        let mut nested: Vec<PathBuf> = grandchildren
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && path.join(MANIFEST_FILE_NAME).is_file())
            .collect();
        nested.sort();

        for dir in nested {
            let manifest_path = dir.join(MANIFEST_FILE_NAME);
            candidates.push(CandidateSkill {
                dir,
                manifest_path,
                layout: LayoutKind::Nested,
            });
        }
    }

    candidates.sort_by(|a, b| a.dir.cmp(&b.dir));
    Ok(candidates)
}
