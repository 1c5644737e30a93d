//! Filesystem containment for skill-scoped access.
//!
//! Every reference-file read and every script execution resolves its
//! caller-supplied relative path through [`resolve`] before touching the
//! filesystem. This is the sole gate preventing a request (or a
//! malicious bundle) from reaching files outside the skill's own root.
//!
//! Escapes are rejected explicitly with [`Error::PathTraversal`] and
//! logged as potential security events; they are never silently clamped
//! back inside the root.

use agentskills_core::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Resolve `relative` against a skill's root directory.
///
/// `skill_root` must already be canonical (the registry canonicalizes
/// each skill directory at registration time). The returned path is
/// canonical when the target exists, and lexically normalized when it
/// does not, so callers can distinguish a missing file from an escape.
///
/// # Errors
///
/// Returns [`Error::PathTraversal`] when `relative` is absolute, empty,
/// contains a NUL byte, walks above the root via `..`, or reaches
/// outside the root through a symbolic link.
pub fn resolve(skill: &str, skill_root: &Path, relative: &str) -> Result<PathBuf> {
    if relative.is_empty() || relative.contains('\0') {
        return Err(refused(skill, relative));
    }

    let candidate = Path::new(relative);
    if candidate.is_absolute() {
        return Err(refused(skill, relative));
    }

    // Lexical normalization: `..` pops a component, and popping past the
    // skill root is an escape regardless of what the rest of the path
    // would have done.
    let mut resolved = skill_root.to_path_buf();
    let mut depth = 0usize;
    for component in candidate.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::ParentDir => {
                if depth == 0 {
                    return Err(refused(skill, relative));
                }
                resolved.pop();
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(refused(skill, relative));
            }
        }
    }

    // "." and friends resolve to the root itself, which is a directory,
    // never a readable file or runnable script.
    if depth == 0 {
        return Err(refused(skill, relative));
    }

    // Symlink check: canonicalize the deepest existing ancestor and
    // require it to still sit under the root. A fully existing target is
    // canonicalized whole, which also yields the path callers read from.
    match resolved.canonicalize() {
        Ok(canonical) => {
            if canonical.starts_with(skill_root) {
                Ok(canonical)
            } else {
                Err(refused(skill, relative))
            }
        }
        Err(_) => {
            // A dangling symlink defeats canonicalize but still names a
            // location; one pointing outside the root is an escape, not
            // a miss.
            if dangling_link_escapes(&resolved, skill_root) {
                return Err(refused(skill, relative));
            }
            let ancestor = deepest_existing_ancestor(&resolved);
            match ancestor.canonicalize() {
                Ok(canonical) if canonical.starts_with(skill_root) => Ok(resolved),
                _ => Err(refused(skill, relative)),
            }
        }
    }
}

/// Whether `path` is a symlink whose missing target would sit outside
/// `skill_root`. The target is resolved lexically against the link's
/// own (canonicalized) directory, since it does not exist on disk.
fn dangling_link_escapes(path: &Path, skill_root: &Path) -> bool {
    let Ok(metadata) = path.symlink_metadata() else {
        return false;
    };
    if !metadata.file_type().is_symlink() {
        return false;
    }
    let Ok(target) = std::fs::read_link(path) else {
        return true;
    };
    let base = match path.parent().map(Path::canonicalize) {
        Some(Ok(base)) => base,
        _ => return true,
    };
    let joined = if target.is_absolute() {
        target
    } else {
        base.join(target)
    };
    !lexical_normalize(&joined).starts_with(skill_root)
}

fn lexical_normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Walks up from `path` to the nearest ancestor that exists on disk.
fn deepest_existing_ancestor(path: &Path) -> &Path {
    let mut current = path;
    while let Some(parent) = current.parent() {
        if current.exists() {
            break;
        }
        current = parent;
    }
    current
}

fn refused(skill: &str, relative: &str) -> Error {
    tracing::warn!(
        skill,
        path = relative,
        "refused path traversal attempt outside skill root"
    );
    Error::PathTraversal {
        skill: skill.to_string(),
        path: relative.to_string(),
    }
}
