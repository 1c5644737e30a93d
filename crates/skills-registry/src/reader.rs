//! Bounded, path-contained reference-file reads.
//!
//! A skill bundle may carry arbitrarily large supporting files
//! (`reference.md`, `forms.md`, data fixtures). The reader returns at
//! most a configured number of bytes per call so a single request can
//! never flood the calling agent's context, and reports whether the
//! content was truncated.

use crate::path_guard;
use crate::registry::SkillRegistry;
use agentskills_core::{Error, Result, sanitize_path};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Contents of a reference file, possibly truncated at the read cap.
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Raw bytes read from the file (binary-safe).
    pub data: Vec<u8>,

    /// Total size of the file on disk, in bytes.
    pub total_size: u64,

    /// `true` when `data` is a prefix of a larger file.
    pub truncated: bool,
}

/// Reads reference files inside registered skills.
#[derive(Debug, Clone)]
pub struct ReferenceFileService {
    registry: Arc<SkillRegistry>,
    max_read_bytes: u64,
}

impl ReferenceFileService {
    /// Creates a reader over `registry` with a hard per-call byte cap.
    #[must_use]
    pub const fn new(registry: Arc<SkillRegistry>, max_read_bytes: u64) -> Self {
        Self {
            registry,
            max_read_bytes,
        }
    }

    /// Read `relative` from inside the named skill.
    ///
    /// `max_bytes` lets a caller ask for less than the configured cap;
    /// asking for more is clamped to the cap, never honored.
    ///
    /// # Errors
    ///
    /// - [`Error::SkillNotFound`] for an unknown skill name
    /// - [`Error::PathTraversal`] when the path escapes the skill root
    /// - [`Error::FileNotFound`] when the resolved target is missing or
    ///   not a regular file
    /// - [`Error::Io`] for any other OS-level failure
    pub async fn read(
        &self,
        skill_name: &str,
        relative: &str,
        max_bytes: Option<u64>,
    ) -> Result<FileContent> {
        let record = self.registry.get(skill_name)?;
        let path = path_guard::resolve(skill_name, record.root(), relative)?;

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| not_found_or_io(skill_name, relative, &path, e))?;
        if !metadata.is_file() {
            return Err(Error::FileNotFound {
                skill: skill_name.to_string(),
                path: relative.to_string(),
            });
        }

        let cap = max_bytes.map_or(self.max_read_bytes, |requested| {
            requested.min(self.max_read_bytes)
        });

        let file = tokio::fs::File::open(&path)
            .await
            .map_err(|e| not_found_or_io(skill_name, relative, &path, e))?;

        let mut data = Vec::new();
        file.take(cap)
            .read_to_end(&mut data)
            .await
            .map_err(|e| Error::Io {
                context: format!("reading {}", sanitize_path(&path)),
                source: e,
            })?;

        let total_size = metadata.len();
        let truncated = total_size > data.len() as u64;
        if truncated {
            tracing::debug!(
                skill = skill_name,
                path = relative,
                cap,
                total_size,
                "reference file truncated at read cap"
            );
        }

        Ok(FileContent {
            data,
            total_size,
            truncated,
        })
    }
}

fn not_found_or_io(skill: &str, relative: &str, path: &Path, e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::NotFound {
        Error::FileNotFound {
            skill: skill.to_string(),
            path: relative.to_string(),
        }
    } else {
        Error::Io {
            context: format!("reading {}", sanitize_path(path)),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentskills_core::SkillsConfig;
    use std::fs;
    use std::path::Path;

    fn service(root: &Path, cap: u64) -> ReferenceFileService {
        let registry = SkillRegistry::build(&SkillsConfig::builder(root).build()).unwrap();
        ReferenceFileService::new(Arc::new(registry), cap)
    }

    fn write_skill_with_files(root: &Path) {
        let skill = root.join("pdf");
        fs::create_dir_all(skill.join("refs")).unwrap();
        fs::write(
            skill.join("SKILL.md"),
            "---\ndescription: PDF skill\n---\nBody.",
        )
        .unwrap();
        fs::write(skill.join("reference.md"), "reference content").unwrap();
        fs::write(skill.join("refs").join("forms.md"), "forms content").unwrap();
        fs::write(skill.join("blob.bin"), [0u8, 159, 146, 150]).unwrap();
    }

    #[tokio::test]
    async fn test_read_top_level_file() {
        let dir = tempfile::tempdir().unwrap();
        write_skill_with_files(dir.path());
        let service = service(dir.path(), 1024);

        let content = service.read("pdf", "reference.md", None).await.unwrap();
        assert_eq!(content.data, b"reference content");
        assert!(!content.truncated);
    }

    #[tokio::test]
    async fn test_read_nested_file() {
        let dir = tempfile::tempdir().unwrap();
        write_skill_with_files(dir.path());
        let service = service(dir.path(), 1024);

        let content = service.read("pdf", "refs/forms.md", None).await.unwrap();
        assert_eq!(content.data, b"forms content");
    }

    #[tokio::test]
    async fn test_read_binary_file() {
        let dir = tempfile::tempdir().unwrap();
        write_skill_with_files(dir.path());
        let service = service(dir.path(), 1024);

        let content = service.read("pdf", "blob.bin", None).await.unwrap();
        assert_eq!(content.data, vec![0u8, 159, 146, 150]);
    }

    #[tokio::test]
    async fn test_bounded_read_reports_truncation() {
        let dir = tempfile::tempdir().unwrap();
        write_skill_with_files(dir.path());
        let service = service(dir.path(), 1024);

        let content = service.read("pdf", "reference.md", Some(9)).await.unwrap();
        assert_eq!(content.data, b"reference");
        assert!(content.truncated);
        assert_eq!(content.total_size, "reference content".len() as u64);
    }

    #[tokio::test]
    async fn test_caller_cannot_exceed_configured_cap() {
        let dir = tempfile::tempdir().unwrap();
        write_skill_with_files(dir.path());
        let service = service(dir.path(), 4);

        let content = service
            .read("pdf", "reference.md", Some(1_000_000))
            .await
            .unwrap();
        assert_eq!(content.data.len(), 4);
        assert!(content.truncated);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_skill_with_files(dir.path());
        let service = service(dir.path(), 1024);

        let err = service.read("pdf", "nope.md", None).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_traversal());
    }

    #[tokio::test]
    async fn test_directory_target_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_skill_with_files(dir.path());
        let service = service(dir.path(), 1024);

        let err = service.read("pdf", "refs", None).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_skill_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_skill_with_files(dir.path());
        let service = service(dir.path(), 1024);

        let err = service.read("word", "reference.md", None).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_traversal_refused() {
        let dir = tempfile::tempdir().unwrap();
        write_skill_with_files(dir.path());
        let service = service(dir.path(), 1024);

        let err = service
            .read("pdf", "../../etc/passwd", None)
            .await
            .unwrap_err();
        assert!(err.is_traversal());
    }
}
