//! SKILL.md manifest parser.
//!
//! A manifest is a YAML-style frontmatter header followed by the skill's
//! free-form instructional body:
//!
//! ```markdown
//! ---
//! name: pdf
//! description: Extract text from PDF files
//! ---
//!
//! # PDF Skill
//!
//! Instructions here.
//! ```
//!
//! Parsing is strict about the header being well-formed but lenient
//! about unknown keys, which are ignored for forward compatibility.
//! `description` is required; `name` is optional and the containing
//! directory's name is used when absent.

use agentskills_core::{Error, Result, sanitize_path};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Manifest file name that marks a directory as a skill.
pub const MANIFEST_FILE_NAME: &str = "SKILL.md";

/// Maximum manifest size to read, in bytes (1MB).
pub const MAX_MANIFEST_SIZE: u64 = 1024 * 1024;

// Pre-compiled regex for frontmatter extraction (compiled once, reused)
static FRONTMATTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\r?\n([\s\S]*?)\r?\n---").expect("valid regex"));

/// Parsed metadata from a SKILL.md manifest.
#[derive(Debug, Clone)]
pub struct ParsedManifest {
    /// Skill name from the `name:` key, if present.
    pub name: Option<String>,

    /// Short summary from the required `description:` key.
    pub description: String,

    /// Instructional body text after the frontmatter.
    pub body: String,
}

/// Parse a SKILL.md manifest into structured metadata.
///
/// # Arguments
///
/// * `content` - Full manifest content as a string
/// * `path` - Manifest location, used only for error messages
///
/// # Errors
///
/// Returns [`Error::MalformedManifest`] if the frontmatter is missing or
/// unterminated, or if the required `description` key is absent or empty.
///
/// # Examples
///
/// ```
/// use agentskills_registry::parse_manifest;
/// use std::path::Path;
///
/// let content = "---\ndescription: Extract text from PDF files\n---\nBody.";
/// let manifest = parse_manifest(content, Path::new("skills/pdf/SKILL.md")).unwrap();
/// assert_eq!(manifest.description, "Extract text from PDF files");
/// assert!(manifest.name.is_none());
/// ```
pub fn parse_manifest(content: &str, path: &Path) -> Result<ParsedManifest> {
    let captures = FRONTMATTER_REGEX
        .captures(content)
        .ok_or_else(|| malformed(path, "missing or unterminated frontmatter header"))?;

    let header = captures
        .get(1)
        .map(|m| m.as_str())
        .unwrap_or_default();

    let mut name = None;
    let mut description = None;

    // Key/value lines; unknown keys are ignored for forward compatibility.
    for line in header.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "name" => name = Some(unquote(value)),
            "description" => description = Some(unquote(value)),
            _ => {}
        }
    }

    let description = description
        .filter(|d| !d.is_empty())
        .ok_or_else(|| malformed(path, "missing required 'description' key"))?;

    // Same newline-only trim as `strip_frontmatter`, so a body that
    // deliberately starts with indentation survives both paths.
    let body = content[captures.get(0).map_or(0, |m| m.end())..]
        .trim_start_matches(['\r', '\n'])
        .to_string();

    Ok(ParsedManifest {
        name: name.filter(|n| !n.is_empty()),
        description,
        body,
    })
}

/// Return the instructional body of a manifest, dropping the frontmatter.
///
/// Content without a recognizable frontmatter header is returned whole,
/// matching how externally authored bundles without a header behave.
#[must_use]
pub fn strip_frontmatter(content: &str) -> &str {
    FRONTMATTER_REGEX.find(content).map_or(content, |m| {
        content[m.end()..].trim_start_matches(['\r', '\n'])
    })
}

/// Strips one layer of single or double quotes from a frontmatter value.
fn unquote(value: &str) -> String {
    let value = value.trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
        .to_string()
}

fn malformed(path: &Path, reason: &str) -> Error {
    Error::MalformedManifest {
        path: sanitize_path(path),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ParsedManifest> {
        parse_manifest(content, Path::new("skills/test/SKILL.md"))
    }

    #[test]
    fn test_parse_full_manifest() {
        let content = "---\nname: pdf\ndescription: Extract text from PDF files\n---\n\n# PDF\n\nInstructions.";
        let manifest = parse(content).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("pdf"));
        assert_eq!(manifest.description, "Extract text from PDF files");
        assert_eq!(manifest.body, "# PDF\n\nInstructions.");
    }

    #[test]
    fn test_parse_name_optional() {
        let content = "---\ndescription: A skill\n---\nBody.";
        let manifest = parse(content).unwrap();
        assert!(manifest.name.is_none());
        assert_eq!(manifest.description, "A skill");
    }

    #[test]
    fn test_parse_quoted_values() {
        let content = "---\nname: \"pdf\"\ndescription: 'Extract text'\n---\nBody.";
        let manifest = parse(content).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("pdf"));
        assert_eq!(manifest.description, "Extract text");
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let content = "---\ndescription: A skill\nversion: 2\nauthor: someone\n---\nBody.";
        let manifest = parse(content).unwrap();
        assert_eq!(manifest.description, "A skill");
    }

    #[test]
    fn test_parse_description_value_may_contain_colons() {
        let content = "---\ndescription: Use this: when in doubt\n---\nBody.";
        let manifest = parse(content).unwrap();
        assert_eq!(manifest.description, "Use this: when in doubt");
    }

    #[test]
    fn test_parse_missing_frontmatter() {
        let err = parse("# Just markdown, no header").unwrap_err();
        assert!(err.is_malformed_manifest());
        assert!(err.to_string().contains("frontmatter"));
    }

    #[test]
    fn test_parse_unterminated_frontmatter() {
        let err = parse("---\ndescription: A skill\nno closing delimiter").unwrap_err();
        assert!(err.is_malformed_manifest());
    }

    #[test]
    fn test_parse_missing_description() {
        let err = parse("---\nname: pdf\n---\nBody.").unwrap_err();
        assert!(err.is_malformed_manifest());
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_parse_empty_description_rejected() {
        let err = parse("---\ndescription:\n---\nBody.").unwrap_err();
        assert!(err.is_malformed_manifest());
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let content = "---\r\ndescription: A skill\r\n---\r\nBody.";
        let manifest = parse(content).unwrap();
        assert_eq!(manifest.description, "A skill");
        assert_eq!(manifest.body, "Body.");
    }

    #[test]
    fn test_parse_error_names_the_path() {
        let err =
            parse_manifest("no header", Path::new("skills/broken/SKILL.md")).unwrap_err();
        assert!(err.to_string().contains("skills/broken/SKILL.md"));
    }

    #[test]
    fn test_strip_frontmatter_with_header() {
        let content = "---\ndescription: A skill\n---\nThe body.";
        assert_eq!(strip_frontmatter(content), "The body.");
    }

    #[test]
    fn test_strip_frontmatter_without_header() {
        let content = "# Plain instructions, no header";
        assert_eq!(strip_frontmatter(content), content);
    }

    #[test]
    fn test_body_matches_strip_frontmatter() {
        let content = "---\nname: pdf\ndescription: d\n---\n\nBody text.";
        let manifest = parse(content).unwrap();
        assert_eq!(manifest.body, strip_frontmatter(content));
    }

    #[test]
    fn test_body_preserves_leading_indentation() {
        let content = "---\ndescription: d\n---\n    indented code block";
        let manifest = parse(content).unwrap();
        assert_eq!(manifest.body, "    indented code block");
        assert_eq!(strip_frontmatter(content), manifest.body);
    }
}
