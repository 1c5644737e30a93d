//! Parameter and result types for the four skill tools.
//!
//! - `load_skill_metadata`: list skill names and descriptions
//! - `load_skill`: load one skill's full instructions
//! - `read_reference_file`: read a supporting file inside a skill
//! - `run_shell_command`: run a script bundled inside a skill

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// load_skill_metadata types
// ============================================================================

/// One `(name, description)` entry in the metadata listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SkillMetadataEntry {
    /// Unique skill name, usable with the other three tools
    pub name: String,

    /// Short summary from the skill's manifest
    pub description: String,
}

/// Result of listing all available skills.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoadSkillMetadataResult {
    /// Number of registered skills
    pub total_skills: usize,

    /// Ordered `(name, description)` pairs
    pub skills: Vec<SkillMetadataEntry>,

    /// Ready-to-inject listing, one `- <name>: <description>` per line
    pub summary: String,
}

// ============================================================================
// load_skill types
// ============================================================================

/// Parameters for loading one skill's instructions.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LoadSkillParams {
    /// Skill name, as returned by `load_skill_metadata`
    pub skill_name: String,
}

/// A skill's full instructional body.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoadSkillResult {
    /// The skill's name
    pub name: String,

    /// Full instructions from the skill's manifest, frontmatter removed
    pub body: String,
}

// ============================================================================
// read_reference_file types
// ============================================================================

/// Parameters for reading a reference file from a skill.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadReferenceFileParams {
    /// Skill name, as returned by `load_skill_metadata`
    pub skill_name: String,

    /// File path relative to the skill directory (e.g. `reference.md`,
    /// `refs/forms.md`)
    pub file_path: String,

    /// Optional cap on bytes returned; clamped to the server's limit
    pub max_bytes: Option<u64>,
}

/// Contents of a reference file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadReferenceFileResult {
    /// The skill the file belongs to
    pub skill_name: String,

    /// The path that was read, relative to the skill directory
    pub file_path: String,

    /// File contents, decoded lossily as UTF-8
    pub content: String,

    /// Bytes actually returned
    pub bytes_read: usize,

    /// Total size of the file on disk
    pub total_size: u64,

    /// `true` when `content` is a truncated prefix of the file
    pub truncated: bool,
}

// ============================================================================
// run_shell_command types
// ============================================================================

/// Parameters for running a script bundled inside a skill.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunShellCommandParams {
    /// Skill name, as returned by `load_skill_metadata`
    pub skill_name: String,

    /// Script path relative to the skill directory (e.g.
    /// `scripts/extract.sh`)
    pub script_path: String,

    /// Arguments passed to the script argv-style, never via a shell
    #[serde(default)]
    pub arguments: Vec<String>,

    /// Optional per-invocation timeout override, in seconds
    pub timeout_secs: Option<u64>,
}

/// Captured output of a completed script run.
///
/// A non-zero `exit_code` is ordinary data, not a tool error.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunShellCommandResult {
    /// Exit code of the script; `-1` when terminated by a signal
    pub exit_code: i32,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}
