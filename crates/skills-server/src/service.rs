//! MCP service implementing progressive disclosure over skill bundles.
//!
//! The `SkillsService` exposes exactly four tools:
//! 1. `load_skill_metadata` - list skill names and short descriptions
//! 2. `load_skill` - load one skill's full instructions
//! 3. `read_reference_file` - read a supporting file inside a skill
//! 4. `run_shell_command` - run a script bundled inside a skill
//!
//! The calling agent is expected to start with `load_skill_metadata`,
//! pick a skill, and pull fuller content strictly on demand, keeping its
//! own context budget small even when bundles are large.

use crate::types::{
    LoadSkillMetadataResult, LoadSkillParams, LoadSkillResult, ReadReferenceFileParams,
    ReadReferenceFileResult, RunShellCommandParams, RunShellCommandResult, SkillMetadataEntry,
};
use agentskills_core::{Error, SkillsConfig};
use agentskills_exec::ShellExecutor;
use agentskills_registry::{ReferenceFileService, SkillRegistry};
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{ErrorData as McpError, tool, tool_handler, tool_router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// MCP server for on-demand skill access.
///
/// Stateless given the registry: the registry is built once before the
/// service starts and every tool is a pure function over it plus the
/// filesystem under the registered skill roots.
#[derive(Debug, Clone)]
pub struct SkillsService {
    /// Immutable skill index shared by all tools
    registry: Arc<SkillRegistry>,

    /// Bounded, path-contained reference-file reads
    reader: ReferenceFileService,

    /// Script execution with per-invocation timeout
    executor: ShellExecutor,

    /// Tool router for the MCP protocol
    tool_router: ToolRouter<Self>,
}

impl SkillsService {
    /// Creates the service over an already-built registry.
    #[must_use]
    pub fn new(registry: Arc<SkillRegistry>, config: &SkillsConfig) -> Self {
        Self {
            reader: ReferenceFileService::new(Arc::clone(&registry), config.max_read_bytes()),
            executor: ShellExecutor::new(config.script_timeout()),
            registry,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl SkillsService {
    /// List every available skill with its short description.
    ///
    /// Always safe; the calling agent invokes this first and uses the
    /// returned names with the other three tools.
    #[tool(
        description = "Load metadata (name and description) for all available skills. Call this first; the other tools take a skill name from this listing."
    )]
    async fn load_skill_metadata(&self) -> Result<CallToolResult, McpError> {
        let skills: Vec<SkillMetadataEntry> = self
            .registry
            .list_metadata()
            .into_iter()
            .map(|m| SkillMetadataEntry {
                name: m.name,
                description: m.description,
            })
            .collect();

        let mut summary = String::from(
            "Available skills (each line is \"- <skill_name>: <skill_description>\"):",
        );
        for skill in &skills {
            summary.push_str(&format!("\n- {}: {}", skill.name, skill.description));
        }

        json_result(&LoadSkillMetadataResult {
            total_skills: skills.len(),
            skills,
            summary,
        })
    }

    /// Load one skill's full instructions.
    ///
    /// The body is read from the skill's manifest on first access and
    /// cached for the server's lifetime.
    #[tool(description = "Load one skill's full instructions from its SKILL.md.")]
    async fn load_skill(
        &self,
        Parameters(params): Parameters<LoadSkillParams>,
    ) -> Result<CallToolResult, McpError> {
        let record = self.registry.get(&params.skill_name).map_err(to_mcp_error)?;
        let body = record.body().await.map_err(to_mcp_error)?;

        json_result(&LoadSkillResult {
            name: record.name().as_str().to_string(),
            body: body.to_string(),
        })
    }

    /// Read a reference file from inside a skill.
    #[tool(
        description = "Read a reference file from a skill (e.g. forms.md, reference.md, ooxml.md). The path is relative to the skill directory and must stay inside it."
    )]
    async fn read_reference_file(
        &self,
        Parameters(params): Parameters<ReadReferenceFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let content = self
            .reader
            .read(&params.skill_name, &params.file_path, params.max_bytes)
            .await
            .map_err(to_mcp_error)?;

        json_result(&ReadReferenceFileResult {
            skill_name: params.skill_name,
            file_path: params.file_path,
            bytes_read: content.data.len(),
            total_size: content.total_size,
            truncated: content.truncated,
            content: String::from_utf8_lossy(&content.data).into_owned(),
        })
    }

    /// Run a script bundled inside a skill.
    ///
    /// The script runs with the skill directory as its working directory
    /// and a hard timeout. A non-zero exit code is reported as data.
    #[tool(
        description = "Run an executable script bundled inside a skill (e.g. scripts/extract.sh). Arguments are passed argv-style; output is captured and returned with the exit code."
    )]
    async fn run_shell_command(
        &self,
        Parameters(params): Parameters<RunShellCommandParams>,
    ) -> Result<CallToolResult, McpError> {
        let record = self.registry.get(&params.skill_name).map_err(to_mcp_error)?;
        let timeout = params.timeout_secs.map(Duration::from_secs);

        let output = self
            .executor
            .run(record, &params.script_path, &params.arguments, timeout)
            .await
            .map_err(to_mcp_error)?;

        json_result(&RunShellCommandResult {
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[tool_handler]
impl ServerHandler for SkillsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Expose skill bundles through progressive disclosure. \
                 Call load_skill_metadata first to see what is available, \
                 load_skill for one skill's instructions, then \
                 read_reference_file and run_shell_command on demand."
                    .to_string(),
            ),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Serializes a tool result as pretty JSON content.
fn json_result<T: Serialize>(result: &T) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(result).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize result: {e}"), None)
        })?,
    )]))
}

/// Maps the core error taxonomy onto MCP error codes.
///
/// Caller mistakes (unknown skill, missing file, traversal refusal) are
/// invalid-params so the agent can correct and retry; everything else is
/// an internal error.
fn to_mcp_error(err: Error) -> McpError {
    if err.is_not_found() || err.is_traversal() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}
