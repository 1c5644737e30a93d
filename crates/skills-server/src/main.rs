//! Entry point for the AgentSkills MCP server.
//!
//! Serves the four skill tools over stdio. The only required setting is
//! the skill root directory:
//!
//! ```bash
//! agentskills --skills-dir ~/skills
//! ```
//!
//! Or configure in an MCP client:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "agentskills": {
//!       "command": "agentskills",
//!       "env": { "SKILLS_DIR": "/srv/skills" }
//!     }
//!   }
//! }
//! ```

use agentskills_core::{DuplicatePolicy, SkillsConfig};
use agentskills_registry::SkillRegistry;
use agentskills_server::SkillsService;
use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "agentskills", about = "MCP server for progressive skill disclosure")]
struct Cli {
    /// Root directory containing skill bundles
    #[arg(long, env = "SKILLS_DIR")]
    skills_dir: PathBuf,

    /// Wall-clock budget for bundled script execution, in seconds
    #[arg(long, default_value_t = 30)]
    script_timeout_secs: u64,

    /// Cap on a single reference-file read, in bytes
    #[arg(long, default_value_t = 1024 * 1024)]
    max_read_bytes: u64,

    /// Fail startup when two skill directories claim the same name
    /// (default: first seen wins, duplicate logged and skipped)
    #[arg(long)]
    reject_duplicates: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is for MCP protocol)
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,agentskills=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!(
        "Starting agentskills v{} with skill root {}",
        env!("CARGO_PKG_VERSION"),
        cli.skills_dir.display()
    );

    let config = SkillsConfig::builder(cli.skills_dir)
        .script_timeout(Duration::from_secs(cli.script_timeout_secs))
        .max_read_bytes(cli.max_read_bytes)
        .duplicate_policy(if cli.reject_duplicates {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::FirstWins
        })
        .build();

    // Registry construction happens once, before any request is served.
    let registry = Arc::new(SkillRegistry::build(&config)?);
    for warning in registry.warnings() {
        tracing::warn!("discovery: {warning}");
    }
    tracing::info!("serving {} skills", registry.len());

    let service = SkillsService::new(registry, &config).serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
