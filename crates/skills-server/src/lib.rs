//! MCP server exposing skill bundles through progressive disclosure.
//!
//! The transport layer (stdio) and the four public tools live here; all
//! discovery, containment, and execution logic lives in the
//! `agentskills-registry` and `agentskills-exec` crates.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod service;
pub mod types;

pub use service::SkillsService;
