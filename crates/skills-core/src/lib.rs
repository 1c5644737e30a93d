//! Core types, configuration, and errors for the AgentSkills server.
//!
//! This crate provides the foundational types and abstractions used
//! across all other crates in the workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`SkillName`, `LayoutKind`)
//! - The full error taxonomy with contextual information
//! - Configuration for the discovery and access engine

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod types;

pub use config::{
    DEFAULT_MAX_READ_BYTES, DEFAULT_SCRIPT_TIMEOUT, DuplicatePolicy, SkillsConfig,
    SkillsConfigBuilder,
};
pub use error::{Error, Result, sanitize_path};
pub use types::{LayoutKind, MAX_SKILL_NAME_LEN, SkillName};
