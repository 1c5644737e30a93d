//! Skill discovery, registry, and path-contained file access.
//!
//! This crate composes the pieces of the on-demand access engine:
//!
//! - [`scanner`]: finds skill directories under the configured root,
//!   supporting both flat and category-nested layouts
//! - [`manifest`]: parses `SKILL.md` frontmatter into metadata
//! - [`SkillRegistry`]: the name → record index built once at startup
//! - [`path_guard`]: the containment gate in front of every filesystem
//!   access
//! - [`ReferenceFileService`]: bounded reads of files inside a skill
//!
//! # Progressive disclosure
//!
//! The registry exposes only names and short descriptions up front;
//! full instructional bodies are loaded lazily per skill, and reference
//! files are read strictly on demand with a byte cap.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod manifest;
pub mod path_guard;
mod reader;
mod registry;
pub mod scanner;

pub use manifest::{MANIFEST_FILE_NAME, MAX_MANIFEST_SIZE, ParsedManifest, parse_manifest};
pub use reader::{FileContent, ReferenceFileService};
pub use registry::{DiscoveryWarning, SkillMetadata, SkillRecord, SkillRegistry};
