//! Script execution for skill bundles.
//!
//! Skills may bundle executable helpers (shell scripts, Python entry
//! points) alongside their instructions. This crate runs them under the
//! same path containment as reference-file reads, with captured output
//! and a hard per-invocation timeout.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod executor;

pub use executor::{ScriptOutput, ShellExecutor};
