//! Bounded execution of scripts bundled inside a skill.
//!
//! Scripts run argv-style with no shell in between, so caller-supplied
//! arguments can never be interpolated into a command line. The working
//! directory is the skill's own root, letting a script's relative
//! references resolve the way its author laid them out, and every
//! invocation carries a hard wall-clock budget after which the child is
//! forcibly terminated.
//!
//! A non-zero exit code is ordinary data, not an error of this layer:
//! the calling agent sees `{exit_code, stdout, stderr}` and decides how
//! to react. Only failing to start the process or exceeding the time
//! budget is an [`Error`].

use agentskills_core::{Error, Result};
use agentskills_registry::{SkillRecord, path_guard};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Captured result of a completed script run.
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    /// Exit code of the child; `-1` when terminated by a signal.
    pub exit_code: i32,

    /// Full standard output, decoded lossily as UTF-8.
    pub stdout: String,

    /// Full standard error, decoded lossily as UTF-8.
    pub stderr: String,
}

/// Runs executable scripts that live inside registered skills.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    default_timeout: Duration,
}

impl ShellExecutor {
    /// Creates an executor with the given default wall-clock budget.
    #[must_use]
    pub const fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }

    /// Run `script` (a path relative to the skill root) with `args`.
    ///
    /// Output is captured fully and returned, not streamed. `timeout`
    /// overrides the executor's default budget for this invocation only.
    ///
    /// # Errors
    ///
    /// - [`Error::PathTraversal`] when the script path escapes the root
    /// - [`Error::FileNotFound`] when no regular file is at the path
    /// - [`Error::SpawnFailed`] when the process cannot start (missing
    ///   executable bit, interpreter not found)
    /// - [`Error::ScriptTimeout`] when the budget elapses; the child's
    ///   whole process group is killed before this returns
    /// - [`Error::Io`] if collecting the child's output fails
    pub async fn run(
        &self,
        record: &SkillRecord,
        script: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<ScriptOutput> {
        let skill = record.name().as_str();
        let path = path_guard::resolve(skill, record.root(), script)?;

        if !path.is_file() {
            return Err(Error::FileNotFound {
                skill: skill.to_string(),
                path: script.to_string(),
            });
        }

        let mut command = Command::new(&path);
        command
            .args(args)
            .current_dir(record.root())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group so a timeout kill is not absorbed by a
        // shell wrapper between us and the real work.
        #[cfg(unix)]
        command.process_group(0);

        let child = command.spawn().map_err(|e| Error::SpawnFailed {
            script: script.to_string(),
            source: e,
        })?;

        // Captured before the wait consumes the handle; doubles as the
        // group id because the child leads its own group.
        #[cfg(unix)]
        let group = child.id();

        let budget = timeout.unwrap_or(self.default_timeout);
        tracing::debug!(
            skill,
            script,
            timeout_secs = budget.as_secs(),
            "running bundled script"
        );

        let output = match tokio::time::timeout(budget, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(Error::Io {
                    context: format!("collecting output of script '{script}'"),
                    source: e,
                });
            }
            Err(_elapsed) => {
                // Kill the whole process group so helpers the script
                // spawned die with it; dropping the timed-out future then
                // lets kill_on_drop reap the direct child.
                #[cfg(unix)]
                kill_process_group(group);
                tracing::warn!(skill, script, "script exceeded its time budget, killed");
                return Err(Error::ScriptTimeout {
                    script: script.to_string(),
                    timeout_secs: budget.as_secs(),
                });
            }
        };

        let exit_code = output.status.code().unwrap_or(-1);
        tracing::debug!(skill, script, exit_code, "script finished");

        Ok(ScriptOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// SIGKILL a script's entire process group.
///
/// The script leads its own group, so anything it spawned shares the
/// group id and dies with it instead of surviving the timeout.
#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    if let Some(pgid) = pid.and_then(|p| i32::try_from(p).ok()) {
        if let Err(e) = killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
            tracing::warn!(pgid, error = %e, "failed to kill script process group");
        }
    }
}
