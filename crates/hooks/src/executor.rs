//! Timeout-bound hook execution with per-stage isolation semantics.
//!
//! Hooks are always isolated from the operation that triggered them: a
//! pre-hook's non-zero exit aborts the single operation it guards, a
//! post-hook's non-zero exit is advisory only, and an on-error hook's
//! failure is swallowed entirely so it never masks the original error.

use std::env;
use std::path::Path;
use std::time::Duration;

use sublime_standard_tools::command::{Command, CommandBuilder, DefaultCommandExecutor, Executor};
use sublime_standard_tools::error::{CommandError, Error as StandardError};

use crate::error::{HookError, HookResult};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;
const TIMEOUT_ENV_VAR: &str = "PKGLAB_HOOK_TIMEOUT_MS";
const STDERR_HEAD_LINES: usize = 10;

/// When a hook runs relative to the operation it guards, and how its failure
/// is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    /// Runs before the operation. A non-zero exit aborts the operation.
    Pre,
    /// Runs after the operation succeeded. A non-zero exit is logged but
    /// does not fail the operation.
    Post,
    /// Runs after the operation failed. Its own failure is swallowed.
    OnError,
}

/// Reads the configured hook timeout from `PKGLAB_HOOK_TIMEOUT_MS`, falling
/// back to the 30 second default from spec.
#[must_use]
pub fn configured_timeout() -> Duration {
    let millis = env::var(TIMEOUT_ENV_VAR)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    Duration::from_millis(millis)
}

fn stderr_head(stderr: &str) -> String {
    stderr.lines().take(STDERR_HEAD_LINES).collect::<Vec<_>>().join("\n")
}

/// Outcome of running a hook: whether to treat the operation as ok to
/// proceed, and diagnostics for logging regardless of stage.
#[derive(Debug)]
pub struct HookOutcome {
    /// `true` when the operation guarded by this hook should proceed.
    pub proceed: bool,
    /// The error produced by the hook, if any, kept for logging even when
    /// `proceed` is `true` (post-hook and on-error advisory failures).
    pub error: Option<HookError>,
}

/// Runs `name` (`program` with `args`) in `working_dir`, applying the
/// configured timeout and the isolation policy for `stage`.
///
/// # Errors
/// For [`HookStage::Pre`], returns `Err` on timeout or non-zero exit. For
/// [`HookStage::Post`] and [`HookStage::OnError`], execution failures are
/// captured in [`HookOutcome::error`] rather than returned, since those
/// stages are advisory or swallowed by design.
pub async fn run_hook(
    name: &str,
    program: &str,
    args: &[String],
    working_dir: &Path,
    stage: HookStage,
) -> HookResult<HookOutcome> {
    let timeout = configured_timeout();
    let mut builder = CommandBuilder::new(program);
    for arg in args {
        builder = builder.arg(arg);
    }
    let command: Command = builder.current_dir(working_dir).timeout(timeout).build();

    let executor = DefaultCommandExecutor::new();
    let result = executor.execute(command).await;

    let outcome = match result {
        Ok(_output) => HookOutcome { proceed: true, error: None },
        Err(StandardError::Command(CommandError::NonZeroExitCode { code, stderr, .. })) => {
            let error = HookError::NonZeroExit {
                name: name.to_string(),
                code: code.unwrap_or(-1),
                stderr_head: stderr_head(&stderr),
            };
            match stage {
                HookStage::Pre => return Err(error),
                HookStage::Post | HookStage::OnError => {
                    HookOutcome { proceed: true, error: Some(error) }
                }
            }
        }
        Err(StandardError::Command(CommandError::Timeout { duration })) => {
            let error =
                HookError::Timeout { name: name.to_string(), timeout_ms: duration.as_millis() as u64 };
            match stage {
                HookStage::Pre => return Err(error),
                HookStage::Post | HookStage::OnError => {
                    HookOutcome { proceed: true, error: Some(error) }
                }
            }
        }
        Err(err) => {
            let error = HookError::SpawnFailed { name: name.to_string(), message: err.to_string() };
            match stage {
                HookStage::Pre => return Err(error),
                HookStage::Post | HookStage::OnError => {
                    HookOutcome { proceed: true, error: Some(error) }
                }
            }
        }
    };

    Ok(outcome)
}
