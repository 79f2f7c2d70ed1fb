// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One step as one child process.

use std::fs::File;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use nix::errno::Errno;
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, Command};

/// Exit of a step process: the success flag and its exit code.
///
/// A process terminated by a signal has no exit code and reports `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub success: bool,
    pub exit_code: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCompletion {
    Finished(StepOutcome),
    /// The step outlived the step timeout and was killed
    TimedOut,
}

/// Everything needed to spawn one step.
pub(crate) struct StepInvocation<'a> {
    pub shell: &'a Path,
    pub script: &'a Path,
    pub cwd: &'a Path,
    pub args: &'a [String],
    pub output: &'a File,
    pub timeout: Option<Duration>,
}

impl StepInvocation<'_> {
    /// Run `<shell> -xe <script> [args...]` and wait for it to exit.
    ///
    /// `-e` fails the step on the first failing command inside it and `-x`
    /// traces each command into the output. Stdout and stderr share the
    /// run's output file so their lines interleave in execution order.
    ///
    /// The step leads its own process group. On timeout the whole group is
    /// killed so nothing the shell started outlives the step.
    pub(crate) async fn run(&self) -> io::Result<StepCompletion> {
        let mut cmd = Command::new(self.shell);
        cmd.arg("-xe")
            .arg(self.script)
            .args(self.args)
            .current_dir(self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::from(self.output.try_clone()?))
            .stderr(Stdio::from(self.output.try_clone()?))
            .process_group(0)
            .kill_on_drop(true);

        let mut child = cmd.spawn()?;
        let status = match self.timeout {
            None => child.wait().await?,
            Some(limit) => {
                let waited = tokio::time::timeout(limit, child.wait()).await;
                match waited {
                    Ok(status) => status?,
                    Err(_) => {
                        kill_group(&child)?;
                        child.kill().await?;
                        return Ok(StepCompletion::TimedOut);
                    }
                }
            }
        };

        Ok(StepCompletion::Finished(StepOutcome {
            success: status.success(),
            exit_code: status.code().unwrap_or(-1),
        }))
    }
}

/// SIGKILL the process group led by `child`. A group that is already gone is fine.
fn kill_group(child: &Child) -> io::Result<()> {
    let Some(pid) = child.id() else {
        return Ok(());
    };
    let pgid = i32::try_from(pid).map_err(io::Error::other)?;
    match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
