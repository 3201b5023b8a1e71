//! Shell command execution.
use crate::{Error, Result};
use std::{future::Future, process::Stdio};
use tokio::process::Command;

/// Runs command lines for the camera operations in [crate::camera].
pub trait CommandRunner {
    /// Runs `command` to completion, returning its standard output.
    ///
    /// ## Errors
    ///
    /// * [`Error::Execution`] if the command wrote *anything* to standard
    ///   error
    fn run(&self, command: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Runs commands with `sh -c`, with no input and without echoing them.
///
/// A command fails if and only if it writes to standard error; its exit
/// status is only logged. `v4l2-ctl` exits with status 0 on many errors, but
/// always explains them on standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct Shell;

impl CommandRunner for Shell {
    async fn run(&self, command: &str) -> Result<String> {
        trace!("running: {command}");
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.stderr.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            debug!("{command:?} ({}) wrote to stderr: {stderr:?}", output.status);
            return Err(Error::Execution(stderr));
        }

        if !output.status.success() {
            debug!("{command:?} {}, but wrote nothing to stderr", output.status);
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!("output: {stdout:?}");
        Ok(stdout)
    }
}
