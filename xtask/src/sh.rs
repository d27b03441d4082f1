// sh! command execution

use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{bail, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamMode {
    Inherit,
    Pipe,
    Null,
}

impl StreamMode {
    fn stdio(self) -> Stdio {
        match self {
            StreamMode::Inherit => Stdio::inherit(),
            StreamMode::Pipe => Stdio::piped(),
            StreamMode::Null => Stdio::null(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ShOptions {
    pub stdout: StreamMode,
    pub stderr: StreamMode,
    pub cwd: Option<PathBuf>,
    /// Skip echoing the command before it runs.
    pub quiet: bool,
}

impl Default for ShOptions {
    fn default() -> Self {
        Self {
            stdout: StreamMode::Inherit,
            stderr: StreamMode::Inherit,
            cwd: None,
            quiet: false,
        }
    }
}

impl ShOptions {
    /// Capture both streams, for commands whose output gets inspected.
    pub fn captured() -> Self {
        Self {
            stdout: StreamMode::Pipe,
            stderr: StreamMode::Pipe,
            quiet: true,
            ..Default::default()
        }
    }

    fn apply(&self, cmd: &mut Command) {
        cmd.stdout(self.stdout.stdio());
        cmd.stderr(self.stderr.stdio());
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(dir);
        }
    }
}

#[derive(Debug)]
pub struct ShOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

#[macro_export]
macro_rules! sh {
    // Single command with explicit options
    (options($opts:expr), $cmd:expr $(,)?) => {{ $crate::sh::sh($cmd, &$opts) }};

    // Single command with default options
    ($cmd:expr $(,)?) => {{ $crate::sh::sh($cmd, &$crate::sh::ShOptions::default()) }};
}

pub fn sh<S: AsRef<str>>(cmd: S, opts: &ShOptions) -> Result<ShOutput> {
    let cmd = cmd.as_ref();
    log::debug!("[sh] {}", cmd);
    if !opts.quiet {
        println!("$ {}", cmd);
    }

    let mut command = Command::new("sh");
    command.arg("-c").arg(cmd);
    opts.apply(&mut command);

    let output = command.output()?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        bail!(
            "Command failed: {}\nExit code: {:?}\n{}",
            cmd,
            output.status.code().unwrap_or(-1),
            stderr.trim_end(),
        );
    }

    Ok(ShOutput {
        status: output.status,
        stdout,
        stderr,
    })
}
