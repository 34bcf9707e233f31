//! External command execution
//!
//! Everything stevedore does goes through an external tool (git, deno,
//! docker). `CommandRunner` is the seam: production code uses
//! `SystemRunner`, tests inject a scripted runner that records the exact
//! invocation sequence.

use std::path::Path;
use std::process::Command;

use crate::error::{DeployError, DeployResult};

/// Captured result of an external command
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human-readable exit status for diagnostics
    pub fn status_label(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Render a command line for display and diagnostics
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program.to_string());
    parts.extend(args.iter().cloned());
    parts.join(" ")
}

/// Executes external commands with captured output.
///
/// `run` treats a non-zero exit as data: probe commands (like
/// `docker inspect`) use it to turn the exit status into a signal.
/// `run_checked` is for required steps where non-zero is fatal.
pub trait CommandRunner {
    /// Run a command in an optional working directory, capturing output
    fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> DeployResult<ExecOutput>;

    /// Run a command and require a zero exit status
    fn run_checked(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> DeployResult<ExecOutput> {
        let output = self.run(program, args, cwd)?;
        if output.success() {
            Ok(output)
        } else {
            Err(DeployError::CommandFailed {
                command: render_command(program, args),
                status: output.status_label(),
                stdout: output.stdout,
                stderr: output.stderr,
            })
        }
    }
}

/// Production runner backed by `std::process::Command`
pub struct SystemRunner {
    /// Echo captured stdout of successful commands (`-v`)
    echo_output: bool,
}

impl SystemRunner {
    pub fn new(echo_output: bool) -> Self {
        Self { echo_output }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> DeployResult<ExecOutput> {
        match cwd {
            Some(dir) => println!("$ {} (in {})", render_command(program, args), dir.display()),
            None => println!("$ {}", render_command(program, args)),
        }

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DeployError::CommandNotFound {
                    program: program.to_string(),
                }
            } else {
                DeployError::Io(e)
            }
        })?;

        let result = ExecOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if self.echo_output && !result.stdout.is_empty() {
            print!("{}", result.stdout);
        }

        Ok(result)
    }
}
