use std::{fmt, process::Command};

use log::{debug, warn};

use crate::error::{Error, Result};

/// A single external command: the program and its arguments.
///
/// Arguments are passed to the process as-is, nothing goes through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Invocation {
            program: program.into(),
            args: vec![],
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs commands for the notifier and hands back what they printed.
///
/// Implementors return the captured standard output trimmed of surrounding
/// whitespace. Anything written to the error stream must be reported as
/// `Error::Stderr` carrying that text unchanged, trailing newline included.
pub trait Executor {
    fn run(&self, invocation: &Invocation) -> Result<String>;
}

/// Runs commands as child processes of the current working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor {
    /// Also fail when the process exits with a non-zero status, even if it
    /// kept quiet on its error stream
    pub fail_on_exit_status: bool,
}

impl ProcessExecutor {
    pub fn new() -> Self { ProcessExecutor::default() }

    pub fn fail_on_exit_status(mut self, strict: bool) -> Self {
        self.fail_on_exit_status = strict;
        self
    }
}

impl Executor for ProcessExecutor {
    fn run(&self, invocation: &Invocation) -> Result<String> {
        debug!("Running: {}", invocation);
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            warn!("`{}` wrote to stderr", invocation);
            return Err(Error::Stderr(stderr.into_owned()));
        }

        if self.fail_on_exit_status && !output.status.success() {
            return Err(Error::ExitStatus {
                command: invocation.to_string(),
                code: output.status.code().unwrap_or(-1),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_display() {
        let inv = Invocation::new("git").arg("describe").arg("--tags");
        assert_eq!(inv.to_string(), "git describe --tags");
    }

    #[cfg(unix)]
    #[test]
    fn captures_trimmed_stdout() {
        let inv = Invocation::new("sh").arg("-c").arg("printf '  v1.2.0\\n\\n'");
        assert_eq!(ProcessExecutor::new().run(&inv).unwrap(), "v1.2.0");
    }

    #[cfg(unix)]
    #[test]
    fn stderr_output_fails() {
        let inv = Invocation::new("sh")
            .arg("-c")
            .arg("echo partial; echo 'fatal: No names found' >&2");
        match ProcessExecutor::new().run(&inv) {
            Err(Error::Stderr(msg)) => assert_eq!(msg, "fatal: No names found\n"),
            res => panic!("expected a stderr failure, got {res:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_only_fails_when_strict() {
        let inv = Invocation::new("sh").arg("-c").arg("exit 3");
        assert_eq!(ProcessExecutor::new().run(&inv).unwrap(), "");

        let res = ProcessExecutor::new().fail_on_exit_status(true).run(&inv);
        assert!(
            matches!(res, Err(Error::ExitStatus { code: 3, .. })),
            "{res:?}"
        );
    }

    #[test]
    fn missing_program_is_io_error() {
        let inv = Invocation::new("release-notify-no-such-program");
        assert!(matches!(ProcessExecutor::new().run(&inv), Err(Error::Io(_))));
    }
}
