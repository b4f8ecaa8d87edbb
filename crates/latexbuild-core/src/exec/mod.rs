//! Validated command execution.
//!
//! ## Overview
//!
//! [`check_output_cwd`] runs an external program inside a given working
//! directory and returns its standard output as lines. Before anything is
//! spawned the program name is resolved on the search path, so a caller can
//! tell "the command does not exist" ([`Error::InvalidBinary`]) apart from
//! "the command ran and failed" ([`Error::ProcessExecution`]).
//!
//! ```text
//! Start ─▶ ValidatingBinary ─┬─▶ Rejected(InvalidBinary)
//!                            └─▶ Spawning ─▶ Running ─┬─▶ Succeeded(lines)
//!                                                     └─▶ Failed(ProcessExecution)
//! ```
//!
//! The working directory is applied to the child only; the caller's own
//! current directory is never touched.
//!
//! ### Process Abstraction
//!
//! Spawning goes through the [`ProcessRunner`] trait:
//!
//! - **Production**: [`SystemRunner`] uses `std::process::Command`
//! - **Testing**: any runner that records invocations or returns canned output
//!
//! ## Limitations
//!
//! Execution is synchronous and blocks the calling thread until the child
//! exits. There is no timeout and no cancellation; a child that hangs will
//! hang the caller. Callers that need either must manage the process group
//! themselves. Each call makes exactly one attempt.
//!
//! ## Examples
//!
//! ```no_run
//! use latexbuild_core::exec::check_output_cwd;
//!
//! let lines = check_output_cwd(&["latexmk", "-v"], "paper")?;
//! for line in lines {
//!     println!("{}", line);
//! }
//! # Ok::<(), latexbuild_core::Error>(())
//! ```
//!
//! ```no_run
//! use latexbuild_core::exec::Executor;
//!
//! let executor = Executor::new()
//!     .with_search_path("/usr/local/texlive/2024/bin/x86_64-linux")
//!     .with_env("TEXINPUTS", ".:./styles//:");
//!
//! match executor.run(&["pdflatex", "-interaction=nonstopmode", "main.tex"], "paper") {
//!     Ok(lines) => println!("{} lines of output", lines.len()),
//!     Err(e) if e.is_invalid_binary() => eprintln!("pdflatex is not installed"),
//!     Err(e) => eprintln!("build failed: {}", e),
//! }
//! ```

use crate::assertions::is_system_binary_in;
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// A fully resolved request to start one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Resolved location of the executable.
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Directory the child runs in.
    pub working_dir: PathBuf,
    /// Extra environment variables layered over the inherited environment.
    pub envs: Vec<(OsString, OsString)>,
}

/// Spawns a process and waits for it.
///
/// This allows tests to observe or fake process creation.
pub trait ProcessRunner: Send + Sync + fmt::Debug {
    /// Starts `invocation`, blocks until it exits and returns the captured
    /// stdout/stderr/exit status.
    fn run(&self, invocation: &Invocation) -> io::Result<Output>;
}

/// Default implementation of [`ProcessRunner`] using `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<Output> {
        Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k, v)))
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
    }
}

/// Runs commands after checking that their binary exists.
///
/// `Executor` holds no per-call state and can be shared between threads.
#[derive(Debug)]
pub struct Executor {
    search_path: Option<OsString>,
    envs: Vec<(OsString, OsString)>,
    runner: Box<dyn ProcessRunner>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    /// Creates an executor that searches the process `PATH` and spawns real
    /// processes.
    pub fn new() -> Self {
        Self {
            search_path: None,
            envs: Vec::new(),
            runner: Box::new(SystemRunner),
        }
    }

    /// Resolves binaries against `search_path` (a `PATH`-style list)
    /// instead of the process environment.
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    /// Adds an environment variable for every spawned child.
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Replaces the spawn mechanism (useful for testing).
    pub fn with_runner(mut self, runner: Box<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Resolves `name` the way [`run`](Self::run) does before spawning.
    ///
    /// Relative names containing a path separator are resolved against
    /// `working_dir`, matching where the child would look for them. The
    /// result is always absolute, so it stays valid once the child has
    /// changed into `working_dir`.
    pub fn resolve(&self, name: &str, working_dir: &Path) -> Result<PathBuf> {
        let search_path = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"))
            .unwrap_or_default();
        let resolved = is_system_binary_in(name, search_path, working_dir)?;
        std::path::absolute(&resolved).map_err(|source| Error::Io {
            path: resolved,
            source,
        })
    }

    /// Runs `command` in `working_dir` and returns its standard output split
    /// into lines.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] if `command` is empty.
    /// * [`Error::InvalidBinary`] if `command[0]` does not resolve. Nothing is spawned.
    /// * [`Error::InvalidPath`] if `working_dir` is not a directory. Nothing is spawned.
    /// * [`Error::Spawn`] if the operating system fails to start the process.
    /// * [`Error::ProcessExecution`] if the process exits unsuccessfully.
    pub fn run<S: AsRef<str>>(
        &self,
        command: &[S],
        working_dir: impl AsRef<Path>,
    ) -> Result<Vec<String>> {
        let working_dir = working_dir.as_ref();
        let (name, args) = command
            .split_first()
            .ok_or_else(|| Error::InvalidArgument("command must not be empty".into()))?;
        let name = name.as_ref();
        let command_line = join_command(command);

        let program = match self.resolve(name, working_dir) {
            Ok(program) => program,
            Err(e) => {
                warn!("Refusing to run `{}`: {}", command_line, e);
                return Err(e);
            }
        };

        if !working_dir.is_dir() {
            let err = Error::invalid_path(
                working_dir,
                "working directory does not exist or is not a directory",
            );
            warn!("Refusing to run `{}`: {}", command_line, err);
            return Err(err);
        }

        let invocation = Invocation {
            program,
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
            working_dir: working_dir.to_path_buf(),
            envs: self.envs.clone(),
        };

        debug!(
            "Running `{}` as {:?} in {:?}",
            command_line, invocation.program, invocation.working_dir
        );

        let output = self
            .runner
            .run(&invocation)
            .map_err(|source| Error::Spawn {
                command: command_line.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            let err = Error::ProcessExecution {
                command: command_line,
                code: output.status.code(),
                stdout: stdout.into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            };
            warn!("{}", err);
            return Err(err);
        }

        let lines: Vec<String> = stdout.lines().map(str::to_string).collect();
        info!("`{}` succeeded with {} lines of output", command_line, lines.len());
        Ok(lines)
    }
}

/// Runs `command` in `working_dir` with a default [`Executor`].
///
/// See [`Executor::run`] for the failure modes.
pub fn check_output_cwd<S: AsRef<str>>(
    command: &[S],
    working_dir: impl AsRef<Path>,
) -> Result<Vec<String>> {
    Executor::new().run(command, working_dir)
}

fn join_command<S: AsRef<str>>(command: &[S]) -> String {
    command
        .iter()
        .map(|part| part.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}
