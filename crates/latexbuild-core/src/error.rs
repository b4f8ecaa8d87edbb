//! Error type shared by every latexbuild operation.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while validating inputs or running a command.
///
/// The two command-execution failures are separate variants:
/// [`Error::InvalidBinary`] is raised before anything is spawned, while
/// [`Error::ProcessExecution`] means the program ran and exited non-zero.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument failed a type or range check.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The executable name does not resolve on the search path.
    #[error("{name} is not a valid system binary")]
    InvalidBinary { name: String },

    /// The process was spawned but exited unsuccessfully.
    #[error("command `{command}` failed with {}", describe_code(.code))]
    ProcessExecution {
        command: String,
        /// `None` when the process was terminated by a signal.
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The path does not exist or is not a directory.
    #[error("{}: {reason}", .path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// The file extension is not the one required.
    #[error("the extension for {}, which is {found:?}, does not equal {expected:?}", .path.display())]
    ExtensionMismatch {
        path: PathBuf,
        found: String,
        expected: String,
    },

    /// The binary resolved but the operating system refused to start it.
    #[error("failed to spawn `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation failed.
    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl Error {
    /// True for [`Error::InvalidBinary`].
    pub fn is_invalid_binary(&self) -> bool {
        matches!(self, Error::InvalidBinary { .. })
    }

    /// True for [`Error::ProcessExecution`].
    pub fn is_process_execution(&self) -> bool {
        matches!(self, Error::ProcessExecution { .. })
    }

    /// Exit code of a failed process, if this error carries one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::ProcessExecution { code, .. } => *code,
            _ => None,
        }
    }

    pub(crate) fn invalid_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_execution_message_names_exit_code() {
        let err = Error::ProcessExecution {
            command: "pdflatex main.tex".into(),
            code: Some(1),
            stdout: String::new(),
            stderr: "! Emergency stop.".into(),
        };
        assert_eq!(
            err.to_string(),
            "command `pdflatex main.tex` failed with exit code 1"
        );
        assert_eq!(err.exit_code(), Some(1));
        assert!(err.is_process_execution());
        assert!(!err.is_invalid_binary());
    }

    #[test]
    fn test_signal_termination_message() {
        let err = Error::ProcessExecution {
            command: "latexmk".into(),
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
        assert_eq!(err.exit_code(), None);
    }

    #[test]
    fn test_invalid_binary_message() {
        let err = Error::InvalidBinary {
            name: "fjadklsjfkldsjf".into(),
        };
        assert_eq!(err.to_string(), "fjadklsjfkldsjf is not a valid system binary");
        assert!(err.is_invalid_binary());
    }
}
