//! Error types for stevedore
//!
//! Uses `thiserror` for library errors. Every fatal deployment condition is a
//! variant here; actions abort on the first error and `main` reports it.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stevedore operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for stevedore operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// External program is not installed or not on PATH
    #[error("command not found: '{program}' - make sure it is installed and on PATH")]
    CommandNotFound { program: String },

    /// A required external command exited non-zero
    #[error("command failed ({status}): {command}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stdout: String,
        stderr: String,
    },

    /// Working copy directory is missing
    #[error("working copy not found at {path} - pull sources first")]
    MissingWorkingCopy { path: PathBuf },

    /// Compiler finished but the expected executable is not there
    #[error("compiled artifact not found at {path} after compile step")]
    MissingArtifact { path: PathBuf },

    /// Image build requested without a generated Dockerfile
    #[error("build descriptor not found at {path} - run the compile step first")]
    MissingDescriptor { path: PathBuf },

    /// Container engine probe failed for a reason other than "no such container"
    #[error("container engine unreachable: {message}")]
    DaemonUnreachable { message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
