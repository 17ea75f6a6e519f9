//! Error types for certificate provisioning.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`crate::CertProvisioner::provision`].
///
/// Every variant raised after the output directory was created is reported
/// only once that directory has been removed again.
#[derive(Error, Debug)]
pub enum ProvisioningError {
    /// The certificate tool ran but exited unsuccessfully.
    /// `code` is `None` when the process was terminated by a signal.
    #[error("certificate tool exited with {}", display_code(.code))]
    ToolFailed { code: Option<i32> },

    /// The certificate tool could not be started at all.
    #[error("failed to launch certificate tool {}: {source}", .program.display())]
    ToolLaunch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No executable was configured and none was found on PATH.
    #[error("certificate tool `{0}` was not found on PATH")]
    ToolNotFound(String),

    /// Directory or file I/O failed at `path`.
    #[error("filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An extra alt name is malformed or has an unknown type prefix.
    #[error("invalid subject alternative name `{0}`")]
    InvalidAltName(String),
}

impl ProvisioningError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
