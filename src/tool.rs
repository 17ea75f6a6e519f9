//! External certificate generation tool (OpenSSL).

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::alt_names::{AltName, join_alt_names};
use crate::error::ProvisioningError;

/// Environment variable overriding the OpenSSL executable.
pub const OPENSSL_ENV: &str = "DEVCERTS_OPENSSL";

const OPENSSL: &str = "openssl";

/// Everything the tool needs to produce one key/certificate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub name: String,
    pub validity_days: u32,
    pub alt_names: Vec<AltName>,
    pub key_file: PathBuf,
    pub cert_file: PathBuf,
}

impl ToolInvocation {
    /// `subjectAltName` extension value, e.g. `DNS:localhost,IP:127.0.0.1`.
    pub fn subject_alt_name(&self) -> String {
        join_alt_names(&self.alt_names)
    }

    /// OpenSSL `req` arguments: RSA-4096, self-signed, no passphrase, SHA-256.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "req",
            "-x509",
            "-newkey",
            "rsa:4096",
            "-nodes",
            "-sha256",
            "-days",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        args.push(self.validity_days.to_string().into());
        args.push("-subj".into());
        args.push(format!("/CN={}", self.name).into());
        args.push("-addext".into());
        args.push(format!("subjectAltName={}", self.subject_alt_name()).into());
        args.push("-keyout".into());
        args.push(self.key_file.clone().into_os_string());
        args.push("-out".into());
        args.push(self.cert_file.clone().into_os_string());
        args
    }
}

/// Something that can write a self-signed key and certificate to disk.
pub trait CertificateTool {
    fn generate(&self, invocation: &ToolInvocation) -> Result<(), ProvisioningError>;
}

impl<T: CertificateTool + ?Sized> CertificateTool for &T {
    fn generate(&self, invocation: &ToolInvocation) -> Result<(), ProvisioningError> {
        (**self).generate(invocation)
    }
}

/// Runs the `openssl` executable with inherited stdout/stderr.
#[derive(Debug, Clone, Default)]
pub struct OpensslTool {
    program: Option<PathBuf>,
}

impl OpensslTool {
    /// Resolve the executable at generation time: `DEVCERTS_OPENSSL`, then PATH.
    pub fn locate() -> Self {
        Self { program: None }
    }

    /// Use a specific executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn resolve_program(&self) -> Result<PathBuf, ProvisioningError> {
        if let Some(program) = &self.program {
            return Ok(program.clone());
        }
        if let Some(program) = env::var_os(OPENSSL_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(program));
        }
        which::which(OPENSSL).map_err(|_| ProvisioningError::ToolNotFound(OPENSSL.to_string()))
    }
}

impl CertificateTool for OpensslTool {
    fn generate(&self, invocation: &ToolInvocation) -> Result<(), ProvisioningError> {
        let program = self.resolve_program()?;
        let args = invocation.args();
        debug!("Running {} {:?}", program.display(), args);
        info!(
            "Generating RSA-4096 certificate for '{}' valid {} days",
            invocation.name, invocation.validity_days
        );

        let status = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ProvisioningError::ToolLaunch {
                program: program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ProvisioningError::ToolFailed {
                code: status.code(),
            })
        }
    }
}
