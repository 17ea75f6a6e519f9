//! Ensure a self-signed certificate exists in a directory, generating it once.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::alt_names::build_alt_names;
use crate::config::ProvisionRequest;
use crate::error::ProvisioningError;
use crate::fs::{FileSystem, OsFileSystem};
use crate::platform::PlatformSupport;
use crate::readme;
use crate::tool::{CertificateTool, OpensslTool, ToolInvocation};

pub const GITIGNORE_FILE: &str = ".gitignore";
pub const KEY_FILE: &str = "selfsigned.key";
pub const CERT_FILE: &str = "selfsigned.crt";
pub const README_FILE: &str = "readme.md";

const GITIGNORE_CONTENTS: &str = "**";

/// Paths and PEM contents of a provisioned certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionResult {
    pub out_dir: PathBuf,
    pub key_file_path: PathBuf,
    pub cert_file_path: PathBuf,
    pub key_contents: String,
    pub cert_contents: String,
}

/// Provisions certificates through an injected filesystem and tool.
#[derive(Debug)]
pub struct CertProvisioner<F = OsFileSystem, T = OpensslTool> {
    fs: F,
    tool: T,
    platform: PlatformSupport,
}

impl CertProvisioner {
    /// Host disk, `openssl` from PATH, and the compiled platform.
    pub fn system() -> Self {
        Self::new(OsFileSystem, OpensslTool::locate(), PlatformSupport::detect())
    }
}

impl<F: FileSystem, T: CertificateTool> CertProvisioner<F, T> {
    pub fn new(fs: F, tool: T, platform: PlatformSupport) -> Self {
        Self { fs, tool, platform }
    }

    /// Return the certificate in `request.out_dir`, generating it if the
    /// directory does not exist yet.
    ///
    /// Returns `Ok(None)` on an unsupported platform. In that case the new
    /// directory is kept with only its `.gitignore`. Any error after the
    /// directory was created removes it before being returned.
    pub fn provision(
        &self,
        request: &ProvisionRequest,
    ) -> Result<Option<ProvisionResult>, ProvisioningError> {
        let out_dir = request
            .resolved_out_dir()
            .map_err(|e| ProvisioningError::fs(&request.out_dir, e))?;

        if self.fs.is_dir(&out_dir) {
            debug!("Reusing certificate in {}", out_dir.display());
            return self.read_back(&out_dir).map(Some);
        }

        self.fs.create_dir_all(&out_dir)?;

        let outcome = self.generate(request, &out_dir);
        if outcome.is_err() {
            if let Err(cleanup) = self.fs.remove_dir_all(&out_dir) {
                warn!("Failed to clean up {}: {cleanup}", out_dir.display());
            }
        }
        outcome
    }

    fn generate(
        &self,
        request: &ProvisionRequest,
        out_dir: &Path,
    ) -> Result<Option<ProvisionResult>, ProvisioningError> {
        self.fs.write(&out_dir.join(GITIGNORE_FILE), GITIGNORE_CONTENTS)?;

        if let PlatformSupport::Unsupported { os } = self.platform {
            warn!("Self-signed certificate generation is not supported on {os}");
            return Ok(None);
        }

        let invocation = ToolInvocation {
            name: request.name.clone(),
            validity_days: request.validity_days,
            alt_names: build_alt_names(&request.extra_alt_names)?,
            key_file: out_dir.join(KEY_FILE),
            cert_file: out_dir.join(CERT_FILE),
        };
        self.tool.generate(&invocation)?;
        self.fs.restrict_to_owner(&invocation.key_file)?;

        self.fs.write(
            &out_dir.join(README_FILE),
            &readme::render(&request.name, &request.project_url),
        )?;

        let result = self.read_back(out_dir)?;
        info!("Self-signed certificate written to {}", out_dir.display());
        Ok(Some(result))
    }

    fn read_back(&self, out_dir: &Path) -> Result<ProvisionResult, ProvisioningError> {
        let key_file_path = out_dir.join(KEY_FILE);
        let cert_file_path = out_dir.join(CERT_FILE);
        let key_contents = self.fs.read_to_string(&key_file_path)?;
        let cert_contents = self.fs.read_to_string(&cert_file_path)?;
        Ok(ProvisionResult {
            out_dir: out_dir.to_path_buf(),
            key_file_path,
            cert_file_path,
            key_contents,
            cert_contents,
        })
    }
}

/// [`CertProvisioner::provision`] against the host system.
pub fn provision(request: &ProvisionRequest) -> Result<Option<ProvisionResult>, ProvisioningError> {
    CertProvisioner::system().provision(request)
}
