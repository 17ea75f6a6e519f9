//! Local-development TLS certificate provisioning.
//!
//! [`provision`] makes sure a directory holds a self-signed RSA-4096
//! certificate and key, generating them with `openssl` on first use and
//! reading them back on every later call.

pub mod alt_names;
pub mod config;
pub mod error;
pub mod fs;
pub mod platform;
pub mod provision;
pub mod readme;
pub mod tool;

pub use alt_names::AltName;
pub use config::ProvisionRequest;
pub use error::ProvisioningError;
pub use fs::{FileSystem, OsFileSystem};
pub use platform::PlatformSupport;
pub use provision::{CertProvisioner, ProvisionResult, provision};
pub use tool::{CertificateTool, OpensslTool, ToolInvocation};
