use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Self Signed Cert";
pub const DEFAULT_OUT_DIR: &str = "./selfSignedCerts";
pub const DEFAULT_VALIDITY_DAYS: u32 = 365;
pub const DEFAULT_PROJECT_URL: &str = "https://localhost:8080";

/// Input for a single provisioning call.
///
/// Every field has a default, so an empty TOML table (or `ProvisionRequest::default()`)
/// is a complete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProvisionRequest {
    /// Certificate subject common name, also used in the generated readme.
    pub name: String,
    /// Directory holding the artifacts; resolved to an absolute path before use.
    #[serde(alias = "outputDirectory")]
    pub out_dir: PathBuf,
    #[serde(alias = "days")]
    pub validity_days: u32,
    /// Appended after the built-in localhost entries, in order.
    pub extra_alt_names: Vec<String>,
    pub project_url: String,
}

impl Default for ProvisionRequest {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            validity_days: DEFAULT_VALIDITY_DAYS,
            extra_alt_names: Vec::new(),
            project_url: DEFAULT_PROJECT_URL.to_string(),
        }
    }
}

impl ProvisionRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Load a request from a TOML file; absent keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn validity_days(mut self, days: u32) -> Self {
        self.validity_days = days;
        self
    }

    pub fn alt_name(mut self, alt_name: impl Into<String>) -> Self {
        self.extra_alt_names.push(alt_name.into());
        self
    }

    pub fn project_url(mut self, url: impl Into<String>) -> Self {
        self.project_url = url.into();
        self
    }

    /// Absolute output directory, relative paths taken from the current directory.
    pub fn resolved_out_dir(&self) -> std::io::Result<PathBuf> {
        std::path::absolute(&self.out_dir)
    }
}
