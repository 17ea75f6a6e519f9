use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use devcerts::ProvisionRequest;

#[derive(Parser, Debug)]
#[command(version, about = "Create a self-signed TLS certificate for local HTTPS development")]
pub struct Args {
    /// Certificate subject name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Output directory (default ./selfSignedCerts)
    #[arg(long = "outDir", short = 'o', visible_alias = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Validity period in days
    #[arg(long)]
    pub days: Option<u32>,

    /// Extra subjectAltName entry, e.g. DNS:app.test or IP:10.0.0.2 (repeatable)
    #[arg(long = "alt-name", short = 'a')]
    pub alt_names: Vec<String>,

    /// URL of the project served with this certificate, used in readme.md
    #[arg(long)]
    pub project_url: Option<String>,

    /// TOML file with request defaults; flags take precedence
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Path to the openssl executable (also DEVCERTS_OPENSSL)
    #[arg(long)]
    pub openssl: Option<PathBuf>,

    /// Print the full result as JSON instead of the output directory
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Merge the optional config file with command-line flags.
    pub fn request(&self) -> Result<ProvisionRequest> {
        let mut request = match &self.config {
            Some(path) => ProvisionRequest::from_toml_file(path)?,
            None => ProvisionRequest::default(),
        };
        if let Some(name) = &self.name {
            request.name = name.clone();
        }
        if let Some(dir) = &self.out_dir {
            request.out_dir = dir.clone();
        }
        if let Some(days) = self.days {
            request.validity_days = days;
        }
        if let Some(url) = &self.project_url {
            request.project_url = url.clone();
        }
        request.extra_alt_names.extend(self.alt_names.iter().cloned());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_flags_parse() {
        let args = Args::try_parse_from([
            "devcerts", "-n", "Test", "--outDir", "./tmpcerts", "--days", "30",
        ])
        .unwrap();
        let req = args.request().unwrap();
        assert_eq!(req.name, "Test");
        assert_eq!(req.out_dir, PathBuf::from("./tmpcerts"));
        assert_eq!(req.validity_days, 30);
    }

    #[test]
    fn short_out_dir_and_alias() {
        let args = Args::try_parse_from(["devcerts", "-o", "a"]).unwrap();
        assert_eq!(args.out_dir, Some(PathBuf::from("a")));
        let args = Args::try_parse_from(["devcerts", "--out-dir", "b"]).unwrap();
        assert_eq!(args.out_dir, Some(PathBuf::from("b")));
    }

    #[test]
    fn non_numeric_days_is_rejected() {
        assert!(Args::try_parse_from(["devcerts", "--days", "soon"]).is_err());
    }

    #[test]
    fn no_flags_means_defaults() {
        let args = Args::try_parse_from(["devcerts"]).unwrap();
        assert_eq!(args.request().unwrap(), ProvisionRequest::default());
    }

    #[test]
    fn flags_override_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("devcerts.toml");
        std::fs::write(
            &path,
            "name = \"From File\"\nvalidityDays = 90\nextraAltNames = [\"DNS:file.test\"]\n",
        )
        .unwrap();

        let args = Args::try_parse_from([
            "devcerts",
            "-c",
            path.to_str().unwrap(),
            "--days",
            "7",
            "-a",
            "DNS:flag.test",
        ])
        .unwrap();
        let req = args.request().unwrap();
        assert_eq!(req.name, "From File");
        assert_eq!(req.validity_days, 7);
        assert_eq!(req.extra_alt_names, ["DNS:file.test", "DNS:flag.test"]);
    }
}
