mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use devcerts::{CertProvisioner, OpensslTool, OsFileSystem, PlatformSupport};
use log::error;

fn main() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = real_main() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let args = cli::Args::parse();
    let request = args.request()?;

    let tool = match &args.openssl {
        Some(program) => OpensslTool::with_program(program),
        None => OpensslTool::locate(),
    };
    let provisioner = CertProvisioner::new(OsFileSystem, tool, PlatformSupport::detect());

    let Some(result) = provisioner
        .provision(&request)
        .context("Failed to provision self-signed certificate")?
    else {
        return Ok(());
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{json}");
    } else {
        println!("{}", result.out_dir.display());
    }
    Ok(())
}
