use clap::Parser;
use log::error;
use pwshup::config::Config;
use pwshup::installer::{Installer, Outcome};
use pwshup::runtime::RealRuntime;
use std::io::Write;

/// pwshup - PowerShell installer for Linux
///
/// Installs the latest stable PowerShell release from GitHub using the
/// system package manager (apt on Ubuntu/Debian, dnf on RHEL/CentOS/Fedora).
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// Set RUST_LOG=debug for detailed progress.
#[derive(Parser, Debug)]
#[command(author, version = env!("PWSHUP_VERSION"), about)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .init();
    let _cli = Cli::parse();

    match run().await {
        Ok(Outcome::Installed { .. }) | Ok(Outcome::Cancelled) => {}
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<Outcome> {
    let runtime = RealRuntime;
    let config = Config::new(&runtime)?;
    let provider = config.provider();
    Installer::new(runtime, provider, &config).run().await
}
