//! sqlbench - IMDb SQL practice workbench and movie suggestor
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::info;

use sqlbench_api::HttpGateway;
use sqlbench_app::config::{
    apply_env_overrides, apply_overrides, default_config_path, endpoints_from, load_settings,
    ConfigOverrides, Settings,
};

/// sqlbench - practice SQL against IMDb data and browse movie suggestions
#[derive(Parser, Debug)]
#[command(name = "sqlbench")]
#[command(about = "Session controller for an IMDb SQL practice workbench", long_about = None)]
struct Args {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Practice backend base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Suggestor backend base URL
    #[arg(long, value_name = "URL")]
    suggestor_url: Option<String>,

    /// Probe both backends and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    sqlbench_core::logging::init()?;

    let mut settings = match args.config.or_else(default_config_path) {
        Some(path) => load_settings(&path),
        None => Settings::default(),
    };
    apply_env_overrides(&mut settings);
    apply_overrides(
        &mut settings,
        &ConfigOverrides {
            api_url: args.api_url,
            suggestor_url: args.suggestor_url,
        },
    );

    let endpoints = endpoints_from(&settings)?;
    let gateway = HttpGateway::new(endpoints, settings.api.request_timeout())?;

    if args.check {
        let statuses = sqlbench::check_backends(&gateway).await;
        let mut healthy = true;
        for status in &statuses {
            match &status.result {
                Ok(reported) => eprintln!("{}: {}", status.backend, reported),
                Err(e) => eprintln!("{}: unreachable ({})", status.backend, e),
            }
            healthy &= status.is_ok();
        }
        return if healthy {
            info!("All backends healthy");
            Ok(())
        } else {
            Err(eyre!("One or more backends are unhealthy"))
        };
    }

    sqlbench::run_headless(settings, gateway).await?;
    Ok(())
}
