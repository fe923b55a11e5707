//! Story Spoiler API acceptance suite - command line runner.

mod cli;
mod report;

use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use spoiler_application::StorySuite;
use spoiler_domain::SuiteReport;
use spoiler_infrastructure::{ReqwestHttpClient, SuiteConfig, TestRunner};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

/// Exit status when configuration or login fails before any step runs.
const SETUP_FAILURE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.list {
        print!("{}", report::render_steps());
        return Ok(ExitCode::SUCCESS);
    }

    let config = match SuiteConfig::load().and_then(|config| cli.apply(config)) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return Ok(ExitCode::from(SETUP_FAILURE));
        }
    };

    let report = match run(&cli, &config).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "suite setup failed");
            return Ok(ExitCode::from(SETUP_FAILURE));
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render(&report, config.base_url.as_str()));
    }

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(cli: &Cli, config: &SuiteConfig) -> Result<SuiteReport, Box<dyn Error>> {
    info!(
        base_url = %config.base_url,
        username = %config.credentials.username,
        "starting Story Spoiler suite v{}",
        env!("CARGO_PKG_VERSION")
    );

    let routes = config.routes()?;
    let client = Arc::new(ReqwestHttpClient::new()?);
    let suite = StorySuite::new(client, TestRunner::new(), routes, config.credentials.clone());

    Ok(suite.run(&cli.selection()).await?)
}
