use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shopcheck_probe::{render_diagnostic, render_summary, verdict, DiagnosticOutcome, Prober};

#[derive(Debug, Parser)]
#[command(name = "shopcheck")]
#[command(about = "Check that a Shopify access token can run discount-code automation")]
struct Cli {
    /// Store identifier: a name, `name.myshopify.com`, or a custom domain
    shop_url: String,

    /// Admin API access token, sent verbatim
    access_token: String,

    /// Probe every endpoint across several API versions instead of running the check
    #[arg(long)]
    diagnostic: bool,

    /// Admin API version to try first, e.g. 2024-01
    #[arg(long, value_parser = parse_api_version)]
    api_version: Option<String>,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn parse_api_version(raw: &str) -> Result<String, String> {
    if shopcheck_core::is_valid_api_version(raw) {
        Ok(raw.to_owned())
    } else {
        Err(format!("\"{raw}\" is not a YYYY-MM release or \"unstable\""))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = shopcheck_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let api_version = cli.api_version.as_deref().unwrap_or(&config.api_version);
    let prober = Prober::from_config(&config, &cli.access_token)
        .context("failed to build Shopify HTTP client")?;

    tracing::info!(shop = %cli.shop_url, api_version, diagnostic = cli.diagnostic, "starting check");

    if cli.diagnostic {
        let report = prober.run_diagnostics(&cli.shop_url, api_version).await;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", render_diagnostic(&report));
        }
        return Ok(if report.summary.outcome == DiagnosticOutcome::NoAccess {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    let result = prober.check_integration(&cli.shop_url, api_version).await;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render_summary(&result));
    }

    Ok(if verdict(&result).passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
