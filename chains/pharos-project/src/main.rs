use pharos_project::batch::{AccountStatus, BatchReport, BatchRunner};
use pharos_project::chain::{build_provider, fetch_chain_id, EvmClientFactory};
use pharos_project::config::{parse_times, PharosConfig};

use anyhow::{Context, Result};
use clap::Parser;
use core_logic::{setup_logger, TokioPacer, WalletLoader, WalletManager, PROGRESS_TARGET};
use dialoguer::{theme::ColorfulTheme, Input};
use dotenv::dotenv;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "chains/pharos-project/config.toml")]
    config: String,
    /// Supply cycles per wallet; prompted for when omitted
    #[arg(short, long)]
    times: Option<String>,
    /// Write the batch report as JSON to this path
    #[arg(short, long)]
    report: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Held until main returns so the file writer flushes
    let _log_guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    info!("Loading config from: {}", args.config);
    let config = PharosConfig::load(&args.config)?;
    config.validate()?;
    let settings = config.workflow_settings()?;

    let keys = WalletManager::from_env().load_wallets().await?;
    info!(target: PROGRESS_TARGET, "Found {} accounts", keys.len());

    let raw_times = match args.times {
        Some(t) => t,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Supply Tx count?(type 50 if this is first time)")
            .interact_text()
            .context("Failed to read supply count")?,
    };

    let times = match parse_times(&raw_times) {
        Ok(t) => t,
        Err(e) => {
            error!("Please enter a valid positive number.");
            warn!("Rejected supply count {:?}: {}", raw_times, e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let provider = build_provider(&config.chain.rpc_endpoint, config.rpc_timeout())?;
    let chain_id = match config.chain.chain_id {
        Some(id) => id,
        None => fetch_chain_id(&provider, config.retry).await?,
    };
    info!("Connected to {} (chain ID {})", config.chain.name, chain_id);

    let factory = EvmClientFactory::new(provider, chain_id);
    let pacer = TokioPacer;
    let mut rng = StdRng::from_entropy();

    let report = BatchRunner::new(&factory, &settings, &pacer)
        .run(&keys, times, &mut rng)
        .await;

    print_summary(&report);

    if let Some(path) = args.report {
        match report.write_json(&path) {
            Ok(()) => info!(target: PROGRESS_TARGET, "Report written to {}", path),
            Err(e) => error!("Failed to write report: {:#}", e),
        }
    }

    info!(target: PROGRESS_TARGET, "All accounts processed");
    Ok(ExitCode::SUCCESS)
}

fn print_summary(report: &BatchReport) {
    for account in &report.accounts {
        match &account.status {
            AccountStatus::Completed(outcome) => info!(
                target: PROGRESS_TARGET,
                "Account {} {:?}: {} ok, {} failed, {}/{} cycles complete",
                account.index,
                outcome.address,
                outcome.succeeded(),
                outcome.failed(),
                outcome.cycles_completed,
                outcome.cycles_run
            ),
            AccountStatus::Failed { error } => info!(
                target: PROGRESS_TARGET,
                "Account {} skipped: {}",
                account.index,
                error
            ),
        }
    }
}
