//! tokenlife — runs the six-phase token lifecycle end to end.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use tokenlife_ledger::{LocalLedger, RetryPolicy, Retrying};
use tokenlife_lifecycle::{LifecycleConfig, LifecycleOrchestrator, Role, WalletConfig};
use tokenlife_utils::LogFormat;

/// Optional path to a TOML file with lifecycle overrides.
const CONFIG_VAR: &str = "TOKENLIFE_CONFIG";
/// Optional log output format: "human" (default) or "json".
const LOG_FORMAT_VAR: &str = "TOKENLIFE_LOG_FORMAT";
/// Native balance credited to each wallet on the in-process ledger.
const AIRDROP_LAMPORTS: u64 = 1_000_000_000;

#[derive(Parser)]
#[command(
    name = "tokenlife",
    version,
    about = "Create a token mint and drive it through genesis, growth, delegation, \
             a freeze cycle, delegated growth and finalization",
    after_help = "Environment:\n  \
        WALLET_A_SECRET_KEY  base58 secret of the initial mint authority\n  \
        WALLET_B_SECRET_KEY  base58 secret of the freeze authority\n  \
        WALLET_C_SECRET_KEY  base58 secret of the user wallet\n  \
        TOKENLIFE_CONFIG     optional TOML file with amount overrides\n  \
        TOKENLIFE_LOG_FORMAT human or json\n  \
        RUST_LOG             log filter (default: info)"
)]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let log_format = match std::env::var(LOG_FORMAT_VAR) {
        Ok(value) => value.parse::<LogFormat>().map_err(anyhow::Error::msg)?,
        Err(_) => LogFormat::default(),
    };
    tokenlife_utils::init_tracing_with_format(log_format);

    let wallets = WalletConfig::from_env().context("failed to load wallet secrets")?;
    let config = match std::env::var(CONFIG_VAR) {
        Ok(path) => {
            let config = LifecycleConfig::from_toml_file(&path)?;
            tracing::info!(%path, "loaded lifecycle config");
            config
        }
        Err(_) => LifecycleConfig::default(),
    };
    tracing::info!(?config, "starting token lifecycle");

    let ledger = Arc::new(LocalLedger::default());
    for role in [Role::AuthorityA, Role::AuthorityB, Role::User] {
        ledger.airdrop(&wallets.identity(role), AIRDROP_LAMPORTS);
    }
    let client = Retrying::new(Arc::clone(&ledger), RetryPolicy::default());

    let mut orchestrator = LifecycleOrchestrator::new(client, config, wallets)?;
    let started = Instant::now();
    let report = orchestrator.run().await?;

    tracing::info!(
        elapsed = %tokenlife_utils::format_duration(started.elapsed()),
        team = %report.team_balance.to_ui_string(report.decimals),
        user = %report.user_balance.to_ui_string(report.decimals),
        mint_authority = %report.mint_authority,
        freeze_authority = %report.freeze_authority,
        "final state"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
