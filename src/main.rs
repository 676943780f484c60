use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use wallet_session::{
    FileStore, MockWalletFixture, SessionConfig, StaticRegistry, WalletHandle, WalletSession,
};

const USAGE: &str = "usage: wallet-session [status | connect <wallet> | disconnect <wallet> | select <wallet> <index>]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    // Set RUST_LOG=debug to trace refresh passes and subscriptions
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SessionConfig::from_env();

    // Wallets come from a fixture file; WALLET_FIXTURES=path/to/wallets.json
    let fixtures_path = env::var("WALLET_FIXTURES")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("wallets.json"));
    let registry = Arc::new(StaticRegistry::new(load_fixtures(&fixtures_path)?));

    let store = Arc::new(FileStore::new(config.store_dir.clone()));
    log::info!("Connection store: {:?}", store.base_dir());

    let (session, controller) = WalletSession::new(config, registry, store);
    // One command per run, so change events are never rendered here
    drop(controller);

    let report = session.initialize().await;
    if let Some(outcome) = &report.reconnect {
        log::info!("Startup reconnect: {:?}", outcome);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["status"] => {}
        ["connect", wallet] => session.connect(wallet).await?,
        ["disconnect", wallet] => session.disconnect(wallet).await?,
        ["select", wallet, index] => {
            let index: u32 = index
                .parse()
                .with_context(|| format!("invalid account index '{}'", index))?;
            if !session.select_account(wallet, index).await? {
                log::warn!("'{}' has no account #{}", wallet, index);
            }
        }
        _ => bail!(USAGE),
    }

    let views = session.refresh().await.views;
    println!("{}", serde_json::to_string_pretty(&views)?);

    session.shutdown();
    Ok(())
}

fn load_fixtures(path: &Path) -> anyhow::Result<Vec<Arc<dyn WalletHandle>>> {
    if !path.exists() {
        log::warn!("No wallet fixtures at {:?}, starting with an empty registry", path);
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {:?}", path))?;
    let fixtures: Vec<MockWalletFixture> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse wallet fixtures in {:?}", path))?;

    Ok(fixtures
        .into_iter()
        .map(|fixture| Arc::new(fixture.into_wallet()) as Arc<dyn WalletHandle>)
        .collect())
}
