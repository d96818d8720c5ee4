pub mod adapter;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ledger;
pub mod platform;
pub mod translate;

pub use adapter::Adapter;
pub use error::{Error, Result};
pub use ledger::{IdentityLedger, IdentityRecord, LedgerError};
pub use platform::{LegacyPlatform, PlatformError};

pub async fn run(cfg: config::Config) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;
    let level = match cfg.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();

    let db_path = cfg.db_path()?;
    if cfg.wipe {
        wipe(&db_path)
    } else if cfg.list {
        list(&db_path).await
    } else {
        anyhow::bail!("nothing to do: pass --list or --wipe")
    }
}

/// Print every registered identity as one JSON object per line.
pub async fn list(db_path: &std::path::Path) -> anyhow::Result<()> {
    diagnostics::check(db_path)?;

    let ledger = IdentityLedger::new(db_path);
    let entries = ledger
        .get_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read identity ledger: {e}"))?;
    tracing::info!(count = entries.len(), path = %db_path.display(), "Identity ledger loaded");

    for entry in entries {
        println!("{}", serde_json::to_string(&entry.record)?);
    }
    Ok(())
}

/// Remove the ledger database. The library itself never deletes identities;
/// this is the administrative way to do it.
pub fn wipe(db_path: &std::path::Path) -> anyhow::Result<()> {
    let mut count = 0usize;
    for suffix in ["", "-journal", "-wal", "-shm"] {
        let mut name = db_path.as_os_str().to_owned();
        name.push(suffix);
        let path = std::path::PathBuf::from(name);
        if path.exists() {
            std::fs::remove_file(&path)?;
            count += 1;
        }
    }
    println!("Deleted {count} file(s) for identity ledger {}", db_path.display());
    Ok(())
}
