//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `inventory_core` linkage and print the version.
//! - Open the store configured by `INVENTORY_DB_PATH` and print every item
//!   as one JSON line.
//! - `seed` inserts the demo items when they are missing.
//! - Logs to `INVENTORY_LOG_DIR` when it is set.

use inventory_core::{Item, ItemStore, RepoError, StoreConfig, StoreError};
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "INVENTORY_LOG_DIR";

#[tokio::main]
async fn main() -> ExitCode {
    println!("inventory_core ping={}", inventory_core::ping());
    println!("inventory_core version={}", inventory_core::core_version());

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = inventory_core::init_logging(inventory_core::default_log_level(), log_dir)
        {
            eprintln!("inventory_cli warning: logging disabled: {err}");
        }
    }

    let seed = std::env::args().skip(1).any(|arg| arg == "seed");
    match run(StoreConfig::from_env(), seed).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("inventory_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: StoreConfig, seed: bool) -> Result<(), StoreError> {
    let store = ItemStore::open(config).await?;

    if seed {
        for item in demo_items() {
            match store.insert(&item).await {
                Ok(()) | Err(StoreError::Repo(RepoError::DuplicateId(_))) => {}
                Err(err) => return Err(err),
            }
        }
    }

    for item in store.get_all_items().first().await? {
        match serde_json::to_string(&item) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("inventory_cli error: cannot render item {}: {err}", item.id),
        }
    }

    if let Err(err) = store.close().await {
        log::warn!("event=cli_close module=cli status=error error={err}");
    }
    Ok(())
}

fn demo_items() -> [Item; 2] {
    [
        Item::new(1, "Apples", 10.0, 20),
        Item::new(2, "Bananas", 15.0, 97),
    ]
}
