//! Update check and config file commands.

use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::updater::{self, UpdateStatus};

/// Run the update check in the foreground and report the result
pub fn cmd_check_update(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    let status = rt.block_on(updater::check(&config.updates));

    match status {
        UpdateStatus::UpToDate => println!("✓ spotstream v{} is up to date", updater::CURRENT_VERSION),
        UpdateStatus::Outdated { latest } => {
            println!(
                "✗ spotstream v{} is out of date (latest: {})",
                updater::CURRENT_VERSION,
                latest
            );
        }
        UpdateStatus::Disabled => {
            println!("Update check is disabled");
            println!("  Unset {} and set [updates] check = true to enable it", updater::NO_UPDATE_ENV);
        }
        UpdateStatus::Failed(reason) => {
            anyhow::bail!("Update check failed: {}", reason);
        }
    }
    Ok(())
}

/// Print the config path, optionally writing a default file
pub fn cmd_config(init: bool) -> anyhow::Result<()> {
    let path = config::config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    println!("Config file: {}", path.display());

    if !init {
        if !path.exists() {
            println!("  (not created yet; run `spotstream config --init`)");
        }
        return Ok(());
    }

    if path.exists() {
        println!("  Already exists, leaving it untouched");
        return Ok(());
    }

    let written = config::save(&Config::default())?;
    println!("✓ Wrote default config to {}", written.display());
    Ok(())
}
