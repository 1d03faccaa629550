//! CLI command implementations

pub mod accounts;
pub mod config;
pub mod logs;
pub mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use teller_core::{EntryPoint, TellerContext};

/// Get the teller directory from environment or default
pub fn get_teller_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TELLER_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".teller"))
}

/// Create the teller directory if needed and return it
pub fn ensure_teller_dir() -> Result<PathBuf> {
    let teller_dir = get_teller_dir()?;
    std::fs::create_dir_all(&teller_dir)
        .with_context(|| format!("Failed to create teller directory: {:?}", teller_dir))?;
    Ok(teller_dir)
}

/// Load settings and bootstrap the demo branch
pub fn get_context() -> Result<TellerContext> {
    let teller_dir = ensure_teller_dir()?;
    TellerContext::new(&teller_dir, EntryPoint::Cli).context("Failed to initialize teller context")
}
