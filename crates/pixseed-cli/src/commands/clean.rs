//! Clean command: remove zero-byte leftovers
//!
//! A run killed mid-write can leave a truncated or empty file behind,
//! which the idempotent skip would then treat as complete. Removing
//! empty files makes the next fetch retry them.

use anyhow::Result;
use pixseed_gen::PixseedConfig;
use std::path::Path;

pub fn run(output_dir: Option<&str>) -> Result<()> {
    let config = PixseedConfig::load()?;
    let dir = output_dir.unwrap_or_else(|| config.output_dir());
    let dir = Path::new(dir);

    if !dir.exists() {
        println!("Nothing to clean: {} does not exist", dir.display());
        return Ok(());
    }

    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && entry.metadata()?.len() == 0 {
            std::fs::remove_file(&path)?;
            println!("  removed empty file {}", path.display());
            removed += 1;
        }
    }

    println!("Cleaned {} file(s) from {}", removed, dir.display());
    Ok(())
}
