//! Fetch command: run the acquisition workflow

use anyhow::Result;
use pixseed_catalog::AssetCatalog;
use pixseed_gen::providers::build_chain;
use pixseed_gen::PixseedConfig;
use std::path::Path;

pub fn run(
    catalog_path: Option<&str>,
    output_dir: Option<&str>,
    providers_arg: Option<&str>,
) -> Result<()> {
    let config = PixseedConfig::load()?;

    let catalog = match catalog_path {
        Some(path) => AssetCatalog::load_from_file(path)?,
        None => AssetCatalog::builtin(),
    };

    let names: Vec<String> = match providers_arg {
        Some(arg) => arg.split(',').map(|p| p.trim().to_string()).collect(),
        None => config.fallback_order().to_vec(),
    };

    // Providers with missing credentials are reported here, before any
    // network activity, and skipped for the whole run
    let (chain, skipped) = build_chain(&names, &config);
    for (name, reason) in &skipped {
        eprintln!("Skipping provider '{}': {}", name, reason);
    }
    if chain.is_empty() {
        anyhow::bail!("No usable providers in fallback order: {}", names.join(", "));
    }

    let out_dir = output_dir.unwrap_or_else(|| config.output_dir());

    // Partial failure is reported in the summary but never changes the
    // exit code; re-running retries only the missing files
    pixseed_gen::run(&catalog, &chain, Path::new(out_dir));
    Ok(())
}
