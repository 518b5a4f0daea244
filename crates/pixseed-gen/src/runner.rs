//! Acquisition runner
//!
//! Drives the catalog through the orchestrator sequentially, in catalog
//! order, and reports a summary. One asset is fully resolved (including
//! any fallback and polling) before the next begins; a single asset's
//! failure never aborts the run.

use crate::orchestrator::{resolve, AcquisitionResult, Outcome};
use crate::provider::AcquireProvider;
use pixseed_catalog::AssetCatalog;
use std::io::Write;
use std::path::Path;

/// Per-run accounting
#[derive(Debug)]
pub struct RunSummary {
    pub results: Vec<AcquisitionResult>,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Ids of assets that ended the run failed
    pub fn failed_ids(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Failed { .. }))
            .map(|r| r.id.as_str())
            .collect()
    }
}

/// Render the terminal outcome for one asset, with the content digest
/// on success so runs can be compared
fn outcome_line(result: &AcquisitionResult) -> String {
    match &result.outcome {
        Outcome::Success { provider } => match &result.content_hash {
            Some(hash) => format!("acquired via {} ({})", provider, hash),
            None => format!("acquired via {}", provider),
        },
        Outcome::SkippedExisting => "exists, skipped".to_string(),
        Outcome::Failed { error } => format!("FAILED: {}", error),
    }
}

/// Run the acquisition workflow over the whole catalog
pub fn run(
    catalog: &AssetCatalog,
    providers: &[Box<dyn AcquireProvider>],
    output_dir: &Path,
) -> RunSummary {
    println!(
        "Acquiring {} assets into {}",
        catalog.len(),
        output_dir.display()
    );

    let mut results = Vec::with_capacity(catalog.len());
    let mut succeeded = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for asset_spec in catalog.iter() {
        print!(
            "  {} ({}x{})  -> ",
            asset_spec.id, asset_spec.width, asset_spec.height
        );
        // The partial line must be visible while resolve is in flight;
        // a slow provider (network, polling) can hold it for minutes
        let _ = std::io::stdout().flush();

        let result = resolve(asset_spec, providers, output_dir);
        println!("{}", outcome_line(&result));
        match &result.outcome {
            Outcome::Success { .. } => succeeded += 1,
            Outcome::SkippedExisting => skipped += 1,
            Outcome::Failed { .. } => failed += 1,
        }
        results.push(result);
    }

    let summary = RunSummary {
        results,
        succeeded,
        skipped,
        failed,
    };

    println!(
        "\nDone: {} acquired, {} skipped, {} failed ({} total)",
        summary.succeeded,
        summary.skipped,
        summary.failed,
        catalog.len()
    );
    if summary.failed > 0 {
        println!("Failed assets: {}", summary.failed_ids().join(", "));
        println!("Re-running will retry only the missing files.");
    }

    summary
}
