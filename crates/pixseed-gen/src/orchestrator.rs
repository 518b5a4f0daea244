//! Fallback orchestration for a single asset
//!
//! Resolves one `AssetSpec` against an ordered provider chain: skip if
//! the output file already exists, otherwise try each provider in turn
//! and write the first successful payload to disk. Provider errors are
//! logged and recovered by falling through; only exhausting the chain
//! (or failing to write the file) yields a failed result.

use crate::provider::AcquireProvider;
use pixseed_catalog::AssetSpec;
use pixseed_core::ContentHash;
use std::path::Path;

/// Terminal outcome for one asset in one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Bytes acquired and written; names the winning provider
    Success { provider: String },
    /// Output file already existed; no provider was consulted
    SkippedExisting,
    /// Every provider failed, or the write failed
    Failed { error: String },
}

/// Result of resolving one asset
#[derive(Debug, Clone)]
pub struct AcquisitionResult {
    pub id: String,
    pub outcome: Outcome,
    /// Digest of the written file on success
    pub content_hash: Option<ContentHash>,
}

impl AcquisitionResult {
    fn new(spec: &AssetSpec, outcome: Outcome) -> Self {
        Self {
            id: spec.id.clone(),
            outcome,
            content_hash: None,
        }
    }
}

/// Resolve one asset against the provider chain.
///
/// A pre-existing file at the output path is treated as complete and is
/// never inspected or re-acquired; idempotence takes priority over
/// refresh.
pub fn resolve(
    spec: &AssetSpec,
    providers: &[Box<dyn AcquireProvider>],
    output_dir: &Path,
) -> AcquisitionResult {
    if let Err(e) = std::fs::create_dir_all(output_dir) {
        return AcquisitionResult::new(
            spec,
            Outcome::Failed {
                error: format!("creating {}: {}", output_dir.display(), e),
            },
        );
    }

    let output_path = spec.output_path(output_dir);
    if output_path.exists() {
        return AcquisitionResult::new(spec, Outcome::SkippedExisting);
    }

    let mut last_error = "no providers configured".to_string();

    for provider in providers {
        match provider.acquire(spec) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(&output_path, &bytes) {
                    // An IO failure writing output is terminal for this
                    // asset; trying another provider would not help
                    return AcquisitionResult::new(
                        spec,
                        Outcome::Failed {
                            error: format!("writing {}: {}", output_path.display(), e),
                        },
                    );
                }

                let mut result = AcquisitionResult::new(
                    spec,
                    Outcome::Success {
                        provider: provider.name().to_string(),
                    },
                );
                result.content_hash = Some(ContentHash::from_bytes(&bytes));
                return result;
            }
            Err(e) => {
                eprintln!("  {}: {}", provider.name(), e);
                last_error = format!("{}: {}", provider.name(), e);
            }
        }
    }

    AcquisitionResult::new(spec, Outcome::Failed { error: last_error })
}
