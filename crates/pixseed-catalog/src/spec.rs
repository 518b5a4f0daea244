//! Asset spec: one output file and the attributes used to produce it

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single placeholder asset to acquire.
///
/// `id` is the output filename and uniquely determines the output path.
/// The three descriptors serve different provider families: `prompt` for
/// generative APIs, `search` for stock-photo keyword services, `label`
/// for text rendered onto locally synthesized placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSpec {
    /// Output filename (e.g. "avatar.jpg")
    pub id: String,
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
    /// Free-text generation prompt
    #[serde(default)]
    pub prompt: String,
    /// Search keywords for stock-photo providers
    #[serde(default)]
    pub search: String,
    /// Short human-readable caption
    #[serde(default)]
    pub label: String,
}

impl AssetSpec {
    /// Resolve the output path for this spec under a directory
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.id)
    }

    /// Best available text descriptor, preferring the richest one
    pub fn descriptor(&self) -> &str {
        if !self.prompt.is_empty() {
            &self.prompt
        } else if !self.search.is_empty() {
            &self.search
        } else {
            &self.label
        }
    }

    /// Caption for rendered placeholders, falling back to the id stem
    pub fn caption(&self) -> &str {
        if !self.label.is_empty() {
            return &self.label;
        }
        self.id.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(&self.id)
    }
}
