//! Local placeholder synthesis
//!
//! Last-resort provider that renders a dark gradient placeholder with
//! accent circle outlines, entirely offline. Always succeeds, so a run
//! that includes it makes forward progress even when every remote
//! service is down.

use crate::provider::*;
use image::{Rgb, RgbImage};
use pixseed_catalog::AssetSpec;
use std::io::Cursor;

const DARK: [u8; 3] = [18, 18, 18];
const PRIMARY: [u8; 3] = [255, 107, 53];
const SECONDARY: [u8; 3] = [150, 102, 255];
const JPEG_QUALITY: u8 = 85;

/// Offline placeholder renderer
#[derive(Default)]
pub struct LocalProvider;

impl LocalProvider {
    pub fn new() -> Self {
        Self
    }
}

fn render(width: u32, height: u32) -> RgbImage {
    let circle_radius = (width.min(height) / 8) as f32;
    let c1 = (
        (width / 4) as f32 + circle_radius,
        (height / 4) as f32 + circle_radius,
    );
    let c2 = (
        (width * 3 / 4) as f32 - circle_radius,
        (height * 3 / 4) as f32 - circle_radius,
    );

    RgbImage::from_fn(width, height, |x, y| {
        // Subtle vertical gradient toward the accent color
        let t = y as f32 / height as f32;
        let mut px = [
            (DARK[0] as f32 + SECONDARY[0] as f32 * 0.1 * t) as u8,
            (DARK[1] as f32 + SECONDARY[1] as f32 * 0.1 * t) as u8,
            (DARK[2] as f32 + SECONDARY[2] as f32 * 0.1 * t) as u8,
        ];

        let on_circle = |center: (f32, f32)| {
            let dx = x as f32 - center.0;
            let dy = y as f32 - center.1;
            ((dx * dx + dy * dy).sqrt() - circle_radius).abs() <= 1.5
        };

        if on_circle(c1) {
            px = PRIMARY;
        } else if on_circle(c2) {
            px = SECONDARY;
        }

        Rgb(px)
    })
}

fn encode(img: &RgbImage, id: &str) -> Result<Vec<u8>, ProviderError> {
    let ext = id
        .rsplit('.')
        .next()
        .unwrap_or("png")
        .to_ascii_lowercase();

    let mut buf = Vec::new();
    match ext.as_str() {
        "jpg" | "jpeg" => {
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                Cursor::new(&mut buf),
                JPEG_QUALITY,
            );
            img.write_with_encoder(encoder)
                .map_err(|e| ProviderError::Encode(e.to_string()))?;
        }
        _ => {
            img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
                .map_err(|e| ProviderError::Encode(e.to_string()))?;
        }
    }
    Ok(buf)
}

impl AcquireProvider for LocalProvider {
    fn name(&self) -> &str {
        "local"
    }

    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Synchronous
    }

    fn health_check(&self) -> ProviderStatus {
        ProviderStatus::Available
    }

    fn acquire(&self, spec: &AssetSpec) -> Result<Vec<u8>, ProviderError> {
        let img = render(spec.width, spec.height);
        encode(&img, &spec.id)
    }
}
