//! List command: show catalog entries

use anyhow::Result;
use pixseed_catalog::AssetCatalog;

pub fn run(catalog_path: Option<&str>) -> Result<()> {
    let catalog = match catalog_path {
        Some(path) => AssetCatalog::load_from_file(path)?,
        None => AssetCatalog::builtin(),
    };

    println!("{} assets:", catalog.len());
    for spec in catalog.iter() {
        println!(
            "  {:<28} {:>4}x{:<4}  {}",
            spec.id,
            spec.width,
            spec.height,
            spec.descriptor()
        );
    }

    Ok(())
}
