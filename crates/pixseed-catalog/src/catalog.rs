//! Asset catalog loading and validation

use crate::spec::AssetSpec;
use pixseed_core::{PixseedError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Ordered catalog of assets to acquire.
///
/// Definition order is preserved; it is also the order in which assets
/// are processed and results are reported.
#[derive(Debug, Default)]
pub struct AssetCatalog {
    specs: Vec<AssetSpec>,
}

/// TOML file shape: a sequence of `[[asset]]` tables
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "asset")]
    assets: Vec<AssetSpec>,
}

impl AssetCatalog {
    /// Build a catalog from specs, rejecting duplicate ids
    pub fn from_specs(specs: Vec<AssetSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if spec.id.trim().is_empty() {
                return Err(PixseedError::CatalogError(
                    "Asset id must not be empty".to_string(),
                ));
            }
            if !seen.insert(spec.id.clone()) {
                return Err(PixseedError::DuplicateAssetId(spec.id.clone()));
            }
        }
        Ok(Self { specs })
    }

    /// Load a catalog from a `[[asset]]` TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| {
            PixseedError::CatalogError(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Self::from_specs(file.assets)
    }

    /// The built-in website image table
    pub fn builtin() -> Self {
        let specs = BUILTIN_ASSETS
            .iter()
            .map(|(id, width, height, prompt, search, label)| AssetSpec {
                id: id.to_string(),
                width: *width,
                height: *height,
                prompt: prompt.to_string(),
                search: search.to_string(),
                label: label.to_string(),
            })
            .collect();
        // Built-in ids are distinct by construction
        Self { specs }
    }

    /// Iterate specs in definition order
    pub fn iter(&self) -> impl Iterator<Item = &AssetSpec> {
        self.specs.iter()
    }

    /// Number of assets in the catalog
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// (id, width, height, prompt, search, label)
const BUILTIN_ASSETS: &[(&str, u32, u32, &str, &str, &str)] = &[
    (
        "about-workshop.jpg",
        1920,
        1080,
        "A modern minimalist design workshop space, professional designer working on enterprise visualization, clean background, orange and purple accent colors, dark theme, soft lighting",
        "modern design workshop office",
        "About Workshop",
    ),
    (
        "about-story.jpg",
        1920,
        1080,
        "A designer's journey from tech to design, abstract visualization of career transformation, purple and orange gradient, dark background, geometric shapes, flowing lines",
        "abstract design journey transformation",
        "About Story",
    ),
    (
        "article-tob-visual.jpg",
        1600,
        900,
        "Enterprise visualization design showcase, professional business presentation, data visualization, clean modern design, orange and purple theme, dashboard mockup",
        "business presentation data visualization",
        "ToB Visual",
    ),
    (
        "article-data-story.jpg",
        1600,
        900,
        "Data visualization storytelling, transforming complex data into clear visual narratives, infographic style, dark theme, charts and graphs, orange and purple accents",
        "data visualization infographic charts",
        "Data Story",
    ),
    (
        "article-pitch.jpg",
        1600,
        900,
        "Professional pitch deck design, investor presentation, business proposal visualization, sleek modern design, orange and purple accents, clean typography",
        "pitch deck presentation business",
        "Pitch Deck",
    ),
    (
        "article-dashboard.jpg",
        1600,
        900,
        "Modern dashboard design, data analytics interface, clean UI, professional SaaS dashboard, dark theme with orange and purple accents, charts and metrics",
        "dashboard analytics interface",
        "Dashboard",
    ),
    (
        "avatar.jpg",
        400,
        400,
        "Professional designer portrait, friendly confident expression, neutral background, high quality headshot, studio lighting",
        "professional portrait designer",
        "Avatar",
    ),
    (
        "product-ppt.jpg",
        1600,
        900,
        "Professional slide template design for business presentations, modern layout, orange and purple color scheme, minimalist, high quality mockup",
        "powerpoint template presentation",
        "PPT Template",
    ),
    (
        "product-design-system.jpg",
        1600,
        900,
        "Design system showcase, component library, UI kit visualization, modern design tokens, orange and purple theme, component grid",
        "design system ui components",
        "Design System",
    ),
    (
        "product-toolkit.jpg",
        1600,
        900,
        "Data visualization toolkit, design resources, tools and templates collection, dark theme with orange accents, clean layout",
        "design tools toolkit resources",
        "Toolkit",
    ),
    (
        "product-course.jpg",
        1600,
        900,
        "Online design course illustration, educational content, modern learning interface, orange and purple theme, course banner",
        "online course education learning",
        "Course",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_catalog(content: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("pixseed_catalog_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = AssetCatalog::builtin();
        assert_eq!(catalog.len(), 11);

        // First entry in definition order
        let first = catalog.iter().next().unwrap();
        assert_eq!(first.id, "about-workshop.jpg");
        assert_eq!(first.width, 1920);

        // No duplicate ids
        let mut seen = std::collections::HashSet::new();
        for spec in catalog.iter() {
            assert!(seen.insert(spec.id.clone()), "duplicate id {}", spec.id);
        }
    }

    #[test]
    fn test_load_from_file_preserves_order() {
        let path = temp_catalog(
            r#"
[[asset]]
id = "hero.jpg"
width = 1920
height = 1080
search = "hero banner"

[[asset]]
id = "thumb.png"
width = 320
height = 240
label = "Thumbnail"
"#,
        );

        let catalog = AssetCatalog::load_from_file(&path).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["hero.jpg", "thumb.png"]);

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let path = temp_catalog(
            r#"
[[asset]]
id = "a.jpg"
width = 100
height = 100

[[asset]]
id = "a.jpg"
width = 200
height = 200
"#,
        );

        let err = AssetCatalog::load_from_file(&path).unwrap_err();
        assert!(matches!(err, PixseedError::DuplicateAssetId(id) if id == "a.jpg"));

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = AssetCatalog::from_specs(vec![AssetSpec {
            id: "  ".to_string(),
            width: 10,
            height: 10,
            prompt: String::new(),
            search: String::new(),
            label: String::new(),
        }]);
        assert!(result.is_err());
    }
}
