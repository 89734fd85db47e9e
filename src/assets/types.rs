// src/assets/types.rs
// =============================================================================
// The vocabulary shared by extraction, reconciliation and reporting.
// =============================================================================

use serde::Serialize;
use std::fmt;
use url::Url;

/// The three renditions a graphic is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Large,
    Medium,
    Small,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Large, SizeClass::Medium, SizeClass::Small];

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Large => "large",
            SizeClass::Medium => "medium",
            SizeClass::Small => "small",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "large" => Some(SizeClass::Large),
            "medium" => Some(SizeClass::Medium),
            "small" => Some(SizeClass::Small),
            _ => None,
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel size of an image. `0x0` stands in for "could not be probed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Probed dimensions of all three renditions of one graphic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProbedSizes {
    pub large: Dimensions,
    pub medium: Dimensions,
    pub small: Dimensions,
}

impl ProbedSizes {
    pub fn get(&self, class: SizeClass) -> Dimensions {
        match class {
            SizeClass::Large => self.large,
            SizeClass::Medium => self.medium,
            SizeClass::Small => self.small,
        }
    }
}

/// Which rule set an asset (or a manifest sheet) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Graphics,
    Photos,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Graphics => f.write_str("Graphics"),
            AssetKind::Photos => f.write_str("Photos"),
        }
    }
}

/// What a crawl should extract. Graphics only unless told otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractMode {
    #[default]
    GraphicsOnly,
    PhotosOnly,
    Both,
}

impl ExtractMode {
    pub fn from_flags(graphics: bool, photos: bool) -> Self {
        match (graphics, photos) {
            (true, true) => ExtractMode::Both,
            (false, true) => ExtractMode::PhotosOnly,
            _ => ExtractMode::GraphicsOnly,
        }
    }

    /// The asset kinds this mode covers; graphics always come first.
    pub fn kinds(&self) -> &'static [AssetKind] {
        match self {
            ExtractMode::GraphicsOnly => &[AssetKind::Graphics],
            ExtractMode::PhotosOnly => &[AssetKind::Photos],
            ExtractMode::Both => &[AssetKind::Graphics, AssetKind::Photos],
        }
    }
}

/// One asset reference discovered on a leaf page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRecord {
    pub pid: String,
    /// Rendition referenced on the page; `None` for photos.
    pub size_class: Option<SizeClass>,
    /// Present only when the renditions were probed (graphics).
    pub dimensions: Option<ProbedSizes>,
    pub source_url: Url,
}

impl AssetRecord {
    pub fn kind(&self) -> AssetKind {
        if self.size_class.is_some() {
            AssetKind::Graphics
        } else {
            AssetKind::Photos
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_flags_defaults_to_graphics() {
        assert_eq!(ExtractMode::from_flags(false, false), ExtractMode::GraphicsOnly);
        assert_eq!(ExtractMode::from_flags(true, false), ExtractMode::GraphicsOnly);
        assert_eq!(ExtractMode::from_flags(false, true), ExtractMode::PhotosOnly);
        assert_eq!(ExtractMode::from_flags(true, true), ExtractMode::Both);
    }

    #[test]
    fn test_both_mode_runs_graphics_first() {
        assert_eq!(
            ExtractMode::Both.kinds(),
            &[AssetKind::Graphics, AssetKind::Photos]
        );
    }

    #[test]
    fn test_size_class_round_trips_through_str() {
        for class in SizeClass::ALL {
            assert_eq!(SizeClass::parse(class.as_str()), Some(class));
        }
        assert_eq!(SizeClass::parse("huge"), None);
    }
}
