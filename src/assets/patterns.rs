// src/assets/patterns.rs
// =============================================================================
// The fixed URL and identifier shapes used by the site.
//
// Graphics:  .../content/{pid}/{large|medium|small}   pid = z + word chars
// Photos:    .../images/ic/{w}x{h|n}/{pid}.{jpg|png|gif} pid = p0 + word chars
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{AssetKind, SizeClass};

static GRAPHIC_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/content/(z\w+)/(large|medium|small)").expect("graphic URL pattern")
});

static PHOTO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/images/ic/\d+x(?:\d+|n)/(p0\w+)\.(?:jpe?g|png|gif)").expect("photo URL pattern")
});

static GRAPHIC_PID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^z\w+$").expect("graphic pid pattern"));
static PHOTO_PID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^p0\w+$").expect("photo pid pattern"));

/// A graphic reference split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicRef {
    pub pid: String,
    pub size_class: SizeClass,
    /// The reference with the size-class segment (and anything after it)
    /// removed, e.g. `//host/content/z123/`.
    pub root: String,
}

pub fn match_graphic(src: &str) -> Option<GraphicRef> {
    let caps = GRAPHIC_URL.captures(src)?;
    let pid = caps.get(1)?;
    let class = caps.get(2)?;

    Some(GraphicRef {
        pid: pid.as_str().to_string(),
        size_class: SizeClass::parse(class.as_str())?,
        root: src[..class.start()].to_string(),
    })
}

pub fn match_photo(src: &str) -> Option<String> {
    PHOTO_URL
        .captures(src)
        .and_then(|caps| caps.get(1))
        .map(|pid| pid.as_str().to_string())
}

/// Whether `pid` has the identifier shape for `kind`.
pub fn is_valid_pid(kind: AssetKind, pid: &str) -> bool {
    match kind {
        AssetKind::Graphics => GRAPHIC_PID.is_match(pid),
        AssetKind::Photos => PHOTO_PID.is_match(pid),
    }
}
