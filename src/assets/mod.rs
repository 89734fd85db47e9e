// src/assets/mod.rs
// =============================================================================
// Asset discovery on leaf pages.
//
// Submodules:
// - types: AssetRecord, SizeClass, Dimensions, AssetKind, ExtractMode
// - patterns: the site's asset URL and pid shapes
// - probe: SizeProbe seam plus the HTTP implementation
// - extract: AssetExtractor, which drives the other three
// =============================================================================

mod extract;
mod patterns;
mod probe;
mod types;

pub use extract::AssetExtractor;
pub use patterns::is_valid_pid;
pub use probe::{HttpSizeProbe, SizeProbe};
pub use types::{AssetKind, AssetRecord, Dimensions, ExtractMode, ProbedSizes, SizeClass};
