// src/manifest/reconcile.rs
// =============================================================================
// Loads the expected assets and checks them against what the crawl found.
//
// For each manifest entry:
// - no discovered asset with its pid          -> one Missing
// - otherwise, for EVERY discovered occurrence -> Matched or SizeMismatch
//
// Photos only need to be present. Graphics must also have the expected width
// in all three renditions; heights are not compared and there is no
// tolerance.
// =============================================================================

use serde::Serialize;
use url::Url;

use super::source::{ManifestSource, Sheet};
use crate::assets::{is_valid_pid, AssetKind, AssetRecord, SizeClass};
use crate::error::ManifestError;

const GRAPHICS_SHEET: usize = 0;
const PHOTOS_SHEET: usize = 1;

const JOB: &str = "job";
const FILENAME: &str = "filename";
const PID: &str = "pid";

/// Expected widths of the three renditions of a graphic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpectedWidths {
    pub large: u32,
    pub medium: u32,
    pub small: u32,
}

impl ExpectedWidths {
    pub fn get(&self, class: SizeClass) -> u32 {
        match class {
            SizeClass::Large => self.large,
            SizeClass::Medium => self.medium,
            SizeClass::Small => self.small,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub job: String,
    pub filename: String,
    pub pid: String,
    /// Set for graphics entries, `None` for photos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<ExpectedWidths>,
}

/// One rendition whose probed width is not the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeMismatch {
    pub size_class: SizeClass,
    pub actual: u32,
    pub expected: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ComparisonResult {
    Matched {
        entry: ManifestEntry,
        source_url: Url,
    },
    SizeMismatch {
        entry: ManifestEntry,
        source_url: Url,
        mismatches: Vec<SizeMismatch>,
    },
    Missing {
        entry: ManifestEntry,
    },
}

impl ComparisonResult {
    pub fn entry(&self) -> &ManifestEntry {
        match self {
            ComparisonResult::Matched { entry, .. }
            | ComparisonResult::SizeMismatch { entry, .. }
            | ComparisonResult::Missing { entry } => entry,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ComparisonResult::Matched { .. })
    }
}

// Reads the sheet for `kind` into manifest entries, in sheet order.
//
// Rows whose pid doesn't have the identifier shape (titles, blank lines,
// notes) are dropped without complaint. A missing sheet or column, or a
// graphics row with an unreadable width, fails the whole load.
pub fn load(
    source: &impl ManifestSource,
    kind: AssetKind,
) -> Result<Vec<ManifestEntry>, ManifestError> {
    let index = match kind {
        AssetKind::Graphics => GRAPHICS_SHEET,
        AssetKind::Photos => PHOTOS_SHEET,
    };
    let sheet = source.sheet(index)?;
    require_columns(&sheet, index, kind)?;

    let mut entries = Vec::new();
    let mut skipped = 0;

    for (row_index, row) in sheet.rows.iter().enumerate() {
        let pid = row.get(PID);
        if !is_valid_pid(kind, pid) {
            skipped += 1;
            continue;
        }

        let expected = match kind {
            AssetKind::Photos => None,
            AssetKind::Graphics => {
                // +2: one for the header line, one for 1-based numbering
                let width = |class: SizeClass| {
                    parse_width(row.get(class.as_str())).ok_or_else(|| ManifestError::InvalidWidth {
                        sheet: index,
                        row: row_index + 2,
                        column: class.as_str().to_string(),
                        value: row.get(class.as_str()).to_string(),
                    })
                };
                Some(ExpectedWidths {
                    large: width(SizeClass::Large)?,
                    medium: width(SizeClass::Medium)?,
                    small: width(SizeClass::Small)?,
                })
            }
        };

        entries.push(ManifestEntry {
            job: row.get(JOB).to_string(),
            filename: row.get(FILENAME).to_string(),
            pid: pid.to_string(),
            expected,
        });
    }

    tracing::info!(
        "Loaded {} {} manifest entries ({} rows skipped)",
        entries.len(),
        kind,
        skipped
    );
    Ok(entries)
}

fn require_columns(sheet: &Sheet, index: usize, kind: AssetKind) -> Result<(), ManifestError> {
    let mut columns = vec![JOB, FILENAME, PID];
    if kind == AssetKind::Graphics {
        columns.extend(SizeClass::ALL.iter().map(|c| c.as_str()));
    }

    match columns.into_iter().find(|c| !sheet.has_column(c)) {
        Some(column) => Err(ManifestError::MissingColumn {
            sheet: index,
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

// Spreadsheet exports sometimes write whole numbers as "800.0".
fn parse_width(value: &str) -> Option<u32> {
    let value = value.trim();
    value
        .parse::<u32>()
        .ok()
        .or_else(|| value.strip_suffix(".0").and_then(|v| v.parse().ok()))
}

// Checks every entry against the discovered assets of the same kind.
//
// Results come out in manifest order; an entry found N times yields N
// results, in the order the crawl found the assets.
pub fn reconcile(
    entries: &[ManifestEntry],
    assets: &[AssetRecord],
    kind: AssetKind,
) -> Vec<ComparisonResult> {
    let mut results = Vec::new();

    for entry in entries {
        let mut found = false;

        for asset in assets
            .iter()
            .filter(|a| a.kind() == kind && a.pid == entry.pid)
        {
            found = true;
            results.push(compare(entry, asset, kind));
        }

        if !found {
            results.push(ComparisonResult::Missing {
                entry: entry.clone(),
            });
        }
    }

    results
}

fn compare(entry: &ManifestEntry, asset: &AssetRecord, kind: AssetKind) -> ComparisonResult {
    let expected = match (kind, entry.expected) {
        (AssetKind::Graphics, Some(expected)) => expected,
        _ => {
            return ComparisonResult::Matched {
                entry: entry.clone(),
                source_url: asset.source_url.clone(),
            }
        }
    };

    // A graphic that was never probed compares as 0x0 everywhere.
    let probed = asset.dimensions.unwrap_or_default();
    let mismatches: Vec<SizeMismatch> = SizeClass::ALL
        .iter()
        .filter_map(|&class| {
            let actual = probed.get(class).width;
            let expected = expected.get(class);
            (actual != expected).then_some(SizeMismatch {
                size_class: class,
                actual,
                expected,
            })
        })
        .collect();

    if mismatches.is_empty() {
        ComparisonResult::Matched {
            entry: entry.clone(),
            source_url: asset.source_url.clone(),
        }
    } else {
        ComparisonResult::SizeMismatch {
            entry: entry.clone(),
            source_url: asset.source_url.clone(),
            mismatches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Dimensions, ProbedSizes};
    use crate::manifest::source::ManifestRow;

    struct MemorySource(Vec<Sheet>);

    impl ManifestSource for MemorySource {
        fn sheet(&self, index: usize) -> Result<Sheet, ManifestError> {
            self.0.get(index).cloned().ok_or(ManifestError::MissingSheet {
                index,
                available: self.0.len(),
            })
        }
    }

    fn sheet(headers: &[&str], rows: &[&[&str]]) -> Sheet {
        Sheet {
            headers: headers.iter().map(|h| h.to_lowercase()).collect(),
            rows: rows
                .iter()
                .map(|r| ManifestRow::from_pairs(headers.iter().copied().zip(r.iter().copied())))
                .collect(),
        }
    }

    const GRAPHICS_HEADERS: &[&str] = &["Job", "Filename", "PID", "Large", "Medium", "Small"];

    fn graphic_entry() -> ManifestEntry {
        ManifestEntry {
            job: "J1".to_string(),
            filename: "f.png".to_string(),
            pid: "z123abc".to_string(),
            expected: Some(ExpectedWidths {
                large: 800,
                medium: 400,
                small: 200,
            }),
        }
    }

    fn graphic(pid: &str, large: u32, medium: u32, small: u32, page: &str) -> AssetRecord {
        AssetRecord {
            pid: pid.to_string(),
            size_class: Some(SizeClass::Large),
            dimensions: Some(ProbedSizes {
                large: Dimensions::new(large, 1),
                medium: Dimensions::new(medium, 2),
                small: Dimensions::new(small, 3),
            }),
            source_url: Url::parse(page).unwrap(),
        }
    }

    fn photo(pid: &str) -> AssetRecord {
        AssetRecord {
            pid: pid.to_string(),
            size_class: None,
            dimensions: None,
            source_url: Url::parse("http://www.example.com/p").unwrap(),
        }
    }

    #[test]
    fn test_load_graphics_skips_non_pid_rows() {
        let source = MemorySource(vec![sheet(
            GRAPHICS_HEADERS,
            &[
                &["Migration batch 3", "", "", "", "", ""],
                &["J1", "f.png", "z123abc", "800", "400", "200"],
                &["", "", "", "", "", ""],
                &["J2", "g.png", "z999xyz", "640.0", "320", "160"],
            ],
        )]);

        let entries = load(&source, AssetKind::Graphics).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], graphic_entry());
        assert_eq!(entries[1].expected.unwrap().large, 640);
    }

    #[test]
    fn test_load_photos_uses_second_sheet() {
        let source = MemorySource(vec![
            sheet(GRAPHICS_HEADERS, &[]),
            sheet(
                &["Job", "Filename", "PID"],
                &[&["J9", "p.jpg", "p01abcd7"], &["J9", "x.jpg", "z1"]],
            ),
        ]);

        let entries = load(&source, AssetKind::Photos).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].pid, "p01abcd7");
        assert_eq!(entries[0].expected, None);
    }

    #[test]
    fn test_load_missing_width_column_fails() {
        let source = MemorySource(vec![sheet(&["job", "filename", "pid", "large"], &[])]);
        let err = load(&source, AssetKind::Graphics).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::MissingColumn { ref column, .. } if column == "medium"
        ));
    }

    #[test]
    fn test_load_bad_width_names_row() {
        let source = MemorySource(vec![sheet(
            GRAPHICS_HEADERS,
            &[&["J1", "f.png", "z123abc", "800", "wide", "200"]],
        )]);
        let err = load(&source, AssetKind::Graphics).unwrap_err();
        assert!(matches!(
            err,
            ManifestError::InvalidWidth { row: 2, ref column, .. } if column == "medium"
        ));
    }

    #[test]
    fn test_exact_widths_match() {
        let results = reconcile(
            &[graphic_entry()],
            &[graphic("z123abc", 800, 400, 200, "http://www.example.com/g1")],
            AssetKind::Graphics,
        );
        assert_eq!(
            results,
            vec![ComparisonResult::Matched {
                entry: graphic_entry(),
                source_url: Url::parse("http://www.example.com/g1").unwrap(),
            }]
        );
    }

    #[test]
    fn test_single_width_off_by_one_is_one_mismatch() {
        let results = reconcile(
            &[graphic_entry()],
            &[graphic("z123abc", 800, 399, 200, "http://www.example.com/g1")],
            AssetKind::Graphics,
        );
        assert_eq!(results.len(), 1);
        match &results[0] {
            ComparisonResult::SizeMismatch { mismatches, entry, .. } => {
                assert_eq!(entry.job, "J1");
                assert_eq!(
                    mismatches,
                    &vec![SizeMismatch {
                        size_class: SizeClass::Medium,
                        actual: 399,
                        expected: 400,
                    }]
                );
            }
            other => panic!("expected a size mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_mismatches_on_one_pairing() {
        let results = reconcile(
            &[graphic_entry()],
            &[graphic("z123abc", 0, 0, 200, "http://www.example.com/g1")],
            AssetKind::Graphics,
        );
        match &results[0] {
            ComparisonResult::SizeMismatch { mismatches, .. } => {
                let classes: Vec<_> = mismatches.iter().map(|m| m.size_class).collect();
                assert_eq!(classes, vec![SizeClass::Large, SizeClass::Medium]);
            }
            other => panic!("expected a size mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_heights_are_ignored() {
        let mut asset = graphic("z123abc", 800, 400, 200, "http://www.example.com/g1");
        asset.dimensions.as_mut().unwrap().large.height = 9999;
        let results = reconcile(&[graphic_entry()], &[asset], AssetKind::Graphics);
        assert!(results[0].is_success());
    }

    #[test]
    fn test_missing_entry_yields_exactly_one_missing() {
        let results = reconcile(
            &[graphic_entry()],
            &[graphic("zother", 800, 400, 200, "http://www.example.com/g1")],
            AssetKind::Graphics,
        );
        assert_eq!(
            results,
            vec![ComparisonResult::Missing {
                entry: graphic_entry()
            }]
        );
    }

    #[test]
    fn test_every_occurrence_is_reconciled() {
        let results = reconcile(
            &[graphic_entry()],
            &[
                graphic("z123abc", 800, 400, 200, "http://www.example.com/g1"),
                graphic("z123abc", 800, 401, 200, "http://www.example.com/g2"),
            ],
            AssetKind::Graphics,
        );
        assert_eq!(results.len(), 2);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
    }

    #[test]
    fn test_photos_only_need_presence() {
        let entry = ManifestEntry {
            job: "J9".to_string(),
            filename: "p.jpg".to_string(),
            pid: "p01abcd7".to_string(),
            expected: None,
        };
        let results = reconcile(&[entry], &[photo("p01abcd7")], AssetKind::Photos);
        assert!(results[0].is_success());
    }

    #[test]
    fn test_other_kind_assets_do_not_count() {
        let entry = ManifestEntry {
            job: "J9".to_string(),
            filename: "p.jpg".to_string(),
            pid: "z123abc".to_string(),
            expected: None,
        };
        let results = reconcile(
            &[entry],
            &[graphic("z123abc", 1, 1, 1, "http://www.example.com/g1")],
            AssetKind::Photos,
        );
        assert!(matches!(results[0], ComparisonResult::Missing { .. }));
    }
}
