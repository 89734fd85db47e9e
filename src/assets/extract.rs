// src/assets/extract.rs
// =============================================================================
// Turns the images on a leaf page into AssetRecords.
//
// How it works:
// 1. Collect every image `src` inside the article body and embedded forms
// 2. For each kind the mode asks for (graphics first), pass over that list
// 3. Graphics: split off the size class and probe all three renditions
//    Photos:   take the pid from the thumbnail URL, no probing
// 4. Push the records onto the caller's accumulator
//
// A rendition that can't be probed borrows the small rendition's size; if the
// small one can't be probed either it is recorded as 0x0.
// =============================================================================

use url::Url;

use super::patterns::{match_graphic, match_photo, GraphicRef};
use super::probe::SizeProbe;
use super::types::{AssetKind, AssetRecord, Dimensions, ExtractMode, ProbedSizes, SizeClass};
use crate::page::Page;

pub struct AssetExtractor<P> {
    probe: P,
}

impl<P: SizeProbe> AssetExtractor<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    // Appends the assets visible on `page` to `found`.
    //
    // Returns: how many records were appended. Records already in `found`
    // are left untouched, so calling this repeatedly only ever adds.
    pub async fn extract(
        &self,
        page: &Page,
        mode: ExtractMode,
        found: &mut Vec<AssetRecord>,
    ) -> usize {
        let sources = page.image_sources();
        let before = found.len();

        for kind in mode.kinds() {
            for src in &sources {
                let record = match kind {
                    AssetKind::Graphics => match match_graphic(src) {
                        Some(graphic) => Some(self.graphic_record(page.url(), graphic).await),
                        None => None,
                    },
                    AssetKind::Photos => match_photo(src).map(|pid| AssetRecord {
                        pid,
                        size_class: None,
                        dimensions: None,
                        source_url: page.url().clone(),
                    }),
                };

                if let Some(record) = record {
                    tracing::debug!("Found {} asset {} on {}", kind, record.pid, page.url());
                    found.push(record);
                }
            }
        }

        found.len() - before
    }

    async fn graphic_record(&self, page_url: &Url, graphic: GraphicRef) -> AssetRecord {
        let sizes = self.probe_renditions(page_url, &graphic.root).await;

        AssetRecord {
            pid: graphic.pid,
            size_class: Some(graphic.size_class),
            dimensions: Some(sizes),
            source_url: page_url.clone(),
        }
    }

    async fn probe_renditions(&self, page_url: &Url, root: &str) -> ProbedSizes {
        let large = self.probe_rendition(page_url, root, SizeClass::Large).await;
        let medium = self.probe_rendition(page_url, root, SizeClass::Medium).await;
        let small = self
            .probe_rendition(page_url, root, SizeClass::Small)
            .await
            .unwrap_or_default();

        ProbedSizes {
            large: large.unwrap_or(small),
            medium: medium.unwrap_or(small),
            small,
        }
    }

    async fn probe_rendition(
        &self,
        page_url: &Url,
        root: &str,
        class: SizeClass,
    ) -> Option<Dimensions> {
        // Image references are often protocol-relative or root-relative.
        let url = match page_url.join(&format!("{}{}", root, class)) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Cannot build {} rendition URL from '{}': {}", class, root, e);
                return None;
            }
        };
        self.probe.probe(&url).await
    }
}
