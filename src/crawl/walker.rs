// src/crawl/walker.rs
// =============================================================================
// Walks the site tree depth-first, collecting assets from every leaf page.
//
// How it works:
// 1. Start with the root URL on a stack
// 2. Pop a URL and fetch it; a failed fetch is recorded and only that branch
//    is abandoned
// 3. Index pages push their child links (reversed, so the first child is
//    walked first and fully before its next sibling)
// 4. An Index page with no usable child list is visited once more, this time
//    as a leaf, so it is never silently dropped
// 5. Leaf pages hand their images to the AssetExtractor and push their
//    continuation link, if any, so a revision sequence is walked in order
//
// The stack reproduces the order a recursive walk would visit pages in.
//
// Each visit is keyed by (URL, visit kind) in a visited set unless the caller
// turns deduplication off; a site whose links loop would otherwise never
// finish.
// =============================================================================

use serde::Serialize;
use std::collections::HashSet;
use url::Url;

use super::fetch::PageFetcher;
use crate::assets::{AssetExtractor, AssetRecord, ExtractMode, SizeProbe};
use crate::page::{Page, PageClassification, PageClassifier};

/// A page that could not be fetched during a crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlError {
    pub message: String,
    pub url: Url,
}

#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    /// Skip a (URL, visit kind) pair that has already been walked.
    pub dedupe_pages: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self { dedupe_pages: true }
    }
}

/// Counters for the end-of-run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub index_pages: usize,
    pub leaf_pages: usize,
    pub revisits_skipped: usize,
}

/// Everything one crawl produced. Owned by the caller once `crawl` returns.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    pub assets: Vec<AssetRecord>,
    pub errors: Vec<CrawlError>,
    pub stats: CrawlStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum VisitKind {
    // Classify the page and act on the result
    Page,
    // Second visit to an Index page that had no child list; treated as Leaf
    FallbackLeaf,
}

#[derive(Debug, Clone)]
struct CrawlItem {
    url: Url,
    kind: VisitKind,
}

pub struct SiteCrawler<F, P> {
    fetcher: F,
    classifier: PageClassifier,
    extractor: AssetExtractor<P>,
    options: CrawlOptions,
}

impl<F: PageFetcher, P: SizeProbe> SiteCrawler<F, P> {
    pub fn new(fetcher: F, probe: P, classifier: PageClassifier, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            classifier,
            extractor: AssetExtractor::new(probe),
            options,
        }
    }

    // Crawls everything reachable from `root`.
    //
    // Never fails: fetch failures end up in `CrawlOutcome::errors`, including
    // a failure on the root itself.
    pub async fn crawl(&self, root: Url, mode: ExtractMode) -> CrawlOutcome {
        let mut outcome = CrawlOutcome::default();
        let mut visited = HashSet::new();
        let mut stack = vec![CrawlItem {
            url: root,
            kind: VisitKind::Page,
        }];

        while let Some(item) = stack.pop() {
            if self.options.dedupe_pages && !visited.insert((item.url.clone(), item.kind)) {
                tracing::debug!("Skipping already visited URL: {}", item.url);
                outcome.stats.revisits_skipped += 1;
                continue;
            }

            let body = match self.fetcher.fetch(&item.url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}", item.url, e);
                    outcome.errors.push(CrawlError {
                        message: e.message,
                        url: item.url,
                    });
                    continue;
                }
            };
            outcome.stats.pages_fetched += 1;

            let page = Page::parse(&body, item.url);
            let classification = match item.kind {
                VisitKind::FallbackLeaf => PageClassification::Leaf,
                VisitKind::Page => self.classifier.classify(&page),
            };

            match classification {
                PageClassification::Index => {
                    outcome.stats.index_pages += 1;
                    tracing::info!("Descending into index {}", page.url());

                    let children = self.classifier.child_links(&page);
                    if children.is_empty() {
                        tracing::debug!("No child list on {}, revisiting as leaf", page.url());
                        stack.push(CrawlItem {
                            url: page.url().clone(),
                            kind: VisitKind::FallbackLeaf,
                        });
                    } else {
                        stack.extend(children.into_iter().rev().map(|url| CrawlItem {
                            url,
                            kind: VisitKind::Page,
                        }));
                    }
                }
                PageClassification::Leaf => {
                    outcome.stats.leaf_pages += 1;
                    let added = self.extractor.extract(&page, mode, &mut outcome.assets).await;
                    tracing::info!("Collected {} asset(s) from {}", added, page.url());

                    if let Some(next) = self.classifier.continuation_link(&page) {
                        tracing::debug!("Following continuation {}", next);
                        stack.push(CrawlItem {
                            url: next,
                            kind: VisitKind::Page,
                        });
                    }
                }
            }
        }

        outcome
    }
}
