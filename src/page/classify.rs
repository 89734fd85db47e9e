// src/page/classify.rs
// =============================================================================
// Decides what kind of page we are looking at and which links lead on from it.
//
// Index pages list child topics/guides in an ordered list inside a section
// whose class mentions "topics". The site template reuses that marker on the
// clips tab, so a page whose clips tab is selected is a Leaf even though it
// carries the marker.
//
// Leaf pages may chain on to the next part of a revision sequence through a
// "next" control; only enabled controls pointing at a /revision path count.
// =============================================================================

use serde::Serialize;
use url::Url;

use super::document::Page;

const TOPICS_MARKER: &str = "topics";
const REVISE_TITLE: &str = "Revise";
const REVISION_SEGMENT: &str = "/revision";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageClassification {
    Index,
    Leaf,
}

/// Classifies pages and resolves their outgoing links against the site root.
#[derive(Debug, Clone)]
pub struct PageClassifier {
    site_root: Url,
}

impl PageClassifier {
    pub fn new(site_root: Url) -> Self {
        Self { site_root }
    }

    pub fn classify(&self, page: &Page) -> PageClassification {
        let has_topics = page
            .section_classes()
            .iter()
            .any(|class| class.contains(TOPICS_MARKER));

        if has_topics && !page.has_selected_clips_tab() {
            PageClassification::Index
        } else {
            PageClassification::Leaf
        }
    }

    /// Child URLs of an Index page, in document order.
    ///
    /// Anchors titled exactly "Revise" are skipped: the revision pages they
    /// point at are reached through their parent topic link already.
    pub fn child_links(&self, page: &Page) -> Vec<Url> {
        page.topic_list_anchors()
            .into_iter()
            .filter(|anchor| anchor.title.as_deref() != Some(REVISE_TITLE))
            .filter_map(|anchor| self.resolve(&anchor.href))
            .collect()
    }

    /// The first enabled "next" control, if it continues a revision sequence.
    pub fn continuation_link(&self, page: &Page) -> Option<Url> {
        let control = page.next_controls().into_iter().find(|c| !c.disabled)?;
        let url = self.resolve(&control.href)?;

        if url.path().contains(REVISION_SEGMENT) {
            Some(url)
        } else {
            None
        }
    }

    fn resolve(&self, href: &str) -> Option<Url> {
        match self.site_root.join(href) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!("Skipping unresolvable link '{}': {}", href, e);
                None
            }
        }
    }
}
