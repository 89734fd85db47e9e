// src/page/document.rs
// =============================================================================
// A fetched page, parsed once with `scraper`, plus the handful of structural
// queries the classifier and the asset extractor need.
//
// Every query returns owned values (strings, small structs) so callers never
// touch the DOM directly, and every query is total: a page that lacks the
// structure simply produces an empty result.
// =============================================================================

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

// The selectors are constants, so a parse failure is a programmer error.
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector must parse")
}

static SECTION_WITH_CLASS: Lazy<Selector> = Lazy::new(|| selector("section[class]"));
static SELECTED_CLIPS_TAB: Lazy<Selector> = Lazy::new(|| selector("li.clips.selected"));
static TOPIC_LIST_ANCHOR: Lazy<Selector> =
    Lazy::new(|| selector(r#"section[class*="topics"] ol a[href]"#));
static NEXT_ANCHOR: Lazy<Selector> = Lazy::new(|| selector("a.next[href], .next a[href]"));
static ASSET_IMAGE: Lazy<Selector> = Lazy::new(|| selector("article img[src], form img[src]"));

/// An anchor found in a topic list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub title: Option<String>,
}

/// A "next" navigation control and whether it is switched off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextControl {
    pub href: String,
    pub disabled: bool,
}

/// A parsed page together with the URL it was fetched from.
pub struct Page {
    url: Url,
    html: Html,
}

impl Page {
    pub fn parse(body: &str, url: Url) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The class attribute of every `section` element, in document order.
    pub fn section_classes(&self) -> Vec<String> {
        self.html
            .select(&SECTION_WITH_CLASS)
            .filter_map(|section| section.value().attr("class"))
            .map(str::to_string)
            .collect()
    }

    /// True when the clips tab is present and currently selected.
    pub fn has_selected_clips_tab(&self) -> bool {
        self.html.select(&SELECTED_CLIPS_TAB).next().is_some()
    }

    /// Anchors nested in an ordered list inside a topics-classed section.
    pub fn topic_list_anchors(&self) -> Vec<Anchor> {
        self.html
            .select(&TOPIC_LIST_ANCHOR)
            .filter_map(|a| {
                let href = a.value().attr("href")?;
                Some(Anchor {
                    href: href.to_string(),
                    title: a.value().attr("title").map(str::to_string),
                })
            })
            .collect()
    }

    /// Every "next" control, enabled or not, in document order.
    pub fn next_controls(&self) -> Vec<NextControl> {
        self.html
            .select(&NEXT_ANCHOR)
            .filter_map(|a| {
                let href = a.value().attr("href")?;
                Some(NextControl {
                    href: href.to_string(),
                    disabled: is_disabled(&a) || next_container_disabled(&a),
                })
            })
            .collect()
    }

    /// `src` of every image inside the article body or an embedded form.
    pub fn image_sources(&self) -> Vec<String> {
        self.html
            .select(&ASSET_IMAGE)
            .filter_map(|img| img.value().attr("src"))
            .map(str::to_string)
            .collect()
    }
}

fn is_disabled(element: &ElementRef) -> bool {
    let value = element.value();
    value.classes().any(|c| c == "disabled")
        || value
            .attr("aria-disabled")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

// A control like `<li class="next disabled"><a href=..>` is disabled through
// its container rather than the anchor itself.
fn next_container_disabled(anchor: &ElementRef) -> bool {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().classes().any(|c| c == "next"))
        .any(|el| is_disabled(&el))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Page {
        Page::parse(body, Url::parse("http://www.example.com/education/topics/z1").unwrap())
    }

    #[test]
    fn test_section_classes_in_order() {
        let p = page(concat!(
            r#"<section class="intro"></section><section></section>"#,
            r#"<section class="topics-list"></section>"#,
        ));
        assert_eq!(p.section_classes(), vec!["intro", "topics-list"]);
    }

    #[test]
    fn test_selected_clips_tab_needs_both_classes() {
        assert!(page(r#"<ul><li class="clips selected">Clips</li></ul>"#).has_selected_clips_tab());
        assert!(!page(r#"<ul><li class="clips">Clips</li></ul>"#).has_selected_clips_tab());
        assert!(!page(r#"<ul><li class="selected">Guides</li></ul>"#).has_selected_clips_tab());
    }

    #[test]
    fn test_topic_anchors_only_inside_ordered_list() {
        let p = page(
            r#"
            <section class="topics">
                <ol>
                    <li><a href="/education/guides/za" title="Read">A</a></li>
                    <li><a href="/education/guides/zb">B</a></li>
                </ol>
                <ul><li><a href="/elsewhere">X</a></li></ul>
            </section>
            <ol><li><a href="/not-in-section">Y</a></li></ol>
            "#,
        );
        let anchors = p.topic_list_anchors();
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].href, "/education/guides/za");
        assert_eq!(anchors[0].title.as_deref(), Some("Read"));
        assert_eq!(anchors[1].title, None);
    }

    #[test]
    fn test_next_controls_detect_disabled_container() {
        let p = page(
            r#"
            <ul class="pager">
                <li class="next disabled"><a href="/a/revision/2">Next</a></li>
                <li><a class="next" href="/a/revision/3">Next</a></li>
                <li><a class="next" aria-disabled="true" href="/a/revision/4">Next</a></li>
            </ul>
            "#,
        );
        let controls = p.next_controls();
        assert_eq!(controls.len(), 3);
        assert!(controls[0].disabled);
        assert!(!controls[1].disabled);
        assert!(controls[2].disabled);
    }

    #[test]
    fn test_image_sources_from_article_and_form() {
        let p = page(
            r#"
            <img src="/outside.png">
            <article><img src="/content/z1/large"><img alt="no src"></article>
            <form><img src="/content/z2/small"></form>
            "#,
        );
        assert_eq!(p.image_sources(), vec!["/content/z1/large", "/content/z2/small"]);
    }

    #[test]
    fn test_image_inside_form_inside_article_counted_once() {
        let p = page(r#"<article><form><img src="/content/z1/large"></form></article>"#);
        assert_eq!(p.image_sources().len(), 1);
    }
}
