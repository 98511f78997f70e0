//! Anchor discovery
//!
//! Scans a markup subtree for candidate links: all anchors, or only those
//! bearing a configured class, minus any bearing an exclusion class.
//! Hrefs resolve relative to the page location; per-link attributes can
//! retarget the container and title.

use scraper::{Html, Selector};
use url::Url;

use crate::error::LinkError;
use crate::Result;

/// Per-link override attributes.
pub const CONTAINER_ATTR: &str = "data-container";
pub const TITLE_ATTR: &str = "data-title";

/// Scan-level discovery settings.
#[derive(Debug, Clone, Default)]
pub struct ScanSettings {
    /// Only anchors bearing this class are candidates.
    pub use_class: Option<String>,
    /// Anchors bearing this class are dropped.
    pub exclude_class: Option<String>,
}

/// One anchor the scan considers interceptable, before eligibility and
/// per-link validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// Absolute target, resolved against the page location.
    pub href: Url,
    /// Per-link container override.
    pub container: Option<String>,
    /// Per-link title override.
    pub title: Option<String>,
}

/// Collect candidate anchors from a markup subtree.
pub fn scan(html: &str, base: &Url, settings: &ScanSettings) -> Result<Vec<CandidateLink>> {
    let fragment = Html::parse_fragment(html);

    let selector = match &settings.use_class {
        Some(class) => Selector::parse(&format!("a.{}[href]", class))
            .map_err(|e| LinkError::InvalidSelector(format!("{:?}", e)))?,
        // Constant selector, known valid.
        None => Selector::parse("a[href]").unwrap(),
    };

    let mut candidates = Vec::new();

    for element in fragment.select(&selector) {
        if let Some(exclude) = &settings.exclude_class {
            if element.value().classes().any(|c| c == exclude) {
                continue;
            }
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };

        // Unparsable hrefs stay native.
        let href = match base.join(href) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(href, error = %e, "Skipping unparsable link");
                continue;
            }
        };

        candidates.push(CandidateLink {
            href,
            container: element.value().attr(CONTAINER_ATTR).map(str::to_string),
            title: element.value().attr(TITLE_ATTR).map(str::to_string),
        });
    }

    Ok(candidates)
}
