//! Link eligibility rules
//!
//! A candidate anchor is intercepted only when fetching it as a fragment
//! makes sense. Everything else stays a normal link.

use url::Url;

/// Why a link was left un-intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Scheme or host differs from the page's; native navigation applies.
    CrossOrigin,
    /// Same path with a non-empty fragment; an anchor jump, not a
    /// navigation.
    FragmentJump,
    /// Path extension on the ignore list; binary and media resources are
    /// not navigable content.
    IgnoredExtension,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SkipReason::CrossOrigin => "cross-origin",
            SkipReason::FragmentJump => "fragment jump",
            SkipReason::IgnoredExtension => "ignored extension",
        };
        write!(f, "{}", s)
    }
}

/// Check a target against the current location. `None` means the link
/// qualifies for interception.
pub fn eligibility(
    target: &Url,
    current: &Url,
    ignore_extensions: &[String],
) -> Option<SkipReason> {
    if target.scheme() != current.scheme()
        || target.host_str() != current.host_str()
        || target.port_or_known_default() != current.port_or_known_default()
    {
        return Some(SkipReason::CrossOrigin);
    }

    if target.path() == current.path() && target.fragment().is_some_and(|f| !f.is_empty()) {
        return Some(SkipReason::FragmentJump);
    }

    // Everything after the last dot of the path; a dotless path yields
    // the whole path, which matches nothing on the list.
    let extension = target
        .path()
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    if ignore_extensions.iter().any(|e| *e == extension) {
        return Some(SkipReason::IgnoredExtension);
    }

    None
}
