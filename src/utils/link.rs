//! Link classification and root-prefix rewriting.
//!
//! One static navigation tree serves pages at any nesting depth: every
//! relative link target is prefixed with the page's `root_prefix` before it
//! is rendered.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Scheme followed by `//`, or protocol-relative `//`.
static RE_ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-z+]+:)?//").unwrap());

/// Kind of a link target as seen by the sidebar.
///
/// | Input | Kind |
/// |-------|------|
/// | `#section` | `Fragment` |
/// | `https://example.com/x` | `Absolute` |
/// | `//cdn.example.com/x` | `Absolute` |
/// | `foo/bar.html` | `Relative` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Fragment,
    Absolute,
    Relative,
}

impl LinkKind {
    pub fn of(href: &str) -> Self {
        if href.starts_with('#') {
            Self::Fragment
        } else if is_absolute_url(href) {
            Self::Absolute
        } else {
            Self::Relative
        }
    }
}

/// Check if a link is an absolute URL (`scheme://...` or `//...`).
#[inline]
pub fn is_absolute_url(href: &str) -> bool {
    RE_ABSOLUTE_URL.is_match(href)
}

/// Prefix a relative link target with `root_prefix`.
///
/// Fragment links and absolute URLs are returned unchanged.
///
/// # Examples
///
/// | Input | `root_prefix` | Output |
/// |-------|---------------|--------|
/// | `foo/bar.html` | `../../` | `../../foo/bar.html` |
/// | `https://example.com/x` | `../../` | `https://example.com/x` |
/// | `#section` | `../../` | `#section` |
/// | `foo/bar.html` | `` | `foo/bar.html` |
pub fn rewrite_href<'a>(href: &'a str, root_prefix: &str) -> Cow<'a, str> {
    match LinkKind::of(href) {
        LinkKind::Relative if !root_prefix.is_empty() => Cow::Owned(format!("{root_prefix}{href}")),
        _ => Cow::Borrowed(href),
    }
}

/// Relative path from a page back to the documentation root.
///
/// `page` is relative to the root (`guide/walker/steps.html`); each
/// directory level contributes one `../`.
///
/// | Page | Root prefix |
/// |------|-------------|
/// | `index.html` | `` |
/// | `guide/start.html` | `../` |
/// | `guide/walker/steps.html` | `../../` |
pub fn root_prefix_for(page: &str) -> String {
    let page = page.trim_start_matches('/');
    let depth = page.split('/').count().saturating_sub(1);
    "../".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // LinkKind tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_link_kind_fragment() {
        assert_eq!(LinkKind::of("#section"), LinkKind::Fragment);
        assert_eq!(LinkKind::of("#"), LinkKind::Fragment);
    }

    #[test]
    fn test_link_kind_absolute() {
        assert_eq!(LinkKind::of("https://example.com/x"), LinkKind::Absolute);
        assert_eq!(LinkKind::of("http://example.com"), LinkKind::Absolute);
        assert_eq!(LinkKind::of("git+ssh://host/repo"), LinkKind::Absolute);
        assert_eq!(LinkKind::of("//cdn.example.com/lib.js"), LinkKind::Absolute);
    }

    #[test]
    fn test_link_kind_relative() {
        assert_eq!(LinkKind::of("foo/bar.html"), LinkKind::Relative);
        assert_eq!(LinkKind::of("../up.html"), LinkKind::Relative);
        assert_eq!(LinkKind::of("index.html#top"), LinkKind::Relative);
    }

    #[test]
    fn test_link_kind_scheme_without_slashes_is_relative() {
        // Only `scheme://` counts as absolute
        assert_eq!(LinkKind::of("mailto:someone@example.com"), LinkKind::Relative);
    }

    // ------------------------------------------------------------------------
    // rewrite_href tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_rewrite_relative_link() {
        assert_eq!(rewrite_href("foo/bar.html", "../../"), "../../foo/bar.html");
    }

    #[test]
    fn test_rewrite_keeps_absolute_link() {
        assert_eq!(
            rewrite_href("https://example.com/x", "../../"),
            "https://example.com/x"
        );
        assert_eq!(rewrite_href("//example.com/x", "../"), "//example.com/x");
    }

    #[test]
    fn test_rewrite_keeps_fragment_link() {
        assert_eq!(rewrite_href("#section", "../../"), "#section");
    }

    #[test]
    fn test_rewrite_empty_prefix_borrows() {
        assert!(matches!(rewrite_href("foo.html", ""), Cow::Borrowed("foo.html")));
    }

    // ------------------------------------------------------------------------
    // root_prefix_for tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_root_prefix_for_top_level_page() {
        assert_eq!(root_prefix_for("index.html"), "");
        assert_eq!(root_prefix_for("/introduction.html"), "");
    }

    #[test]
    fn test_root_prefix_for_nested_pages() {
        assert_eq!(root_prefix_for("guide/start.html"), "../");
        assert_eq!(root_prefix_for("guide/walker/steps.html"), "../../");
    }

    #[test]
    fn test_root_prefix_for_directory_index() {
        assert_eq!(root_prefix_for("guide/"), "../");
    }
}
