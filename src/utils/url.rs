//! Page location handling.
//!
//! Link targets are resolved against the current page the way a browser
//! fills in `HTMLAnchorElement.href`, and the current location is serialized
//! the same way, so both sides compare as WHATWG URL strings: percent-encoded
//! paths, lowercase hosts, and `/` as the path of a bare origin.

use url::Url;

/// Directory index appended to locations ending in `/`.
pub const DIRECTORY_INDEX: &str = "index.html";

/// Strip the fragment and alias a trailing `/` to `/index.html`.
///
/// | Location | Normalized |
/// |----------|------------|
/// | `https://d.io/book/guide.html#intro` | `https://d.io/book/guide.html` |
/// | `https://d.io/book/` | `https://d.io/book/index.html` |
/// | `https://D.IO` | `https://d.io/index.html` |
/// | `https://d.io/book/getting started.html` | `https://d.io/book/getting%20started.html` |
///
/// A location that does not parse as an absolute URL only has its fragment
/// and trailing `/` handled.
pub fn normalize_location(location: &str) -> String {
    let Ok(mut url) = Url::parse(location) else {
        let (page, _) = location.split_once('#').unwrap_or((location, ""));
        return with_directory_index(page);
    };

    url.set_fragment(None);
    if url.path().ends_with('/') {
        let path = with_directory_index(url.path());
        url.set_path(&path);
    }
    url.into()
}

fn with_directory_index(path: &str) -> String {
    if path.ends_with('/') {
        format!("{path}{DIRECTORY_INDEX}")
    } else {
        path.to_owned()
    }
}

/// WHATWG serialization of `url`, or `url` itself if it does not parse.
pub fn canonicalize(url: &str) -> String {
    Url::parse(url).map_or_else(|_| url.to_owned(), String::from)
}

/// Resolve `reference` against the absolute `base` URL.
///
/// `None` when `base` is not an absolute URL or the joined URL is invalid.
pub fn resolve(base: &str, reference: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(reference).ok().map(String::from)
}
