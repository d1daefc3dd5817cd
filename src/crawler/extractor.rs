//! Link extractor
//!
//! A substring scan over fetched content, not a markup parser: it looks for
//! `href="` markers and takes the quoted value up to the next double quote.
//! It does not decode entities, handle single-quoted attributes, or
//! validate URL syntax.

use url::{Position, Url};

const HREF_MARKER: &str = "href=\"";

/// Extracts outbound links from page content
///
/// For each `href="…"` marker, the quoted substring is taken verbatim,
/// except that root-relative paths (leading `/`) get the origin's
/// scheme+host prepended. A marker with no closing quote makes the
/// remainder of the content unscannable: extraction stops there and returns
/// whatever was already found.
///
/// # Arguments
///
/// * `content` - The fetched page content
/// * `origin` - The address the content was fetched from
///
/// # Returns
///
/// The discovered addresses, in document order; empty if no marker is found
pub fn extract_links(content: &str, origin: &str) -> Vec<String> {
    let mut links = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find(HREF_MARKER) {
        rest = &rest[start + HREF_MARKER.len()..];

        let Some(end) = rest.find('"') else {
            // Unterminated attribute; the rest of the page is unscannable
            break;
        };
        let raw = &rest[..end];
        rest = &rest[end..];

        if raw.is_empty() {
            continue;
        }
        links.push(resolve(raw, origin));
    }

    links
}

/// Resolves one extracted substring against the originating address
///
/// Root-relative paths are joined to the origin's scheme+host when the
/// origin parses as a URL, and concatenated verbatim onto the origin string
/// otherwise; everything else is returned unchanged.
fn resolve(raw: &str, origin: &str) -> String {
    if !raw.starts_with('/') {
        return raw.to_string();
    }

    match Url::parse(origin) {
        Ok(url) if url.has_host() => format!("{}{}", &url[..Position::BeforePath], raw),
        _ => format!("{}{}", origin, raw),
    }
}
