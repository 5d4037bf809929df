//! Photo URL validity gate.
//!
//! A photo only enters layout if its URL parses as http(s) with a host.
//! Seed/mock data from the upstream app carries placeholder-service
//! URLs; those are rejected unconditionally. No network probe is ever
//! made here.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HTTP_URL_RE: Regex =
        Regex::new(r"^https?://[^/\s?#]+").expect("invalid URL regex");
}

/// Domain substrings that mark a URL as placeholder/mock data.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "placeholder.com",
    "placehold.it",
    "placehold.co",
    "via.placeholder",
    "dummyimage.com",
    "fakeimg.pl",
    "example.com",
    "foto-mock",
];

/// Returns true when the URL is worth placing on a page.
pub fn is_renderable_url(url: &str) -> bool {
    let trimmed = url.trim();
    if trimmed.is_empty() || !HTTP_URL_RE.is_match(trimmed) {
        return false;
    }
    let lower = trimmed.to_lowercase();
    !PLACEHOLDER_MARKERS.iter().any(|m| lower.contains(m))
}
