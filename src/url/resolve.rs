use percent_encoding::percent_decode_str;
use url::Url;

/// File name used when an image URL has no usable final path segment
pub const FALLBACK_FILE_NAME: &str = "image";

/// Returns the scheme + host (+ port) prefix of a URL, without a trailing slash
///
/// # Example
///
/// ```
/// use diary_walker::url::site_origin;
/// use url::Url;
///
/// let url = Url::parse("https://diary.example.com/detail/1?cd=MEMBER").unwrap();
/// assert_eq!(site_origin(&url), "https://diary.example.com");
/// ```
pub fn site_origin(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Resolves a site-relative path against the site origin
///
/// Only sources starting with `/` are resolved; anything else (absolute CDN
/// URLs, `data:` URIs, document-relative paths) yields `None`. The origin is
/// prefixed verbatim, so `//host/x` stays on the diary site.
///
/// # Arguments
///
/// * `origin` - Site origin as returned by [`site_origin`]
/// * `src` - Raw attribute value from the page
pub fn resolve_site_relative(origin: &str, src: &str) -> Option<Url> {
    if !src.starts_with('/') {
        return None;
    }

    Url::parse(&format!("{}{}", origin, src)).ok()
}

/// Derives a file name from the final path segment of a URL
///
/// The segment is percent-decoded, so `/img/%E5%86%99%E7%9C%9F%201.jpg` gives `写真 1.jpg`.
/// The raw segment is kept when decoding fails or would introduce a path
/// separator. The query string is not part of the name. Falls back to
/// [`FALLBACK_FILE_NAME`] when the path ends with `/` or has no segments.
pub fn file_name_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(decode_segment)
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

fn decode_segment(segment: &str) -> String {
    match percent_decode_str(segment).decode_utf8() {
        Ok(decoded) if !decoded.contains(['/', '\\']) => decoded.into_owned(),
        _ => segment.to_string(),
    }
}
