//! Content type lookup by file extension.

const TEXT_HTML: &str = "text/html;charset=utf-8";

/// Returns the `Content-Type` value for a resource path.
///
/// Only `.html`, `.css` and `.js` are recognised; everything else is served
/// as HTML.
///
/// # Example
///
/// ```
/// # use turnstile::http::mime::content_type;
/// assert_eq!(content_type("/css/styles.css"), "text/css;charset=utf-8");
/// assert_eq!(content_type("/index"), "text/html;charset=utf-8");
/// ```
pub fn content_type(path: &str) -> &'static str {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let extension = file_name.rsplit_once('.').map(|(_, ext)| ext);

    match extension {
        Some("html") => TEXT_HTML,
        Some("css") => "text/css;charset=utf-8",
        Some("js") => "application/javascript;charset=utf-8",
        _ => TEXT_HTML,
    }
}
