//! Content type inference.
//!
//! The type of a file is decided in three steps:
//!
//! 1. Keys ending in `.svg` are always `image/svg+xml`. Sniffing sees SVG as
//!    XML or plain text.
//! 2. The extension of the resolved file is looked up with `mime_guess`.
//!    Textual types carry an explicit `charset=utf-8`.
//! 3. Otherwise the leading bytes are sniffed: byte-order marks and markup
//!    signatures first, then magic numbers via `infer`, then a text/binary
//!    check over the first [`SNIFF_WINDOW`] bytes.

use std::path::Path;

use mime_guess::mime;

/// MIME type forced for `.svg` keys.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Fallback for text content.
pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// Fallback for binary content.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Number of leading bytes considered by the signature and text checks.
pub const SNIFF_WINDOW: usize = 512;

/// Tags that mark content as HTML when they open the document.
const HTML_TAGS: &[&[u8]] = &[
    b"<!DOCTYPE HTML",
    b"<HTML",
    b"<HEAD",
    b"<SCRIPT",
    b"<IFRAME",
    b"<H1",
    b"<DIV",
    b"<FONT",
    b"<TABLE",
    b"<A",
    b"<STYLE",
    b"<TITLE",
    b"<B",
    b"<BODY",
    b"<BR",
    b"<P",
    b"<!--",
];

/// Decide the content type of a file.
///
/// `key` is the root-relative key, `source` the resolved path and `head`
/// the bytes read from the start of the file (possibly none).
pub fn detect_content_type(key: &str, source: &Path, head: &[u8]) -> String {
    if key.ends_with(".svg") {
        return SVG_CONTENT_TYPE.to_string();
    }

    if let Some(content_type) = type_by_extension(source) {
        return content_type;
    }

    sniff_content_type(head)
}

/// Look up a MIME type from the file extension.
pub fn type_by_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    let guess = mime_guess::from_ext(ext).first()?;

    if guess.type_() == mime::TEXT && guess.get_param(mime::CHARSET).is_none() {
        Some(format!("{}; charset=utf-8", guess.essence_str()))
    } else {
        Some(guess.to_string())
    }
}

/// Infer a MIME type from leading file bytes.
///
/// Never fails: content that matches nothing is either
/// [`TEXT_PLAIN_UTF8`] or [`OCTET_STREAM`]. An empty slice is text.
pub fn sniff_content_type(head: &[u8]) -> String {
    let window = &head[..head.len().min(SNIFF_WINDOW)];

    if let Some(content_type) = sniff_bom(window) {
        return content_type.to_string();
    }

    if let Some(content_type) = sniff_markup(window) {
        return content_type.to_string();
    }

    if window.starts_with(b"%PDF-") {
        return "application/pdf".to_string();
    }
    if window.starts_with(b"%!PS-Adobe-") {
        return "application/postscript".to_string();
    }

    if let Some(kind) = infer::get(head) {
        return kind.mime_type().to_string();
    }

    if window.iter().any(|&b| is_binary_byte(b)) {
        OCTET_STREAM.to_string()
    } else {
        TEXT_PLAIN_UTF8.to_string()
    }
}

fn sniff_bom(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFE, 0xFF]) {
        Some("text/plain; charset=utf-16be")
    } else if data.starts_with(&[0xFF, 0xFE]) {
        Some("text/plain; charset=utf-16le")
    } else if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        Some(TEXT_PLAIN_UTF8)
    } else {
        None
    }
}

fn sniff_markup(data: &[u8]) -> Option<&'static str> {
    let start = data
        .iter()
        .position(|&b| !is_whitespace_byte(b))
        .unwrap_or(data.len());
    let data = &data[start..];

    if data.starts_with(b"<?xml") {
        return Some("text/xml; charset=utf-8");
    }

    for &tag in HTML_TAGS {
        if data.len() <= tag.len() {
            continue;
        }
        if !data[..tag.len()].eq_ignore_ascii_case(tag) {
            continue;
        }
        // The tag has to end right there: `<b>` is HTML, `<bold` is not.
        if matches!(data[tag.len()], b' ' | b'>') {
            return Some("text/html; charset=utf-8");
        }
    }

    None
}

fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | 0x0C | b'\r' | b' ')
}

/// Control bytes that never show up in text.
fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}
