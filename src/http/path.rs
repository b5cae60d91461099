//! Request path translation
//!
//! Turns a URL path into a filesystem path under the served root. Empty,
//! `.` and `..` segments are dropped after percent-decoding, so the joined
//! path never climbs above the root lexically. Symlinks are checked later
//! by the static file handler.

use std::path::{Path, PathBuf};

/// Result of translating a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    /// Target on disk, always `root` joined with clean segments
    pub fs_path: PathBuf,
    /// Percent-decoded URL path, for display
    pub decoded: String,
    pub trailing_slash: bool,
}

pub fn translate_path(root: &Path, request_path: &str) -> TranslatedPath {
    // Query and fragment are not part of the file name
    let raw = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let decoded = percent_decode(raw);
    let trailing_slash = decoded.ends_with('/');

    let mut fs_path = root.to_path_buf();
    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
            continue;
        }
        fs_path.push(segment);
    }

    TranslatedPath {
        fs_path,
        decoded,
        trailing_slash,
    }
}

/// Decode `%XX` escapes; malformed escapes are kept verbatim
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Encode a file name for use inside an `href`
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~' | b'/') {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
