//! Text decoding and path helpers.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use encoding_rs::Encoding;

use crate::error::{Error, Result};

/// How many leading bytes are scanned for a `<meta>` charset declaration.
const CHARSET_SNIFF_LIMIT: usize = 1024;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from a `<meta>` charset declaration)
/// 3. Falls back to Windows-1252 (superset of ISO-8859-1)
///
/// Returns the text together with the encoding it was decoded from. A
/// UTF-16 hint is taken as UTF-8, as browsers do for `<meta>` declarations.
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(
    bytes: &'a [u8],
    hint_encoding: Option<&str>,
) -> (Cow<'a, str>, &'static Encoding) {
    let (result, encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return (result, encoding);
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = Encoding::for_label(name.as_bytes())
    {
        let encoding = encoding.output_encoding();
        let (result, _, _) = encoding.decode(bytes);
        return (result, encoding);
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    (result, encoding_rs::WINDOWS_1252)
}

/// Encode text back into the encoding a document was read from.
///
/// Characters the encoding cannot represent become numeric character
/// references. Encodings with no byte-for-byte output form (UTF-16) are
/// written as UTF-8.
pub fn encode_text<'a>(text: &'a str, encoding: &'static Encoding) -> Cow<'a, [u8]> {
    let (bytes, _, _) = encoding.output_encoding().encode(text);
    bytes
}

/// Extract the charset declared by a `<meta>` tag near the start of a document.
///
/// Recognizes both `<meta charset="...">` and
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`.
pub fn extract_meta_charset(bytes: &[u8]) -> Option<&str> {
    let head = &bytes[..bytes.len().min(CHARSET_SNIFF_LIMIT)];
    let mut rest = head;

    while let Some(pos) = find_ascii_ci(rest, b"<meta") {
        rest = &rest[pos + 5..];
        let end = rest.iter().position(|&b| b == b'>').unwrap_or(rest.len());
        let tag = &rest[..end];

        if let Some(pos) = find_ascii_ci(tag, b"charset") {
            let value = tag[pos + 7..].trim_ascii_start();
            if let Some(value) = value.strip_prefix(b"=") {
                let value = value.trim_ascii_start();
                let value = value
                    .strip_prefix(b"\"")
                    .or_else(|| value.strip_prefix(b"'"))
                    .unwrap_or(value);
                let len = value
                    .iter()
                    .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'/') || b.is_ascii_whitespace())
                    .unwrap_or(value.len());
                if len > 0 {
                    return std::str::from_utf8(&value[..len]).ok();
                }
            }
        }
        rest = &rest[end..];
    }
    None
}

fn find_ascii_ci(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

/// Make a path absolute against the current directory and normalize it
/// lexically (`.` dropped, `..` folded into its parent).
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidPath(path.to_path_buf()));
    }
    let absolute = std::path::absolute(path)?;
    Ok(normalize_path(&absolute))
}

/// Lexically normalize a path without touching the filesystem.
///
/// `..` at the root stays at the root, matching how the OS resolves it.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}
