//! Small XML text helpers shared by the reader and writer

use std::borrow::Cow;

use quick_xml::events::BytesStart;

use crate::error::XlsxResult;

/// Escape text for element content or attribute values
pub(crate) fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Decode the `_xHHHH_` escapes spreadsheet applications use for control
/// characters in strings (`_x000d_` is CR, `_x005f_` is `_`)
///
/// Anything that is not a complete escape is copied through unchanged.
pub(crate) fn decode_excel_escapes(s: &str) -> Cow<'_, str> {
    if !s.contains("_x") {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("_x") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match decode_escape(candidate) {
            Some(c) => {
                out.push(c);
                rest = &candidate[7..];
            }
            None => {
                out.push('_');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Encode characters XML 1.0 cannot carry as `_xHHHH_`
///
/// Every `_` directly followed by `x` is written as `_x005F_`, so no
/// literal text can be mistaken for an escape by [`decode_excel_escapes`].
pub(crate) fn encode_excel_escapes(s: &str) -> Cow<'_, str> {
    let needs_escape = |i: usize, c: char| {
        is_forbidden_in_xml(c) || (c == '_' && s[i + 1..].starts_with('x'))
    };
    if !s.char_indices().any(|(i, c)| needs_escape(i, c)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for (i, c) in s.char_indices() {
        if needs_escape(i, c) {
            out.push_str(&format!("_x{:04X}_", c as u32));
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Control characters outside XML 1.0's `Char` production, plus CR which
/// parsers fold into LF
fn is_forbidden_in_xml(c: char) -> bool {
    match c {
        '\t' | '\n' => false,
        '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => true,
        _ => false,
    }
}

/// Decode one `_xHHHH_` at the start of `s`
fn decode_escape(s: &str) -> Option<char> {
    let bytes = s.as_bytes();
    if bytes.len() < 7 || !bytes.starts_with(b"_x") || bytes[6] != b'_' {
        return None;
    }
    let hex = &bytes[2..6];
    if !hex.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(hex).ok()?;
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Get an attribute value by name, unescaped
pub(crate) fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> XlsxResult<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
