//! RFC 4514 helpers: escaping of RDN values and splitting of DNs.

use crate::error::DnSyntax;

/// Characters that must be backslash-escaped wherever they occur in a value.
const DN_SPECIALS: &[char] = &[',', '+', '"', '\\', '<', '>', ';'];

/// Escape a single RDN value per RFC 4514.
///
/// A leading `#` or space and a trailing space are escaped, the special
/// characters are escaped wherever they occur, and anything outside
/// printable ASCII is written as `\xx` pairs, one per UTF-8 byte.
pub fn escape_dn_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, c) in value.char_indices() {
        let leading = i == 0 && (c == '#' || c == ' ');
        let trailing = i > 0 && c == ' ' && i + 1 == value.len();
        if leading || trailing || DN_SPECIALS.contains(&c) {
            out.push('\\');
            out.push(c);
        } else if c < ' ' || c > '~' {
            let mut buf = [0u8; 4];
            for b in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("\\{:02x}", b));
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Check the keystring grammar: a leading ASCII letter followed by
/// letters, digits or hyphens.
pub fn is_keystring(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|c| c.is_ascii_alphanumeric() || c == b'-')
}

/// Split a DN into RDN components, handling backslash-escaped characters.
///
/// An escaped comma does not separate components. A DN ending in a lone
/// backslash is rejected. An empty DN has no components.
pub fn explode_dn(dn: &str) -> Result<Vec<&str>, DnSyntax> {
    if dn.is_empty() {
        return Ok(vec![]);
    }
    let mut parts = Vec::new();
    let mut start = 0;
    let bytes = dn.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            if i + 1 >= bytes.len() {
                return Err(DnSyntax::UnterminatedEscape);
            }
            i += 2; // skip escaped char
        } else if bytes[i] == b',' {
            parts.push(&dn[start..i]);
            start = i + 1;
            i += 1;
        } else {
            i += 1;
        }
    }
    parts.push(&dn[start..]);
    Ok(parts)
}

/// Split one RDN component into its attribute type and value at the first
/// unescaped `=`.
pub fn split_rdn(rdn: &str) -> Result<(&str, &str), DnSyntax> {
    let bytes = rdn.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'=' => return Ok((&rdn[..i], &rdn[i + 1..])),
            _ => i += 1,
        }
    }
    Err(DnSyntax::MissingEquals)
}
