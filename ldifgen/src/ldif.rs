//! LDIF output
//!
//! Renders entries as RFC 2849 content records. Values that are not a
//! SAFE-STRING are base64-encoded after a double colon. No version line,
//! comments or line folding are produced.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{debug, trace, warn};

use crate::data::Entry;
use crate::error::Result;

// ---------------------------------------------------------------------------
// String classification
// ---------------------------------------------------------------------------

/// Check if the value can be written as an LDIF SAFE-STRING:
/// no leading space/colon/less-than, no trailing space, and no NUL, CR, LF
/// or non-ASCII characters anywhere. The empty string is safe.
pub fn is_safe_string(s: &str) -> bool {
    let first = match s.chars().next() {
        Some(c) => c,
        None => return true,
    };
    if first == ' ' || first == ':' || first == '<' {
        return false;
    }
    if s.ends_with(' ') {
        return false;
    }
    s.chars()
        .all(|c| matches!(c as u32, 1..=127) && c != '\n' && c != '\r')
}

/// Standard padded base64 of the value's UTF-8 bytes.
pub fn encode_value(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Append one `name: value` or `name:: base64` line, without a newline.
fn push_ldif_line(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    if is_safe_string(value) {
        out.push_str(": ");
        out.push_str(value);
    } else {
        out.push_str(":: ");
        out.push_str(&encode_value(value));
    }
}

/// Render an entry that has already passed validation.
fn render_entry(out: &mut String, dn: &str, entry: &Entry) {
    push_ldif_line(out, "dn", dn);
    for oc in &entry.object_classes {
        out.push('\n');
        push_ldif_line(out, "objectClass", oc);
    }
    for attr in &entry.attributes {
        for value in &attr.values {
            out.push('\n');
            push_ldif_line(out, &attr.name, value);
        }
    }
}

/// Validate, then render one entry onto `out`. Nothing is appended when
/// validation fails.
fn append_entry(out: &mut String, entry: &Entry) -> Result<()> {
    let dn = entry.dn();
    if let Err(e) = entry.validate() {
        warn!(dn = %dn, error = %e, "rejecting invalid entry");
        return Err(e.into());
    }
    trace!(dn = %dn, "rendering entry");
    render_entry(out, &dn, entry);
    Ok(())
}

/// Render a single entry. Lines are joined with `\n`; there is no
/// trailing newline.
pub fn generate(entry: &Entry) -> Result<String> {
    let mut out = String::new();
    append_entry(&mut out, entry)?;
    Ok(out)
}

/// Render entries in order, separated by one blank line.
///
/// Fails on the first invalid entry; no partial output is returned.
pub fn generate_batch(entries: &[Entry]) -> Result<String> {
    debug!(entries = entries.len(), "rendering LDIF batch");
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        append_entry(&mut out, entry)?;
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Streaming writers
// ---------------------------------------------------------------------------

/// Write the same bytes as [`generate`] to `w`.
pub fn write_entry(w: &mut dyn Write, entry: &Entry) -> Result<()> {
    w.write_all(generate(entry)?.as_bytes())?;
    Ok(())
}

/// Write the same bytes as [`generate_batch`] to `w`, one entry at a time.
///
/// Each entry is validated before anything of it (or its separator) is
/// written, so on failure `w` holds exactly the entries before the
/// invalid one.
pub fn write_batch(w: &mut dyn Write, entries: &[Entry]) -> Result<()> {
    debug!(entries = entries.len(), "writing LDIF batch");
    for (i, entry) in entries.iter().enumerate() {
        let block = generate(entry)?;
        if i > 0 {
            w.write_all(b"\n\n")?;
        }
        w.write_all(block.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Attribute;
    use crate::error::{LdifError, ValidationError};

    fn person(uid: &str, cn: &str) -> Entry {
        Entry::person(uid, "dc=x", cn, "Doe", vec![])
    }

    fn capture<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> (Result<()>, String) {
        let mut buf = Vec::new();
        let r = f(&mut buf);
        (r, String::from_utf8(buf).unwrap())
    }

    // ── Group 1: is_safe_string ─────────────────────────────────

    #[test]
    fn safe_plain() {
        assert!(is_safe_string(""));
        assert!(is_safe_string("plain value"));
        assert!(is_safe_string("hello"));
        assert!(is_safe_string("a:b<c"));
        assert!(is_safe_string("tab\there"));
    }

    #[test]
    fn unsafe_first_char() {
        assert!(!is_safe_string(" leading"));
        assert!(!is_safe_string(":colon-start"));
        assert!(!is_safe_string("<angle"));
    }

    #[test]
    fn unsafe_trailing_space() {
        assert!(!is_safe_string("trailing "));
        assert!(!is_safe_string(" "));
    }

    #[test]
    fn unsafe_chars_anywhere() {
        assert!(!is_safe_string("has\nnewline"));
        assert!(!is_safe_string("has\rreturn"));
        assert!(!is_safe_string("has\0null"));
        assert!(!is_safe_string("é"));
        assert!(!is_safe_string("Jöhn"));
    }

    #[test]
    fn del_is_safe() {
        assert!(is_safe_string("x\u{7f}"));
    }

    // ── Group 2: encode_value ───────────────────────────────────

    #[test]
    fn encode_padding() {
        assert_eq!(encode_value(""), "");
        assert_eq!(encode_value("a"), "YQ==");
        assert_eq!(encode_value("ab"), "YWI=");
        assert_eq!(encode_value("abc"), "YWJj");
        assert_eq!(encode_value(" Test"), "IFRlc3Q=");
    }

    #[test]
    fn encode_utf8_bytes() {
        assert_eq!(encode_value("Döe"), "RMO2ZQ==");
    }

    #[test]
    fn long_values_are_not_folded() {
        let v = "é".repeat(100);
        let encoded = encode_value(&v);
        assert!(encoded.len() > 76);
        assert!(!encoded.contains('\n'));
    }

    // ── Group 3: generate ───────────────────────────────────────

    #[test]
    fn generate_exact_output() {
        let e = Entry::person("jdoe", "ou=people,dc=example,dc=com", "John Doe", "Doe", vec![]);
        assert_eq!(
            generate(&e).unwrap(),
            "dn: uid=jdoe,ou=people,dc=example,dc=com\n\
             objectClass: top\n\
             objectClass: person\n\
             objectClass: organizationalPerson\n\
             objectClass: inetOrgPerson\n\
             uid: jdoe\n\
             cn: John Doe\n\
             sn: Doe"
        );
    }

    #[test]
    fn generate_base64_value() {
        let out = generate(&person("test", " Test")).unwrap();
        assert!(out.contains("\ncn:: IFRlc3Q=\n"));
        assert!(!out.contains("\ncn: "));
    }

    #[test]
    fn generate_base64_dn() {
        // the parent DN is not escaped, so non-ASCII there forces base64
        let e = Entry::organizational_unit("x", "dc=é", vec![]);
        let out = generate(&e).unwrap();
        assert!(out.starts_with(&format!("dn:: {}\n", encode_value("ou=x,dc=é"))));
    }

    #[test]
    fn escaped_rdn_stays_plain() {
        let e = Entry::organizational_unit("é", "dc=x", vec![]);
        let out = generate(&e).unwrap();
        assert!(out.starts_with("dn: ou=\\c3\\a9,dc=x\n"));
        assert!(out.ends_with(&format!("ou:: {}", encode_value("é"))));
    }

    #[test]
    fn generate_multi_valued_in_order() {
        let e = Entry::person(
            "jdoe",
            "dc=x",
            "John Doe",
            "Doe",
            vec![Attribute::with_values(
                "mail",
                vec!["john@example.com".into(), "jdoe@example.com".into()],
            )],
        );
        let out = generate(&e).unwrap();
        let a = out.find("mail: john@example.com").unwrap();
        let b = out.find("mail: jdoe@example.com").unwrap();
        assert!(a < b);
        assert!(out.ends_with("mail: jdoe@example.com"));
    }

    #[test]
    fn generate_empty_value() {
        let mut e = Entry::new("cn=a", "", vec!["top".into()]);
        e.add_attribute("description", "");
        assert_eq!(generate(&e).unwrap(), "dn: cn=a\nobjectClass: top\ndescription: ");
    }

    #[test]
    fn generate_invalid_produces_nothing() {
        let e = Entry::new("invalid", "", vec![]);
        match generate(&e) {
            Err(LdifError::Validation(err)) => assert_eq!(err.field(), "dn"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    // ── Group 4: generate_batch ─────────────────────────────────

    #[test]
    fn batch_separated_by_blank_line() {
        let out = generate_batch(&[person("u1", "U1"), person("u2", "U2")]).unwrap();
        assert_eq!(out.matches("\n\n").count(), 1);
        assert_eq!(out.matches("dn:").count(), 2);
        assert!(!out.ends_with('\n'));
        let blocks: Vec<&str> = out.split("\n\n").collect();
        assert!(blocks[0].starts_with("dn: uid=u1,dc=x"));
        assert!(blocks[1].starts_with("dn: uid=u2,dc=x"));
    }

    #[test]
    fn batch_empty_and_single() {
        assert_eq!(generate_batch(&[]).unwrap(), "");
        let e = person("u1", "U1");
        assert_eq!(generate_batch(&[e.clone()]).unwrap(), generate(&e).unwrap());
    }

    #[test]
    fn batch_fails_fast() {
        let bad = Entry::new("invalid", "", vec!["top".into()]);
        let r = generate_batch(&[person("u1", "U1"), bad, person("u2", "U2")]);
        assert!(matches!(
            r,
            Err(LdifError::Validation(ValidationError::InvalidDn { .. }))
        ));
    }

    // ── Group 5: streaming writers ──────────────────────────────

    #[test]
    fn write_entry_matches_generate() {
        let e = person("u1", "U1");
        let (r, out) = capture(|w| write_entry(w, &e));
        assert!(r.is_ok());
        assert_eq!(out, generate(&e).unwrap());
    }

    #[test]
    fn write_batch_matches_generate_batch() {
        let entries = vec![person("u1", "U1"), person("u2", " U2")];
        let (r, out) = capture(|w| write_batch(w, &entries));
        assert!(r.is_ok());
        assert_eq!(out, generate_batch(&entries).unwrap());
    }

    #[test]
    fn write_batch_stops_before_invalid_entry() {
        let bad = Entry::new("cn=x", "", vec![]);
        let good = person("u1", "U1");
        let (r, out) = capture(|w| write_batch(w, &[good.clone(), bad, person("u2", "U2")]));
        assert!(r.is_err());
        assert_eq!(out, generate(&good).unwrap());
    }
}
