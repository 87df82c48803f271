//! Key-sorting JSON canonicalizer.
//!
//! Output rules:
//! - object keys sorted by byte order, at every depth
//! - array order preserved
//! - no insignificant whitespace
//! - `<`, `>`, `&`, U+2028, and U+2029 written as `\u` escapes, matching the
//!   escaping of the reference signer so that sign bytes agree
//!
//! - floats in plain decimal inside `[1e-6, 1e21)` and in exponent form
//!   (`1e+21`, `1.5e-7`) outside it, as the reference signer formats them
//!
//! Integers are written exactly. The reference signer reads every number
//! as a double, so it would round integers beyond 2^53; amino JSON never
//! carries such numbers because 64-bit values are strings.
//!
//! Sorting is explicit and does not depend on how `serde_json` orders its
//! maps internally.

use serde_json::{Number, Value};

use crate::error::CanonicalError;

/// Re-emit JSON text with every object's keys sorted.
///
/// Semantically equal inputs produce byte-identical output, and
/// `sort_json(sort_json(x)) == sort_json(x)`.
pub fn sort_json(input: &[u8]) -> Result<Vec<u8>, CanonicalError> {
    let value: Value = serde_json::from_slice(input)?;
    Ok(canonical_json_bytes(&value))
}

/// Encode a parsed JSON value in canonical form.
pub fn canonical_json_bytes(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(out, item);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            out.push(b'{');
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_string(out, key);
                out.push(b':');
                write_value(out, value);
            }
            out.push(b'}');
        }
    }
}

fn write_number(out: &mut Vec<u8>, n: &Number) {
    match n.as_f64() {
        Some(f) if n.is_f64() => out.extend_from_slice(format_float(f).as_bytes()),
        _ => out.extend_from_slice(n.to_string().as_bytes()),
    }
}

/// Shortest round-trip digits, with a signed exponent outside `[1e-6, 1e21)`.
fn format_float(f: f64) -> String {
    let abs = f.abs();
    if abs == 0.0 || (1e-6..1e21).contains(&abs) {
        return f.to_string();
    }
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    out.push(b'"');
    for c in s.chars() {
        match c {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            '\u{8}' => out.extend_from_slice(b"\\b"),
            '\u{c}' => out.extend_from_slice(b"\\f"),
            '<' | '>' | '&' => write_unicode_escape(out, c),
            c if (c as u32) < 0x20 || matches!(c as u32, 0x2028 | 0x2029) => {
                write_unicode_escape(out, c)
            }
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out.push(b'"');
}

fn write_unicode_escape(out: &mut Vec<u8>, c: char) {
    out.extend_from_slice(format!("\\u{:04x}", c as u32).as_bytes());
}
