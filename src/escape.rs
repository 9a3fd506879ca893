//! ncdump-compatible escaping of text attribute values

use crate::data_model::DataModel;
use std::fmt::Write;

/// Escape `text` the way ncdump prints `char` attributes.
///
/// Trailing NULs are dropped, the usual C escapes are applied and any other
/// control character is written as a backslash and three octal digits.
/// Embedded newlines split the value into separate quoted strings unless the
/// file is NETCDF4, where a list of strings would be ambiguous.
pub fn escape_text(text: &str, data_model: DataModel) -> String {
    let trimmed = text.trim_end_matches('\0');
    let mut out = String::with_capacity(trimmed.len());

    for c in trimmed.chars() {
        match c {
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' if data_model == DataModel::Netcdf4 => out.push_str("\\n"),
            '\n' => out.push_str("\\n\",\""),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }

    out
}
