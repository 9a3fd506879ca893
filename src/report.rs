//! Human readable metadata report
//!
//! Five sections, always in this order: data model, groups, dimensions,
//! variables and global attributes. Empty collections print `{}` so no
//! section is ever blank.

use crate::errors::Result;
use crate::metadata::{AttributeInfo, DimensionInfo, FileMetadata, GroupInfo, VariableInfo};
use netcdf::AttributeValue;
use std::io::{self, Write};

/// Section headings in output order.
pub const SECTIONS: [&str; 5] = ["Data Model", "Groups", "Dimensions", "Variables", "Attributes"];

/// Print the report to standard output.
pub fn print_report(metadata: &FileMetadata) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(metadata, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write the report to `out`.
pub fn write_report<W: Write>(metadata: &FileMetadata, mut out: W) -> Result<()> {
    section(&mut out, SECTIONS[0])?;
    writeln!(out, "{}", metadata.data_model)?;

    section(&mut out, SECTIONS[1])?;
    write_groups(&mut out, &metadata.groups, 0)?;

    section(&mut out, SECTIONS[2])?;
    write_dimensions(&mut out, &metadata.dimensions)?;

    section(&mut out, SECTIONS[3])?;
    write_variables(&mut out, &metadata.variables)?;

    section(&mut out, SECTIONS[4])?;
    write_attributes(&mut out, &metadata.attributes)?;

    Ok(())
}

fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n\n{}\n", title)
}

fn write_groups<W: Write>(out: &mut W, groups: &[GroupInfo], depth: usize) -> io::Result<()> {
    if groups.is_empty() {
        if depth == 0 {
            writeln!(out, "{{}}")?;
        }
        return Ok(());
    }

    let indent = "  ".repeat(depth);
    for group in groups {
        writeln!(
            out,
            "{}'{}': group {} ({} dimensions, {} variables, {} attributes)",
            indent,
            group.name,
            group.path,
            group.dimensions.len(),
            group.variables.len(),
            group.attributes.len()
        )?;
        write_groups(out, &group.groups, depth + 1)?;
    }
    Ok(())
}

fn write_dimensions<W: Write>(out: &mut W, dimensions: &[DimensionInfo]) -> io::Result<()> {
    if dimensions.is_empty() {
        return writeln!(out, "{{}}");
    }

    for dim in dimensions {
        let marker = if dim.is_unlimited { " (unlimited)" } else { "" };
        writeln!(
            out,
            "'{}':{} name = '{}', size = {}",
            dim.name, marker, dim.name, dim.length
        )?;
    }
    Ok(())
}

fn write_variables<W: Write>(out: &mut W, variables: &[VariableInfo]) -> io::Result<()> {
    if variables.is_empty() {
        return writeln!(out, "{{}}");
    }

    for var in variables {
        writeln!(
            out,
            "'{}': {} {}({})",
            var.name,
            var.data_type,
            var.name,
            var.dimensions.join(", ")
        )?;
        for attr in &var.attributes {
            writeln!(out, "    {}: {}", attr.name, value_repr(&attr.value))?;
        }
        let shape: Vec<String> = var.shape.iter().map(|s| s.to_string()).collect();
        // Python tuple syntax: a 1-tuple keeps its trailing comma.
        let shape = if shape.len() == 1 {
            format!("{},", shape[0])
        } else {
            shape.join(", ")
        };
        writeln!(out, "    current shape = ({})", shape)?;
    }
    Ok(())
}

fn write_attributes<W: Write>(out: &mut W, attributes: &[AttributeInfo]) -> io::Result<()> {
    if attributes.is_empty() {
        return writeln!(out, "{{}}");
    }

    let entries: Vec<String> = attributes
        .iter()
        .map(|a| format!("'{}': {}", a.name, value_repr(&a.value)))
        .collect();
    writeln!(out, "{{{}}}", entries.join(",\n "))
}

/// Render an attribute value the way a Python `repr` would show it.
pub fn value_repr(value: &AttributeValue) -> String {
    fn list<T: ToString>(values: &[T]) -> String {
        let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        format!("[{}]", items.join(", "))
    }

    match value {
        AttributeValue::Uchar(v) => v.to_string(),
        AttributeValue::Uchars(vs) => list(vs),
        AttributeValue::Schar(v) => v.to_string(),
        AttributeValue::Schars(vs) => list(vs),
        AttributeValue::Ushort(v) => v.to_string(),
        AttributeValue::Ushorts(vs) => list(vs),
        AttributeValue::Short(v) => v.to_string(),
        AttributeValue::Shorts(vs) => list(vs),
        AttributeValue::Uint(v) => v.to_string(),
        AttributeValue::Uints(vs) => list(vs),
        AttributeValue::Int(v) => v.to_string(),
        AttributeValue::Ints(vs) => list(vs),
        AttributeValue::Ulonglong(v) => v.to_string(),
        AttributeValue::Ulonglongs(vs) => list(vs),
        AttributeValue::Longlong(v) => v.to_string(),
        AttributeValue::Longlongs(vs) => list(vs),
        AttributeValue::Float(v) => float_repr(f64::from(*v), format!("{:?}", v)),
        AttributeValue::Floats(vs) => {
            floats(vs.iter().map(|&v| (f64::from(v), format!("{:?}", v))))
        }
        AttributeValue::Double(v) => float_repr(*v, format!("{:?}", v)),
        AttributeValue::Doubles(vs) => floats(vs.iter().map(|&v| (v, format!("{:?}", v)))),
        AttributeValue::Str(s) => quote(s),
        AttributeValue::Strs(ss) => {
            let items: Vec<String> = ss.iter().map(|s| quote(s)).collect();
            format!("[{}]", items.join(", "))
        }
        #[allow(unreachable_patterns)]
        other => format!("{:?}", other),
    }
}

// `{:?}` keeps the `.0` on whole numbers; only the non-finite spellings differ.
fn float_repr(value: f64, debug: String) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        debug
    }
}

fn floats(values: impl Iterator<Item = (f64, String)>) -> String {
    let items: Vec<String> = values.map(|(v, debug)| float_repr(v, debug)).collect();
    format!("[{}]", items.join(", "))
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.trim_end_matches('\0').chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
