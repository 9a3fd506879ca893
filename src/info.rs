//! JSON "info" document describing a file's structure
//!
//! Served by `/get-info` and printed by `--json`. Layout:
//!
//! ```json
//! {
//!   "data_model": "NETCDF4",
//!   "dimensions": { "time": "<unlimited>", "x": 100 },
//!   "variables": {
//!     "concentration": {
//!       "attributes": { "units": "ppm" },
//!       "dimensions": ["time", "z", "y", "x"]
//!     }
//!   },
//!   "attributes": { "title": "..." }
//! }
//! ```
//!
//! A `groups` key, holding the same layout per subgroup, appears only when
//! the group has subgroups. Keys inside every mapping are sorted by name.

use crate::data_model::DataModel;
use crate::escape::escape_text;
use crate::metadata::{AttributeInfo, DimensionInfo, FileMetadata, GroupInfo, VariableInfo};
use netcdf::AttributeValue;
use serde_json::{json, Map, Number, Value};

/// Placeholder used instead of a length for unlimited dimensions.
pub const UNLIMITED: &str = "<unlimited>";

/// Build the info document for the root group of `metadata`.
pub fn info_document(metadata: &FileMetadata) -> Value {
    let mut doc = Map::new();
    doc.insert(
        "data_model".to_string(),
        Value::String(metadata.data_model.to_string()),
    );
    append_group(
        &mut doc,
        &metadata.dimensions,
        &metadata.variables,
        &metadata.attributes,
        &metadata.groups,
        metadata.data_model,
    );
    Value::Object(doc)
}

fn group_document(group: &GroupInfo, model: DataModel) -> Value {
    let mut doc = Map::new();
    append_group(
        &mut doc,
        &group.dimensions,
        &group.variables,
        &group.attributes,
        &group.groups,
        model,
    );
    Value::Object(doc)
}

fn append_group(
    doc: &mut Map<String, Value>,
    dimensions: &[DimensionInfo],
    variables: &[VariableInfo],
    attributes: &[AttributeInfo],
    groups: &[GroupInfo],
    model: DataModel,
) {
    doc.insert("dimensions".to_string(), dimensions_object(dimensions));

    let mut vars: Vec<&VariableInfo> = variables.iter().collect();
    vars.sort_by(|a, b| a.name.cmp(&b.name));
    let vars: Map<String, Value> = vars
        .into_iter()
        .map(|v| (v.name.clone(), variable_object(v, model)))
        .collect();
    doc.insert("variables".to_string(), Value::Object(vars));

    doc.insert("attributes".to_string(), attributes_object(attributes, model));

    if !groups.is_empty() {
        let mut subgroups: Vec<&GroupInfo> = groups.iter().collect();
        subgroups.sort_by(|a, b| a.name.cmp(&b.name));
        let subgroups: Map<String, Value> = subgroups
            .into_iter()
            .map(|g| (g.name.clone(), group_document(g, model)))
            .collect();
        doc.insert("groups".to_string(), Value::Object(subgroups));
    }
}

fn dimensions_object(dimensions: &[DimensionInfo]) -> Value {
    let mut dims: Vec<&DimensionInfo> = dimensions.iter().collect();
    dims.sort_by(|a, b| a.name.cmp(&b.name));
    Value::Object(
        dims.into_iter()
            .map(|d| {
                let value = if d.is_unlimited {
                    Value::String(UNLIMITED.to_string())
                } else {
                    json!(d.length)
                };
                (d.name.clone(), value)
            })
            .collect(),
    )
}

fn variable_object(var: &VariableInfo, model: DataModel) -> Value {
    json!({
        "attributes": attributes_object(&var.attributes, model),
        "dimensions": var.dimensions,
    })
}

fn attributes_object(attributes: &[AttributeInfo], model: DataModel) -> Value {
    let mut attrs: Vec<&AttributeInfo> = attributes.iter().collect();
    attrs.sort_by(|a, b| a.name.cmp(&b.name));
    Value::Object(
        attrs
            .into_iter()
            .map(|a| (a.name.clone(), attribute_json(&a.value, model)))
            .collect(),
    )
}

/// Convert an attribute value to JSON.
///
/// Single values become scalars and multiple values become arrays. Text is
/// escaped ncdump-style and non-finite floats become `null`.
pub fn attribute_json(value: &AttributeValue, model: DataModel) -> Value {
    fn list<T: Copy>(values: &[T], f: impl Fn(T) -> Value) -> Value {
        Value::Array(values.iter().map(|&v| f(v)).collect())
    }

    match value {
        AttributeValue::Uchar(v) => json!(v),
        AttributeValue::Uchars(vs) => json!(vs),
        AttributeValue::Schar(v) => json!(v),
        AttributeValue::Schars(vs) => json!(vs),
        AttributeValue::Ushort(v) => json!(v),
        AttributeValue::Ushorts(vs) => json!(vs),
        AttributeValue::Short(v) => json!(v),
        AttributeValue::Shorts(vs) => json!(vs),
        AttributeValue::Uint(v) => json!(v),
        AttributeValue::Uints(vs) => json!(vs),
        AttributeValue::Int(v) => json!(v),
        AttributeValue::Ints(vs) => json!(vs),
        AttributeValue::Ulonglong(v) => json!(v),
        AttributeValue::Ulonglongs(vs) => json!(vs),
        AttributeValue::Longlong(v) => json!(v),
        AttributeValue::Longlongs(vs) => json!(vs),
        AttributeValue::Float(v) => f32_json(*v),
        AttributeValue::Floats(vs) => list(vs, f32_json),
        AttributeValue::Double(v) => f64_json(*v),
        AttributeValue::Doubles(vs) => list(vs, f64_json),
        AttributeValue::Str(s) => Value::String(escape_text(s, model)),
        AttributeValue::Strs(ss) => Value::Array(
            ss.iter()
                .map(|s| Value::String(escape_text(s, model)))
                .collect(),
        ),
        #[allow(unreachable_patterns)]
        other => Value::String(format!("{:?}", other)),
    }
}

/// JSON number for an `f64`, `null` when not finite.
pub fn f64_json(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

// Goes through the shortest decimal representation so 0.1f32 stays 0.1.
fn f32_json(v: f32) -> Value {
    v.to_string()
        .parse::<f64>()
        .map(f64_json)
        .unwrap_or(Value::Null)
}
