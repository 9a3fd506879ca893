//! Hyperslab extraction
//!
//! A slab fixes some of a variable's dimensions at a single index and reads
//! every other dimension whole, e.g. one `(y, x)` plane of
//! `concentration(time, z, y, x)` for a given `time` and `z`.

use crate::errors::{NcInfoError, Result};
use crate::info::f64_json;
use ndarray::{ArrayD, ArrayViewD};
use netcdf::{AttributeValue, File};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::ops::Range;

/// Which variable to read and where to pin its dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlabQuery {
    pub variable: String,
    /// `(dimension, index)` pairs; dimensions not listed are read whole
    pub indices: Vec<(String, usize)>,
}

impl SlabQuery {
    pub fn new(variable: impl Into<String>, indices: Vec<(String, usize)>) -> Self {
        Self {
            variable: variable.into(),
            indices,
        }
    }

    fn index_of(&self, dim: &str) -> Option<usize> {
        self.indices
            .iter()
            .find(|(name, _)| name == dim)
            .map(|&(_, index)| index)
    }
}

/// Values read for a [`SlabQuery`]
#[derive(Debug, Clone)]
pub struct Slab {
    pub variable: String,
    pub indices: Vec<(String, usize)>,
    /// Names of the dimensions that were read whole, in variable order
    pub dimensions: Vec<String>,
    pub shape: Vec<usize>,
    pub values: ArrayD<f64>,
    /// The variable's `_FillValue`, if it declares one
    pub fill_value: Option<f64>,
}

impl Slab {
    /// Nested JSON arrays; fill and non-finite values become `null`.
    pub fn to_json(&self) -> Value {
        let indices: serde_json::Map<String, Value> = self
            .indices
            .iter()
            .map(|(dim, index)| (dim.clone(), json!(index)))
            .collect();

        json!({
            "variable": self.variable,
            "indices": indices,
            "dimensions": self.dimensions,
            "shape": self.shape,
            "values": nest(self.values.view(), self.fill_value),
        })
    }

    /// Number of values that are neither fill nor non-finite.
    pub fn valid_count(&self) -> usize {
        self.values
            .iter()
            .filter(|&&v| is_valid(v, self.fill_value))
            .count()
    }
}

fn is_valid(v: f64, fill: Option<f64>) -> bool {
    v.is_finite() && fill.map_or(true, |f| v != f)
}

fn nest(view: ArrayViewD<'_, f64>, fill: Option<f64>) -> Value {
    if view.ndim() == 0 {
        return view
            .iter()
            .next()
            .map(|&v| if is_valid(v, fill) { f64_json(v) } else { Value::Null })
            .unwrap_or(Value::Null);
    }
    Value::Array(view.outer_iter().map(|sub| nest(sub, fill)).collect())
}

/// Check that `dim` exists in `file` and that `index` lies inside it.
pub fn validate_dimension_index(file: &File, dim: &str, index: usize) -> Result<()> {
    let dimension = file
        .dimension(dim)
        .ok_or_else(|| NcInfoError::DimensionNotFound {
            dim: dim.to_string(),
        })?;

    let length = dimension.len();
    if index >= length {
        return Err(NcInfoError::IndexOutOfRange {
            dim: dim.to_string(),
            index,
            length,
        });
    }
    Ok(())
}

/// Read the hyperslab described by `query`.
pub fn read_slab(file: &File, query: &SlabQuery) -> Result<Slab> {
    let var = file
        .variable(&query.variable)
        .ok_or_else(|| NcInfoError::VariableNotFound {
            var: query.variable.clone(),
        })?;

    for (i, (dim, index)) in query.indices.iter().enumerate() {
        if query.indices[..i].iter().any(|(seen, _)| seen == dim) {
            return Err(NcInfoError::InvalidArgument {
                name: dim.clone(),
                message: "dimension given more than once".to_string(),
            });
        }
        if !var.dimensions().iter().any(|d| d.name() == dim.as_str()) {
            return Err(NcInfoError::DimensionNotFound { dim: dim.clone() });
        }
        validate_dimension_index(file, dim, *index)?;
    }

    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut dimensions = Vec::new();
    let mut shape = Vec::new();
    for d in var.dimensions() {
        let name = d.name().to_string();
        match query.index_of(&name) {
            Some(index) => ranges.push(index..index + 1),
            None => {
                ranges.push(0..d.len());
                shape.push(d.len());
                dimensions.push(name);
            }
        }
    }

    let data: Vec<f64> = if ranges.is_empty() {
        var.get_values::<f64, _>(..)?
    } else {
        var.get_values::<f64, _>(ranges.as_slice())?
    };

    let values = ArrayD::from_shape_vec(shape.clone(), data)?;

    let fill_value = var
        .attribute("_FillValue")
        .and_then(|attr| attr.value().ok())
        .and_then(|value| numeric_scalar(&value));

    tracing::debug!(
        variable = %query.variable,
        indices = ?query.indices,
        shape = ?shape,
        "read hyperslab"
    );

    Ok(Slab {
        variable: query.variable.clone(),
        indices: query.indices.clone(),
        dimensions,
        shape,
        values,
        fill_value,
    })
}

fn numeric_scalar(value: &AttributeValue) -> Option<f64> {
    match *value {
        AttributeValue::Uchar(v) => Some(v.into()),
        AttributeValue::Schar(v) => Some(v.into()),
        AttributeValue::Ushort(v) => Some(v.into()),
        AttributeValue::Short(v) => Some(v.into()),
        AttributeValue::Uint(v) => Some(v.into()),
        AttributeValue::Int(v) => Some(v.into()),
        AttributeValue::Ulonglong(v) => Some(v as f64),
        AttributeValue::Longlong(v) => Some(v as f64),
        AttributeValue::Float(v) => Some(v.into()),
        AttributeValue::Double(v) => Some(v),
        _ => None,
    }
}

/// Parse a non-negative integer query parameter.
pub fn parse_index_param(params: &HashMap<String, String>, name: &str) -> Result<usize> {
    let raw = params
        .get(name)
        .ok_or_else(|| NcInfoError::MissingArgument {
            name: name.to_string(),
        })?;

    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| NcInfoError::InvalidArgument {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    if value < 0 {
        return Err(NcInfoError::InvalidArgument {
            name: name.to_string(),
            message: "Negative values not allowed".to_string(),
        });
    }

    usize::try_from(value).map_err(|e| NcInfoError::InvalidArgument {
        name: name.to_string(),
        message: e.to_string(),
    })
}
