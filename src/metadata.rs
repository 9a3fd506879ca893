//! NetCDF metadata inspection
//!
//! This module reads the structure of a NetCDF file (groups, dimensions,
//! variables and attributes) into an owned [`FileMetadata`] snapshot. The
//! snapshot no longer borrows the file, so the handle can be closed as soon
//! as it is built and the result can be rendered as text or JSON, or cached
//! by the server.

use crate::data_model::{inquire_data_model, DataModel};
use crate::errors::Result;
use netcdf::{AttributeValue, File};
use std::path::{Path, PathBuf};

/// Information about a dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionInfo {
    pub name: String,
    pub length: usize,
    pub is_unlimited: bool,
}

/// A named attribute and its decoded value
#[derive(Debug, Clone)]
pub struct AttributeInfo {
    pub name: String,
    pub value: AttributeValue,
}

/// Structured metadata for a NetCDF variable
#[derive(Debug, Clone)]
pub struct VariableInfo {
    pub name: String,
    /// CDL type name (`float`, `int`, `char`, ...)
    pub data_type: String,
    pub dimensions: Vec<String>,
    pub shape: Vec<usize>,
    pub attributes: Vec<AttributeInfo>,
}

impl VariableInfo {
    pub fn is_scalar(&self) -> bool {
        self.dimensions.is_empty()
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// A (sub)group and everything it contains
#[derive(Debug, Clone)]
pub struct GroupInfo {
    pub name: String,
    /// Absolute path such as `/forecast/surface`
    pub path: String,
    pub dimensions: Vec<DimensionInfo>,
    pub variables: Vec<VariableInfo>,
    pub attributes: Vec<AttributeInfo>,
    pub groups: Vec<GroupInfo>,
}

/// Owned snapshot of a file's root group plus its data model
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub data_model: DataModel,
    pub groups: Vec<GroupInfo>,
    pub dimensions: Vec<DimensionInfo>,
    pub variables: Vec<VariableInfo>,
    pub attributes: Vec<AttributeInfo>,
}

impl FileMetadata {
    /// Build a snapshot from an already opened file.
    pub fn from_file(file: &File, path: &Path, data_model: DataModel) -> Result<Self> {
        let dimensions = file.dimensions().map(|d| dimension_info(&d)).collect();
        let variables = file.variables().map(|v| variable_info(&v)).collect();
        let attributes = file.attributes().filter_map(|a| attribute_info(&a)).collect();

        let mut groups = Vec::new();
        for group in file.groups()? {
            groups.push(group_info(&group, "")?);
        }

        Ok(Self {
            path: path.to_path_buf(),
            data_model,
            groups,
            dimensions,
            variables,
            attributes,
        })
    }

    pub fn variable(&self, name: &str) -> Option<&VariableInfo> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn dimension(&self, name: &str) -> Option<&DimensionInfo> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Names of the global attributes, in file order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Open `path` read-only, snapshot its metadata and close it again.
pub fn read_metadata(path: &Path) -> Result<FileMetadata> {
    let file = netcdf::open(path)?;
    tracing::debug!(path = %path.display(), "opened NetCDF file");

    let data_model = inquire_data_model(path)?;
    let metadata = FileMetadata::from_file(&file, path, data_model)?;

    tracing::info!(
        path = %path.display(),
        data_model = %metadata.data_model,
        dimensions = metadata.dimensions.len(),
        variables = metadata.variables.len(),
        groups = metadata.groups.len(),
        "read file metadata"
    );
    Ok(metadata)
}

fn group_info(group: &netcdf::Group, parent_path: &str) -> Result<GroupInfo> {
    let name = group.name().to_string();
    let path = format!("{}/{}", parent_path, name);

    let mut groups = Vec::new();
    for child in group.groups() {
        groups.push(group_info(&child, &path)?);
    }

    Ok(GroupInfo {
        dimensions: group.dimensions().map(|d| dimension_info(&d)).collect(),
        variables: group.variables().map(|v| variable_info(&v)).collect(),
        attributes: group.attributes().filter_map(|a| attribute_info(&a)).collect(),
        groups,
        name,
        path,
    })
}

fn dimension_info(dim: &netcdf::Dimension) -> DimensionInfo {
    DimensionInfo {
        name: dim.name().to_string(),
        length: dim.len(),
        is_unlimited: dim.is_unlimited(),
    }
}

fn variable_info(var: &netcdf::Variable) -> VariableInfo {
    VariableInfo {
        name: var.name().to_string(),
        data_type: cdl_type_name(&format!("{:?}", var.vartype())),
        dimensions: var
            .dimensions()
            .iter()
            .map(|d| d.name().to_string())
            .collect(),
        shape: var.dimensions().iter().map(|d| d.len()).collect(),
        attributes: var.attributes().filter_map(|a| attribute_info(&a)).collect(),
    }
}

fn attribute_info(attr: &netcdf::Attribute) -> Option<AttributeInfo> {
    match attr.value() {
        Ok(value) => Some(AttributeInfo {
            name: attr.name().to_string(),
            value,
        }),
        Err(e) => {
            tracing::warn!(attribute = %attr.name(), error = %e, "skipping unreadable attribute");
            None
        }
    }
}

/// Turn the `Debug` rendering of a netcdf variable type into its CDL name.
///
/// User defined types (compound, enum, opaque, vlen) keep their lowercased
/// debug text.
pub fn cdl_type_name(debug: &str) -> String {
    let lowered = debug.to_lowercase();
    if let Some(inner) = lowered
        .strip_prefix("basic(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return cdl_type_name(inner);
    }
    let name = match lowered.as_str() {
        "int(i8)" | "byte" | "schar" | "i8" => "byte",
        "int(u8)" | "ubyte" | "uchar" | "u8" => "ubyte",
        "int(i16)" | "short" | "i16" => "short",
        "int(u16)" | "ushort" | "u16" => "ushort",
        "int(i32)" | "int" | "i32" => "int",
        "int(u32)" | "uint" | "u32" => "uint",
        "int(i64)" | "longlong" | "int64" | "i64" => "int64",
        "int(u64)" | "ulonglong" | "uint64" | "u64" => "uint64",
        "float(f32)" | "float" | "f32" => "float",
        "float(f64)" | "double" | "f64" => "double",
        "char" => "char",
        "string" => "string",
        _ => return lowered,
    };
    name.to_string()
}
