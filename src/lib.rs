//! ncinfo: NetCDF metadata inspection
//!
//! A small library (and the `ncinfo` binary) for looking inside NetCDF files
//! without touching their numeric payload, plus a read-only HTTP view of the
//! same information.
//!
//! ## Key Features
//!
//! - **Metadata Report**: data model, groups, dimensions, variables and global
//!   attributes, printed in a fixed order
//! - **JSON Info Document**: the same structure as a machine readable document
//! - **Hyperslabs**: read one plane of a variable by pinning dimensions to indices
//! - **HTTP Server**: `/get-info` and `/get-data` endpoints over axum
//!
//! ## Module Organization
//!
//! - [`metadata`]: owned snapshot of a file's structure
//! - [`data_model`]: on-disk format detection
//! - [`report`]: text report
//! - [`info`]: JSON info document
//! - [`escape`]: ncdump-style escaping of text attributes
//! - [`slab`]: hyperslab reads and query parameter parsing
//! - [`server`]: HTTP endpoints
//! - [`cli`]: command-line options
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ncinfo::prelude::*;
//! use std::path::Path;
//!
//! let metadata = read_metadata(Path::new("concentration.timeseries.nc")).unwrap();
//! print_report(&metadata).unwrap();
//!
//! let doc = info_document(&metadata);
//! println!("{}", serde_json::to_string_pretty(&doc).unwrap());
//! ```

pub mod cli;
pub mod data_model;
pub mod errors;
pub mod escape;
pub mod info;
pub mod metadata;
pub mod report;
pub mod server;
pub mod slab;

pub use data_model::*;
pub use errors::*;
pub use metadata::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::data_model::{inquire_data_model, DataModel};
    pub use crate::errors::{NcInfoError, Result};
    pub use crate::info::info_document;
    pub use crate::metadata::{read_metadata, FileMetadata};
    pub use crate::report::{print_report, write_report};
    pub use crate::slab::{read_slab, Slab, SlabQuery};
}
