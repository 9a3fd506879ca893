//! Defines command-line interface options using `clap` for the ncinfo application.
//!
//! Every option that matters to a deployed server can also be set through the
//! environment (or a `.env` file).

use clap::Parser;
use std::path::PathBuf;

/// Default file, relative to the working directory
pub const DEFAULT_FILE: &str = "./concentration.timeseries.nc";

/// A CLI tool for inspecting NetCDF files
#[derive(Parser, Debug)]
#[command(
    name = "ncinfo",
    version,
    about = "Print the metadata of a NetCDF file, or serve it over HTTP"
)]
pub struct Args {
    /// Path to the NetCDF file
    #[arg(short, long, env = "NCINFO_FILE", default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Print the structure as a JSON document instead of the text report
    #[arg(long, conflicts_with_all = ["slab", "serve"])]
    pub json: bool,

    /// Print one hyperslab of the data variable as JSON, formatted as <dim>=<index>,...
    #[arg(long, value_parser = parse_slab_arg, conflicts_with = "serve")]
    pub slab: Option<SlabSpec>,

    /// Run the HTTP server (/get-info, /get-data, /health)
    #[arg(long)]
    pub serve: bool,

    /// Address the server listens on
    #[arg(short, long, env = "NCINFO_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Variable read by --slab and /get-data
    #[arg(long, env = "NCINFO_DATA_VARIABLE", default_value = "concentration")]
    pub data_variable: String,

    /// Dimensions /get-data expects a `<dim>_index` parameter for
    #[arg(
        long,
        env = "NCINFO_INDEX_DIMS",
        value_delimiter = ',',
        default_value = "time,z"
    )]
    pub index_dims: Vec<String>,

    /// Number of server worker threads. Defaults to number of CPU cores.
    #[arg(short = 't', long, env = "NCINFO_WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// Log filter, e.g. `info` or `ncinfo=debug`
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    pub log_json: bool,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Log filter to use when none is given explicitly.
    pub fn effective_log_level(&self) -> String {
        match (&self.log_level, self.verbose, self.serve) {
            (Some(level), _, _) => level.clone(),
            (None, true, _) => "debug".to_string(),
            (None, false, true) => "info".to_string(),
            (None, false, false) => "warn".to_string(),
        }
    }

    pub fn worker_threads(&self) -> usize {
        self.worker_threads
            .filter(|&n| n > 0)
            .unwrap_or_else(num_cpus::get)
    }
}

/// Dimension indices given on the command line with `--slab`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlabSpec {
    pub indices: Vec<(String, usize)>,
}

/// Parse `time=3,z=0` into `[("time", 3), ("z", 0)]`.
pub fn parse_slab_arg(s: &str) -> Result<SlabSpec, String> {
    if s.trim().is_empty() {
        return Err("Invalid format: Expected '<dimension>=<index>,...'.".to_string());
    }

    s.split(',')
        .map(|part| {
            let (dim, index) = part
                .split_once('=')
                .ok_or_else(|| format!("Invalid slab entry '{}': Expected '<dimension>=<index>'.", part))?;
            let dim = dim.trim();
            if dim.is_empty() {
                return Err(format!("Missing dimension name in '{}'", part));
            }
            let index = index
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("Invalid index for dimension '{}'", dim))?;
            Ok((dim.to_string(), index))
        })
        .collect::<Result<Vec<_>, String>>()
        .map(|indices| SlabSpec { indices })
}
