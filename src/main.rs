//! Entry point for the ncinfo application.
//! Handles CLI parsing and logging setup, then prints the report, the JSON
//! document or a hyperslab, or runs the HTTP server.

use clap::Parser;
use ncinfo::cli::Args;
use ncinfo::info::info_document;
use ncinfo::metadata::read_metadata;
use ncinfo::report::print_report;
use ncinfo::server::{self, AppState};
use ncinfo::slab::{read_slab, SlabQuery};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    if args.serve {
        return run_server(args);
    }

    if let Some(spec) = &args.slab {
        let file = netcdf::open(&args.file)?;
        let query = SlabQuery::new(args.data_variable.clone(), spec.indices.clone());
        let slab = read_slab(&file, &query)?;
        tracing::info!(
            valid = slab.valid_count(),
            total = slab.values.len(),
            "extracted hyperslab"
        );
        println!("{}", serde_json::to_string_pretty(&slab.to_json())?);
        return Ok(());
    }

    let metadata = read_metadata(&args.file)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&info_document(&metadata))?);
    } else {
        print_report(&metadata)?;
    }

    Ok(())
}

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_new(args.effective_log_level())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the report, so logs go to stderr
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_server(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::load(
        args.file.clone(),
        args.data_variable.clone(),
        args.index_dims.clone(),
    )?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(args.worker_threads())
        .enable_all()
        .build()?;

    runtime.block_on(server::serve(state, &args.listen))?;
    Ok(())
}
