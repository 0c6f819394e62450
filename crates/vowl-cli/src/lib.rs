//! CLI logic for the VOWL schema renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use vowl::filter::DegreeFilter;
use vowl::{Graph, VowlError};

/// Run the VOWL CLI application
///
/// Reads the input payload, runs the force simulation to rest and writes
/// the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `VowlError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - An input payload that is not JSON
pub fn run(args: &Args) -> Result<(), VowlError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Rendering schema"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read and validate the input payload. The engine itself degrades a
    // broken payload to an empty diagram; the CLI reports it instead.
    let payload = fs::read_to_string(&args.input)?;
    vowl_parser::parse(&payload)?;

    let mut options = app_config.to_options();
    options.set_data(payload);
    if let Some(min_degree) = args.min_degree {
        options.add_filter_module(Box::new(DegreeFilter::new(min_degree)));
    }

    let mut graph = Graph::new(options);
    graph.start();
    graph.set_language(&args.language);
    graph.run_to_rest();

    let document = graph.to_svg();
    svg::save(&args.output, &document)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
