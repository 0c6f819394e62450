//! Command-line argument definitions for the VOWL CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, rendering options and logging verbosity.

use clap::Parser;

/// Command-line arguments for the VOWL schema renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input VOWL JSON file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Label language to render
    #[arg(short, long, default_value = "default")]
    pub language: String,

    /// Hide nodes with fewer than this many connections
    #[arg(long)]
    pub min_degree: Option<usize>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
