use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub const DEFAULT_SOURCE: &str = "https://sp3eder.github.io/autosesemenyek/";

#[derive(Debug, Clone, Parser)]
#[clap(bin_name = env!("CARGO_PKG_NAME"), version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    /// URL or path of the index document to scan for calendars
    #[clap(name = "source", default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Output base name, without extension
    #[clap(short, long, default_value = "events")]
    pub output: PathBuf,

    /// Keep events from midnight today instead of from now
    #[clap(long)]
    pub start_of_day: bool,

    /// Output format
    #[clap(long, value_enum, default_value_t = Format::Png)]
    pub format: Format,

    /// Path to an optional configuration file
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Rasterize every page of the print into `<output>_<n>.png` images
    Png,
    /// Write a single `<output>.pdf` with periodic filler rows
    Pdf,
}
