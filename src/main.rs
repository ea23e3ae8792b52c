#![warn(
    clippy::all,
    // clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    // clippy::unwrap_used
)]
use std::path::{Path, PathBuf};

use clap::Parser;

use cli::Format;
use config::Config;
use error::Error;
use export::PdfRenderer as _;

mod calendar;
mod cli;
mod config;
mod error;
mod export;
mod render;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = cli::Cli::parse();
    let config = config::init(cli.config.clone()).expect("Could not load the configuration file");

    if let Err(error) = run(&cli, &config) {
        log::error!("{error:?}");
        std::process::exit(1);
    }
}

fn run(cli: &cli::Cli, config: &Config) -> Result<(), Error> {
    // Resolve the external collaborators first, so environment problems
    // surface before any network work.
    let renderer = export::BrowserRenderer::from_config(config)?;
    let rasterizer = match cli.format {
        Format::Png => Some(export::Rasterizer::new(config.image_dpi)?),
        Format::Pdf => None,
    };

    log::info!("Loading {}...", cli.source);
    let document = calendar::load_document(&cli.source)?;
    let calendars = calendar::calendar_refs(&document);

    log::info!("Found {} calendars. Downloading...", calendars.len());
    let client = calendar::Client::new(config.feed_url.clone());
    let feeds = client.fetch_feeds(&calendars)?;

    let events = calendar::events_from_feeds(&feeds)?;
    let reference = calendar::reference_instant(config.timezone, cli.start_of_day);
    let mut events = calendar::future_events(events, reference, config.timezone);
    calendar::sort_events(&mut events, config.timezone);

    log::info!("Found {} future events. Generating PDF...", events.len());
    let table = table_renderer(cli.format, config, config.asset_base_uri()?);

    let pdf = renderer.render(&table.render(&events))?;
    let output = absolute_output(&cli.output)?;

    match rasterizer {
        Some(rasterizer) => {
            log::info!("Converting to PNG images...");
            rasterizer.write_pages(&pdf, &output)?;

            let dir = output.parent().unwrap_or_else(|| Path::new("."));
            open::that_detached(dir)?;
        }
        None => {
            let pdf_path = output.with_extension("pdf");
            std::fs::write(&pdf_path, &pdf)?;

            log::info!("Wrote {}", pdf_path.display());
            open::that_detached(&pdf_path)?;
        }
    }

    Ok(())
}

/// The image variant shows bare end dates as the last covered day; the
/// PDF variant keeps the feed's exclusive end dates and carries the
/// filler rows.
fn table_renderer(format: Format, config: &Config, base_uri: url::Url) -> render::TableRenderer {
    let table = render::TableRenderer::new(config.timezone, base_uri);

    match format {
        Format::Png => table.with_closed_end_dates(),
        Format::Pdf => table.with_ad_frequency(config.ad_frequency),
    }
}

fn absolute_output(output: &Path) -> Result<PathBuf, Error> {
    if output.is_absolute() {
        Ok(output.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(output))
    }
}
