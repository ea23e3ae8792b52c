use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{Error, ErrorKind};

#[cfg(windows)]
pub static DEFAULT_BROWSER: &str =
  "C:\\Program Files (x86)\\Microsoft\\Edge\\Application\\msedge.exe";

/// Flags for a header/footer-free, compositor-flushed PDF print.
pub static BROWSER_FLAGS: &[&str] = &[
  "--headless",
  "--disable-gpu",
  "--run-all-compositor-stages-before-draw",
  "--no-pdf-header-footer",
  "--print-to-pdf-no-header",
];

pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Renders an HTML document to PDF bytes. The concrete mechanism is
/// swappable; the default is a headless browser print.
pub trait PdfRenderer {
  /// # Errors
  /// Returns an error if the render fails or times out.
  fn render(&self, html: &str) -> Result<Vec<u8>, Error>;
}

#[derive(Debug, Clone)]
pub struct BrowserRenderer {
  browser: PathBuf,
  timeout: Duration,
}

impl BrowserRenderer {
  pub const fn new(browser: PathBuf, timeout: Duration) -> Self {
    Self { browser, timeout }
  }

  /// Resolve the browser binary, preferring the configured path.
  ///
  /// # Errors
  /// Returns an environment error on an OS without a fixed browser install
  /// path when no path is configured.
  pub fn from_config(config: &Config) -> Result<Self, Error> {
    let browser = match &config.browser {
      Some(path) => path.clone(),
      None => default_browser()?,
    };

    Ok(Self::new(browser, Duration::from_secs(config.render_timeout)))
  }
}

impl PdfRenderer for BrowserRenderer {
  fn render(&self, html: &str) -> Result<Vec<u8>, Error> {
    // Scoped by the temp dir; both files are removed on every exit path.
    let dir = tempfile::Builder::new().prefix("event_").tempdir()?;
    let html_path = dir.path().join("events.html");
    let pdf_path = dir.path().join("events.pdf");

    std::fs::write(&html_path, html)?;

    let status = Command::new(&self.browser)
      .args(BROWSER_FLAGS)
      .arg(format!("--print-to-pdf={}", pdf_path.display()))
      .arg(&html_path)
      .status()?;

    if !status.success() {
      return Err(Error::new(
        ErrorKind::Io,
        format!("Browser {} exited with {status}", self.browser.display()),
      ));
    }

    wait_for_file(&pdf_path, self.timeout)?;

    Ok(std::fs::read(&pdf_path)?)
  }
}

#[cfg(windows)]
fn default_browser() -> Result<PathBuf, Error> {
  Ok(PathBuf::from(DEFAULT_BROWSER))
}

#[cfg(not(windows))]
fn default_browser() -> Result<PathBuf, Error> {
  Err(Error::new(
    ErrorKind::Environment,
    "No fixed browser install path on this OS; set `browser` in the configuration file".to_owned(),
  ))
}

fn wait_for_file(path: &Path, timeout: Duration) -> Result<(), Error> {
  let started = Instant::now();

  while !path.exists() {
    if started.elapsed() > timeout {
      return Err(Error::new(
        ErrorKind::Timeout,
        format!("PDF was not created within {timeout:?}: {}", path.display()),
      ));
    }

    std::thread::sleep(POLL_INTERVAL);
  }

  Ok(())
}
