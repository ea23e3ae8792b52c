use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;

use crate::error::{Error, ErrorKind};

/// Rasterizes PDF pages to PNG files through pdfium.
pub struct Rasterizer {
  pdfium: Pdfium,
  dpi: f32,
}

impl Rasterizer {
  /// Bind the pdfium library, next to the executable first, then the
  /// system-wide install.
  ///
  /// # Errors
  /// Returns an environment error if the library is not installed.
  pub fn new(dpi: f32) -> Result<Self, Error> {
    let pdfium = Pdfium::new(
      Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| {
          Error::new(
            ErrorKind::Environment,
            format!("Could not bind the pdfium library: {e:?}"),
          )
        })?,
    );

    Ok(Self { pdfium, dpi })
  }

  /// Write every page of the PDF to `<base>_<n>.png`, n starting at 1.
  /// Images of a previous run at the same naming scheme are removed first.
  ///
  /// # Errors
  /// Returns an error if the PDF cannot be loaded or a page cannot be
  /// rendered or saved.
  pub fn write_pages(&self, pdf: &[u8], base: &Path) -> Result<Vec<PathBuf>, Error> {
    remove_stale_pages(base);

    let document = self.pdfium.load_pdf_from_byte_slice(pdf, None)?;
    let scale = self.dpi / 72.0; // PDF points are 72 per inch
    let mut written = Vec::new();

    for (index, page) in document.pages().iter().enumerate() {
      let config = PdfRenderConfig::new()
        .set_target_width((page.width().value * scale) as i32)
        .set_target_height((page.height().value * scale) as i32);

      let path = page_path(base, index + 1);
      page.render_with_config(&config)?.as_image().save(&path)?;

      log::info!("Wrote {}", path.display());
      written.push(path);
    }

    Ok(written)
  }
}

fn page_path(base: &Path, page: usize) -> PathBuf {
  let stem = base.file_name().and_then(OsStr::to_str).unwrap_or("events");

  base.with_file_name(format!("{stem}_{page}.png"))
}

/// Best-effort removal; failures are ignored.
fn remove_stale_pages(base: &Path) {
  let Some(stem) = base.file_name().and_then(OsStr::to_str) else {
    return;
  };
  let dir = base.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
  let Ok(entries) = std::fs::read_dir(dir) else {
    return;
  };

  let prefix = format!("{stem}_");
  for entry in entries.flatten() {
    let name = entry.file_name();
    let Some(name) = name.to_str() else { continue };

    if name.starts_with(&prefix) && name.ends_with(".png") {
      let _ = std::fs::remove_file(entry.path());
    }
  }
}
