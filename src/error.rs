/// Errors that may occur along the export pipeline.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
  pub kind: ErrorKind,
  pub message: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
  /// Wrong operating system or a missing external library. Raised before
  /// any network work starts.
  Environment,
  Http,
  Parsing,
  Io,
  /// The external renderer did not materialize its output in time.
  Timeout,
}

impl Error {
  pub const fn new(kind: ErrorKind, message: String) -> Self {
    Self { kind, message }
  }
}

impl From<ureq::Error> for Error {
  fn from(e: ureq::Error) -> Self {
    Self {
      kind: ErrorKind::Http,
      message: format!("{e:?}"),
    }
  }
}

impl From<std::io::Error> for Error {
  fn from(e: std::io::Error) -> Self {
    Self {
      kind: ErrorKind::Io,
      message: e.to_string(),
    }
  }
}

impl From<url::ParseError> for Error {
  fn from(e: url::ParseError) -> Self {
    Self {
      kind: ErrorKind::Parsing,
      message: e.to_string(),
    }
  }
}

impl From<toml::de::Error> for Error {
  fn from(e: toml::de::Error) -> Self {
    Self {
      kind: ErrorKind::Parsing,
      message: e.to_string(),
    }
  }
}

impl From<pdfium_render::prelude::PdfiumError> for Error {
  fn from(e: pdfium_render::prelude::PdfiumError) -> Self {
    Self {
      kind: ErrorKind::Parsing,
      message: format!("{e:?}"),
    }
  }
}

impl From<image::ImageError> for Error {
  fn from(e: image::ImageError) -> Self {
    Self {
      kind: ErrorKind::Io,
      message: e.to_string(),
    }
  }
}
