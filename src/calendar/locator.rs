use regex::Regex;

use crate::error::{Error, ErrorKind};

/// A published calendar together with the color its events are displayed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRef {
  pub id: String,
  pub color: String,
}

/// Load the index document listing the calendars, from a URL or a local path.
///
/// # Errors
/// Returns an error if the download or the file read fails.
pub fn load_document(source: &str) -> Result<String, Error> {
  if Regex::new(r"^(https?|file)://").unwrap().is_match(source) {
    let url = url::Url::parse(source)?;

    if url.scheme() == "file" {
      let path = url
        .to_file_path()
        .map_err(|()| Error::new(ErrorKind::Parsing, format!("Invalid file URL: {source}")))?;

      return Ok(std::fs::read_to_string(path)?);
    }

    return Ok(ureq::get(source).call()?.into_string()?);
  }

  Ok(std::fs::read_to_string(source)?)
}

/// Scan the document for embedded `{ "id": "...", "clr": "#..." }` literals.
/// Quote style and whitespace are flexible; duplicates are kept.
pub fn calendar_refs(document: &str) -> Vec<CalendarRef> {
  let pattern = Regex::new(
    r#"\{\s*['"]id['"]\s*:\s*['"](?P<id>[^'"]+)['"]\s*,\s*['"]clr['"]\s*:\s*['"](?P<clr>#[0-9A-Fa-f]+)['"]\s*\}"#,
  )
  .unwrap();

  pattern
    .captures_iter(document)
    .map(|capture| CalendarRef {
      id: capture["id"].to_owned(),
      color: capture["clr"].to_owned(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extracts_refs_across_quote_styles() {
    let document = r##"
      <script>
      var calendars = [
        { "id": "abc@group.calendar.google.com", "clr": "#ff0000" },
        {'id':'def','clr':'#00FF7f'},
        { "id" : "ghi" , "clr" : "#ABC" }
      ];
      </script>
    "##;

    assert_eq!(
      calendar_refs(document),
      vec![
        CalendarRef {
          id: "abc@group.calendar.google.com".to_owned(),
          color: "#ff0000".to_owned(),
        },
        CalendarRef {
          id: "def".to_owned(),
          color: "#00FF7f".to_owned(),
        },
        CalendarRef {
          id: "ghi".to_owned(),
          color: "#ABC".to_owned(),
        },
      ],
    );
  }

  #[test]
  fn ignores_surrounding_text_without_literals() {
    assert!(calendar_refs("<html><body>no calendars here</body></html>").is_empty());
  }

  #[test]
  fn keeps_duplicate_ids() {
    let document = r##"{"id": "same", "clr": "#111111"} {"id": "same", "clr": "#111111"}"##;

    assert_eq!(calendar_refs(document).len(), 2);
  }

  #[test]
  fn requires_a_hex_color() {
    assert!(calendar_refs(r#"{"id": "abc", "clr": "red"}"#).is_empty());
  }
}
