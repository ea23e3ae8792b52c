use chrono_tz::Tz;
use url::Url;

use crate::calendar::Event;

pub static HTML_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="hu">
<head>
  <title>Autós Események</title>
  <meta name="color-scheme" content="only light">
  <style>
    @page {
      margin: 0mm;
      size: 210mm 373.3mm;
    }
    html {
      font-family: Bahnschrift, Verdana, Arial, sans-serif;
      font-size: 4mm;
      background-image: url('@SRC_URL@/pattern.jpg');
      background-repeat: repeat;
      background-size: 210mm;
      text-shadow: 0 0 10px white, 0 0 1px #000000b3;
    }
    body {
      margin: 0;
    }
    a {
      color: inherit;
      text-decoration: none;
    }
    table {
      border: none;
      border-collapse: collapse;
      border-spacing: 0;
      table-layout: fixed;
      width: 100%;
    }
    thead {
      background-color: #a7b6d662;
      background: linear-gradient(0deg,#0725384d 0%, #001a4d36 24%, #091b4b1a 79%, #092f4f29 91%, #0a325a17 100%);
      box-shadow: 0px 0px 5px #000000;
      font-family: Verdana, Arial, sans-serif;
      font-weight: bold;
    }
    thead h1 {
      font-size: 1.75em;
      margin: 0;
      margin-top: 6px;
      margin-bottom: 6px;
    }
    thead p {
      font-size: 0.8em;
      font-weight: normal;
      margin: 0;
    }
    thead p:last-child {
      margin-bottom: 4px;
    }
    thead p a {
      font-weight: bold;
    }
    th {
      border: none;
    }
    td {
      border: 1px solid gray;
      border-left: none;
      border-right: none;
      padding: 2px 6px 2px 6px;
    }
    tr td:nth-child(1), tr td:nth-child(2) {
      page-break-inside: avoid !important;
      white-space: nowrap;
    }
    tr.ad td {
      font-family: Verdana, Arial, sans-serif;
      font-weight: bold;
      text-align: center;
    }
  </style>
</head>
<body>
  <table cellspacing="0" cellpadding="4">
    <colgroup>
      <col span="2" style="width:32mm;" /> <!-- Change if font is changed! -->
      <col span="1" style="width:60%;" />
      <col span="1" style="width:40%;" />
    </colgroup>
    <thead>
      <tr><th colspan="4">
        <h1>AUTÓS ESEMÉNYEK NAPTÁRA</h1>
        <p><a href="https://sp3eder.github.io/autosesemenyek/" target="_blank">sp3eder.github.io/autosesemenyek</a> &#8212; eseményleírások, élő követés</p>
        <p class="small"><a href="https://sp3eder.github.io/" target="_blank">sp3eder.github.io</a> &#8212; Autós Appok: alkalmazások az autós közösségnek</p>
      </th></tr>
      <tr><th>KEZDÉS</th><th>VÉGE</th><th>ESEMÉNY</th><th>HELYSZÍN</th></tr>
    </thead>
    <tbody>
      @TABLE_ROWS@
    </tbody>
  </table>
</body>
</html>
"##;

pub static AD_ROW: &str = r#"<tr class="ad"><td colspan="4"><a href="https://sp3eder.github.io/" target="_blank">sp3eder.github.io &#8212; Autós Appok: alkalmazások az autós közösségnek</a></td></tr>"#;

/// Serializes sorted events into the fixed HTML table template.
///
/// Summary and location are inserted verbatim. The feeds are a trusted,
/// single-user input, so nothing is HTML-escaped here.
#[derive(Debug, Clone)]
pub struct TableRenderer {
  tz: Tz,
  base_uri: Url,
  ad_frequency: Option<usize>,
  closed_end_dates: bool,
}

impl TableRenderer {
  pub const fn new(tz: Tz, base_uri: Url) -> Self {
    Self {
      tz,
      base_uri,
      ad_frequency: None,
      closed_end_dates: false,
    }
  }

  /// Insert a filler row after every `every` event rows, plus one at the
  /// end of the table.
  pub const fn with_ad_frequency(mut self, every: usize) -> Self {
    self.ad_frequency = Some(every);
    self
  }

  /// Show bare end dates as the previous day (feed end dates are exclusive).
  pub const fn with_closed_end_dates(mut self) -> Self {
    self.closed_end_dates = true;
    self
  }

  pub fn render(&self, events: &[Event]) -> String {
    let mut rows = Vec::new();

    for (index, event) in events.iter().enumerate() {
      rows.push(self.event_row(event));

      if let Some(every) = self.ad_frequency {
        if (index + 1) % every == 0 && index + 1 < events.len() {
          rows.push(AD_ROW.to_owned());
        }
      }
    }

    if self.ad_frequency.is_some() {
      rows.push(AD_ROW.to_owned());
    }

    HTML_TEMPLATE
      .replacen("@TABLE_ROWS@", &rows.join("\n"), 1)
      .replace("@SRC_URL@", self.base_uri.as_str().trim_end_matches('/'))
  }

  fn event_row(&self, event: &Event) -> String {
    format!(
      r#"<tr style="color: {};"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
      event.color,
      event.start.display(self.tz),
      event.end.display_as_end(self.tz, self.closed_end_dates),
      event.summary,
      event.location,
    )
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use crate::calendar::EventTime;

  use super::*;

  const TZ: Tz = chrono_tz::Europe::Budapest;

  fn renderer() -> TableRenderer {
    TableRenderer::new(TZ, Url::parse("file:///opt/event-export").unwrap())
  }

  fn events(count: usize) -> Vec<Event> {
    let date = EventTime::Date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

    (1..=count)
      .map(|n| Event {
        summary: format!("event-{n:02}"),
        location: String::new(),
        start: date,
        end: date,
        color: "#123456".to_owned(),
      })
      .collect()
  }

  #[test]
  fn inserts_filler_rows_periodically_plus_trailing() {
    let html = renderer().with_ad_frequency(15).render(&events(16));

    assert_eq!(html.matches(AD_ROW).count(), 2);

    // One filler between events 15 and 16, one after the last event.
    let filler = html.find(AD_ROW).unwrap();
    assert!(filler > html.find("event-15").unwrap());
    assert!(filler < html.find("event-16").unwrap());
    assert!(html.rfind(AD_ROW).unwrap() > html.find("event-16").unwrap());
  }

  #[test]
  fn no_filler_rows_without_a_frequency() {
    let html = renderer().render(&events(16));

    assert_eq!(html.matches(AD_ROW).count(), 0);
  }

  #[test]
  fn substitutes_rows_and_base_uri() {
    let html = renderer().render(&events(1));

    assert!(!html.contains("@TABLE_ROWS@"));
    assert!(html.contains("url('file:///opt/event-export/pattern.jpg')"));
    assert!(html.contains(r#"<tr style="color: #123456;"><td>2025.06.01.</td>"#));
  }

  #[test]
  fn renders_only_future_events_from_a_feed() {
    use chrono::TimeZone as _;

    use crate::calendar::{self, FeedPayload};

    let ics = [
      "BEGIN:VCALENDAR",
      "VERSION:2.0",
      "PRODID:-//test//EN",
      "BEGIN:VEVENT",
      "UID:1",
      "DTSTAMP:20250101T000000Z",
      "DTSTART:20250601T100000Z",
      "DTEND:20250601T120000Z",
      "SUMMARY:June meet",
      "END:VEVENT",
      "BEGIN:VEVENT",
      "UID:2",
      "DTSTAMP:20250101T000000Z",
      "DTSTART:20200101T100000Z",
      "DTEND:20200101T120000Z",
      "SUMMARY:Long gone",
      "END:VEVENT",
      "BEGIN:VEVENT",
      "UID:3",
      "DTSTAMP:20250101T000000Z",
      "DTSTART:20250501T100000Z",
      "DTEND:20250501T120000Z",
      "SUMMARY:May meet",
      "END:VEVENT",
      "END:VCALENDAR",
      "",
    ]
    .join("\r\n");

    let feeds = vec![FeedPayload {
      ics,
      color: "#ff0000".to_owned(),
    }];

    let events = calendar::events_from_feeds(&feeds).unwrap();
    let reference = chrono::Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let mut events = calendar::future_events(events, reference, TZ);
    calendar::sort_events(&mut events, TZ);

    let html = renderer().render(&events);

    assert!(!html.contains("Long gone"));
    let may = html.find("May meet").unwrap();
    let june = html.find("June meet").unwrap();
    assert!(may < june);
  }

  #[test]
  fn closed_mode_decrements_bare_end_dates() {
    let html = renderer().with_closed_end_dates().render(&events(1));

    assert!(html.contains("<td>2025.06.01.</td><td>2025.05.31.</td>"));
  }
}
