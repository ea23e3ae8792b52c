use ureq::Agent;

use crate::error::{Error, ErrorKind};

use super::CalendarRef;

/// Raw feed text of one calendar, tagged with its display color.
#[derive(Debug, Clone)]
pub struct FeedPayload {
  pub ics: String,
  pub color: String,
}

#[derive(Debug, Clone)]
pub struct Client {
  agent: Agent,
  feed_url: String,
}

impl Client {
  pub fn new(feed_url: String) -> Self {
    Self {
      agent: Agent::new(),
      feed_url,
    }
  }

  pub fn feed_url(&self, calendar: &CalendarRef) -> String {
    self.feed_url.replace("{id}", &calendar.id)
  }

  /// Download the public feed of every referenced calendar, in order.
  /// Stops at the first failure.
  ///
  /// # Errors
  /// Returns an error if a request fails or responds with anything but 200.
  pub fn fetch_feeds(&self, calendars: &[CalendarRef]) -> Result<Vec<FeedPayload>, Error> {
    calendars.iter().map(|calendar| self.fetch_feed(calendar)).collect()
  }

  fn fetch_feed(&self, calendar: &CalendarRef) -> Result<FeedPayload, Error> {
    let response = self
      .agent
      .get(&self.feed_url(calendar))
      .call()
      .map_err(|e| match e {
        ureq::Error::Status(code, _) => Error::new(
          ErrorKind::Http,
          format!("Failed to download calendar {}: HTTP {code}", calendar.id),
        ),
        e => Error::from(e),
      })?;

    if response.status() != 200 {
      return Err(Error::new(
        ErrorKind::Http,
        format!("Failed to download calendar {}: HTTP {}", calendar.id, response.status()),
      ));
    }

    Ok(FeedPayload {
      ics: response.into_string()?,
      color: calendar.color.clone(),
    })
  }
}
