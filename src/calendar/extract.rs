use icalendar::{Calendar, CalendarComponent, Component as _, EventLike as _};

use crate::error::{Error, ErrorKind};

use super::{Event, EventTime, FeedPayload};

/// Parse every feed and flatten the VEVENT components into events,
/// keeping feed order and in-feed order.
///
/// # Errors
/// Returns an error if a feed is not parseable as an iCalendar document.
pub fn events_from_feeds(feeds: &[FeedPayload]) -> Result<Vec<Event>, Error> {
  let mut events = Vec::new();

  for feed in feeds {
    let unfolded = icalendar::parser::unfold(&feed.ics);

    // The parser is lenient and maps arbitrary text to an empty
    // component list; require the VCALENDAR wrapper explicitly.
    if !unfolded.trim_start().starts_with("BEGIN:VCALENDAR") {
      return Err(Error::new(
        ErrorKind::Parsing,
        "Not an iCalendar document: missing BEGIN:VCALENDAR".to_owned(),
      ));
    }

    let calendar = icalendar::parser::read_calendar(&unfolded)
      .map(Calendar::from)
      .map_err(|e| Error::new(ErrorKind::Parsing, e))?;

    for component in calendar.components {
      if let CalendarComponent::Event(component) = component {
        match event_from_component(&component, &feed.color) {
          Some(event) => events.push(event),
          None => log::error!(
            "Skipping event without a usable start/end: {:?}",
            component.get_summary(),
          ),
        }
      }
    }
  }

  Ok(events)
}

fn event_from_component(component: &icalendar::Event, color: &str) -> Option<Event> {
  let start = EventTime::from_ical(component.get_start()?)?;
  let end = EventTime::from_ical(component.get_end()?)?;

  Some(Event {
    summary: component.get_summary().unwrap_or_default().to_owned(),
    location: component.get_location().unwrap_or_default().to_owned(),
    start,
    end,
    color: color.to_owned(),
  })
}
