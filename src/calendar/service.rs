use chrono::{DateTime, NaiveTime, TimeZone as _, Utc};
use chrono_tz::Tz;

use super::Event;

/// "Now" in the given timezone, optionally truncated to the start of the
/// current calendar day.
pub fn reference_instant(tz: Tz, start_of_day: bool) -> DateTime<Utc> {
  let now = Utc::now().with_timezone(&tz);

  if start_of_day {
    let midnight = now.date_naive().and_time(NaiveTime::default());

    tz.from_local_datetime(&midnight)
      .earliest()
      .map_or_else(|| midnight.and_utc(), |dt| dt.with_timezone(&Utc))
  } else {
    now.with_timezone(&Utc)
  }
}

/// Keep events still running or upcoming at `reference`. An event ending
/// exactly at the reference instant is excluded.
pub fn future_events(events: Vec<Event>, reference: DateTime<Utc>, tz: Tz) -> Vec<Event> {
  events
    .into_iter()
    .filter(|event| event.end.as_instant(tz) > reference)
    .collect()
}

/// Stable order by (start instant, summary), ascending. Bare dates count
/// as local midnight, same as the future filter.
pub fn sort_events(events: &mut [Event], tz: Tz) {
  events.sort_by(|a, b| {
    a.start
      .as_instant(tz)
      .cmp(&b.start.as_instant(tz))
      .then_with(|| a.summary.cmp(&b.summary))
  });
}
