use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{CalendarDateTime, DatePerhapsTime};

pub const DATE_FMT: &str = "%Y.%m.%d.";
pub const DATETIME_FMT: &str = "%Y.%m.%d. %H:%M";

/// Either a timezone-aware instant or a bare calendar date. Feeds use bare
/// dates for all-day events, with an exclusive end-date convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
  Date(NaiveDate),
  DateTime(DateTime<Utc>),
}

impl EventTime {
  /// Convert the icalendar representation. Floating times count as UTC;
  /// an unresolvable timezone id or ambiguous local time yields `None`.
  pub fn from_ical(date: DatePerhapsTime) -> Option<Self> {
    Some(match date {
      DatePerhapsTime::DateTime(dt) => match dt {
        CalendarDateTime::Floating(dt) => Self::DateTime(dt.and_utc()),
        CalendarDateTime::WithTimezone { date_time, tzid } => Self::DateTime(
          Tz::from_str(&tzid)
            .ok()?
            .from_local_datetime(&date_time)
            .single()?
            .with_timezone(&Utc),
        ),
        CalendarDateTime::Utc(dt) => Self::DateTime(dt),
      },
      DatePerhapsTime::Date(date) => Self::Date(date),
    })
  }

  /// Normalize to an instant for comparisons. A bare date counts as
  /// midnight of that date in the given timezone.
  pub fn as_instant(&self, tz: Tz) -> DateTime<Utc> {
    match self {
      Self::DateTime(dt) => *dt,
      Self::Date(date) => {
        let midnight = date.and_time(NaiveTime::default());

        tz.from_local_datetime(&midnight)
          .earliest()
          .map_or_else(|| midnight.and_utc(), |dt| dt.with_timezone(&Utc))
      }
    }
  }

  pub fn display(&self, tz: Tz) -> String {
    match self {
      Self::DateTime(dt) => dt.with_timezone(&tz).format(DATETIME_FMT).to_string(),
      Self::Date(date) => date.format(DATE_FMT).to_string(),
    }
  }

  /// Format as an interval end. Bare end dates are exclusive in the feed,
  /// so the closed display shows the day before.
  pub fn display_as_end(&self, tz: Tz, closed: bool) -> String {
    match self {
      Self::Date(date) if closed => (*date - Days::new(1)).format(DATE_FMT).to_string(),
      _ => self.display(tz),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
  pub summary: String,
  pub location: String,
  pub start: EventTime,
  pub end: EventTime,
  pub color: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  const TZ: Tz = chrono_tz::Europe::Budapest;

  #[test]
  fn bare_end_date_decrements_in_closed_display() {
    let end = EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

    assert_eq!(end.display_as_end(TZ, true), "2025.03.09.");
    assert_eq!(end.display_as_end(TZ, false), "2025.03.10.");
  }

  #[test]
  fn instants_are_displayed_in_the_configured_timezone() {
    // 17:30 UTC is 18:30 in Budapest (CET) on that date.
    let start = EventTime::DateTime(Utc.with_ymd_and_hms(2025, 3, 10, 17, 30, 0).unwrap());

    assert_eq!(start.display(TZ), "2025.03.10. 18:30");
    assert_eq!(start.display_as_end(TZ, true), "2025.03.10. 18:30");
  }

  #[test]
  fn bare_date_normalizes_to_local_midnight() {
    let date = EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

    // Midnight in Budapest is 23:00 UTC the previous day.
    assert_eq!(
      date.as_instant(TZ),
      Utc.with_ymd_and_hms(2025, 3, 9, 23, 0, 0).unwrap(),
    );
  }

  #[test]
  fn floating_times_count_as_utc() {
    let floating = DatePerhapsTime::DateTime(CalendarDateTime::Floating(
      NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap(),
    ));

    assert_eq!(
      EventTime::from_ical(floating),
      Some(EventTime::DateTime(Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap())),
    );
  }

  #[test]
  fn unresolvable_timezone_id_is_rejected() {
    let dated = DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone {
      date_time: NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap(),
      tzid: "Not/AZone".to_owned(),
    });

    assert_eq!(EventTime::from_ical(dated), None);
  }
}
