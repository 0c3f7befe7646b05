//! Mapping of timetable coordinates (week, weekday, time of day) onto real dates.
//!
//! Week numbers count from the week that contains September 1 of the current
//! academic year. The Monday of that week is the anchor: week 1, Monday,
//! 00:00 local time.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::constants::WEEKDAYS;
use crate::error::{TimetableError, TimetableResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcademicCalendar {
    anchor: NaiveDate,
    tz: Tz,
}

impl AcademicCalendar {
    /// Anchor on the academic year that `now` falls into. Before September 1
    /// the previous year's September is used.
    pub fn from_now(now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();

        let mut year_start = first_september(today.year());
        if today < year_start {
            year_start = first_september(today.year() - 1);
        }

        let offset = year_start.weekday().num_days_from_monday();

        AcademicCalendar {
            anchor: year_start - Duration::days(offset as i64),
            tz: now.timezone(),
        }
    }

    pub fn with_anchor(anchor: NaiveDate, tz: Tz) -> Self {
        AcademicCalendar { anchor, tz }
    }

    /// Monday of the week containing September 1.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Resolve `(week, weekday, "HH:MM")` to an absolute local timestamp.
    pub fn resolve(&self, week: u32, weekday: &str, time_of_day: &str) -> TimetableResult<DateTime<Tz>> {
        let day_offset = weekday_offset(weekday)?;
        let time = parse_time_of_day(time_of_day)?;

        let date = Duration::try_weeks(week as i64 - 1)
            .and_then(|weeks| self.anchor.checked_add_signed(weeks))
            .and_then(|monday| monday.checked_add_signed(Duration::days(day_offset as i64)))
            .ok_or_else(|| TimetableError::InvalidWeek(week.to_string()))?;
        let local = date.and_time(time);

        self.tz
            .from_local_datetime(&local)
            .earliest()
            .ok_or_else(|| TimetableError::InvalidTime(format!("{local} does not exist in {}", self.tz)))
    }
}

/// 0-based position of a weekday name, Monday = 0.
pub fn weekday_offset(weekday: &str) -> TimetableResult<u32> {
    WEEKDAYS
        .iter()
        .position(|&name| name == weekday)
        .map(|i| i as u32)
        .ok_or_else(|| TimetableError::InvalidWeekday(weekday.to_string()))
}

/// Parse `H:MM` / `HH:MM`.
pub fn parse_time_of_day(s: &str) -> TimetableResult<NaiveTime> {
    let invalid = || TimetableError::InvalidTime(s.to_string());

    let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid)
}

fn first_september(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 9, 1).expect("September 1 exists in every supported year")
}
