//! Events already stored in the remote calendar.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::identity::{IDENTITY_TIME_FORMAT, IdentityKey};
use crate::lesson::ComparableFields;

/// A remote calendar event as listed by a `CalendarStore`.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteEvent {
    /// Identifier assigned by the remote store.
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Popup lead time; `None` when the event uses default reminders.
    pub reminder_minutes: Option<u32>,
    pub color_id: Option<String>,
}

impl RemoteEvent {
    pub fn comparable(&self) -> ComparableFields {
        ComparableFields::new(
            self.summary.clone(),
            self.description.clone(),
            self.location.clone(),
            self.reminder_minutes,
        )
    }

    /// Identity with the start time rendered in the timetable's zone.
    pub fn identity(&self, tz: Tz) -> IdentityKey {
        let fields = self.comparable();
        IdentityKey::compute(
            &fields.summary,
            fields.description.as_deref(),
            fields.location.as_deref(),
            &self.start.with_timezone(&tz).naive_local(),
        )
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end < now
    }

    /// One-line rendering for logs, start time in `tz`.
    pub fn describe(&self, tz: Tz) -> String {
        format!(
            "{}, {}, {}, {}",
            self.start.with_timezone(&tz).format(IDENTITY_TIME_FORMAT),
            self.summary,
            self.location.as_deref().unwrap_or_default(),
            self.description.as_deref().unwrap_or_default()
        )
    }
}
