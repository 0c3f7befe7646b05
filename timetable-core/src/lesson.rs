//! Lesson occurrences: one concrete lesson on one date.

use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::constants::{LESSON_COLORS, LESSON_SLOTS};
use crate::error::{TimetableError, TimetableResult};
use crate::identity::{IDENTITY_TIME_FORMAT, IdentityKey};
use crate::schedule::ScheduleType;

/// The fields whose divergence between source and remote triggers an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparableFields {
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Popup lead time; `None` means the calendar's default reminders.
    pub reminder_minutes: Option<u32>,
}

impl ComparableFields {
    pub fn new(
        summary: impl Into<String>,
        description: Option<String>,
        location: Option<String>,
        reminder_minutes: Option<u32>,
    ) -> Self {
        ComparableFields {
            summary: summary.into(),
            description: description.filter(|s| !s.is_empty()),
            location: location.filter(|s| !s.is_empty()),
            reminder_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LessonOccurrence {
    pub subject: String,
    pub lesson_type: String,
    /// Teacher (group timetable) or group (teacher timetable).
    pub counterpart: String,
    pub schedule_type: ScheduleType,
    pub room: String,
    pub comment: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    /// 1-based lesson slot number.
    pub ordinal: u8,
    pub reminder_minutes: Option<u32>,
    pub color_id: Option<&'static str>,
}

impl LessonOccurrence {
    pub fn summary(&self) -> String {
        format!("{}. {} — {}", self.ordinal, self.subject, self.lesson_type)
    }

    pub fn description(&self) -> String {
        let mut description = format!("{}: {}", self.schedule_type.counterpart_label(), self.counterpart);
        if !self.comment.is_empty() {
            description.push_str(&format!("\nКомментарий: {}", self.comment));
        }
        description
    }

    pub fn location(&self) -> Option<String> {
        Some(self.room.clone()).filter(|room| !room.is_empty())
    }

    pub fn comparable(&self) -> ComparableFields {
        ComparableFields::new(
            self.summary(),
            Some(self.description()),
            self.location(),
            self.reminder_minutes,
        )
    }

    pub fn identity(&self) -> IdentityKey {
        let fields = self.comparable();
        IdentityKey::compute(
            &fields.summary,
            fields.description.as_deref(),
            fields.location.as_deref(),
            &self.start.naive_local(),
        )
    }
}

impl fmt::Display for LessonOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.start.format(IDENTITY_TIME_FORMAT),
            self.summary(),
            self.room,
            self.description()
        )
    }
}

/// Slot number for a lesson start time.
pub fn lesson_ordinal(start_time: &str) -> TimetableResult<u8> {
    LESSON_SLOTS
        .iter()
        .position(|&slot| slot == start_time)
        .map(|i| i as u8 + 1)
        .ok_or_else(|| TimetableError::UnknownSlot(start_time.to_string()))
}

/// Color id for a lesson type. Unknown types get no color.
pub fn lesson_color(lesson_type: &str) -> Option<&'static str> {
    let color = LESSON_COLORS
        .iter()
        .find(|(name, _)| *name == lesson_type)
        .map(|(_, color)| *color);

    if color.is_none() {
        tracing::warn!(lesson_type, "Unknown lesson type, event will have no color");
    }

    color
}
