//! Expansion of raw timetable rows into dated lesson occurrences.

use std::collections::HashMap;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::academic_calendar::{AcademicCalendar, weekday_offset};
use crate::error::{TimetableError, TimetableResult};
use crate::identity::IdentityKey;
use crate::lesson::{LessonOccurrence, lesson_color, lesson_ordinal};
use crate::reminder::{FirstLessonTracker, ReminderPolicy};
use crate::schedule::{LessonRow, RawRow, ScheduleType};

/// Occurrences of one pass keyed by identity.
pub type ComputedOccurrenceSet = HashMap<IdentityKey, LessonOccurrence>;

pub struct ScheduleExtractor {
    pub calendar: AcademicCalendar,
    pub now: DateTime<Tz>,
    pub schedule_type: ScheduleType,
    pub reminders: ReminderPolicy,
}

impl ScheduleExtractor {
    pub fn new(now: DateTime<Tz>, schedule_type: ScheduleType, reminders: ReminderPolicy) -> Self {
        ScheduleExtractor {
            calendar: AcademicCalendar::from_now(&now),
            now,
            schedule_type,
            reminders,
        }
    }

    /// Scan rows left to right. Lessons that ended before `now` are left out
    /// but still count towards the first lesson of their day.
    pub fn extract(&self, rows: &[RawRow]) -> TimetableResult<ComputedOccurrenceSet> {
        let mut occurrences = ComputedOccurrenceSet::new();
        let mut tracker = FirstLessonTracker::default();
        let mut weekday: Option<&str> = None;

        for row in rows {
            match row {
                RawRow::DayHeader(day) => weekday = Some(day.as_str()),
                RawRow::NoInfo => continue,
                RawRow::Lesson(lesson) => {
                    let day = weekday.ok_or_else(|| TimetableError::InvalidWeekday(String::new()))?;
                    self.expand_lesson(lesson, day, &mut tracker, &mut occurrences)?;
                }
            }
        }

        Ok(occurrences)
    }

    fn expand_lesson(
        &self,
        lesson: &LessonRow,
        day: &str,
        tracker: &mut FirstLessonTracker,
        occurrences: &mut ComputedOccurrenceSet,
    ) -> TimetableResult<()> {
        let (start_time, end_time) = lesson.times()?;
        let ordinal = lesson_ordinal(start_time)?;
        let day_offset = weekday_offset(day)?;
        let color_id = lesson_color(&lesson.lesson_type);

        for week in lesson.week_numbers()? {
            let end = self.calendar.resolve(week, day, end_time)?;
            if end < self.now {
                tracker.record(week, day_offset, ordinal);
                continue;
            }

            let start = self.calendar.resolve(week, day, start_time)?;
            let is_first = tracker.is_first(week, day_offset, ordinal);

            let occurrence = LessonOccurrence {
                subject: lesson.subject.clone(),
                lesson_type: lesson.lesson_type.clone(),
                counterpart: lesson.counterpart.clone(),
                schedule_type: self.schedule_type,
                room: lesson.room.clone(),
                comment: lesson.comment.clone(),
                start,
                end,
                ordinal,
                reminder_minutes: self.reminders.lead_time(is_first),
                color_id,
            };

            tracker.record(week, day_offset, ordinal);
            occurrences.insert(occurrence.identity(), occurrence);
        }

        Ok(())
    }
}
