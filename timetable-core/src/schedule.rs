//! Raw timetable rows as delivered by a schedule source.

use crate::error::{TimetableError, TimetableResult};

/// Whose timetable is being synced. The numeric codes are the ones the
/// ISU endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleType {
    ByGroup,
    ByTeacher,
}

impl ScheduleType {
    pub fn from_code(code: i64) -> TimetableResult<Self> {
        match code {
            1 => Ok(ScheduleType::ByGroup),
            2 => Ok(ScheduleType::ByTeacher),
            other => Err(TimetableError::Config(format!(
                "schedule_type must be 1 (by group) or 2 (by teacher), got {other}"
            ))),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            ScheduleType::ByGroup => 1,
            ScheduleType::ByTeacher => 2,
        }
    }

    /// Label for the counterpart column: a group's timetable lists teachers,
    /// a teacher's timetable lists groups.
    pub fn counterpart_label(self) -> &'static str {
        match self {
            ScheduleType::ByGroup => "Преподаватель",
            ScheduleType::ByTeacher => "Группа",
        }
    }
}

/// Parameters of a timetable fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub semester_id: i64,
    pub schedule_type: ScheduleType,
    /// Student group id or teacher id, depending on `schedule_type`.
    pub subject_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRow {
    /// Sets the weekday for every following row until the next header.
    DayHeader(String),
    /// An empty slot.
    NoInfo,
    Lesson(LessonRow),
}

/// Cell texts of a lesson row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonRow {
    /// `HH:MM-HH:MM`
    pub time_range: String,
    /// Space-separated week numbers
    pub weeks: String,
    pub subject: String,
    pub lesson_type: String,
    pub counterpart: String,
    pub room: String,
    pub comment: String,
}

impl LessonRow {
    /// Split the time range into `(start, end)`.
    pub fn times(&self) -> TimetableResult<(&str, &str)> {
        self.time_range
            .split_once('-')
            .map(|(start, end)| (start.trim(), end.trim()))
            .ok_or_else(|| TimetableError::InvalidTimeRange(self.time_range.clone()))
    }

    pub fn week_numbers(&self) -> TimetableResult<Vec<u32>> {
        self.weeks
            .split_whitespace()
            .map(|token| match token.parse::<u32>() {
                Ok(week) if week > 0 => Ok(week),
                _ => Err(TimetableError::InvalidWeek(token.to_string())),
            })
            .collect()
    }
}
