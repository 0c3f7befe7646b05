//! Core of timetable-sync.
//!
//! Turns an academic timetable into dated lesson occurrences and reconciles
//! them with a remote calendar:
//! - `academic_calendar` maps (week, weekday, time) onto real dates
//! - `extract` expands raw rows into occurrences
//! - `identity` keys occurrences so they can be matched across passes
//! - `reconcile` diffs remote events against the computed occurrences
//! - `sync` runs one full pass against the `store` collaborators

pub mod academic_calendar;
pub mod constants;
pub mod error;
pub mod event;
pub mod extract;
pub mod identity;
pub mod lesson;
pub mod reconcile;
pub mod reminder;
pub mod schedule;
pub mod store;
pub mod sync;

pub use error::{TimetableError, TimetableResult};
pub use event::RemoteEvent;
pub use lesson::LessonOccurrence;
pub use schedule::{LessonRow, RawRow, ScheduleQuery, ScheduleType};
