//! Collaborator interfaces: where rows come from and where events go.

use chrono::{DateTime, Utc};

use crate::error::TimetableResult;
use crate::event::RemoteEvent;
use crate::lesson::LessonOccurrence;
use crate::schedule::{RawRow, ScheduleQuery};

/// Who the remote calendar notifies about a mutation. Lesson changes
/// always go out to every participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPolicy {
    All,
}

#[allow(async_fn_in_trait)]
pub trait ScheduleSource {
    async fn fetch_schedule(&self, query: &ScheduleQuery) -> TimetableResult<Vec<RawRow>>;
}

#[allow(async_fn_in_trait)]
pub trait CalendarStore {
    /// Events that end at or after `from`.
    async fn list_events(&self, from: DateTime<Utc>) -> TimetableResult<Vec<RemoteEvent>>;

    async fn create_event(&self, occurrence: &LessonOccurrence, notify: NotifyPolicy) -> TimetableResult<()>;

    async fn update_event(
        &self,
        existing_id: &str,
        occurrence: &LessonOccurrence,
        notify: NotifyPolicy,
    ) -> TimetableResult<()>;

    async fn delete_event(&self, existing_id: &str, notify: NotifyPolicy) -> TimetableResult<()>;
}
