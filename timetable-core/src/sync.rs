//! One reconciliation pass: fetch, extract, diff, apply.
//!
//! A pass holds no state beyond its own locals, so a failed pass is
//! recovered by simply running the next one.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::TimetableResult;
use crate::extract::ScheduleExtractor;
use crate::reconcile::{PassReport, Reconciliation};
use crate::reminder::ReminderPolicy;
use crate::schedule::ScheduleQuery;
use crate::store::{CalendarStore, ScheduleSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub query: ScheduleQuery,
    pub reminders: ReminderPolicy,
}

/// Compute the operations of a pass without applying them.
pub async fn plan_pass<Src, St>(
    source: &Src,
    store: &St,
    settings: &SyncSettings,
    now: DateTime<Tz>,
) -> TimetableResult<Reconciliation>
where
    Src: ScheduleSource,
    St: CalendarStore,
{
    let rows = source.fetch_schedule(&settings.query).await?;
    tracing::debug!(rows = rows.len(), "Fetched timetable");

    let extractor = ScheduleExtractor::new(now, settings.query.schedule_type, settings.reminders);
    tracing::debug!(anchor = %extractor.calendar.anchor(), "Academic year anchor");
    let computed = extractor.extract(&rows)?;

    let remote_events = store.list_events(now.with_timezone(&Utc)).await?;
    tracing::debug!(
        computed = computed.len(),
        remote = remote_events.len(),
        "Reconciling"
    );

    Ok(Reconciliation::compute(&remote_events, computed, now))
}

pub async fn run_pass<Src, St>(
    source: &Src,
    store: &St,
    settings: &SyncSettings,
    now: DateTime<Tz>,
) -> TimetableResult<PassReport>
where
    Src: ScheduleSource,
    St: CalendarStore,
{
    let plan = plan_pass(source, store, settings, now).await?;
    plan.apply(store).await
}
