//! Three-way diff between the remote calendar and the computed timetable.

mod diff_kind;
mod operation;

pub use diff_kind::DiffKind;
pub use operation::Operation;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::TimetableResult;
use crate::event::RemoteEvent;
use crate::extract::ComputedOccurrenceSet;
use crate::store::{CalendarStore, NotifyPolicy};

/// Counts of applied operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

/// The operations that bring the remote calendar in line with the timetable.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub operations: Vec<Operation>,
    tz: Tz,
}

impl Reconciliation {
    /// Match remote events against the computed set by identity.
    ///
    /// Remote events without a computed counterpart are deleted, matched ones
    /// are updated when a comparable field differs, and computed occurrences
    /// left over are created. Remote events that ended before `now` are
    /// never touched.
    pub fn compute(
        remote_events: &[RemoteEvent],
        mut computed: ComputedOccurrenceSet,
        now: DateTime<Tz>,
    ) -> Self {
        let tz = now.timezone();
        let now_utc = now.with_timezone(&Utc);
        let mut operations = Vec::new();

        for remote in remote_events {
            if remote.has_ended(now_utc) {
                continue;
            }

            let key = remote.identity(tz);

            let Some(occurrence) = computed.remove(&key) else {
                operations.push(Operation::Delete(remote.clone()));
                continue;
            };

            if remote.comparable() != occurrence.comparable() {
                operations.push(Operation::Update {
                    existing: remote.clone(),
                    occurrence,
                });
            }
        }

        let mut created: Vec<_> = computed.into_values().collect();
        created.sort_by_key(|occurrence| occurrence.start);
        operations.extend(created.into_iter().map(Operation::Create));

        Reconciliation { operations, tz }
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn count(&self, kind: DiffKind) -> usize {
        self.operations.iter().filter(|op| op.kind() == kind).count()
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Issue every operation in order. The first failure aborts; operations
    /// issued before it stay applied.
    pub async fn apply<S: CalendarStore>(&self, store: &S) -> TimetableResult<PassReport> {
        let mut report = PassReport::default();

        for operation in &self.operations {
            match operation {
                Operation::Create(occurrence) => {
                    store.create_event(occurrence, NotifyPolicy::All).await?;
                    report.created += 1;
                }
                Operation::Update { existing, occurrence } => {
                    store
                        .update_event(&existing.id, occurrence, NotifyPolicy::All)
                        .await?;
                    report.updated += 1;
                }
                Operation::Delete(event) => {
                    store.delete_event(&event.id, NotifyPolicy::All).await?;
                    report.deleted += 1;
                }
            }
            tracing::info!(
                "Lesson {}: {}",
                operation.kind().past_tense(),
                operation.describe(self.tz)
            );
        }

        Ok(report)
    }
}
