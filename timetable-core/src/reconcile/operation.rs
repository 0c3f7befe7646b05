use chrono_tz::Tz;

use crate::event::RemoteEvent;
use crate::lesson::LessonOccurrence;
use crate::reconcile::DiffKind;

/// A single mutation of the remote calendar.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Create(LessonOccurrence),
    /// Replace the remote event's fields, keeping its identifier.
    Update {
        existing: RemoteEvent,
        occurrence: LessonOccurrence,
    },
    Delete(RemoteEvent),
}

impl Operation {
    pub fn kind(&self) -> DiffKind {
        match self {
            Operation::Create(_) => DiffKind::Create,
            Operation::Update { .. } => DiffKind::Update,
            Operation::Delete(_) => DiffKind::Delete,
        }
    }

    /// The lesson this operation is about, rendered in local time.
    pub fn describe(&self, tz: Tz) -> String {
        match self {
            Operation::Create(occurrence) | Operation::Update { occurrence, .. } => occurrence.to_string(),
            Operation::Delete(event) => event.describe(tz),
        }
    }
}
