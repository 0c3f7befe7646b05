use std::fmt;

/// What a reconciliation does to one remote event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Create,
    Update,
    Delete,
}

impl DiffKind {
    /// Verb used in the per-lesson log line.
    pub fn past_tense(self) -> &'static str {
        match self {
            DiffKind::Create => "added",
            DiffKind::Update => "updated",
            DiffKind::Delete => "removed",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            DiffKind::Create => "+",
            DiffKind::Update => "~",
            DiffKind::Delete => "-",
        };
        f.write_str(symbol)
    }
}
