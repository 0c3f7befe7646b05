//! Colored terminal rendering for reconciliation results.

use chrono_tz::Tz;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use timetable_core::reconcile::{DiffKind, Operation, PassReport, Reconciliation};

pub trait Render {
    fn render(&self) -> String;
}

/// Color `text` the way `kind` is shown.
fn paint(kind: DiffKind, text: &str) -> String {
    match kind {
        DiffKind::Create => text.green().to_string(),
        DiffKind::Update => text.yellow().to_string(),
        DiffKind::Delete => text.red().to_string(),
    }
}

impl Render for DiffKind {
    fn render(&self) -> String {
        paint(*self, &self.to_string())
    }
}

fn render_operation(operation: &Operation, tz: Tz) -> String {
    let kind = operation.kind();
    format!("{} {}", kind.render(), paint(kind, &operation.describe(tz)))
}

/// Above this many operations only per-kind counts are shown
const COMPACT_THRESHOLD: usize = 5;

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

impl Render for Reconciliation {
    fn render(&self) -> String {
        if self.is_empty() {
            return "   No changes".dimmed().to_string();
        }

        if self.operations.len() <= COMPACT_THRESHOLD {
            return self
                .operations
                .iter()
                .map(|op| format!("   {}", render_operation(op, self.timezone())))
                .collect::<Vec<_>>()
                .join("\n");
        }

        let labels = [
            (DiffKind::Create, "new"),
            (DiffKind::Update, "changed"),
            (DiffKind::Delete, "deleted"),
        ];

        labels
            .into_iter()
            .filter_map(|(kind, adjective)| {
                let count = self.count(kind);
                (count > 0).then(|| {
                    let label = format!("({count} {adjective} {})", pluralize("lesson", count));
                    format!("   {} {}", kind.render(), paint(kind, &label))
                })
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Render for PassReport {
    fn render(&self) -> String {
        if *self == PassReport::default() {
            return "Calendar is up to date".dimmed().to_string();
        }
        format!(
            "{} created, {} updated, {} deleted",
            self.created.green(),
            self.updated.yellow(),
            self.deleted.red()
        )
    }
}

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use timetable_core::ScheduleType;
    use timetable_core::constants::DEFAULT_TIMEZONE;
    use timetable_core::extract::ComputedOccurrenceSet;
    use timetable_core::lesson::LessonOccurrence;

    fn plan(days: u32) -> Reconciliation {
        let computed: ComputedOccurrenceSet = (1..=days)
            .map(|day| {
                let lesson = LessonOccurrence {
                    subject: "Физика".to_string(),
                    lesson_type: "Лекция".to_string(),
                    counterpart: "Иванов И.И.".to_string(),
                    schedule_type: ScheduleType::ByGroup,
                    room: "101".to_string(),
                    comment: String::new(),
                    start: DEFAULT_TIMEZONE.with_ymd_and_hms(2025, 9, day + 1, 8, 0, 0).unwrap(),
                    end: DEFAULT_TIMEZONE.with_ymd_and_hms(2025, 9, day + 1, 9, 35, 0).unwrap(),
                    ordinal: 1,
                    reminder_minutes: None,
                    color_id: None,
                };
                (lesson.identity(), lesson)
            })
            .collect();
        let now = DEFAULT_TIMEZONE.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        Reconciliation::compute(&[], computed, now)
    }

    #[test]
    fn small_plan_lists_each_lesson() {
        let rendered = plan(2).render();
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.contains("02.09.2025 08:00, 1. Физика — Лекция, 101"));
    }

    #[test]
    fn large_plan_shows_counts() {
        let rendered = plan(7).render();
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.contains("7 new lessons"));
    }

    #[test]
    fn pluralizes_counts() {
        assert_eq!(pluralize("lesson", 1), "lesson");
        assert_eq!(pluralize("lesson", 3), "lessons");
    }

    #[test]
    fn report_mentions_every_count() {
        let report = PassReport {
            created: 3,
            updated: 1,
            deleted: 2,
        };
        let rendered = report.render();
        assert!(rendered.contains("created"));
        assert!(rendered.contains("updated"));
        assert!(rendered.contains("deleted"));
    }
}
