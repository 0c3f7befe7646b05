//! Reminder lead times: the first lesson of a day gets its own lead time.

use std::collections::HashMap;

/// Configured popup lead times in minutes. `None` leaves the calendar's
/// default reminders in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderPolicy {
    pub first_lesson: Option<u32>,
    pub subsequent: Option<u32>,
}

impl ReminderPolicy {
    pub fn lead_time(&self, is_first_lesson: bool) -> Option<u32> {
        if is_first_lesson {
            self.first_lesson
        } else {
            self.subsequent
        }
    }
}

/// Smallest lesson ordinal seen so far per (week, weekday), built up in row
/// order during one extraction.
///
/// Classification is only correct when the source lists each day's lessons
/// in time order. A lesson arriving with an ordinal below the recorded
/// minimum breaks that assumption; it is logged and the minimum is lowered,
/// but lessons already classified are not revisited.
#[derive(Debug, Default)]
pub struct FirstLessonTracker {
    earliest: HashMap<(u32, u32), u8>,
}

impl FirstLessonTracker {
    /// `weekday` is the 0-based offset from Monday.
    pub fn is_first(&self, week: u32, weekday: u32, ordinal: u8) -> bool {
        match self.earliest.get(&(week, weekday)) {
            None => true,
            Some(&earliest) => earliest == ordinal,
        }
    }

    pub fn record(&mut self, week: u32, weekday: u32, ordinal: u8) {
        self.earliest
            .entry((week, weekday))
            .and_modify(|earliest| {
                if ordinal < *earliest {
                    tracing::warn!(
                        week,
                        weekday,
                        ordinal,
                        earliest = *earliest,
                        "Lessons are not listed in time order, first-lesson reminders may be wrong"
                    );
                    *earliest = ordinal;
                }
            })
            .or_insert(ordinal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_lesson_of_each_day() {
        let mut tracker = FirstLessonTracker::default();

        assert!(tracker.is_first(1, 0, 2));
        tracker.record(1, 0, 2);

        assert!(tracker.is_first(1, 0, 2));
        assert!(!tracker.is_first(1, 0, 3));

        // Other days and other weeks are tracked separately
        assert!(tracker.is_first(1, 1, 4));
        assert!(tracker.is_first(2, 0, 5));
    }

    #[test]
    fn out_of_order_lesson_lowers_minimum() {
        let mut tracker = FirstLessonTracker::default();
        tracker.record(1, 0, 3);

        // Listed after ordinal 3 although it comes earlier in the day
        assert!(!tracker.is_first(1, 0, 1));
        tracker.record(1, 0, 1);
        assert!(tracker.is_first(1, 0, 1));
        assert!(!tracker.is_first(1, 0, 3));
    }

    #[test]
    fn lead_time_by_position() {
        let policy = ReminderPolicy {
            first_lesson: Some(60),
            subsequent: Some(10),
        };
        assert_eq!(policy.lead_time(true), Some(60));
        assert_eq!(policy.lead_time(false), Some(10));
        assert_eq!(ReminderPolicy::default().lead_time(true), None);
    }
}
