//! Conversion between lesson occurrences / remote events and Google events.

use chrono::Utc;
use chrono_tz::Tz;
use google_calendar::types::{Event, EventDateTime, EventReminder, Reminders};
use timetable_core::{LessonOccurrence, RemoteEvent};

const POPUP: &str = "popup";

pub fn to_google(occurrence: &LessonOccurrence, tz: Tz) -> Event {
    let date_time = |dt: chrono::DateTime<Tz>| EventDateTime {
        date: None,
        date_time: Some(dt.with_timezone(&Utc)),
        time_zone: tz.name().to_string(),
    };

    let reminders = match occurrence.reminder_minutes {
        Some(minutes) => Reminders {
            overrides: vec![EventReminder {
                method: POPUP.to_string(),
                minutes: minutes as i64,
            }],
            use_default: false,
        },
        None => Reminders {
            overrides: vec![],
            use_default: true,
        },
    };

    Event {
        summary: occurrence.summary(),
        description: occurrence.description(),
        location: occurrence.location().unwrap_or_default(),
        start: Some(date_time(occurrence.start)),
        end: Some(date_time(occurrence.end)),
        color_id: occurrence.color_id.unwrap_or_default().to_string(),
        reminders: Some(reminders),
        ..Default::default()
    }
}

/// `None` for all-day events, which the timetable never produces.
pub fn from_google(event: Event) -> Option<RemoteEvent> {
    let start = event.start.as_ref().and_then(|s| s.date_time)?;
    let end = event.end.as_ref().and_then(|e| e.date_time)?;

    let reminder_minutes = event
        .reminders
        .as_ref()
        .filter(|r| !r.use_default)
        .and_then(|r| r.overrides.iter().find(|o| o.method == POPUP))
        .map(|o| o.minutes.max(0) as u32);

    Some(RemoteEvent {
        id: event.id,
        summary: event.summary,
        description: non_empty(event.description),
        location: non_empty(event.location),
        start,
        end,
        reminder_minutes,
        color_id: non_empty(event.color_id),
    })
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
