//! `CalendarStore` backed by a Google Calendar.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use google_calendar::types::{OrderBy, SendUpdates};
use timetable_core::store::{CalendarStore, NotifyPolicy};
use timetable_core::{LessonOccurrence, RemoteEvent, TimetableError, TimetableResult};

use crate::convert::{from_google, to_google};
use crate::session::Session;

/// Google's alias for the user's main calendar
pub const DEFAULT_CALENDAR_ID: &str = "primary";

pub struct GoogleCalendarStore {
    account: String,
    calendar_id: String,
    tz: Tz,
}

impl GoogleCalendarStore {
    pub fn new(account: impl Into<String>, calendar_id: impl Into<String>, tz: Tz) -> Self {
        GoogleCalendarStore {
            account: account.into(),
            calendar_id: calendar_id.into(),
            tz,
        }
    }

    async fn list(&self, from: DateTime<Utc>) -> Result<Vec<RemoteEvent>> {
        let client = Session::load_valid(&self.account).await?.client()?;

        let response = client
            .events()
            .list_all(
                &self.calendar_id,
                "",
                0,
                OrderBy::StartTime,
                &[],
                "", // search query
                &[],
                false,
                false,
                true,
                "",
                &from.to_rfc3339(),
                self.tz.name(),
                "",
            )
            .await
            .context("Failed to fetch events")?;

        let total = response.body.len();
        let events: Vec<RemoteEvent> = response.body.into_iter().filter_map(from_google).collect();

        if events.len() < total {
            tracing::debug!(skipped = total - events.len(), "Skipped all-day events");
        }

        Ok(events)
    }

    async fn create(&self, occurrence: &LessonOccurrence, notify: NotifyPolicy) -> Result<()> {
        let client = Session::load_valid(&self.account).await?.client()?;
        let google_event = to_google(occurrence, self.tz);

        client
            .events()
            .insert(
                &self.calendar_id,
                0,
                0,
                false,
                send_updates(notify),
                false,
                &google_event,
            )
            .await
            .with_context(|| format!("Failed to create event: {}", google_event.summary))?;

        Ok(())
    }

    async fn update(&self, event_id: &str, occurrence: &LessonOccurrence, notify: NotifyPolicy) -> Result<()> {
        let client = Session::load_valid(&self.account).await?.client()?;

        let mut google_event = to_google(occurrence, self.tz);
        google_event.id = event_id.to_string();

        client
            .events()
            .update(
                &self.calendar_id,
                event_id,
                0,
                0,
                false,
                send_updates(notify),
                false,
                &google_event,
            )
            .await
            .with_context(|| format!("Failed to update event: {}", google_event.summary))?;

        Ok(())
    }

    async fn delete(&self, event_id: &str, notify: NotifyPolicy) -> Result<()> {
        let client = Session::load_valid(&self.account).await?.client()?;

        let result = client
            .events()
            .delete(&self.calendar_id, event_id, false, send_updates(notify))
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                // Already deleted
                if error_str.contains("410") || error_str.contains("Gone") {
                    Ok(())
                } else {
                    Err(e).with_context(|| format!("Failed to delete event: {}", event_id))
                }
            }
        }
    }
}

fn send_updates(notify: NotifyPolicy) -> SendUpdates {
    match notify {
        NotifyPolicy::All => SendUpdates::All,
    }
}

fn store_error(e: anyhow::Error) -> TimetableError {
    TimetableError::Store(format!("{e:#}"))
}

impl CalendarStore for GoogleCalendarStore {
    async fn list_events(&self, from: DateTime<Utc>) -> TimetableResult<Vec<RemoteEvent>> {
        self.list(from).await.map_err(store_error)
    }

    async fn create_event(&self, occurrence: &LessonOccurrence, notify: NotifyPolicy) -> TimetableResult<()> {
        self.create(occurrence, notify).await.map_err(store_error)
    }

    async fn update_event(
        &self,
        existing_id: &str,
        occurrence: &LessonOccurrence,
        notify: NotifyPolicy,
    ) -> TimetableResult<()> {
        self.update(existing_id, occurrence, notify).await.map_err(store_error)
    }

    async fn delete_event(&self, existing_id: &str, notify: NotifyPolicy) -> TimetableResult<()> {
        self.delete(existing_id, notify).await.map_err(store_error)
    }
}
