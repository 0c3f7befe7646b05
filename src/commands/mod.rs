pub mod auth;
pub mod config;
pub mod run;
pub mod status;

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use timetable_core::sync::SyncSettings;
use timetable_provider_google::GoogleCalendarStore;
use timetable_source_isu::IsuSource;

use crate::config::Settings;

/// The collaborators of a reconciliation pass, built once from settings.
pub struct Pipeline {
    pub source: IsuSource,
    pub store: GoogleCalendarStore,
    pub sync: SyncSettings,
    pub tz: Tz,
}

impl Pipeline {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let tz = settings.tz()?;
        Ok(Pipeline {
            source: IsuSource::new(settings.schedule_url.clone())?,
            store: GoogleCalendarStore::new(
                settings.google_account.clone(),
                settings.calendar_id.clone(),
                tz,
            ),
            sync: settings.sync_settings()?,
            tz,
        })
    }

    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}
