//! Settings file at ~/.config/timetable-sync/config.toml
//!
//! Every key can be overridden with a `TIMETABLE_`-prefixed environment
//! variable, e.g. `TIMETABLE_POLL_INTERVAL_SECS=600`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use timetable_core::reminder::ReminderPolicy;
use timetable_core::sync::SyncSettings;
use timetable_core::{ScheduleQuery, ScheduleType, TimetableError, TimetableResult};
use timetable_provider_google::DEFAULT_CALENDAR_ID;
use timetable_source_isu::DEFAULT_SCHEDULE_URL;

const ENV_PREFIX: &str = "TIMETABLE";

fn default_calendar_id() -> String {
    DEFAULT_CALENDAR_ID.to_string()
}

fn default_timezone() -> String {
    timetable_core::constants::DEFAULT_TIMEZONE.name().to_string()
}

fn default_schedule_url() -> String {
    DEFAULT_SCHEDULE_URL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub schedule_semester_id: i64,

    /// 1 = timetable of a student group, 2 = timetable of a teacher
    pub schedule_type: i64,

    /// Student group id or teacher id
    #[serde(alias = "student_group_or_teacher_id")]
    pub subject_id: i64,

    #[serde(default)]
    pub minutes_before_popup_reminder_first_lesson: Option<u32>,

    #[serde(default)]
    pub minutes_before_popup_reminder: Option<u32>,

    /// Google account that owns the target calendar
    pub google_account: String,

    #[serde(default = "default_calendar_id", alias = "default_calendar")]
    pub calendar_id: String,

    /// Seconds between passes; 0 runs a single pass.
    #[serde(default, alias = "task_scheduler_delay")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_schedule_url")]
    pub schedule_url: String,
}

impl Settings {
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join("timetable-sync")
            .join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Config file not found at {}\n\n\
                Create one with:\n  \
                timetable-sync config init",
                path.display()
            );
        }

        let settings: Settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("Invalid config at {}", path.display()))?;

        // Surface every semantic problem at startup, before any pass runs
        settings.sync_settings()?;
        settings.tz()?;

        Ok(settings)
    }

    pub fn sync_settings(&self) -> TimetableResult<SyncSettings> {
        Ok(SyncSettings {
            query: ScheduleQuery {
                semester_id: self.schedule_semester_id,
                schedule_type: ScheduleType::from_code(self.schedule_type)?,
                subject_id: self.subject_id,
            },
            reminders: ReminderPolicy {
                first_lesson: self.minutes_before_popup_reminder_first_lesson,
                subsequent: self.minutes_before_popup_reminder,
            },
        })
    }

    pub fn tz(&self) -> TimetableResult<Tz> {
        self.timezone
            .parse()
            .map_err(|_| TimetableError::Config(format!("Unknown timezone '{}'", self.timezone)))
    }

    /// Write a commented template unless a file already exists.
    /// Returns true if the file was written.
    pub fn create_default_config(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }

        let contents = format!(
            "\
# timetable-sync configuration

# Semester id from the ISU timetable URL
schedule_semester_id = 0

# 1 = student group timetable, 2 = teacher timetable
schedule_type = 1

# Student group id or teacher id
subject_id = 0

# Popup reminders in minutes (omit to use the calendar's defaults)
# minutes_before_popup_reminder_first_lesson = 60
# minutes_before_popup_reminder = 10

# Google account authorized with `timetable-sync auth`
google_account = \"you@gmail.com\"

# Calendar to keep in sync. Every future event in it that is not in the
# timetable gets deleted, so use a dedicated calendar.
calendar_id = \"{}\"

# Seconds between passes, 0 = run once and exit
poll_interval_secs = 0

# timezone = \"{}\"
# schedule_url = \"{}\"
",
            DEFAULT_CALENDAR_ID,
            default_timezone(),
            DEFAULT_SCHEDULE_URL,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create config directory {}", parent.display()))?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write config file {}", path.display()))?;

        Ok(true)
    }
}
