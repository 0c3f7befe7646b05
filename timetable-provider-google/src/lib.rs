//! Google Calendar store for timetable-sync.
//!
//! The provider manages its own credentials and tokens:
//!   ~/.config/timetable-sync/google/app_config.toml
//!   ~/.config/timetable-sync/google/session/{account}.toml

mod app_config;
mod auth;
mod convert;
mod session;
mod store;

pub use app_config::AppConfig;
pub use auth::authenticate;
pub use store::{DEFAULT_CALENDAR_ID, GoogleCalendarStore};
