//! Stable identity of an occurrence across passes and process restarts.
//!
//! The key covers summary, description, location and the start time at
//! minute precision. End time, color and reminders are not part of it.

use std::fmt;

use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};

/// Start time rendering used inside the key.
pub const IDENTITY_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

const FIELD_SEPARATOR: &[u8] = b"\x1f";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// `start` is the local wall-clock time in the timetable's zone.
    /// Empty description/location are treated like absent ones.
    pub fn compute(
        summary: &str,
        description: Option<&str>,
        location: Option<&str>,
        start: &NaiveDateTime,
    ) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(summary.as_bytes());
        hasher.update(FIELD_SEPARATOR);
        hasher.update(description.unwrap_or_default().as_bytes());
        hasher.update(FIELD_SEPARATOR);
        hasher.update(location.unwrap_or_default().as_bytes());
        hasher.update(FIELD_SEPARATOR);
        hasher.update(start.format(IDENTITY_TIME_FORMAT).to_string().as_bytes());

        let digest = hasher.finalize();
        IdentityKey(digest.iter().map(|b| format!("{b:02x}")).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0[..12])
    }
}
