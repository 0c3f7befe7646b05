//! Timetable source backed by the ISU schedule API.
//!
//! The endpoint answers with an HTML table; `parse` turns its rows into
//! `RawRow`s for the extractor.

mod parse;

pub use parse::parse_rows;

use std::time::Duration;

use anyhow::{Context, Result};
use timetable_core::store::ScheduleSource;
use timetable_core::{RawRow, ScheduleQuery, ScheduleType, TimetableError, TimetableResult};

pub const DEFAULT_SCHEDULE_URL: &str = "https://isu.ugatu.su/api/new_schedule_api/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct IsuSource {
    client: reqwest::Client,
    url: String,
}

impl IsuSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("timetable-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(IsuSource {
            client,
            url: url.into(),
        })
    }

    async fn fetch_html(&self, query: &ScheduleQuery) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .query(&query_params(query))
            .send()
            .await
            .with_context(|| format!("Failed to fetch timetable from {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Timetable request to {} failed with status {}", self.url, status);
        }

        response
            .text()
            .await
            .context("Failed to read timetable response body")
    }
}

impl ScheduleSource for IsuSource {
    async fn fetch_schedule(&self, query: &ScheduleQuery) -> TimetableResult<Vec<RawRow>> {
        let html = self
            .fetch_html(query)
            .await
            .map_err(|e| TimetableError::Source(format!("{e:#}")))?;

        parse_rows(&html).map_err(|e| TimetableError::Source(format!("{e:#}")))
    }
}

fn query_params(query: &ScheduleQuery) -> Vec<(&'static str, String)> {
    let subject_param = match query.schedule_type {
        ScheduleType::ByGroup => "student_group_id",
        ScheduleType::ByTeacher => "teacher",
    };

    vec![
        ("schedule_semestr_id", query.semester_id.to_string()),
        ("WhatShow", query.schedule_type.code().to_string()),
        ("weeks", "0".to_string()),
        (subject_param, query.subject_id.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_query_params() {
        let params = query_params(&ScheduleQuery {
            semester_id: 12,
            schedule_type: ScheduleType::ByGroup,
            subject_id: 3456,
        });

        assert_eq!(
            params,
            vec![
                ("schedule_semestr_id", "12".to_string()),
                ("WhatShow", "1".to_string()),
                ("weeks", "0".to_string()),
                ("student_group_id", "3456".to_string()),
            ]
        );
    }

    #[test]
    fn teacher_query_uses_teacher_param() {
        let params = query_params(&ScheduleQuery {
            semester_id: 12,
            schedule_type: ScheduleType::ByTeacher,
            subject_id: 77,
        });

        assert!(params.contains(&("WhatShow", "2".to_string())));
        assert!(params.contains(&("teacher", "77".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "student_group_id"));
    }
}
