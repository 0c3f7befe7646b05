use std::time::Duration;

use anyhow::Result;
use timetable_core::reconcile::PassReport;
use timetable_core::sync::run_pass;

use crate::commands::Pipeline;
use crate::config::Settings;
use crate::render::Render;
use crate::scheduler;

pub async fn run(settings: Settings, once: bool) -> Result<()> {
    let pipeline = Pipeline::from_settings(&settings)?;

    tracing::info!(
        calendar = %settings.calendar_id,
        semester = settings.schedule_semester_id,
        subject = settings.subject_id,
        "Starting timetable sync"
    );

    if once || settings.poll_interval_secs == 0 {
        let report = pass(&pipeline).await?;
        println!("{}", report.render());
        return Ok(());
    }

    let period = Duration::from_secs(settings.poll_interval_secs);
    tracing::info!(every_secs = settings.poll_interval_secs, "Polling");

    let pipeline = &pipeline;
    scheduler::run_every(period, move || async move { pass(pipeline).await.map(|_| ()) }).await;

    Ok(())
}

async fn pass(pipeline: &Pipeline) -> Result<PassReport> {
    let report = run_pass(&pipeline.source, &pipeline.store, &pipeline.sync, pipeline.now()).await?;

    tracing::info!(
        created = report.created,
        updated = report.updated,
        deleted = report.deleted,
        "Pass complete"
    );

    Ok(report)
}
