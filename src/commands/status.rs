use anyhow::Result;
use timetable_core::TimetableResult;
use timetable_core::reconcile::Reconciliation;
use timetable_core::sync::plan_pass;

use crate::commands::Pipeline;
use crate::config::Settings;
use crate::render::{Render, create_spinner};

/// Show what the next pass would change, without changing anything.
pub async fn run(settings: Settings) -> Result<()> {
    let pipeline = Pipeline::from_settings(&settings)?;

    let spinner = create_spinner(format!("📅 {}", settings.calendar_id));
    let result = plan_pass(&pipeline.source, &pipeline.store, &pipeline.sync, pipeline.now()).await;
    spinner.finish_and_clear();

    println!("📅 {}", settings.calendar_id);
    println!("{}", render_plan(result)?);

    Ok(())
}

/// A plan that could not be computed fails the command.
fn render_plan(result: TimetableResult<Reconciliation>) -> Result<String> {
    Ok(result?.render())
}
