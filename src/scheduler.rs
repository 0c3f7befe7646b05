//! Periodic trigger for reconciliation passes.

use std::time::Duration;

use tokio::time::Instant;

/// First instant of the grid `scheduled + k * period` strictly after `now`.
///
/// Ticks covered by an overrunning pass are dropped, not queued.
pub fn next_deadline(scheduled: Instant, now: Instant, period: Duration) -> Instant {
    let elapsed = now.saturating_duration_since(scheduled);
    let missed = elapsed.as_nanos() / period.as_nanos().max(1);
    let periods = u32::try_from(missed + 1).unwrap_or(u32::MAX);
    scheduled + period * periods
}

/// Run `pass` immediately, then once per `period` until Ctrl-C.
///
/// Passes never overlap: the next one starts only after the current one
/// returned. A pass that fails is logged and the schedule carries on.
pub async fn run_every<F, Fut>(period: Duration, mut pass: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    run_until(period, &mut pass, shutdown_signal()).await;
}

async fn run_until<F, Fut, S>(period: Duration, pass: &mut F, shutdown: S)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut scheduled = Instant::now();

    loop {
        if let Err(e) = pass().await {
            tracing::error!("Pass failed: {e:#}");
        }

        let next = next_deadline(scheduled, Instant::now(), period);
        let skipped = (next - scheduled).as_nanos() / period.as_nanos().max(1) - 1;
        if skipped > 0 {
            tracing::warn!(skipped, "Pass overran the poll interval, skipping ticks");
        }
        tracing::debug!(in_secs = (next - Instant::now()).as_secs(), "Next pass scheduled");

        tokio::select! {
            _ = tokio::time::sleep_until(next) => scheduled = next,
            _ = &mut shutdown => {
                tracing::info!("Shutting down");
                return;
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
