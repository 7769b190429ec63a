use std::time::Duration;
use tracing::info;

use crate::Result;
use crate::fetcher::PageSource;
use crate::notifier::Notifier;
use crate::runner::CycleRunner;

/// Drive the cycle runner on a fixed cadence until interrupted.
///
/// The interval's first tick completes immediately, so the first cycle runs at
/// startup. Ctrl-C between or during cycles is a graceful shutdown; a missed
/// tick (a cycle overrunning the interval) delays the next one rather than
/// bursting.
pub async fn run<S, N>(runner: &CycleRunner<S, N>, check_interval: Duration) -> Result<()>
where
    S: PageSource,
    N: Notifier,
{
    let mut ticker = tokio::time::interval(check_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                runner.run_cycle().await;
                info!(
                    "waiting for next check (in {} hour(s)), press Ctrl+C to stop",
                    check_interval.as_secs() / 3600
                );
            }
            result = &mut ctrl_c => {
                result?;
                info!("stopped by user, goodbye");
                return Ok(());
            }
        }
    }
}
