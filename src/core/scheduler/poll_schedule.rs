// Fixed-interval polling.
//
// A `PollSchedule` says "run every N seconds" and whether the first run happens
// right away or after one full period. `spawn_polling` turns a schedule plus an
// async closure into a background task.
//
// Ticks of one loop never overlap: the next tick is only awaited after the
// previous pass finished. When a pass overruns its period, one catch-up pass
// starts as soon as it returns; the remaining missed ticks are dropped and the
// schedule goes back to its original period grid.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstTick {
    Immediate,
    AfterPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub period: Duration,
    pub first_tick: FirstTick,
}

impl PollSchedule {
    /// Run now, then every `period`.
    pub fn immediate(period: Duration) -> Self {
        Self {
            period,
            first_tick: FirstTick::Immediate,
        }
    }

    /// First run after one `period`, then every `period`.
    pub fn delayed(period: Duration) -> Self {
        Self {
            period,
            first_tick: FirstTick::AfterPeriod,
        }
    }

    /// Build the tokio interval backing this schedule. `period` must be non-zero.
    pub fn interval(&self) -> Interval {
        let start = match self.first_tick {
            FirstTick::Immediate => Instant::now(),
            FirstTick::AfterPeriod => Instant::now() + self.period,
        };

        let mut interval = time::interval_at(start, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval
    }
}

/// Spawn a task that runs `task` on `schedule` forever.
pub fn spawn_polling<F, Fut>(
    name: &'static str,
    schedule: PollSchedule,
    mut task: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tracing::info!(
        poller = name,
        period_secs = schedule.period.as_secs(),
        first_tick = ?schedule.first_tick,
        "Starting poll loop"
    );

    tokio::spawn(async move {
        let mut interval = schedule.interval();
        loop {
            interval.tick().await;
            tracing::debug!(poller = name, "Poll tick");
            task().await;
        }
    })
}
