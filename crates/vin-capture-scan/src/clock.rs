use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Paces the capture loop: resolves when the next attempt may run.
#[allow(async_fn_in_trait)]
pub trait FrameClock {
    async fn next_frame(&mut self);
}

/// Fixed-period clock, roughly one display frame by default.
///
/// Every resumption, the first included, waits one period. A slow attempt
/// delays the next tick instead of bunching missed ones.
#[derive(Debug)]
pub struct IntervalClock {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameClock for IntervalClock {
    async fn next_frame(&mut self) {
        let period = self.period.max(Duration::from_millis(1));
        let interval = self.interval.get_or_insert_with(|| {
            let mut iv = tokio::time::interval_at(Instant::now() + period, period);
            iv.set_missed_tick_behavior(MissedTickBehavior::Delay);
            iv
        });
        interval.tick().await;
    }
}

/// Yields to the runtime between attempts without waiting.
#[derive(Clone, Copy, Debug, Default)]
pub struct YieldClock;

impl FrameClock for YieldClock {
    async fn next_frame(&mut self) {
        tokio::task::yield_now().await;
    }
}
