//! Cancellable repeating schedule for proximity checks

use crate::controller::Command;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

/// The single repeating proximity-check schedule
///
/// `start` always stops the running schedule first, so at most one exists.
/// Every schedule gets a new generation number and stamps its ticks with
/// it; ticks from an older generation that were queued before the swap can
/// be told apart with [`ProximityTimer::is_current`].
#[derive(Debug, Default)]
pub struct ProximityTimer {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl ProximityTimer {
    /// Create an idle timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the running schedule with one ticking every `period`
    ///
    /// The first tick fires one period from now. Returns the new generation.
    pub fn start(&mut self, period: Duration, commands: UnboundedSender<Command>) -> u64 {
        self.stop();
        self.generation += 1;
        let generation = self.generation;

        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if commands.send(Command::ProximityTick { generation }).is_err() {
                    // Controller gone
                    break;
                }
            }
        }));

        generation
    }

    /// Cancel the running schedule; returns whether one was running
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Whether a schedule is installed
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether `generation` belongs to the running schedule
    pub fn is_current(&self, generation: u64) -> bool {
        self.handle.is_some() && generation == self.generation
    }

    /// Generation of the most recently started schedule
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for ProximityTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = ProximityTimer::new();
        let generation = timer.start(Duration::from_secs(120), tx);

        let first = rx.recv().await;
        assert!(matches!(first, Some(Command::ProximityTick { generation: g }) if g == generation));
        let second = rx.recv().await;
        assert!(matches!(second, Some(Command::ProximityTick { .. })));
        assert!(timer.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = ProximityTimer::new();
        let started = Instant::now();
        timer.start(Duration::from_secs(120), tx);

        rx.recv().await;
        assert!(started.elapsed() >= Duration::from_secs(120));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_schedule() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = ProximityTimer::new();

        let first = timer.start(Duration::from_secs(10), tx.clone());
        let second = timer.start(Duration::from_secs(10), tx);
        assert_ne!(first, second);
        assert!(!timer.is_current(first));
        assert!(timer.is_current(second));

        // Only the second schedule produces ticks
        for _ in 0..3 {
            match rx.recv().await {
                Some(Command::ProximityTick { generation }) => assert_eq!(generation, second),
                other => panic!("unexpected command: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_stop() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut timer = ProximityTimer::new();
        assert!(!timer.stop());

        let generation = timer.start(Duration::from_secs(60), tx);
        assert!(timer.stop());
        assert!(!timer.is_active());
        assert!(!timer.is_current(generation));
    }
}
