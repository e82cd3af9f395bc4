//! Ticking countdown owned by a view
//!
//! A cancellable repeating task publishes the remaining time through a
//! `watch` channel. It stops on its own once the target is reached.

use std::time::Duration;

use timetraveler_core::{Countdown, CountdownState};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::clock::Clock;

/// Countdown ready to be started on the current runtime
pub struct CountdownTicker<C> {
    countdown: Countdown,
    clock: C,
    tick: Duration,
}

impl<C: Clock> CountdownTicker<C> {
    pub fn new(countdown: Countdown, clock: C, tick: Duration) -> Self {
        Self {
            countdown,
            clock,
            tick,
        }
    }

    /// Start ticking; the task ends when `shutdown` is cancelled or zero is reached
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self, shutdown: CancellationToken) -> CountdownHandle {
        let initial = self.countdown.remaining(self.clock.now());
        let (tx, rx) = watch::channel(initial);

        debug!(
            target_instant = %self.countdown.target(),
            "Starting countdown at {:?}",
            initial.as_tuple()
        );

        let task = tokio::spawn(run_countdown(self, tx, shutdown.clone()));

        CountdownHandle {
            state: rx,
            shutdown,
            task: Some(task),
        }
    }
}

async fn run_countdown<C: Clock>(
    ticker: CountdownTicker<C>,
    tx: watch::Sender<CountdownState>,
    shutdown: CancellationToken,
) {
    let mut interval = tokio::time::interval(ticker.tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("Countdown cancelled");
                break;
            }
            _ = interval.tick() => {
                let state = ticker.countdown.remaining(ticker.clock.now());
                tx.send_if_modified(|current| {
                    if *current == state {
                        return false;
                    }
                    *current = state;
                    true
                });

                if state.is_zero() {
                    info!("Countdown reached zero, stopping timer");
                    break;
                }
            }
        }
    }
}

/// Live view of a running countdown
///
/// Dropping the handle cancels the task.
pub struct CountdownHandle {
    state: watch::Receiver<CountdownState>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    /// Latest published state
    pub fn current(&self) -> CountdownState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state.clone()
    }

    /// Wait for the next change; `false` once the countdown has stopped
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the task to exit without cancelling it
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Cancel the timer and wait for the task to exit
    pub async fn stop(mut self) {
        self.shutdown.cancel();
        self.join().await;
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
