//! Time Traveler View - per-view event time session
//!
//! An `EventView` owns everything a single page view needs: the resolved
//! viewer timezone, the converted event time and the live countdown. It is
//! created on mount and torn down on unmount; no state outlives it.

mod clock;
mod config;
mod countdown;
mod render;
mod resolve;

pub use clock::{Clock, MonotonicClock};
pub use config::Config;
pub use countdown::{CountdownHandle, CountdownTicker};
pub use render::{Snapshot, countdown_line};
pub use resolve::{ResolvedTime, ViewState, resolve};

use std::time::Duration;

use detector::{Detector, GeoLocator, LocalZoneSource};
use timetraveler_core::{Countdown, CountdownState, EventDefinition, Locale};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Settings for a single view
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub locale: Locale,
    pub tick: Duration,
    pub loading_delay: Duration,
}

impl ViewOptions {
    pub fn from_config(config: &Config, locale: Locale) -> Self {
        Self {
            locale,
            tick: config.tick(),
            loading_delay: config.loading_delay(),
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_config(&Config::default(), Locale::default())
    }
}

/// A mounted view of the event
pub struct EventView {
    event: EventDefinition,
    locale: Locale,
    state: watch::Receiver<ViewState>,
    countdown: CountdownHandle,
    resolution: Option<JoinHandle<()>>,
    shutdown: CancellationToken,
}

impl EventView {
    /// Mount the view: start detection and the countdown
    ///
    /// Conversion only runs after detection has finished. Must be called from
    /// within a tokio runtime.
    pub fn mount<G, L, C>(
        event: EventDefinition,
        detector: Detector<G, L>,
        clock: C,
        options: ViewOptions,
    ) -> Self
    where
        G: GeoLocator + 'static,
        L: LocalZoneSource + 'static,
        C: Clock,
    {
        let shutdown = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(ViewState::Loading);

        let countdown = CountdownTicker::new(Countdown::for_event(&event), clock, options.tick)
            .spawn(shutdown.child_token());

        let resolution = tokio::spawn(run_resolution(
            event.clone(),
            detector,
            options,
            state_tx,
            shutdown.clone(),
        ));

        info!(
            event_zone = event.zone().name(),
            event_start = %event.wall_clock(),
            "View mounted"
        );

        Self {
            event,
            locale: options.locale,
            state: state_rx,
            countdown,
            resolution: Some(resolution),
            shutdown,
        }
    }

    pub fn event(&self) -> &EventDefinition {
        &self.event
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Current local-time state
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    /// Wait until detection and conversion are done
    pub async fn resolved(&mut self) -> ViewState {
        if let Ok(state) = self.state.wait_for(|state| !state.is_loading()).await {
            return state.clone();
        }
        // Resolution task is gone without publishing (unmounted)
        self.state()
    }

    pub fn countdown(&self) -> CountdownState {
        self.countdown.current()
    }

    pub fn countdown_handle(&mut self) -> &mut CountdownHandle {
        &mut self.countdown
    }

    /// Text rendering of the current state; `year` feeds the footer
    pub fn render_text(&self, year: i32) -> String {
        let state = self.state();
        Snapshot::new(&self.event, &state, self.countdown()).to_text(self.locale, year)
    }

    /// One-line JSON rendering of the current state
    pub fn render_json(&self) -> serde_json::Result<String> {
        let state = self.state();
        Snapshot::new(&self.event, &state, self.countdown()).to_json()
    }

    /// Tear the view down and wait for its tasks to exit
    pub async fn unmount(mut self) {
        self.shutdown.cancel();

        if let Some(task) = self.resolution.take() {
            let _ = task.await;
        }

        self.countdown.join().await;

        info!("View unmounted");
    }
}

impl Drop for EventView {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run_resolution<G, L>(
    event: EventDefinition,
    detector: Detector<G, L>,
    options: ViewOptions,
    state_tx: watch::Sender<ViewState>,
    shutdown: CancellationToken,
) where
    G: GeoLocator,
    L: LocalZoneSource,
{
    let detection = tokio::select! {
        _ = shutdown.cancelled() => {
            debug!("View unmounted before timezone detection finished");
            return;
        }
        detection = detector.detect() => detection,
    };

    let state = resolve(&event, detection, options.locale);

    tokio::select! {
        _ = shutdown.cancelled() => {
            debug!("View unmounted during loading delay");
            return;
        }
        _ = tokio::time::sleep(options.loading_delay) => {}
    }

    if shutdown.is_cancelled() {
        debug!("Ignoring timezone resolution that arrived after unmount");
        return;
    }

    state_tx.send_replace(state);
}
