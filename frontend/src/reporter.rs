use gloo_console::{error, warn};
use gloo_timers::callback::Interval;
use trip_dispatch_lib::location::Location;
use trip_dispatch_lib::polling::REPORT_INTERVAL;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

use crate::{api, geo};

/// Pushes the driver's position to the backend while a trip is underway.
///
/// At most one interval is armed per reporter. Switching trips cancels the
/// old timer before arming the new one, and dropping the reporter cancels
/// whatever is left.
pub struct LocationReporter {
    active_trip: Option<String>,
    timer: Option<Interval>,
    on_sample: Callback<Location>,
}

impl LocationReporter {
    pub fn new(on_sample: Callback<Location>) -> Self {
        Self {
            active_trip: None,
            timer: None,
            on_sample,
        }
    }

    pub fn active_trip(&self) -> Option<&str> {
        self.active_trip.as_deref()
    }

    /// Cancels any running timer. A non-None trip reports once immediately,
    /// then every [`REPORT_INTERVAL`].
    pub fn set_active_trip(&mut self, trip_sid: Option<String>) {
        self.timer = None;
        self.active_trip = trip_sid.clone();

        let Some(sid) = trip_sid else {
            return;
        };

        report_cycle(sid.clone(), self.on_sample.clone());

        let on_sample = self.on_sample.clone();
        self.timer = Some(Interval::new(REPORT_INTERVAL.as_millis() as u32, move || {
            report_cycle(sid.clone(), on_sample.clone());
        }));
    }
}

/// One sample-and-report cycle. Failures are logged and swallowed: the timer
/// keeps running, nothing is retried, missed samples are not queued.
fn report_cycle(trip_sid: String, on_sample: Callback<Location>) {
    spawn_local(async move {
        let location = match geo::sample().await {
            Ok(location) => location,
            Err(err) => {
                warn!(format!("Skipping location report for trip {trip_sid}: {err}"));
                return;
            }
        };

        on_sample.emit(location);

        if let Err(err) = api::update_driver_current_location(&trip_sid, location).await {
            error!(format!("Failed to report location for trip {trip_sid}: {err}"));
        }
    });
}
