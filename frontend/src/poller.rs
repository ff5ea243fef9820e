use std::cell::Cell;
use std::rc::Rc;

use gloo_console::info;
use gloo_timers::callback::Interval;
use trip_dispatch_lib::polling::{POLL_INTERVAL, PollMode};
use trip_dispatch_lib::status::TripStatus;
use trip_dispatch_lib::trip::{Trip, TripUpdate};
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

use crate::api::{self, ApiError};

/// Latest fetched view of one trip and its history.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSnapshot {
    pub trip: Trip,
    pub updates: Vec<TripUpdate>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollError {
    /// No row for the SID, or the backend answered 404.
    NotFound,
    Api(ApiError),
}

pub type PollOutcome = Result<TripSnapshot, PollError>;

/// Re-fetches one trip, repeating only while the backend reports it
/// InProgress. Owned by a detail page; dropping the poller cancels the
/// timer, so navigating away cannot leak an interval.
pub struct TripStatusPoller {
    trip_sid: String,
    /// Highest issued request number. Responses that lost the race are
    /// dropped instead of clobbering a newer snapshot.
    seq: Rc<Cell<u64>>,
    timer: Option<Interval>,
    on_outcome: Callback<PollOutcome>,
}

impl TripStatusPoller {
    pub fn new(trip_sid: String, on_outcome: Callback<PollOutcome>) -> Self {
        Self {
            trip_sid,
            seq: Rc::new(Cell::new(0)),
            timer: None,
            on_outcome,
        }
    }

    pub fn fetch_once(&self) {
        spawn_fetch(
            self.trip_sid.clone(),
            self.seq.clone(),
            self.on_outcome.clone(),
        );
    }

    /// Re-evaluates the polling decision. Called after every delivered
    /// snapshot; fetch errors never reach this, so a failed fetch leaves an
    /// armed timer retrying at the same cadence.
    pub fn apply(&mut self, status: Option<TripStatus>) {
        match PollMode::for_status(status) {
            PollMode::Active => {
                if self.timer.is_none() {
                    let trip_sid = self.trip_sid.clone();
                    let seq = self.seq.clone();
                    let on_outcome = self.on_outcome.clone();
                    self.timer = Some(Interval::new(POLL_INTERVAL.as_millis() as u32, move || {
                        spawn_fetch(trip_sid.clone(), seq.clone(), on_outcome.clone());
                    }));
                }
            }
            PollMode::SingleShot => {
                self.timer = None;
            }
        }
    }
}

fn spawn_fetch(trip_sid: String, seq: Rc<Cell<u64>>, on_outcome: Callback<PollOutcome>) {
    let issued = seq.get() + 1;
    seq.set(issued);

    spawn_local(async move {
        let outcome = poll_trip(&trip_sid).await;
        if seq.get() == issued {
            on_outcome.emit(outcome);
        } else {
            info!(format!("Dropping stale poll response for trip {trip_sid}"));
        }
    });
}

/// One full fetch: the trip row, then the live coordinates while in
/// progress, then the history unless the trip is still pending.
async fn poll_trip(trip_sid: &str) -> PollOutcome {
    let fetched = api::get_trip_by_sid(trip_sid).await.map_err(to_poll_error)?;
    let Some(mut trip) = fetched else {
        return Err(PollError::NotFound);
    };

    if trip.trip_status == Some(TripStatus::InProgress) {
        let live = api::get_trip_current_location(trip_sid)
            .await
            .map_err(to_poll_error)?;
        // Later fields win over the listing row.
        trip.driver_latitude = live.driver_latitude;
        trip.driver_longitude = live.driver_longitude;
    }

    let updates = match trip.trip_status {
        Some(TripStatus::InProgress) | Some(TripStatus::Completed) => {
            api::get_trip_updates(trip_sid).await.map_err(to_poll_error)?
        }
        _ => Vec::new(),
    };

    Ok(TripSnapshot { trip, updates })
}

fn to_poll_error(err: ApiError) -> PollError {
    if err.is_not_found() {
        PollError::NotFound
    } else {
        PollError::Api(err)
    }
}
