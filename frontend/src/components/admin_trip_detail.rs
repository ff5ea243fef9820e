use gloo_console::error;
use yew::prelude::*;

use crate::components::map_component::MapComponent;
use crate::components::update_history::UpdateHistory;
use crate::poller::{PollError, PollOutcome, TripSnapshot, TripStatusPoller};

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub trip_sid: String,
}

pub enum Msg {
    Poll(PollOutcome),
}

/// Read-only monitoring view of one trip: endpoints, live driver position
/// on the map, and the status history. Refreshes itself while the trip is
/// in progress.
pub struct AdminTripDetail {
    snapshot: Option<TripSnapshot>,
    error: Option<String>,
    poller: TripStatusPoller,
}

impl Component for AdminTripDetail {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let poller = TripStatusPoller::new(
            ctx.props().trip_sid.clone(),
            ctx.link().callback(Msg::Poll),
        );
        poller.fetch_once();

        Self {
            snapshot: None,
            error: None,
            poller,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Poll(Ok(snapshot)) => {
                self.poller.apply(snapshot.trip.trip_status);
                self.snapshot = Some(snapshot);
                self.error = None;
            }
            Msg::Poll(Err(PollError::NotFound)) => {
                self.snapshot = None;
                self.error = Some("Trip not found".to_string());
            }
            Msg::Poll(Err(PollError::Api(err))) => {
                error!(format!("Failed to fetch trip: {err}"));
                self.snapshot = None;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        // Navigating straight to another trip reuses this component; the old
        // poller (and its timer) must not outlive the SID it was built for.
        if ctx.props().trip_sid != old_props.trip_sid {
            self.snapshot = None;
            self.error = None;
            self.poller = TripStatusPoller::new(
                ctx.props().trip_sid.clone(),
                ctx.link().callback(Msg::Poll),
            );
            self.poller.fetch_once();
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if let Some(error) = &self.error {
            return html! { <p class="error">{error}</p> };
        }

        let Some(snapshot) = &self.snapshot else {
            return html! { <p class="muted">{"Loading trip..."}</p> };
        };

        let trip = &snapshot.trip;

        html! {
            <div class="trip-detail page">
                <h1>{format!("Trip Detail: {}", ctx.props().trip_sid)}</h1>

                <p>{format!(
                    "Start: {} ({}, {})",
                    trip.start_location_name.clone().unwrap_or_default(),
                    fmt_coord(trip.start_latitude),
                    fmt_coord(trip.start_longitude),
                )}</p>
                <p>{format!(
                    "Destination: {} ({}, {})",
                    trip.to_location_name.clone().unwrap_or_default(),
                    fmt_coord(trip.to_latitude),
                    fmt_coord(trip.to_longitude),
                )}</p>
                <p>{format!("Driver: {}", trip.driver_name.clone().unwrap_or_else(|| "-".to_string()))}</p>

                <MapComponent position={trip.driver_location()} />

                <UpdateHistory updates={snapshot.updates.clone()} />
            </div>
        }
    }
}

fn fmt_coord(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.5}")).unwrap_or_else(|| "?".to_string())
}
