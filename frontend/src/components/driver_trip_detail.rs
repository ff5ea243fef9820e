use gloo_console::error;
use trip_dispatch_lib::actions::{TripAction, available_actions};
use trip_dispatch_lib::location::Location;
use trip_dispatch_lib::status::{TripStatus, TripUpdateStatus};
use trip_dispatch_lib::trip::last_update_kind;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::DriverLocationHandle;
use crate::api;
use crate::components::map_component::MapComponent;
use crate::components::update_history::UpdateHistory;
use crate::geo;
use crate::poller::{PollError, PollOutcome, TripSnapshot, TripStatusPoller};

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub trip_sid: String,
}

pub enum Msg {
    Poll(PollOutcome),
    ContextUpdated(DriverLocationHandle),
    NoteChanged(String),
    Run(TripAction),
    Done(TripAction, Result<(), String>),
}

/// The driver's working view of one trip: live status, the action buttons
/// derived from it, and the position currently being reported.
pub struct DriverTripDetail {
    snapshot: Option<TripSnapshot>,
    error: Option<String>,
    note: String,
    pending_action: Option<TripAction>,
    action_error: Option<String>,
    poller: TripStatusPoller,
    handle: DriverLocationHandle,
    _listener: ContextHandle<DriverLocationHandle>,
}

impl Component for DriverTripDetail {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let (handle, listener) = ctx
            .link()
            .context::<DriverLocationHandle>(ctx.link().callback(Msg::ContextUpdated))
            .expect("driver pages are rendered inside the location provider");

        let poller = TripStatusPoller::new(
            ctx.props().trip_sid.clone(),
            ctx.link().callback(Msg::Poll),
        );
        poller.fetch_once();

        Self {
            snapshot: None,
            error: None,
            note: String::new(),
            pending_action: None,
            action_error: None,
            poller,
            handle,
            _listener: listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Poll(Ok(snapshot)) => {
                self.poller.apply(snapshot.trip.trip_status);
                self.resume_reporting_if_underway(ctx, &snapshot);
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
            Msg::ContextUpdated(handle) => {
                self.handle = handle;
            }
            Msg::NoteChanged(note) => {
                self.note = note;
            }
            Msg::Run(action) => return self.run(ctx, action),
            Msg::Done(action, Ok(())) => {
                self.pending_action = None;
                let sid = ctx.props().trip_sid.clone();
                match action {
                    TripAction::Start | TripAction::Resume => {
                        self.handle.set_active_trip.emit(Some(sid));
                    }
                    TripAction::End => self.handle.set_active_trip.emit(None),
                    TripAction::Pause => self.note.clear(),
                }
                self.poller.fetch_once();
            }
            Msg::Done(action, Err(message)) => {
                error!(format!("{} failed: {message}", action.label()));
                self.pending_action = None;
                self.action_error = Some(message);
            }
        }
        true
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().trip_sid != old_props.trip_sid {
            if self.handle.active_trip.as_deref() == Some(old_props.trip_sid.as_str()) {
                self.handle.set_active_trip.emit(None);
            }
            self.snapshot = None;
            self.error = None;
            self.note.clear();
            self.pending_action = None;
            self.action_error = None;
            self.poller = TripStatusPoller::new(
                ctx.props().trip_sid.clone(),
                ctx.link().callback(Msg::Poll),
            );
            self.poller.fetch_once();
        }
        true
    }

    fn destroy(&mut self, ctx: &Context<Self>) {
        // Leaving the page stops the reporting loop; the poller's timer dies
        // with the component.
        if self.handle.active_trip.as_deref() == Some(ctx.props().trip_sid.as_str()) {
            self.handle.set_active_trip.emit(None);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if let Some(error) = &self.error {
            return html! { <p class="error">{error}</p> };
        }

        let Some(snapshot) = &self.snapshot else {
            return html! { <p class="muted">{"Loading trip..."}</p> };
        };

        let trip = &snapshot.trip;
        let actions = available_actions(trip.trip_status, last_update_kind(&snapshot.updates));
        let link = ctx.link();

        let note_input = link.callback(|e: InputEvent| {
            Msg::NoteChanged(e.target_unchecked_into::<HtmlInputElement>().value())
        });

        let position = self.handle.location.or_else(|| trip.driver_location());

        html! {
            <div class="trip-detail page">
                <h1>{format!("Trip Detail: {}", ctx.props().trip_sid)}</h1>

                <p>{format!(
                    "{} → {}",
                    trip.start_location_name.clone().unwrap_or_default(),
                    trip.to_location_name.clone().unwrap_or_default(),
                )}</p>
                <p>{format!(
                    "Status: {}",
                    trip.trip_status
                        .map(|status| status.label())
                        .unwrap_or("Unknown"),
                )}</p>
                <p>{format!(
                    "Current Location: {}",
                    self.handle
                        .location
                        .map(|loc| format!("{:.5}, {:.5}", loc.lat, loc.lng))
                        .unwrap_or_else(|| "N/A".to_string()),
                )}</p>

                if actions.contains(&TripAction::Pause) {
                    <input
                        type="text"
                        placeholder="Pause note..."
                        value={self.note.clone()}
                        oninput={note_input}
                    />
                }

                <div class="actions">
                    { for actions.iter().map(|action| {
                        let action = *action;
                        let disabled = self.pending_action.is_some()
                            || (action == TripAction::Pause && self.note.trim().is_empty());
                        html! {
                            <button {disabled} onclick={link.callback(move |_| Msg::Run(action))}>
                                {action.label()}
                            </button>
                        }
                    }) }
                </div>

                if let Some(message) = &self.action_error {
                    <p class="error">{message}</p>
                }

                <MapComponent {position} />

                <UpdateHistory updates={snapshot.updates.clone()} />
            </div>
        }
    }
}

impl DriverTripDetail {
    /// A page load that lands on a trip that is already underway picks the
    /// reporting loop back up, unless the trip sits in a pause.
    fn resume_reporting_if_underway(&self, ctx: &Context<Self>, snapshot: &TripSnapshot) {
        let sid = ctx.props().trip_sid.as_str();

        if snapshot.trip.trip_status == Some(TripStatus::InProgress)
            && last_update_kind(&snapshot.updates) != Some(TripUpdateStatus::Pause)
            && self.handle.active_trip.as_deref() != Some(sid)
        {
            self.handle.set_active_trip.emit(Some(sid.to_string()));
        }
    }

    fn run(&mut self, ctx: &Context<Self>, action: TripAction) -> bool {
        if self.pending_action.is_some() {
            return false;
        }

        let (status, last) = match &self.snapshot {
            Some(snapshot) => (
                snapshot.trip.trip_status,
                last_update_kind(&snapshot.updates),
            ),
            None => return false,
        };

        if !available_actions(status, last).contains(&action) {
            return false;
        }

        if action == TripAction::Pause && self.note.trim().is_empty() {
            self.action_error = Some("A note is required to pause".to_string());
            return true;
        }

        self.pending_action = Some(action);
        self.action_error = None;

        let sid = ctx.props().trip_sid.clone();
        let note = self.note.trim().to_string();
        let fallback = self.handle.location;
        let callback = ctx
            .link()
            .callback(move |result: Result<(), String>| Msg::Done(action, result));

        spawn_local(async move {
            callback.emit(run_action(action, &sid, fallback, &note).await);
        });

        true
    }
}

/// Exactly one backend mutation per action; the caller re-fetches afterwards.
async fn run_action(
    action: TripAction,
    trip_sid: &str,
    fallback: Option<Location>,
    note: &str,
) -> Result<(), String> {
    match action {
        TripAction::Start => api::start_trip(trip_sid)
            .await
            .map(|_| ())
            .map_err(|err| err.to_string()),
        TripAction::End => api::end_trip(trip_sid)
            .await
            .map(|_| ())
            .map_err(|err| err.to_string()),
        TripAction::Pause => {
            let location = current_location(fallback).await?;
            api::add_trip_status(trip_sid, TripUpdateStatus::Pause, location, note)
                .await
                .map_err(|err| err.to_string())
        }
        TripAction::Resume => {
            let location = current_location(fallback).await?;
            api::add_trip_status(trip_sid, TripUpdateStatus::Resume, location, "Resumed")
                .await
                .map_err(|err| err.to_string())
        }
    }
}

/// Fresh sample if the browser gives one, otherwise the last reported
/// position.
async fn current_location(fallback: Option<Location>) -> Result<Location, String> {
    match geo::sample().await {
        Ok(location) => Ok(location),
        Err(err) => fallback.ok_or_else(|| format!("Current location unavailable: {err}")),
    }
}
