use gloo_console::error;
use trip_dispatch_lib::session::Session;
use trip_dispatch_lib::trip::{AddTripRequest, DriverDropdown, LocationDropdown};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::{self, ApiError};

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub session: Session,
    pub on_close: Callback<()>,
    pub on_success: Callback<()>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StartLatitude,
    StartLongitude,
    ToLatitude,
    ToLongitude,
    StartLocation,
    ToLocation,
    Driver,
}

pub enum Msg {
    DropdownsLoaded(Result<(Vec<DriverDropdown>, Vec<LocationDropdown>), ApiError>),
    FieldChanged(Field, String),
    Submit,
    Submitted(Result<(), ApiError>),
}

/// Modal form for registering a new trip. Dropdown data comes from the
/// backend; the two location selects exclude each other's choice.
pub struct AddTripForm {
    drivers: Vec<DriverDropdown>,
    locations: Vec<LocationDropdown>,
    start_latitude: String,
    start_longitude: String,
    to_latitude: String,
    to_longitude: String,
    start_location_sid: String,
    to_location_sid: String,
    driver_sid: String,
    submitting: bool,
    error: Option<String>,
}

impl AddTripForm {
    fn build_request(&self, session: &Session) -> Result<AddTripRequest, String> {
        let parse = |raw: &str, name: &str| -> Result<f64, String> {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| format!("{name} must be a number"))
        };

        if self.start_location_sid.is_empty()
            || self.to_location_sid.is_empty()
            || self.driver_sid.is_empty()
        {
            return Err("Select both locations and a driver".to_string());
        }

        Ok(AddTripRequest {
            start_latitude: parse(&self.start_latitude, "Start latitude")?,
            start_longitude: parse(&self.start_longitude, "Start longitude")?,
            to_latitude: parse(&self.to_latitude, "Destination latitude")?,
            to_longitude: parse(&self.to_longitude, "Destination longitude")?,
            start_location_sid: self.start_location_sid.clone(),
            to_location_sid: self.to_location_sid.clone(),
            driver_sid: self.driver_sid.clone(),
            user_sid: session.user_sid.clone(),
        })
    }

    fn coordinate_input(
        &self,
        ctx: &Context<Self>,
        field: Field,
        label: &str,
        value: &str,
    ) -> Html {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            Msg::FieldChanged(field, e.target_unchecked_into::<HtmlInputElement>().value())
        });

        html! {
            <div class="form-row">
                <label>{label}</label>
                <input type="number" step="any" value={value.to_string()} {oninput} required={true} />
            </div>
        }
    }
}

impl Component for AddTripForm {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let callback = ctx.link().callback(Msg::DropdownsLoaded);
        spawn_local(async move {
            let result = futures::future::try_join(api::get_drivers(), api::get_locations()).await;
            callback.emit(result);
        });

        Self {
            drivers: Vec::new(),
            locations: Vec::new(),
            start_latitude: String::new(),
            start_longitude: String::new(),
            to_latitude: String::new(),
            to_longitude: String::new(),
            start_location_sid: String::new(),
            to_location_sid: String::new(),
            driver_sid: String::new(),
            submitting: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::DropdownsLoaded(Ok((drivers, locations))) => {
                self.drivers = drivers;
                self.locations = locations;
            }
            Msg::DropdownsLoaded(Err(err)) => {
                error!(format!("Failed to fetch dropdowns: {err}"));
                self.error = Some(err.to_string());
            }
            Msg::FieldChanged(field, value) => {
                match field {
                    Field::StartLatitude => self.start_latitude = value,
                    Field::StartLongitude => self.start_longitude = value,
                    Field::ToLatitude => self.to_latitude = value,
                    Field::ToLongitude => self.to_longitude = value,
                    Field::StartLocation => self.start_location_sid = value,
                    Field::ToLocation => self.to_location_sid = value,
                    Field::Driver => self.driver_sid = value,
                }
                self.error = None;
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                match self.build_request(&ctx.props().session) {
                    Ok(request) => {
                        self.submitting = true;
                        self.error = None;
                        let callback = ctx.link().callback(Msg::Submitted);
                        spawn_local(async move {
                            callback.emit(api::add_trip(&request).await.map(|_| ()));
                        });
                    }
                    Err(message) => self.error = Some(message),
                }
            }
            Msg::Submitted(Ok(())) => {
                self.submitting = false;
                ctx.props().on_success.emit(());
                ctx.props().on_close.emit(());
            }
            Msg::Submitted(Err(err)) => {
                error!(format!("Failed to add trip: {err}"));
                self.submitting = false;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let props = ctx.props();

        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let on_close = props.on_close.clone();

        let select = |field: Field, current: &str, exclude: &str, placeholder: &str| {
            let onchange = link.callback(move |e: Event| {
                Msg::FieldChanged(field, e.target_unchecked_into::<HtmlSelectElement>().value())
            });
            let exclude = exclude.to_string();
            let current = current.to_string();

            html! {
                <select {onchange} required={true}>
                    <option value="" selected={current.is_empty()}>{placeholder}</option>
                    { for self.locations.iter()
                        .filter(|loc| loc.location_sid != exclude)
                        .map(|loc| html! {
                            <option value={loc.location_sid.clone()} selected={current == loc.location_sid}>
                                {loc.location_name.clone()}
                            </option>
                        }) }
                </select>
            }
        };

        html! {
            <div class="modal-backdrop">
                <div class="modal">
                    <button class="modal-close" type="button" onclick={Callback::from(move |_| on_close.emit(()))}>
                        {"✕"}
                    </button>
                    <h2>{"Add Trip"}</h2>

                    if let Some(error) = &self.error {
                        <p class="error">{error}</p>
                    }

                    <form {onsubmit}>
                        {self.coordinate_input(ctx, Field::StartLatitude, "Start Latitude", &self.start_latitude)}
                        {self.coordinate_input(ctx, Field::StartLongitude, "Start Longitude", &self.start_longitude)}
                        {self.coordinate_input(ctx, Field::ToLatitude, "Destination Latitude", &self.to_latitude)}
                        {self.coordinate_input(ctx, Field::ToLongitude, "Destination Longitude", &self.to_longitude)}

                        <div class="form-row">
                            <label>{"Start Location"}</label>
                            {select(Field::StartLocation, &self.start_location_sid, &self.to_location_sid, "Select Start Location")}
                        </div>

                        <div class="form-row">
                            <label>{"Destination Location"}</label>
                            {select(Field::ToLocation, &self.to_location_sid, &self.start_location_sid, "Select Destination")}
                        </div>

                        <div class="form-row">
                            <label>{"Driver"}</label>
                            <select
                                onchange={link.callback(|e: Event| {
                                    Msg::FieldChanged(Field::Driver, e.target_unchecked_into::<HtmlSelectElement>().value())
                                })}
                                required={true}
                            >
                                <option value="" selected={self.driver_sid.is_empty()}>{"Select Driver"}</option>
                                { for self.drivers.iter().map(|driver| html! {
                                    <option value={driver.user_sid.clone()} selected={self.driver_sid == driver.user_sid}>
                                        {driver.user_name.clone()}
                                    </option>
                                }) }
                            </select>
                        </div>

                        <div class="form-actions">
                            <button type="submit" disabled={self.submitting}>
                                { if self.submitting { "Adding..." } else { "Add Trip" } }
                            </button>
                            <button type="button" onclick={props.on_close.reform(|_| ())}>
                                {"Cancel"}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        }
    }
}
