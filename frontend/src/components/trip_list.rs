use gloo_console::error;
use trip_dispatch_lib::query::{SortOrder, TripQuery};
use trip_dispatch_lib::session::Session;
use trip_dispatch_lib::status::TripStatus;
use trip_dispatch_lib::trip::{Trip, TripListPage as TripPage};
use trip_dispatch_lib::util::format_timestamp;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::Route;
use crate::api::{self, ApiError};
use crate::components::add_trip_form::AddTripForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// All trips, plus the add-trip form.
    Admin,
    /// Only trips assigned to the logged-in driver.
    Driver,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub scope: ListScope,
    pub session: Session,
}

pub enum Msg {
    Loaded(Result<TripPage, ApiError>),
    SearchChanged(String),
    SortColumnChanged(String),
    SortOrderChanged(String),
    StatusFilterChanged(String),
    PrevPage,
    NextPage,
    OpenAddForm,
    CloseAddForm,
    TripAdded,
}

/// Paged trip listing with search, sort and status filter. Every parameter
/// change goes back to the backend; nothing is filtered client-side.
pub struct TripListPage {
    query: TripQuery,
    trips: Vec<Trip>,
    total_pages: u32,
    loading: bool,
    error: Option<String>,
    show_add_form: bool,
}

impl TripListPage {
    fn fetch(&self, ctx: &Context<Self>) {
        let query = self.query.clone();
        let callback = ctx.link().callback(Msg::Loaded);
        spawn_local(async move {
            callback.emit(api::get_trips(&query).await);
        });
    }

    fn refetch(&mut self, ctx: &Context<Self>) {
        self.loading = true;
        self.fetch(ctx);
    }
}

impl Component for TripListPage {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();

        let mut query = TripQuery::default();
        if props.scope == ListScope::Driver {
            query.user_sid = Some(props.session.user_sid.clone());
        }

        let page = Self {
            query,
            trips: Vec::new(),
            total_pages: 1,
            loading: true,
            error: None,
            show_add_form: false,
        };
        page.fetch(ctx);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(page)) => {
                self.total_pages = page.total_pages();
                self.trips = page.result;
                self.loading = false;
                self.error = None;
            }
            Msg::Loaded(Err(err)) => {
                error!(format!("Failed to fetch trips: {err}"));
                self.error = Some(err.to_string());
                self.trips.clear();
                self.loading = false;
            }
            Msg::SearchChanged(text) => {
                self.query.search_text = text;
                self.query.page = 1;
                self.refetch(ctx);
            }
            Msg::SortColumnChanged(column) => {
                self.query.sort_column = column;
                self.refetch(ctx);
            }
            Msg::SortOrderChanged(order) => {
                self.query.sort_order = SortOrder::parse(&order);
                self.refetch(ctx);
            }
            Msg::StatusFilterChanged(value) => {
                self.query.status_filter = value
                    .parse::<u8>()
                    .ok()
                    .and_then(|v| TripStatus::try_from(v).ok());
                self.query.page = 1;
                self.refetch(ctx);
            }
            Msg::PrevPage => {
                if self.query.page > 1 {
                    self.query.page -= 1;
                    self.refetch(ctx);
                }
            }
            Msg::NextPage => {
                if self.query.page < self.total_pages {
                    self.query.page += 1;
                    self.refetch(ctx);
                }
            }
            Msg::OpenAddForm => self.show_add_form = true,
            Msg::CloseAddForm => self.show_add_form = false,
            Msg::TripAdded => {
                self.refetch(ctx);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();

        let oninput = link.callback(|e: InputEvent| {
            Msg::SearchChanged(e.target_unchecked_into::<HtmlInputElement>().value())
        });
        let on_sort_column = link.callback(|e: Event| {
            Msg::SortColumnChanged(e.target_unchecked_into::<HtmlSelectElement>().value())
        });
        let on_sort_order = link.callback(|e: Event| {
            Msg::SortOrderChanged(e.target_unchecked_into::<HtmlSelectElement>().value())
        });
        let on_status_filter = link.callback(|e: Event| {
            Msg::StatusFilterChanged(e.target_unchecked_into::<HtmlSelectElement>().value())
        });

        let sort_columns: &[(&str, &str)] = match props.scope {
            ListScope::Admin => &[
                ("lastModifiedDate", "Last Modified"),
                ("driverName", "Driver"),
                ("createdByName", "Created By"),
                ("startLocationName", "Start Location"),
            ],
            ListScope::Driver => &[
                ("lastModifiedDate", "Last Modified"),
                ("startLocationName", "Start Location"),
                ("toLocationName", "Destination"),
            ],
        };

        let status_options = [
            TripStatus::Pending,
            TripStatus::InProgress,
            TripStatus::Completed,
        ];

        html! {
            <div class="trip-list page">
                <div class="page-header">
                    <h1>{ match props.scope {
                        ListScope::Admin => "Trips (Admin)",
                        ListScope::Driver => "My Trips",
                    } }</h1>
                    if props.scope == ListScope::Admin {
                        <button onclick={link.callback(|_| Msg::OpenAddForm)}>{"+ Add Trip"}</button>
                    }
                </div>

                if self.loading {
                    <p class="muted">{"Loading trips..."}</p>
                }
                if let Some(error) = &self.error {
                    <p class="error">{error}</p>
                }

                <input
                    type="text"
                    placeholder="Search trips..."
                    value={self.query.search_text.clone()}
                    {oninput}
                />

                <div class="filters">
                    <select onchange={on_sort_column}>
                        { for sort_columns.iter().map(|(value, label)| html! {
                            <option value={*value} selected={self.query.sort_column == *value}>{*label}</option>
                        }) }
                    </select>

                    <select onchange={on_sort_order}>
                        <option value="ASC" selected={self.query.sort_order == SortOrder::Asc}>{"ASC"}</option>
                        <option value="DESC" selected={self.query.sort_order == SortOrder::Desc}>{"DESC"}</option>
                    </select>

                    <select onchange={on_status_filter}>
                        <option value="" selected={self.query.status_filter.is_none()}>{"All Statuses"}</option>
                        { for status_options.iter().map(|status| html! {
                            <option
                                value={u8::from(*status).to_string()}
                                selected={self.query.status_filter == Some(*status)}
                            >
                                {status.label()}
                            </option>
                        }) }
                    </select>
                </div>

                <table class="trip-table">
                    <thead>
                        <tr>
                            if props.scope == ListScope::Admin {
                                <th>{"Driver"}</th>
                            }
                            <th>{"Start"}</th>
                            <th>{"Destination"}</th>
                            <th>{"Status"}</th>
                            <th>{"Last Modified"}</th>
                            <th>{"Action"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for self.trips.iter().map(|trip| self.render_row(props.scope, trip)) }
                        if !self.loading && self.trips.is_empty() {
                            <tr>
                                <td colspan={if props.scope == ListScope::Admin { "6" } else { "5" }}>
                                    {"No trips found"}
                                </td>
                            </tr>
                        }
                    </tbody>
                </table>

                <div class="pagination">
                    <button disabled={self.query.page <= 1} onclick={link.callback(|_| Msg::PrevPage)}>
                        {"Previous"}
                    </button>
                    <span>{format!("Page {} of {}", self.query.page, self.total_pages)}</span>
                    <button disabled={self.query.page >= self.total_pages} onclick={link.callback(|_| Msg::NextPage)}>
                        {"Next"}
                    </button>
                </div>

                if props.scope == ListScope::Admin && self.show_add_form {
                    <AddTripForm
                        session={props.session.clone()}
                        on_close={link.callback(|_| Msg::CloseAddForm)}
                        on_success={link.callback(|_| Msg::TripAdded)}
                    />
                }
            </div>
        }
    }
}

impl TripListPage {
    fn render_row(&self, scope: ListScope, trip: &Trip) -> Html {
        let detail = match scope {
            ListScope::Admin => Route::AdminTripDetail {
                trip_sid: trip.trip_sid.clone(),
            },
            ListScope::Driver => Route::DriverTripDetail {
                trip_sid: trip.trip_sid.clone(),
            },
        };

        html! {
            <tr key={trip.trip_sid.clone()}>
                if scope == ListScope::Admin {
                    <td>{trip.driver_name.clone().unwrap_or_else(|| "-".to_string())}</td>
                }
                <td>{trip.start_location_name.clone().unwrap_or_default()}</td>
                <td>{trip.to_location_name.clone().unwrap_or_default()}</td>
                <td>{status_cell(trip)}</td>
                <td>{trip.last_modified_date.as_deref().map(format_timestamp).unwrap_or_else(|| "-".to_string())}</td>
                <td><Link<Route> to={detail}>{"View"}</Link<Route>></td>
            </tr>
        }
    }
}

fn status_cell(trip: &Trip) -> String {
    if trip.trip_status_name.is_empty() {
        trip.trip_status
            .map(|status| status.label().to_string())
            .unwrap_or_else(|| "-".to_string())
    } else {
        trip.trip_status_name.clone()
    }
}
