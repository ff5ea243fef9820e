use gloo_console::info;
use trip_dispatch_lib::location::Location;
use trip_dispatch_lib::session::Session;
use trip_dispatch_lib::status::Role;
use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod components;
mod geo;
mod poller;
mod reporter;
mod session;

use components::admin_trip_detail::AdminTripDetail;
use components::driver_trip_detail::DriverTripDetail;
use components::login_page::LoginPage;
use components::trip_list::{ListScope, TripListPage};
use reporter::LocationReporter;

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/auth/login")]
    Login,
    #[at("/admin/trips")]
    AdminTrips,
    #[at("/admin/trips/:trip_sid")]
    AdminTripDetail { trip_sid: String },
    #[at("/driver/trips")]
    DriverTrips,
    #[at("/driver/trips/:trip_sid")]
    DriverTripDetail { trip_sid: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Shared with driver pages: the last sampled position and the switch for
/// the reporting loop. The reporter itself lives in the root component, so
/// it survives navigation between driver pages.
#[derive(Clone, PartialEq)]
pub struct DriverLocationHandle {
    pub location: Option<Location>,
    pub active_trip: Option<String>,
    pub set_active_trip: Callback<Option<String>>,
}

pub enum MainMsg {
    LoggedIn(Session),
    SetActiveTrip(Option<String>),
    LocationSampled(Location),
}

struct Model {
    session: Option<Session>,
    reporter: LocationReporter,
    last_location: Option<Location>,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            session: session::load().filter(Session::is_active),
            reporter: LocationReporter::new(ctx.link().callback(MainMsg::LocationSampled)),
            last_location: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::LoggedIn(new_session) => {
                session::store(&new_session);
                info!(format!("Logged in as {:?}", new_session.role));
                self.session = Some(new_session);
            }
            MainMsg::SetActiveTrip(trip_sid) => {
                self.reporter.set_active_trip(trip_sid);
            }
            MainMsg::LocationSampled(location) => {
                self.last_location = Some(location);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let handle = DriverLocationHandle {
            location: self.last_location,
            active_trip: self.reporter.active_trip().map(str::to_string),
            set_active_trip: ctx.link().callback(MainMsg::SetActiveTrip),
        };

        let session = self.session.clone();
        let on_login = ctx.link().callback(MainMsg::LoggedIn);

        html! {
            <BrowserRouter>
                <ContextProvider<DriverLocationHandle> context={handle}>
                    <Switch<Route> render={move |route| switch(route, session.clone(), on_login.clone())} />
                </ContextProvider<DriverLocationHandle>>
            </BrowserRouter>
        }
    }
}

/// Routes are gated on the session role: admins never see driver pages and
/// vice versa. The role comes from a client-set cookie, so this is
/// navigation convenience, not authorization.
fn switch(route: Route, session: Option<Session>, on_login: Callback<Session>) -> Html {
    if let Route::Login = route {
        return html! { <LoginPage on_login={on_login} /> };
    }

    let Some(session) = session else {
        return html! { <Redirect<Route> to={Route::Login} /> };
    };

    match (route, session.role) {
        (Route::Home, Role::Admin) => html! { <Redirect<Route> to={Route::AdminTrips} /> },
        (Route::Home, Role::Driver) => html! { <Redirect<Route> to={Route::DriverTrips} /> },
        (Route::AdminTrips, Role::Admin) => {
            html! { <TripListPage scope={ListScope::Admin} session={session} /> }
        }
        (Route::AdminTripDetail { trip_sid }, Role::Admin) => {
            html! { <AdminTripDetail trip_sid={trip_sid} /> }
        }
        (Route::DriverTrips, Role::Driver) => {
            html! { <TripListPage scope={ListScope::Driver} session={session} /> }
        }
        (Route::DriverTripDetail { trip_sid }, Role::Driver) => {
            html! { <DriverTripDetail trip_sid={trip_sid} /> }
        }
        (Route::NotFound, _) => html! { <h1>{"Not found"}</h1> },
        // Wrong role for the area
        (_, Role::Admin) => html! { <Redirect<Route> to={Route::AdminTrips} /> },
        (_, Role::Driver) => html! { <Redirect<Route> to={Route::DriverTrips} /> },
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
