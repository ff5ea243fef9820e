use trip_dispatch_lib::session::Session;
use trip_dispatch_lib::status::{Role, Status};
use yew::prelude::*;
use yew_router::hooks::use_navigator;

use crate::Route;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub on_login: Callback<Session>,
}

/// Pseudo-login: picking a role writes the session cookies client-side and
/// jumps to that role's trip list. There is no credential check anywhere.
#[function_component]
pub fn LoginPage(props: &Props) -> Html {
    let navigator = use_navigator().unwrap();

    let login_as = |role: Role| {
        let on_login = props.on_login.clone();
        let navigator = navigator.clone();
        Callback::from(move |_| {
            on_login.emit(Session {
                user_sid: "123".to_string(),
                role,
                status: Status::Active,
            });
            navigator.push(&match role {
                Role::Admin => Route::AdminTrips,
                Role::Driver => Route::DriverTrips,
            });
        })
    };

    html! {
        <div class="login-page">
            <h1>{"Login"}</h1>
            <button onclick={login_as(Role::Admin)}>{"Login as Admin"}</button>
            <button onclick={login_as(Role::Driver)}>{"Login as Driver"}</button>
        </div>
    }
}
