use trip_dispatch_lib::trip::TripUpdate;
use trip_dispatch_lib::util::format_timestamp;
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub updates: Vec<TripUpdate>,
}

/// Trip history, newest entry first as delivered by the backend.
#[function_component]
pub fn UpdateHistory(props: &Props) -> Html {
    if props.updates.is_empty() {
        return html! {};
    }

    html! {
        <div class="update-history">
            <h2>{"History"}</h2>
            <table>
                <thead>
                    <tr>
                        <th>{"Event"}</th>
                        <th>{"Driver"}</th>
                        <th>{"Note"}</th>
                        <th>{"Position"}</th>
                        <th>{"Time"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.updates.iter().map(|update| html! {
                        <tr key={update.trip_updates_sid.clone()}>
                            <td>{update.trip_updates_status.label()}</td>
                            <td>{&update.driver_name}</td>
                            <td>{&update.note}</td>
                            <td>{format!("{:.5}, {:.5}", update.trip_updated_latitude, update.trip_updated_longitude)}</td>
                            <td>{format_timestamp(&update.time_stamp)}</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}
