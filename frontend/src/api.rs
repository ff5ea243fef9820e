use std::fmt;

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use trip_dispatch_lib::location::Location;
use trip_dispatch_lib::query::TripQuery;
use trip_dispatch_lib::status::TripUpdateStatus;
use trip_dispatch_lib::trip::{
    AddTripRequest, AddTripStatusRequest, DriverDropdown, LocationDropdown, Trip, TripListPage,
    TripUpdate, UpdateLocationRequest,
};

/// Remote API base, resolved at compile time.
const BASE_URL: &str = match option_env!("TRIP_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:5125/api/",
};

fn url(path: &str) -> String {
    format!("{}/{}", BASE_URL.trim_end_matches('/'), path)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response.
    Network(String),
    /// Non-2xx response, body kept for the log.
    Remote { status: u16, body: String },
    /// 2xx response whose body did not match the expected shape.
    Shape(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Remote { status: 404, .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Remote { status, body } if body.is_empty() => {
                write!(f, "request failed: {status}")
            }
            ApiError::Remote { status, body } => write!(f, "request failed: {status} {body}"),
            ApiError::Shape(msg) => write!(f, "unexpected response shape: {msg}"),
        }
    }
}

async fn expect_ok(result: Result<Response, gloo_net::Error>) -> Result<Response, ApiError> {
    let response = result.map_err(|err| ApiError::Network(err.to_string()))?;

    if response.ok() {
        Ok(response)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Remote { status, body })
    }
}

async fn into_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Shape(err.to_string()))
}

pub async fn get_trips(query: &TripQuery) -> Result<TripListPage, ApiError> {
    let params = query.params();
    let request = Request::get(&url("Trip")).query(params.iter().map(|(k, v)| (*k, v.as_str())));
    let response = expect_ok(request.send().await).await?;
    into_json(response).await
}

/// Single-trip lookup via the listing filter; Ok(None) when the backend has
/// no row for the SID.
pub async fn get_trip_by_sid(trip_sid: &str) -> Result<Option<Trip>, ApiError> {
    let params = TripQuery::by_trip_sid(trip_sid);
    let request = Request::get(&url("Trip")).query(params.iter().map(|(k, v)| (*k, v.as_str())));
    let response = expect_ok(request.send().await).await?;
    let page: TripListPage = into_json(response).await?;
    Ok(page.result.into_iter().next())
}

/// Trip snapshot carrying the live driver coordinates.
pub async fn get_trip_current_location(trip_sid: &str) -> Result<Trip, ApiError> {
    let request = Request::get(&url(&format!("Driver/GetCurrentLocation/{trip_sid}")));
    let response = expect_ok(request.send().await).await?;
    into_json(response).await
}

pub async fn update_driver_current_location(
    trip_sid: &str,
    location: Location,
) -> Result<(), ApiError> {
    let body = UpdateLocationRequest::from(location);
    let request = Request::post(&url(&format!("Driver/UpdateDriverCurrentLocation/{trip_sid}")))
        .json(&body)
        .map_err(|err| ApiError::Network(err.to_string()))?;
    expect_ok(request.send().await).await?;
    Ok(())
}

pub async fn get_trip_updates(trip_sid: &str) -> Result<Vec<TripUpdate>, ApiError> {
    let request = Request::get(&url(&format!("Trip/GetTripUpdateStatus/{trip_sid}")));
    let response = expect_ok(request.send().await).await?;
    into_json(response).await
}

pub async fn start_trip(trip_sid: &str) -> Result<Trip, ApiError> {
    let request = Request::post(&url(&format!("Trip/TripStart/{trip_sid}")));
    let response = expect_ok(request.send().await).await?;
    into_json(response).await
}

pub async fn end_trip(trip_sid: &str) -> Result<Trip, ApiError> {
    let request = Request::post(&url(&format!("Trip/TripEnd/{trip_sid}")));
    let response = expect_ok(request.send().await).await?;
    into_json(response).await
}

pub async fn add_trip_status(
    trip_sid: &str,
    status: TripUpdateStatus,
    location: Location,
    note: &str,
) -> Result<(), ApiError> {
    let body = AddTripStatusRequest {
        trip_update_status: status,
        trip_updated_latitude: location.lat,
        trip_updated_longitude: location.lng,
        note: note.to_string(),
    };

    let request = Request::post(&url(&format!("Trip/AddTripStatus/{trip_sid}")))
        .json(&body)
        .map_err(|err| ApiError::Network(err.to_string()))?;
    expect_ok(request.send().await).await?;
    Ok(())
}

pub async fn add_trip(trip: &AddTripRequest) -> Result<Trip, ApiError> {
    let request = Request::post(&url("Trip/AddTrip"))
        .json(trip)
        .map_err(|err| ApiError::Network(err.to_string()))?;
    let response = expect_ok(request.send().await).await?;
    into_json(response).await
}

pub async fn get_drivers() -> Result<Vec<DriverDropdown>, ApiError> {
    let response = expect_ok(Request::get(&url("Driver/GetDrivers")).send().await).await?;
    into_json(response).await
}

pub async fn get_locations() -> Result<Vec<LocationDropdown>, ApiError> {
    let response = expect_ok(Request::get(&url("Location")).send().await).await?;
    into_json(response).await
}
