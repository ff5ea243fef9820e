use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::status::{TripStatus, TripUpdateStatus};

/// Snapshot of a trip record as the backend returns it. The client holds a
/// read-through cache of the latest fetched value, never an authoritative
/// copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "tripSID")]
    pub trip_sid: String,
    #[serde(default)]
    pub start_location_name: Option<String>,
    #[serde(default)]
    pub to_location_name: Option<String>,
    #[serde(default)]
    pub start_latitude: Option<f64>,
    #[serde(default)]
    pub start_longitude: Option<f64>,
    #[serde(default)]
    pub to_latitude: Option<f64>,
    #[serde(default)]
    pub to_longitude: Option<f64>,
    /// Live driver position, only meaningful while the trip is in progress
    /// or completed.
    #[serde(default)]
    pub driver_latitude: Option<f64>,
    #[serde(default)]
    pub driver_longitude: Option<f64>,
    #[serde(default)]
    pub trip_status: Option<TripStatus>,
    #[serde(default)]
    pub trip_status_name: String,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub last_modified_date: Option<String>,
}

impl Trip {
    pub fn driver_location(&self) -> Option<Location> {
        match (self.driver_latitude, self.driver_longitude) {
            (Some(lat), Some(lng)) => Some(Location { lat, lng }),
            _ => None,
        }
    }
}

/// Append-only history entry of a status-changing event on a trip. The
/// backend assigns the ordering and returns the list most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripUpdate {
    #[serde(rename = "tripUpdatesSID")]
    pub trip_updates_sid: String,
    #[serde(default)]
    pub driver_name: String,
    pub trip_updates_status: TripUpdateStatus,
    pub trip_updated_latitude: f64,
    pub trip_updated_longitude: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub time_stamp: String,
}

/// Index 0 of the fetched list is the most recent entry.
pub fn last_update_kind(updates: &[TripUpdate]) -> Option<TripUpdateStatus> {
    updates.first().map(|update| update.trip_updates_status)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTripRequest {
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub to_latitude: f64,
    pub to_longitude: f64,
    #[serde(rename = "startLocationSID")]
    pub start_location_sid: String,
    #[serde(rename = "toLocationSID")]
    pub to_location_sid: String,
    #[serde(rename = "driverSID")]
    pub driver_sid: String,
    #[serde(rename = "userSID")]
    pub user_sid: String,
}

/// Body of `Trip/AddTripStatus/{tripSID}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTripStatusRequest {
    pub trip_update_status: TripUpdateStatus,
    pub trip_updated_latitude: f64,
    pub trip_updated_longitude: f64,
    pub note: String,
}

/// Body of `Driver/UpdateDriverCurrentLocation/{tripSID}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateLocationRequest {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Location> for UpdateLocationRequest {
    fn from(loc: Location) -> Self {
        Self {
            latitude: loc.lat,
            longitude: loc.lng,
        }
    }
}

/// One page of the trip listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripListPage {
    pub result: Vec<Trip>,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

impl TripListPage {
    pub fn total_pages(&self) -> u32 {
        self.meta
            .as_ref()
            .and_then(|meta| meta.total_page_num)
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub total_page_num: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDropdown {
    #[serde(rename = "userSID")]
    pub user_sid: String,
    #[serde(rename = "userName")]
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDropdown {
    #[serde(rename = "locationSID")]
    pub location_sid: String,
    #[serde(rename = "locationName")]
    pub location_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_trip() {
        let json = r#"{
            "tripSID": "t-1",
            "startLocationName": "Depot",
            "toLocationName": "Harbor",
            "startLatitude": 56.15,
            "startLongitude": 10.2,
            "toLatitude": 56.05,
            "toLongitude": 10.1,
            "driverLatitude": 56.1,
            "driverLongitude": 10.15,
            "tripStatus": 7,
            "tripStatusName": "In Progress",
            "driverName": "K. Jensen",
            "createdByName": "dispatch",
            "lastModifiedDate": "2025-05-22T12:09:14.274"
        }"#;

        let trip: Trip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.trip_sid, "t-1");
        assert_eq!(trip.trip_status, Some(TripStatus::InProgress));
        assert_eq!(
            trip.driver_location(),
            Some(Location { lat: 56.1, lng: 10.15 })
        );
    }

    #[test]
    fn tolerates_sparse_trip() {
        // GetCurrentLocation responses carry only the coordinate fields.
        let json = r#"{
            "tripSID": "t-2",
            "driverLatitude": 55.7,
            "driverLongitude": 12.6
        }"#;

        let trip: Trip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.trip_status, None);
        assert_eq!(trip.trip_status_name, "");
        assert!(trip.driver_location().is_some());
    }

    #[test]
    fn missing_driver_coordinates_mean_no_location() {
        let trip: Trip = serde_json::from_str(r#"{ "tripSID": "t-3" }"#).unwrap();
        assert_eq!(trip.driver_location(), None);
    }

    #[test]
    fn first_update_is_most_recent() {
        let json = r#"[
            { "tripUpdatesSID": "u-2", "driverName": "K. Jensen",
              "tripUpdatesStatus": 10, "tripUpdatedLatitude": 56.1,
              "tripUpdatedLongitude": 10.1, "note": "lunch",
              "timeStamp": "2025-05-22T12:30:00" },
            { "tripUpdatesSID": "u-1", "driverName": "K. Jensen",
              "tripUpdatesStatus": 9, "tripUpdatedLatitude": 56.0,
              "tripUpdatedLongitude": 10.0, "note": "",
              "timeStamp": "2025-05-22T12:00:00" }
        ]"#;

        let updates: Vec<TripUpdate> = serde_json::from_str(json).unwrap();
        assert_eq!(last_update_kind(&updates), Some(TripUpdateStatus::Pause));
        assert_eq!(last_update_kind(&[]), None);
    }

    #[test]
    fn add_trip_status_body_field_names() {
        let body = AddTripStatusRequest {
            trip_update_status: TripUpdateStatus::Resume,
            trip_updated_latitude: 56.175188,
            trip_updated_longitude: 10.196123,
            note: "Resumed".to_string(),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "tripUpdateStatus": 11,
                "tripUpdatedLatitude": 56.175188,
                "tripUpdatedLongitude": 10.196123,
                "note": "Resumed"
            })
        );
    }

    #[test]
    fn add_trip_request_sid_field_names() {
        let body = AddTripRequest {
            start_latitude: 1.0,
            start_longitude: 2.0,
            to_latitude: 3.0,
            to_longitude: 4.0,
            start_location_sid: "l-1".to_string(),
            to_location_sid: "l-2".to_string(),
            driver_sid: "d-1".to_string(),
            user_sid: "u-1".to_string(),
        };

        let value = serde_json::to_value(&body).unwrap();
        for key in ["startLocationSID", "toLocationSID", "driverSID", "userSID"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn list_page_defaults_to_one_page() {
        let page: TripListPage = serde_json::from_str(r#"{ "result": [] }"#).unwrap();
        assert_eq!(page.total_pages(), 1);

        let page: TripListPage =
            serde_json::from_str(r#"{ "result": [], "meta": { "total_page_num": 4 } }"#).unwrap();
        assert_eq!(page.total_pages(), 4);
    }
}
