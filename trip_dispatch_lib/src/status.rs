use serde::{Deserialize, Serialize};

/// Account state as the backend stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Status {
    Active = 1,
    Inactive = 2,
    Deleted = 3,
}

impl From<Status> for u8 {
    fn from(value: Status) -> u8 {
        value as u8
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Status::Active),
            2 => Ok(Status::Inactive),
            3 => Ok(Status::Deleted),
            other => Err(format!("unknown status value: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    Admin = 4,
    Driver = 5,
}

impl From<Role> for u8 {
    fn from(value: Role) -> u8 {
        value as u8
    }
}

impl TryFrom<u8> for Role {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Role::Admin),
            5 => Ok(Role::Driver),
            other => Err(format!("unknown role value: {other}")),
        }
    }
}

/// Lifecycle of a trip record. Transitions are decided by the backend,
/// the client only reads the latest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TripStatus {
    Pending = 6,
    InProgress = 7,
    Completed = 8,
}

impl TripStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Pending => "Pending",
            TripStatus::InProgress => "In Progress",
            TripStatus::Completed => "Completed",
        }
    }
}

impl From<TripStatus> for u8 {
    fn from(value: TripStatus) -> u8 {
        value as u8
    }
}

impl TryFrom<u8> for TripStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(TripStatus::Pending),
            7 => Ok(TripStatus::InProgress),
            8 => Ok(TripStatus::Completed),
            other => Err(format!("unknown trip status value: {other}")),
        }
    }
}

/// Kind of an append-only trip history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TripUpdateStatus {
    Start = 9,
    Pause = 10,
    Resume = 11,
    End = 12,
}

impl TripUpdateStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TripUpdateStatus::Start => "Start",
            TripUpdateStatus::Pause => "Pause",
            TripUpdateStatus::Resume => "Resume",
            TripUpdateStatus::End => "End",
        }
    }
}

impl From<TripUpdateStatus> for u8 {
    fn from(value: TripUpdateStatus) -> u8 {
        value as u8
    }
}

impl TryFrom<u8> for TripUpdateStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            9 => Ok(TripUpdateStatus::Start),
            10 => Ok(TripUpdateStatus::Pause),
            11 => Ok(TripUpdateStatus::Resume),
            12 => Ok(TripUpdateStatus::End),
            other => Err(format!("unknown trip update status value: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_match_backend_table() {
        assert_eq!(serde_json::to_string(&TripStatus::Pending).unwrap(), "6");
        assert_eq!(serde_json::to_string(&TripStatus::InProgress).unwrap(), "7");
        assert_eq!(serde_json::to_string(&TripStatus::Completed).unwrap(), "8");
        assert_eq!(serde_json::to_string(&TripUpdateStatus::Start).unwrap(), "9");
        assert_eq!(serde_json::to_string(&TripUpdateStatus::End).unwrap(), "12");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "4");
        assert_eq!(serde_json::to_string(&Status::Active).unwrap(), "1");
    }

    #[test]
    fn round_trips() {
        let status: TripStatus = serde_json::from_str("7").unwrap();
        assert_eq!(status, TripStatus::InProgress);

        let update: TripUpdateStatus = serde_json::from_str("10").unwrap();
        assert_eq!(update, TripUpdateStatus::Pause);

        let role: Role = serde_json::from_str("5").unwrap();
        assert_eq!(role, Role::Driver);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(serde_json::from_str::<TripStatus>("0").is_err());
        assert!(serde_json::from_str::<TripStatus>("9").is_err());
        assert!(serde_json::from_str::<TripUpdateStatus>("8").is_err());
        assert!(serde_json::from_str::<Role>("6").is_err());
    }
}
