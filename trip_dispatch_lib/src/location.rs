use serde::{Deserialize, Serialize};

/// A coordinate pair as reported to the backend. Constructed through
/// [`Location::from_raw`] so both axes carry at most 6 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn from_raw(lat: f64, lng: f64) -> Self {
        Self {
            lat: round6(lat),
            lng: round6(lng),
        }
    }

    /// A pair is only plottable when both axes are finite.
    pub fn is_plottable(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_six_decimals() {
        let loc = Location::from_raw(56.17518823456, 10.19612398765);
        assert_eq!(loc.lat, 56.175188);
        assert_eq!(loc.lng, 10.196124);
    }

    #[test]
    fn rounding_is_idempotent() {
        let once = round6(55.1234567891);
        assert_eq!(once, round6(once));

        let loc = Location::from_raw(55.1234567891, 12.9876543219);
        let again = Location::from_raw(loc.lat, loc.lng);
        assert_eq!(loc, again);
    }

    #[test]
    fn non_finite_pairs_are_not_plottable() {
        assert!(!Location { lat: f64::NAN, lng: 10.0 }.is_plottable());
        assert!(!Location { lat: 56.0, lng: f64::INFINITY }.is_plottable());
        assert!(Location::from_raw(56.175188, 10.196123).is_plottable());
    }
}
