use std::time::Duration;

use crate::status::TripStatus;

/// Cadence of the trip status poller while a trip is in progress.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Cadence of the driver location reporter.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Whether the poller keeps a repeating timer armed for a trip.
///
/// This is the single source of truth for the polling decision. It is
/// re-evaluated after every delivered fetch, so a trip leaving InProgress
/// disarms the timer on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollMode {
    /// Fetch once, do not repeat.
    SingleShot,
    /// Repeat at [`POLL_INTERVAL`].
    Active,
}

impl PollMode {
    pub fn for_status(status: Option<TripStatus>) -> Self {
        match status {
            Some(TripStatus::InProgress) => PollMode::Active,
            _ => PollMode::SingleShot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_in_progress_polls_actively() {
        assert_eq!(PollMode::for_status(Some(TripStatus::InProgress)), PollMode::Active);

        assert_eq!(PollMode::for_status(Some(TripStatus::Pending)), PollMode::SingleShot);
        assert_eq!(PollMode::for_status(Some(TripStatus::Completed)), PollMode::SingleShot);
        assert_eq!(PollMode::for_status(None), PollMode::SingleShot);
    }

    #[test]
    fn intervals() {
        assert_eq!(POLL_INTERVAL.as_secs(), 5);
        assert_eq!(REPORT_INTERVAL.as_secs(), 10);
    }
}
