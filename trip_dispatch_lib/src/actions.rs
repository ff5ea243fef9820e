use crate::status::{TripStatus, TripUpdateStatus};

/// A driver-initiated action on a trip. Each one maps to exactly one
/// backend mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripAction {
    Start,
    Pause,
    Resume,
    End,
}

impl TripAction {
    pub fn label(&self) -> &'static str {
        match self {
            TripAction::Start => "Start",
            TripAction::Pause => "Pause",
            TripAction::Resume => "Resume",
            TripAction::End => "End",
        }
    }
}

/// The buttons rendered for a trip, derived from the last fetched status and
/// the most recent history entry. Any pair not covered here renders nothing.
///
/// Pause additionally requires a non-empty note at click time; that gates the
/// click, not the visibility.
pub fn available_actions(
    status: Option<TripStatus>,
    last_update: Option<TripUpdateStatus>,
) -> &'static [TripAction] {
    match (status, last_update) {
        (Some(TripStatus::Pending), _) => &[TripAction::Start],
        (Some(TripStatus::InProgress), Some(TripUpdateStatus::Pause)) => &[TripAction::Resume],
        (Some(TripStatus::InProgress), _) => &[TripAction::Pause, TripAction::End],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_only_starts() {
        assert_eq!(available_actions(Some(TripStatus::Pending), None), &[TripAction::Start]);
        assert_eq!(
            available_actions(Some(TripStatus::Pending), Some(TripUpdateStatus::Pause)),
            &[TripAction::Start]
        );
    }

    #[test]
    fn paused_trip_only_resumes() {
        assert_eq!(
            available_actions(Some(TripStatus::InProgress), Some(TripUpdateStatus::Pause)),
            &[TripAction::Resume]
        );
    }

    #[test]
    fn running_trip_pauses_or_ends() {
        for last in [
            None,
            Some(TripUpdateStatus::Start),
            Some(TripUpdateStatus::Resume),
            Some(TripUpdateStatus::End),
        ] {
            assert_eq!(
                available_actions(Some(TripStatus::InProgress), last),
                &[TripAction::Pause, TripAction::End]
            );
        }
    }

    #[test]
    fn everything_else_renders_nothing() {
        let updates = [
            None,
            Some(TripUpdateStatus::Start),
            Some(TripUpdateStatus::Pause),
            Some(TripUpdateStatus::Resume),
            Some(TripUpdateStatus::End),
        ];

        for last in updates {
            assert!(available_actions(Some(TripStatus::Completed), last).is_empty());
            assert!(available_actions(None, last).is_empty());
        }
    }
}
