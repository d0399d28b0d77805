//! Tests for #[derive(Action)] macro

use roombook_core::{DateTime, Utc};
use roombook_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum ReservationAction {
    #[command]
    ConfirmReservation {
        slot_label: String,
    },

    #[command]
    DismissConfirmation,

    #[event]
    ReservationCreated {
        reservation_id: String,
        reserved_at: DateTime<Utc>,
    },

    #[event]
    SlotTaken {
        slot_label: String,
    },

    // unmarked variants classify as neither
    Noop,
}

#[test]
fn command_variants_classify_as_commands() {
    let action = ReservationAction::ConfirmReservation {
        slot_label: "09:00 - 10:00".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());

    assert!(ReservationAction::DismissConfirmation.is_command());
}

#[test]
fn event_variants_classify_as_events() {
    let action = ReservationAction::ReservationCreated {
        reservation_id: "res-1".to_string(),
        reserved_at: Utc::now(),
    };
    assert!(action.is_event());
    assert!(!action.is_command());

    let taken = ReservationAction::SlotTaken {
        slot_label: "09:00 - 10:00".to_string(),
    };
    assert!(taken.is_event());
}

#[test]
fn unmarked_variants_are_neither() {
    assert!(!ReservationAction::Noop.is_command());
    assert!(!ReservationAction::Noop.is_event());
}
