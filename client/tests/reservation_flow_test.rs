//! End-to-end reservation create and cancel scenarios against a scripted
//! backend: the conflict path, the success path, and cancel isolation.
//!
//! Run with: `cargo test --test reservation_flow_test`

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::Utc;
use roombook_api::{
    ApiError, CancelReservationOutcome, CreateReservationOutcome, MeetingRoom, MeetingRoomId,
    MeetingRoomWithSlots, OwnReservationsOutcome, ReservationId, ReservationRecord, RoomsOutcome,
    TimeSlot, TimeSlotId, UserId, UserReservation,
};
use roombook_client::history::{HistoryAction, HistoryEnvironment, HistoryReducer, HistoryState};
use roombook_client::mocks::MockApi;
use roombook_client::rooms::{RoomsAction, RoomsEnvironment, RoomsReducer, RoomsState};
use roombook_runtime::Store;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

fn sample_rooms() -> Vec<MeetingRoomWithSlots> {
    let now = Utc::now();
    vec![MeetingRoomWithSlots {
        id: MeetingRoomId::new(),
        name: "Aurora".to_string(),
        created_at: now,
        time_slots: vec![
            TimeSlot {
                id: TimeSlotId::new(),
                start_date: now,
                end_date: now,
                created_at: now,
            },
            TimeSlot {
                id: TimeSlotId::new(),
                start_date: now,
                end_date: now,
                created_at: now,
            },
        ],
    }]
}

fn history_entries() -> Vec<UserReservation> {
    let now = Utc::now();
    (0..3)
        .map(|i| UserReservation {
            id: ReservationId::new(),
            meeting_room: MeetingRoom {
                id: MeetingRoomId::new(),
                name: format!("Room {i}"),
                created_at: now,
            },
            time_slot: TimeSlot {
                id: TimeSlotId::new(),
                start_date: now,
                end_date: now,
                created_at: now,
            },
            canceled: false,
            canceled_at: None,
            reserved_at: now,
        })
        .collect()
}

/// Loads the rooms, opens the dialog, and arms the first slot.
async fn rooms_store_with_armed_slot(
    api: Arc<MockApi>,
) -> Store<RoomsState, RoomsAction, RoomsEnvironment, RoomsReducer> {
    let store = Store::new(
        RoomsState::new(),
        RoomsReducer::new(),
        RoomsEnvironment::new(api),
    );

    let mut handle = store.send(RoomsAction::Load).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let (room_id, slot_id) = store
        .state(|s| (s.rooms[0].id, s.rooms[0].time_slots[0].id))
        .await;

    store
        .send(RoomsAction::OpenSlots {
            meeting_room_id: room_id,
        })
        .await
        .unwrap();
    store
        .send(RoomsAction::RequestReservation {
            time_slot_id: slot_id,
        })
        .await
        .unwrap();

    store
}

#[tokio::test]
async fn slot_conflict_keeps_dialog_open_and_list_untouched() {
    let api = Arc::new(
        MockApi::new()
            .with_rooms(Ok(RoomsOutcome::Loaded(sample_rooms())))
            .with_create(Ok(CreateReservationOutcome::SlotConflict)),
    );

    let store = rooms_store_with_armed_slot(api.clone()).await;
    let rooms_before = store.state(|s| s.rooms.clone()).await;

    let mut handle = store.send(RoomsAction::ConfirmReservation).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let state = store.state(Clone::clone).await;

    // The distinct conflict notice, not the generic failure one.
    assert_eq!(
        state.last_notice.unwrap().message,
        "Sorry, this time slot already reserved by someone else"
    );

    // The confirmation surface stays open; the outer list is untouched.
    assert!(state.dialog.is_some());
    assert!(!state.dialog.unwrap().submitting);
    assert_eq!(state.rooms, rooms_before);
}

#[tokio::test]
async fn repeated_confirm_after_conflict_conflicts_again() {
    let api = Arc::new(
        MockApi::new()
            .with_rooms(Ok(RoomsOutcome::Loaded(sample_rooms())))
            .with_create(Ok(CreateReservationOutcome::SlotConflict))
            .with_create(Ok(CreateReservationOutcome::SlotConflict)),
    );

    let store = rooms_store_with_armed_slot(api.clone()).await;

    for _ in 0..2 {
        let mut handle = store.send(RoomsAction::ConfirmReservation).await.unwrap();
        handle.wait_with_timeout(WAIT).await.unwrap();
    }

    // No hidden retry: the client sent exactly the two confirms we issued.
    let creates = api
        .calls()
        .into_iter()
        .filter(|op| *op == "create_reservation")
        .count();
    assert_eq!(creates, 2);
}

#[tokio::test]
async fn successful_create_closes_the_dialog() {
    let rooms = sample_rooms();
    let record = ReservationRecord {
        id: ReservationId::new(),
        user_id: UserId::new(),
        meeting_room_id: rooms[0].id,
        time_slot_id: rooms[0].time_slots[0].id,
        canceled: false,
        canceled_at: None,
        reserved_at: Utc::now(),
    };

    let api = Arc::new(
        MockApi::new()
            .with_rooms(Ok(RoomsOutcome::Loaded(rooms)))
            .with_create(Ok(CreateReservationOutcome::Created(record))),
    );

    let store = rooms_store_with_armed_slot(api).await;

    let mut handle = store.send(RoomsAction::ConfirmReservation).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert!(state.dialog.is_none());
    let notice = state.last_notice.unwrap();
    assert!(!notice.is_error());
    assert_eq!(notice.message, "Reservation successfully created");
}

#[tokio::test]
async fn create_transport_failure_uses_the_generic_notice() {
    let api = Arc::new(
        MockApi::new()
            .with_rooms(Ok(RoomsOutcome::Loaded(sample_rooms())))
            .with_create(Err(ApiError::Transport("connection reset".to_string()))),
    );

    let store = rooms_store_with_armed_slot(api).await;

    let mut handle = store.send(RoomsAction::ConfirmReservation).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(
        state.last_notice.unwrap().message,
        "Reservation failed, please try again"
    );
    // Still no local state invented on failure.
    assert!(state.dialog.is_some());
}

#[tokio::test]
async fn cancel_patches_only_the_target_entry() {
    let entries = history_entries();
    let target = entries[1].clone();
    let canceled_at = Utc::now();

    let record = ReservationRecord {
        id: target.id,
        user_id: UserId::new(),
        meeting_room_id: target.meeting_room.id,
        time_slot_id: target.time_slot.id,
        canceled: true,
        canceled_at: Some(canceled_at),
        reserved_at: target.reserved_at,
    };

    let api = Arc::new(
        MockApi::new()
            .with_own_reservations(Ok(OwnReservationsOutcome::Loaded(entries.clone())))
            .with_cancel(Ok(CancelReservationOutcome::Canceled(record))),
    );

    let store = Store::new(
        HistoryState::new(),
        HistoryReducer::new(),
        HistoryEnvironment::new(api),
    );

    let mut handle = store.send(HistoryAction::Load).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    store
        .send(HistoryAction::RequestCancellation {
            reservation_id: target.id,
        })
        .await
        .unwrap();
    let mut handle = store.send(HistoryAction::ConfirmCancellation).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let state = store.state(Clone::clone).await;

    // Same length, same order; the target is patched with the server's
    // timestamp, its neighbors are exactly as loaded.
    assert_eq!(state.reservations.len(), 3);
    assert_eq!(state.reservations[0], entries[0]);
    assert_eq!(state.reservations[2], entries[2]);
    assert!(state.reservations[1].canceled);
    assert_eq!(state.reservations[1].canceled_at, Some(canceled_at));

    assert_eq!(
        state.last_notice.unwrap().message,
        "Reservation successfully canceled"
    );
}

#[tokio::test]
async fn cancel_not_found_leaves_the_list_alone() {
    let entries = history_entries();
    let target = entries[0].id;

    let api = Arc::new(
        MockApi::new()
            .with_own_reservations(Ok(OwnReservationsOutcome::Loaded(entries.clone())))
            .with_cancel(Ok(CancelReservationOutcome::NotFound)),
    );

    let store = Store::new(
        HistoryState::new(),
        HistoryReducer::new(),
        HistoryEnvironment::new(api),
    );

    let mut handle = store.send(HistoryAction::Load).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    store
        .send(HistoryAction::RequestCancellation {
            reservation_id: target,
        })
        .await
        .unwrap();
    let mut handle = store.send(HistoryAction::ConfirmCancellation).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.reservations, entries);
    assert_eq!(state.last_notice.unwrap().message, "Reservation not found");
}
