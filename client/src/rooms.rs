//! Available rooms and the reservation create flow.
//!
//! The home view lists rooms with open time slots. Picking a room opens a
//! slot dialog; picking a slot arms a confirmation; only a confirmed
//! request reaches the backend. The server is the sole arbiter of the
//! one-reservation-per-slot invariant — a 409 means another actor claimed
//! the slot between viewing and submitting, which is an expected outcome
//! with its own notice, and the dialog stays open because the room's other
//! slots may still be free.

use crate::types::Notice;
use roombook_api::{
    BackendApi, CreateReservationOutcome, CreateReservationRequest, MeetingRoomId,
    MeetingRoomWithSlots, ReservationRecord, RoomsOutcome, TimeSlotId,
};
use roombook_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use roombook_macros::Action;
use roombook_runtime::Store;
use std::sync::Arc;

/// The slot dialog for one room, with its per-slot confirmation surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotDialog {
    /// The room whose slots are shown
    pub meeting_room_id: MeetingRoomId,
    /// The slot awaiting the user's confirmation, if any
    pub confirming: Option<TimeSlotId>,
    /// True while a create request is in flight
    pub submitting: bool,
}

/// State of the available-rooms view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomsState {
    /// Rooms currently offering open slots
    pub rooms: Vec<MeetingRoomWithSlots>,
    /// True while the room list is loading
    pub loading: bool,
    /// The open slot dialog, if any
    pub dialog: Option<SlotDialog>,
    /// Most recent notice (if any)
    pub last_notice: Option<Notice>,
}

impl RoomsState {
    /// Creates an empty rooms state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rooms: Vec::new(),
            loading: false,
            dialog: None,
            last_notice: None,
        }
    }

    /// Returns a room by id
    #[must_use]
    pub fn room(&self, id: &MeetingRoomId) -> Option<&MeetingRoomWithSlots> {
        self.rooms.iter().find(|room| room.id == *id)
    }
}

impl Default for RoomsState {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions for the available-rooms view
#[derive(Action, Clone, Debug)]
pub enum RoomsAction {
    // ========== Commands ==========
    /// Command: load the available rooms
    #[command]
    Load,

    /// Command: open the slot dialog for a room
    #[command]
    OpenSlots {
        /// The room to inspect
        meeting_room_id: MeetingRoomId,
    },

    /// Command: close the slot dialog
    #[command]
    CloseSlots,

    /// Command: arm the confirmation for one slot
    #[command]
    RequestReservation {
        /// The slot the user picked
        time_slot_id: TimeSlotId,
    },

    /// Command: disarm the confirmation
    #[command]
    DismissConfirmation,

    /// Command: the user confirmed — issue the create request
    #[command]
    ConfirmReservation,

    // ========== Events ==========
    /// Event: the room list arrived
    #[event]
    Loaded {
        /// Rooms with open slots
        rooms: Vec<MeetingRoomWithSlots>,
    },

    /// Event: the room list could not be loaded
    #[event]
    LoadFailed {
        /// What went wrong, for the log
        detail: String,
    },

    /// Event: the reservation was created
    #[event]
    ReservationCreated {
        /// The server's authoritative record
        record: ReservationRecord,
    },

    /// Event: someone else already holds the slot (409)
    #[event]
    SlotTaken,

    /// Event: the create request hit an unexpected status or no response
    #[event]
    ReservationFailed {
        /// What went wrong, for the log
        detail: String,
    },

    /// Event: a command was rejected before any request was issued
    #[event]
    ValidationFailed {
        /// Why the command was rejected
        error: String,
    },
}

/// Environment dependencies for the rooms reducer
#[derive(Clone)]
pub struct RoomsEnvironment {
    /// Backend the rooms and reservations come from
    pub api: Arc<dyn BackendApi>,
}

impl RoomsEnvironment {
    /// Creates a new `RoomsEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self { api }
    }
}

/// Reducer for the available-rooms view
#[derive(Clone, Debug)]
pub struct RoomsReducer;

impl RoomsReducer {
    /// Creates a new `RoomsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates an `OpenSlots` command
    fn validate_open_slots(state: &RoomsState, id: &MeetingRoomId) -> Result<(), String> {
        if state.room(id).is_none() {
            return Err(format!("Meeting room {id} is not in the current list"));
        }
        Ok(())
    }

    /// Validates a `RequestReservation` command
    fn validate_request(state: &RoomsState, slot: &TimeSlotId) -> Result<(), String> {
        let Some(dialog) = &state.dialog else {
            return Err("No slot dialog is open".to_string());
        };

        let room = state
            .room(&dialog.meeting_room_id)
            .ok_or_else(|| "The dialog's room is not in the current list".to_string())?;

        if !room.time_slots.iter().any(|s| s.id == *slot) {
            return Err(format!("Time slot {slot} does not belong to {}", room.name));
        }

        Ok(())
    }

    /// Validates a `ConfirmReservation` command, returning the target pair
    fn validate_confirm(state: &RoomsState) -> Result<(MeetingRoomId, TimeSlotId), String> {
        let Some(dialog) = &state.dialog else {
            return Err("No slot dialog is open".to_string());
        };

        if dialog.submitting {
            return Err("A reservation request is already in flight".to_string());
        }

        let slot = dialog
            .confirming
            .ok_or_else(|| "No slot is awaiting confirmation".to_string())?;

        Ok((dialog.meeting_room_id, slot))
    }

    /// Applies an event to state
    fn apply_event(state: &mut RoomsState, action: &RoomsAction) {
        match action {
            RoomsAction::Loaded { rooms } => {
                state.rooms.clone_from(rooms);
                state.loading = false;
                state.last_notice = None;
            }
            RoomsAction::LoadFailed { .. } => {
                state.loading = false;
                state.last_notice = Some(Notice::error(
                    "Cannot display available meeting rooms, please try again",
                ));
            }
            RoomsAction::ReservationCreated { .. } => {
                // Success closes the dialog; the confirmation surface is
                // done with.
                state.dialog = None;
                state.last_notice = Some(Notice::success("Reservation successfully created"));
            }
            RoomsAction::SlotTaken => {
                // Expected business outcome. The dialog stays open: the
                // room's other slots may still be free. The room list is
                // untouched — nothing was ever inserted optimistically.
                if let Some(dialog) = &mut state.dialog {
                    dialog.submitting = false;
                }
                state.last_notice = Some(Notice::error(
                    "Sorry, this time slot already reserved by someone else",
                ));
            }
            RoomsAction::ReservationFailed { .. } => {
                if let Some(dialog) = &mut state.dialog {
                    dialog.submitting = false;
                }
                state.last_notice = Some(Notice::error("Reservation failed, please try again"));
            }
            RoomsAction::ValidationFailed { error } => {
                state.last_notice = Some(Notice::error(error.clone()));
            }
            // Commands are not applied to state
            RoomsAction::Load
            | RoomsAction::OpenSlots { .. }
            | RoomsAction::CloseSlots
            | RoomsAction::RequestReservation { .. }
            | RoomsAction::DismissConfirmation
            | RoomsAction::ConfirmReservation => {}
        }
    }
}

impl Default for RoomsReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for RoomsReducer {
    type State = RoomsState;
    type Action = RoomsAction;
    type Environment = RoomsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            RoomsAction::Load => {
                state.loading = true;

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    let action = match api.available_rooms().await {
                        Ok(RoomsOutcome::Loaded(rooms)) => RoomsAction::Loaded { rooms },
                        Ok(RoomsOutcome::Unexpected(status)) => {
                            tracing::error!(status, "available rooms returned unexpected status");
                            RoomsAction::LoadFailed {
                                detail: format!("unexpected status {status}"),
                            }
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "failed to get available meeting rooms");
                            RoomsAction::LoadFailed {
                                detail: error.to_string(),
                            }
                        }
                    };
                    Some(action)
                }))]
            }

            RoomsAction::OpenSlots { meeting_room_id } => {
                if let Err(error) = Self::validate_open_slots(state, &meeting_room_id) {
                    Self::apply_event(state, &RoomsAction::ValidationFailed { error });
                    return SmallVec::new();
                }

                state.dialog = Some(SlotDialog {
                    meeting_room_id,
                    confirming: None,
                    submitting: false,
                });
                SmallVec::new()
            }

            RoomsAction::CloseSlots => {
                state.dialog = None;
                SmallVec::new()
            }

            RoomsAction::RequestReservation { time_slot_id } => {
                if let Err(error) = Self::validate_request(state, &time_slot_id) {
                    Self::apply_event(state, &RoomsAction::ValidationFailed { error });
                    return SmallVec::new();
                }

                if let Some(dialog) = &mut state.dialog {
                    dialog.confirming = Some(time_slot_id);
                }
                SmallVec::new()
            }

            RoomsAction::DismissConfirmation => {
                if let Some(dialog) = &mut state.dialog {
                    dialog.confirming = None;
                }
                SmallVec::new()
            }

            RoomsAction::ConfirmReservation => {
                let (meeting_room_id, time_slot_id) = match Self::validate_confirm(state) {
                    Ok(target) => target,
                    Err(error) => {
                        Self::apply_event(state, &RoomsAction::ValidationFailed { error });
                        return SmallVec::new();
                    }
                };

                if let Some(dialog) = &mut state.dialog {
                    dialog.submitting = true;
                }

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    let request = CreateReservationRequest {
                        meeting_room_id,
                        time_slot_id,
                    };
                    let action = match api.create_reservation(request).await {
                        Ok(CreateReservationOutcome::Created(record)) => {
                            RoomsAction::ReservationCreated { record }
                        }
                        Ok(CreateReservationOutcome::SlotConflict) => RoomsAction::SlotTaken,
                        Ok(CreateReservationOutcome::Unexpected(status)) => {
                            tracing::error!(status, "reservation create returned unexpected status");
                            RoomsAction::ReservationFailed {
                                detail: format!("unexpected status {status}"),
                            }
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "failed to reserve");
                            RoomsAction::ReservationFailed {
                                detail: error.to_string(),
                            }
                        }
                    };
                    Some(action)
                }))]
            }

            // ========== Events ==========
            RoomsAction::Loaded { .. }
            | RoomsAction::LoadFailed { .. }
            | RoomsAction::ReservationCreated { .. }
            | RoomsAction::SlotTaken
            | RoomsAction::ReservationFailed { .. }
            | RoomsAction::ValidationFailed { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            }
        }
    }
}

/// The rooms store type
pub type RoomsStore = Store<RoomsState, RoomsAction, RoomsEnvironment, RoomsReducer>;
