//! Reservation history and the cancel flow.
//!
//! The history view owns its collection of reservation records. A canceled
//! reservation is never removed — cancellation is a field update, applied
//! through [`apply_cancellation`] and nothing else, using the server's
//! authoritative `canceled_at` timestamp. Canceling an unknown id (raced
//! with another device, say) is a distinct "Reservation not found" outcome
//! that leaves the collection exactly as it was.

use crate::types::Notice;
use chrono::{DateTime, Utc};
use roombook_api::{
    BackendApi, CancelReservationOutcome, OwnReservationsOutcome, ReservationId, UserReservation,
};
use roombook_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use roombook_macros::Action;
use roombook_runtime::Store;
use std::sync::Arc;

/// Merges a cancellation into the matching history entry
///
/// The only sanctioned way to mutate the reservation collection after a
/// successful cancel: the entry whose id matches gets
/// `{canceled: true, canceled_at}` merged in (via
/// [`UserReservation::cancel`], which keeps the flag and timestamp in
/// step); every other entry is untouched. An unknown id is a silent no-op.
///
/// Returns whether an entry matched.
pub fn apply_cancellation(
    reservations: &mut [UserReservation],
    reservation_id: &ReservationId,
    canceled_at: DateTime<Utc>,
) -> bool {
    match reservations
        .iter_mut()
        .find(|reservation| reservation.id == *reservation_id)
    {
        Some(entry) => {
            entry.cancel(canceled_at);
            true
        }
        None => false,
    }
}

/// State of the reservation-history view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryState {
    /// The user's reservations, newest-first as the backend returns them
    pub reservations: Vec<UserReservation>,
    /// True while the history is loading
    pub loading: bool,
    /// The reservation awaiting cancel confirmation, if any
    pub pending_cancel: Option<ReservationId>,
    /// True while a cancel request is in flight
    pub submitting: bool,
    /// Most recent notice (if any)
    pub last_notice: Option<Notice>,
}

impl HistoryState {
    /// Creates an empty history state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reservations: Vec::new(),
            loading: false,
            pending_cancel: None,
            submitting: false,
            last_notice: None,
        }
    }

    /// Returns a reservation by id
    #[must_use]
    pub fn get(&self, id: &ReservationId) -> Option<&UserReservation> {
        self.reservations.iter().find(|r| r.id == *id)
    }
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions for the reservation-history view
#[derive(Action, Clone, Debug)]
pub enum HistoryAction {
    // ========== Commands ==========
    /// Command: load the reservation history
    #[command]
    Load,

    /// Command: arm the cancel confirmation for one reservation
    #[command]
    RequestCancellation {
        /// The reservation the user wants to cancel
        reservation_id: ReservationId,
    },

    /// Command: disarm the cancel confirmation
    #[command]
    DismissConfirmation,

    /// Command: the user confirmed — issue the cancel request
    #[command]
    ConfirmCancellation,

    // ========== Events ==========
    /// Event: the history arrived
    #[event]
    Loaded {
        /// The user's reservations
        reservations: Vec<UserReservation>,
    },

    /// Event: the history could not be loaded
    #[event]
    LoadFailed {
        /// What went wrong, for the log
        detail: String,
    },

    /// Event: the reservation was canceled
    #[event]
    Canceled {
        /// The canceled reservation
        reservation_id: ReservationId,
        /// The server's authoritative cancellation timestamp
        canceled_at: DateTime<Utc>,
    },

    /// Event: the backend has no such reservation (404)
    #[event]
    ReservationMissing,

    /// Event: the cancel request hit an unexpected status or no response
    #[event]
    CancellationFailed {
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

/// Environment dependencies for the history reducer
#[derive(Clone)]
pub struct HistoryEnvironment {
    /// Backend the history comes from
    pub api: Arc<dyn BackendApi>,
}

impl HistoryEnvironment {
    /// Creates a new `HistoryEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self { api }
    }
}

/// Reducer for the reservation-history view
#[derive(Clone, Debug)]
pub struct HistoryReducer;

impl HistoryReducer {
    /// Creates a new `HistoryReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a `RequestCancellation` command
    fn validate_request(state: &HistoryState, id: &ReservationId) -> Result<(), String> {
        if state.get(id).is_none() {
            return Err(format!("Reservation {id} is not in the current list"));
        }
        Ok(())
    }

    /// Validates a `ConfirmCancellation` command, returning the target id
    fn validate_confirm(state: &HistoryState) -> Result<ReservationId, String> {
        if state.submitting {
            return Err("A cancel request is already in flight".to_string());
        }

        state
            .pending_cancel
            .ok_or_else(|| "No cancellation is awaiting confirmation".to_string())
    }

    /// Applies an event to state
    fn apply_event(state: &mut HistoryState, action: &HistoryAction) {
        match action {
            HistoryAction::Loaded { reservations } => {
                state.reservations.clone_from(reservations);
                state.loading = false;
                state.last_notice = None;
            }
            HistoryAction::LoadFailed { .. } => {
                state.loading = false;
                state.last_notice = Some(Notice::error(
                    "Cannot display reservation history, please try again",
                ));
            }
            HistoryAction::Canceled {
                reservation_id,
                canceled_at,
            } => {
                apply_cancellation(&mut state.reservations, reservation_id, *canceled_at);
                state.submitting = false;
                state.pending_cancel = None;
                state.last_notice = Some(Notice::success("Reservation successfully canceled"));
            }
            HistoryAction::ReservationMissing => {
                // Distinct outcome; the local list is left alone.
                state.submitting = false;
                state.last_notice = Some(Notice::error("Reservation not found"));
            }
            HistoryAction::CancellationFailed { .. } => {
                state.submitting = false;
                state.last_notice =
                    Some(Notice::error("Cancel Reservation failed, please try again"));
            }
            HistoryAction::ValidationFailed { error } => {
                state.last_notice = Some(Notice::error(error.clone()));
            }
            // Commands are not applied to state
            HistoryAction::Load
            | HistoryAction::RequestCancellation { .. }
            | HistoryAction::DismissConfirmation
            | HistoryAction::ConfirmCancellation => {}
        }
    }
}

impl Default for HistoryReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for HistoryReducer {
    type State = HistoryState;
    type Action = HistoryAction;
    type Environment = HistoryEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            HistoryAction::Load => {
                state.loading = true;

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    let action = match api.own_reservations().await {
                        Ok(OwnReservationsOutcome::Loaded(reservations)) => {
                            HistoryAction::Loaded { reservations }
                        }
                        Ok(OwnReservationsOutcome::Unexpected(status)) => {
                            tracing::error!(status, "reservation history returned unexpected status");
                            HistoryAction::LoadFailed {
                                detail: format!("unexpected status {status}"),
                            }
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "failed to get reservation history");
                            HistoryAction::LoadFailed {
                                detail: error.to_string(),
                            }
                        }
                    };
                    Some(action)
                }))]
            }

            HistoryAction::RequestCancellation { reservation_id } => {
                if let Err(error) = Self::validate_request(state, &reservation_id) {
                    Self::apply_event(state, &HistoryAction::ValidationFailed { error });
                    return SmallVec::new();
                }

                state.pending_cancel = Some(reservation_id);
                SmallVec::new()
            }

            HistoryAction::DismissConfirmation => {
                state.pending_cancel = None;
                SmallVec::new()
            }

            HistoryAction::ConfirmCancellation => {
                let reservation_id = match Self::validate_confirm(state) {
                    Ok(id) => id,
                    Err(error) => {
                        Self::apply_event(state, &HistoryAction::ValidationFailed { error });
                        return SmallVec::new();
                    }
                };

                state.submitting = true;

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    let action = match api.cancel_reservation(reservation_id).await {
                        // The server's timestamp is authoritative; a 200
                        // without one is a malformed success.
                        Ok(CancelReservationOutcome::Canceled(record)) => match record.canceled_at
                        {
                            Some(canceled_at) => HistoryAction::Canceled {
                                reservation_id: record.id,
                                canceled_at,
                            },
                            None => {
                                tracing::error!(
                                    %reservation_id,
                                    "cancel response missing canceled_at"
                                );
                                HistoryAction::CancellationFailed {
                                    detail: "cancel response missing canceled_at".to_string(),
                                }
                            }
                        },
                        Ok(CancelReservationOutcome::NotFound) => HistoryAction::ReservationMissing,
                        Ok(CancelReservationOutcome::Unexpected(status)) => {
                            tracing::error!(status, "reservation cancel returned unexpected status");
                            HistoryAction::CancellationFailed {
                                detail: format!("unexpected status {status}"),
                            }
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "failed to cancel reservation");
                            HistoryAction::CancellationFailed {
                                detail: error.to_string(),
                            }
                        }
                    };
                    Some(action)
                }))]
            }

            // ========== Events ==========
            HistoryAction::Loaded { .. }
            | HistoryAction::LoadFailed { .. }
            | HistoryAction::Canceled { .. }
            | HistoryAction::ReservationMissing
            | HistoryAction::CancellationFailed { .. }
            | HistoryAction::ValidationFailed { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            }
        }
    }
}

/// The history store type
pub type HistoryStore = Store<HistoryState, HistoryAction, HistoryEnvironment, HistoryReducer>;
