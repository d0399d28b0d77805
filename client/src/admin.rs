//! Privileged all-reservations overview.
//!
//! Administrators see every reservation joined with its user, room, and
//! slot. A 403 is an expected role outcome with its own notice, not a
//! fault — a regular user who reaches this view by URL guessing simply
//! learns it is not theirs.

use crate::types::Notice;
use roombook_api::{AllReservationsOutcome, BackendApi, EnrichedReservation};
use roombook_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use roombook_macros::Action;
use roombook_runtime::Store;
use std::sync::Arc;

/// State of the all-reservations overview
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverviewState {
    /// Every reservation, joined with user, room, and slot
    pub reservations: Vec<EnrichedReservation>,
    /// True while the overview is loading
    pub loading: bool,
    /// Most recent notice (if any)
    pub last_notice: Option<Notice>,
}

impl OverviewState {
    /// Creates an empty overview state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reservations: Vec::new(),
            loading: false,
            last_notice: None,
        }
    }
}

impl Default for OverviewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions for the all-reservations overview
#[derive(Action, Clone, Debug)]
pub enum OverviewAction {
    /// Command: load every reservation
    #[command]
    Load,

    /// Event: the overview arrived
    #[event]
    Loaded {
        /// Every reservation
        reservations: Vec<EnrichedReservation>,
    },

    /// Event: the caller's role does not allow the listing (403)
    #[event]
    AccessDenied,

    /// Event: the overview could not be loaded
    #[event]
    LoadFailed {
        /// What went wrong, for the log
        detail: String,
    },
}

/// Environment dependencies for the overview reducer
#[derive(Clone)]
pub struct OverviewEnvironment {
    /// Backend the overview comes from
    pub api: Arc<dyn BackendApi>,
}

impl OverviewEnvironment {
    /// Creates a new `OverviewEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self { api }
    }
}

/// Reducer for the all-reservations overview
#[derive(Clone, Debug)]
pub struct OverviewReducer;

impl OverviewReducer {
    /// Creates a new `OverviewReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for OverviewReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for OverviewReducer {
    type State = OverviewState;
    type Action = OverviewAction;
    type Environment = OverviewEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            OverviewAction::Load => {
                state.loading = true;

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    let action = match api.all_reservations().await {
                        Ok(AllReservationsOutcome::Loaded(reservations)) => {
                            OverviewAction::Loaded { reservations }
                        }
                        Ok(AllReservationsOutcome::Forbidden) => OverviewAction::AccessDenied,
                        Ok(AllReservationsOutcome::Unexpected(status)) => {
                            tracing::error!(status, "reservation overview returned unexpected status");
                            OverviewAction::LoadFailed {
                                detail: format!("unexpected status {status}"),
                            }
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "failed to get reservations");
                            OverviewAction::LoadFailed {
                                detail: error.to_string(),
                            }
                        }
                    };
                    Some(action)
                }))]
            }

            OverviewAction::Loaded { reservations } => {
                state.reservations = reservations;
                state.loading = false;
                state.last_notice = None;
                SmallVec::new()
            }

            OverviewAction::AccessDenied => {
                state.loading = false;
                state.last_notice = Some(Notice::error("Insufficient permissions"));
                SmallVec::new()
            }

            OverviewAction::LoadFailed { .. } => {
                state.loading = false;
                state.last_notice = Some(Notice::error(
                    "Cannot display reservations, please try again",
                ));
                SmallVec::new()
            }
        }
    }
}

/// The overview store type
pub type OverviewStore = Store<OverviewState, OverviewAction, OverviewEnvironment, OverviewReducer>;
