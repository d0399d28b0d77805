//! Process-wide session state.
//!
//! The session is the client's knowledge of who is signed in, plus whether
//! that knowledge is still being resolved. It is fetched exactly once per
//! mount from `GET /users/me`; a 401 there means "anonymous visitor" and is
//! a perfectly normal outcome, not an error.
//!
//! The session store is the only cross-cutting shared state in the client.
//! It has exactly one writer path (actions through the store) and many
//! readers (the navigation guard, the layout). Once `resolving` drops to
//! false it never rises again for the life of the store.

use crate::types::Notice;
use roombook_api::{BackendApi, IdentityOutcome, UserProfile, UserRole};
use roombook_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use roombook_macros::Action;
use roombook_runtime::{EffectHandle, Store, StoreError};
use std::sync::Arc;

/// The client's current knowledge of the signed-in identity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// The resolved identity, absent for anonymous visitors
    pub identity: Option<UserProfile>,
    /// True only during the initial identity fetch
    pub resolving: bool,
    /// Most recent session-related notice (if any)
    pub last_notice: Option<Notice>,
}

impl SessionState {
    /// Creates the initial, still-resolving session state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            identity: None,
            resolving: true,
            last_notice: None,
        }
    }

    /// Returns true once an identity has been resolved
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns the resolved role, if any
    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        self.identity.as_ref().map(|profile| profile.role)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions for the session store
#[derive(Action, Clone, Debug)]
pub enum SessionAction {
    // ========== Commands ==========
    /// Command: resolve the identity from the backend (sent once by `mount`)
    #[command]
    Resolve,

    /// Command: replace the identity wholesale
    ///
    /// The single setter. The login/logout glue uses it; nothing else
    /// writes the identity.
    #[command]
    ReplaceIdentity {
        /// The new identity, or `None` after logout
        identity: Option<UserProfile>,
    },

    // ========== Events ==========
    /// Event: the backend returned a profile
    #[event]
    IdentityResolved {
        /// The signed-in user's profile
        profile: UserProfile,
    },

    /// Event: no session exists (401) — the visitor is anonymous
    #[event]
    ResolvedAnonymous,

    /// Event: the session references an account the backend no longer has
    #[event]
    AccountMissing,

    /// Event: the identity fetch hit an unexpected status or no response
    #[event]
    ResolveFaulted {
        /// What went wrong, for the log
        detail: String,
    },
}

/// Environment dependencies for the session reducer
#[derive(Clone)]
pub struct SessionEnvironment {
    /// Backend the identity is fetched from
    pub api: Arc<dyn BackendApi>,
}

impl SessionEnvironment {
    /// Creates a new `SessionEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self { api }
    }
}

/// Reducer for the session store
#[derive(Clone, Debug)]
pub struct SessionReducer;

impl SessionReducer {
    /// Creates a new `SessionReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies an event to state
    ///
    /// Events only ever move `resolving` towards false.
    fn apply_event(state: &mut SessionState, action: &SessionAction) {
        match action {
            SessionAction::IdentityResolved { profile } => {
                state.identity = Some(profile.clone());
                state.resolving = false;
            }
            SessionAction::ResolvedAnonymous => {
                state.resolving = false;
            }
            SessionAction::AccountMissing => {
                state.resolving = false;
                state.last_notice = Some(Notice::error("User not found"));
            }
            SessionAction::ResolveFaulted { .. } => {
                state.resolving = false;
                state.last_notice =
                    Some(Notice::error("Something is wrong, please refresh your browser"));
            }
            // Commands are not applied to state
            SessionAction::Resolve | SessionAction::ReplaceIdentity { .. } => {}
        }
    }
}

impl Default for SessionReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;
    type Environment = SessionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            SessionAction::Resolve => {
                // The identity is fetched once per mount; there is no
                // re-fetch path once the session has resolved.
                if !state.resolving {
                    tracing::warn!("Ignoring Resolve: session already resolved");
                    return SmallVec::new();
                }

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    let action = match api.current_user().await {
                        Ok(IdentityOutcome::Identified(profile)) => {
                            SessionAction::IdentityResolved { profile }
                        }
                        Ok(IdentityOutcome::NoSession) => SessionAction::ResolvedAnonymous,
                        Ok(IdentityOutcome::NotFound) => SessionAction::AccountMissing,
                        Ok(IdentityOutcome::Unexpected(status)) => {
                            tracing::error!(status, "identity fetch returned unexpected status");
                            SessionAction::ResolveFaulted {
                                detail: format!("unexpected status {status}"),
                            }
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "identity fetch failed");
                            SessionAction::ResolveFaulted {
                                detail: error.to_string(),
                            }
                        }
                    };
                    Some(action)
                }))]
            }

            SessionAction::ReplaceIdentity { identity } => {
                state.identity = identity;
                SmallVec::new()
            }

            // ========== Events ==========
            SessionAction::IdentityResolved { .. }
            | SessionAction::ResolvedAnonymous
            | SessionAction::AccountMissing
            | SessionAction::ResolveFaulted { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            }
        }
    }
}

/// The session store type
pub type SessionStore = Store<SessionState, SessionAction, SessionEnvironment, SessionReducer>;

/// Mounts the session store and triggers its one identity fetch
///
/// Returns the store together with the fetch's [`EffectHandle`] so callers
/// that need a resolved session (tests, the demo binary) can await it.
///
/// # Errors
///
/// Returns [`StoreError`] if the store rejects the initial `Resolve`.
pub async fn mount(environment: SessionEnvironment) -> Result<(SessionStore, EffectHandle), StoreError> {
    let store = Store::new(SessionState::new(), SessionReducer::new(), environment);
    let handle = store.send(SessionAction::Resolve).await?;
    Ok((store, handle))
}
