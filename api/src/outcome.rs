//! Closed outcome types for each backend operation.
//!
//! One enum per operation, one variant per status the contract names, plus
//! an `Unexpected` arm carrying the raw status. Reducers match these
//! exhaustively, so adding an expected status to the contract forces every
//! call site to decide how to handle it — there is no boolean success flag
//! to hide behind.

use crate::types::{
    EnrichedReservation, MeetingRoomWithSlots, ReservationRecord, UserProfile, UserReservation,
};

/// Outcome of `GET /users/me`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentityOutcome {
    /// 200: a session exists and this is its profile
    Identified(UserProfile),
    /// 401: no session — a normal outcome for an anonymous visitor
    NoSession,
    /// 404: the session references an account that no longer exists
    NotFound,
    /// Any other status
    Unexpected(u16),
}

/// Outcome of `POST /auth/login`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// 201: credentials accepted; the session cookie is set
    LoggedIn,
    /// 400: wrong email/password combination
    BadCredentials,
    /// 404: no account with that email
    NotFound,
    /// Any other status
    Unexpected(u16),
}

/// Outcome of `POST /auth/register`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// 201: account created
    Registered,
    /// 400: the submitted fields failed validation
    InvalidInput,
    /// 409: the email is already registered
    EmailTaken,
    /// Any other status
    Unexpected(u16),
}

/// Outcome of `POST /auth/logout`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// 204: the session is gone
    LoggedOut,
    /// Any other status
    Unexpected(u16),
}

/// Outcome of `GET /meeting-rooms/available`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoomsOutcome {
    /// 200: the rooms currently offering open slots
    Loaded(Vec<MeetingRoomWithSlots>),
    /// Any other status
    Unexpected(u16),
}

/// Outcome of `POST /users/me/reservations`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateReservationOutcome {
    /// 201: the slot is ours; the server's record is authoritative
    Created(ReservationRecord),
    /// 409: someone else claimed the slot between viewing and submitting —
    /// an expected business outcome, not a fault. Retrying without the
    /// other party canceling will conflict again.
    SlotConflict,
    /// Any other status
    Unexpected(u16),
}

/// Outcome of `PATCH /users/me/reservations/{id}`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CancelReservationOutcome {
    /// 200: canceled; the record carries the server's `canceled_at`
    Canceled(ReservationRecord),
    /// 404: no such reservation
    NotFound,
    /// Any other status
    Unexpected(u16),
}

/// Outcome of `GET /users/me/reservations`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnReservationsOutcome {
    /// 200: the caller's full reservation history
    Loaded(Vec<UserReservation>),
    /// Any other status
    Unexpected(u16),
}

/// Outcome of the privileged `GET /reservations`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllReservationsOutcome {
    /// 200: every reservation, joined with user, room, and slot
    Loaded(Vec<EnrichedReservation>),
    /// 403: the caller's role does not allow the listing
    Forbidden,
    /// Any other status
    Unexpected(u16),
}
