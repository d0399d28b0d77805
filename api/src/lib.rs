//! # Roombook API
//!
//! REST transport for the Roombook reservation backend.
//!
//! The backend speaks plain JSON over HTTP and uses status codes as its
//! outcome vocabulary: a 409 on reservation create means "someone else got
//! the slot first", a 401 on the identity fetch means "no session" — both
//! are expected business outcomes, not faults. This crate preserves that
//! vocabulary as Rust types:
//!
//! - every operation returns a **closed outcome enum** covering its expected
//!   statuses plus an `Unexpected(status)` arm;
//! - any status the server delivers becomes a normal `Ok(outcome)`; only
//!   network-level failures (no response at all) become [`ApiError`].
//!
//! Call sites match exhaustively on the outcome, so "conflict" can never be
//! accidentally handled as a generic failure.
//!
//! [`client::BackendApi`] is the object-safe trait feature reducers depend
//! on; [`client::RestClient`] is the production implementation.

pub mod client;
pub mod error;
pub mod outcome;
pub mod types;

pub use client::{BackendApi, RestClient};
pub use error::ApiError;
pub use outcome::{
    AllReservationsOutcome, CancelReservationOutcome, CreateReservationOutcome, IdentityOutcome,
    LoginOutcome, LogoutOutcome, OwnReservationsOutcome, RegisterOutcome, RoomsOutcome,
};
pub use types::{
    CreateReservationRequest, EnrichedReservation, LoginRequest, MeetingRoom,
    MeetingRoomId, MeetingRoomWithSlots, RegisterRequest, ReservationId, ReservationRecord,
    TimeSlot, TimeSlotId, UserId, UserProfile, UserReservation, UserRole,
};
