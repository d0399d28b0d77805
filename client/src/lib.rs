//! # Roombook Client
//!
//! The client core of a meeting-room reservation service: authenticate a
//! user, list rooms and time slots, create and cancel reservations, and show
//! reservation history. Rendering is someone else's job — this crate exposes
//! the contracts a view layer calls into:
//!
//! - [`session`]: process-wide session store, resolved exactly once from
//!   `GET /users/me`
//! - [`guard`]: pure route decision `decide(path, session)` — wait, redirect,
//!   or allow — recomputed on every path or session change
//! - [`rooms`]: available rooms, slot dialog, and the conflict-aware
//!   reservation create flow
//! - [`history`]: the user's reservation history and the cancel flow with
//!   its single sanctioned list mutation
//! - [`admin`]: the privileged all-reservations overview
//! - [`auth`]: login, registration, and logout flows
//!
//! Every feature is a reducer over explicit state, run by
//! `roombook_runtime::Store`; every backend call is an effect whose outcome
//! comes back as an event action. Expected business outcomes (slot conflict,
//! wrong credentials, not-found, forbidden) are distinct variants with
//! distinct notices; only unexpected statuses and transport failures share
//! the generic retry path.

pub mod admin;
pub mod auth;
pub mod config;
pub mod guard;
pub mod history;
pub mod mocks;
pub mod rooms;
pub mod session;
pub mod types;
pub mod util;

pub use guard::{RouteDecision, decide};
pub use session::{SessionAction, SessionEnvironment, SessionReducer, SessionState};
pub use types::{Notice, NoticeLevel};
