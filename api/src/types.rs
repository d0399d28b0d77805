//! Wire types for the reservation backend's JSON API.
//!
//! Field names and shapes mirror the backend DTOs exactly (snake_case,
//! RFC 3339 timestamps, UUID strings). Identifiers are newtypes so a
//! time-slot id can never be passed where a room id is expected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random `UserId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `UserId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a meeting room
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeetingRoomId(Uuid);

impl MeetingRoomId {
    /// Creates a new random `MeetingRoomId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `MeetingRoomId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MeetingRoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MeetingRoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a time slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlotId(Uuid);

impl TimeSlotId {
    /// Creates a new random `TimeSlotId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TimeSlotId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TimeSlotId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TimeSlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a reservation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Creates a new random `ReservationId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `ReservationId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of an authenticated user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular user: can reserve slots and see their own history
    User,
    /// Administrator: can list every reservation, has no personal history
    Admin,
}

impl UserRole {
    /// Returns true for the administrator role
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// The authenticated user's profile, as returned by `GET /users/me`
///
/// Immutable once fetched; the session replaces it wholesale on
/// login/logout, never field by field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier
    pub id: UserId,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Role
    pub role: UserRole,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// A meeting room
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRoom {
    /// Room identifier
    pub id: MeetingRoomId,
    /// Room name
    pub name: String,
    /// When the room was created
    pub created_at: DateTime<Utc>,
}

/// A reservable time slot; belongs to exactly one room and never changes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Slot identifier
    pub id: TimeSlotId,
    /// Start of the slot
    pub start_date: DateTime<Utc>,
    /// End of the slot
    pub end_date: DateTime<Utc>,
    /// When the slot was created
    pub created_at: DateTime<Utc>,
}

/// A meeting room together with its open time slots,
/// as returned by `GET /meeting-rooms/available`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRoomWithSlots {
    /// Room identifier
    pub id: MeetingRoomId,
    /// Room name
    pub name: String,
    /// When the room was created
    pub created_at: DateTime<Utc>,
    /// Open time slots for this room
    pub time_slots: Vec<TimeSlot>,
}

/// A reservation as the backend stores it (id references only)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    /// Reservation identifier
    pub id: ReservationId,
    /// Owning user
    pub user_id: UserId,
    /// Reserved room
    pub meeting_room_id: MeetingRoomId,
    /// Reserved slot
    pub time_slot_id: TimeSlotId,
    /// Whether the reservation has been canceled
    pub canceled: bool,
    /// When it was canceled; present exactly when `canceled` is true
    pub canceled_at: Option<DateTime<Utc>>,
    /// When it was reserved
    pub reserved_at: DateTime<Utc>,
}

/// One entry of the user's reservation history,
/// as returned by `GET /users/me/reservations`
///
/// A canceled entry stays in the history; cancellation is a field update,
/// never a removal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReservation {
    /// Reservation identifier
    pub id: ReservationId,
    /// The reserved room
    pub meeting_room: MeetingRoom,
    /// The reserved slot
    pub time_slot: TimeSlot,
    /// Whether the reservation has been canceled
    pub canceled: bool,
    /// When it was canceled; present exactly when `canceled` is true
    pub canceled_at: Option<DateTime<Utc>>,
    /// When it was reserved
    pub reserved_at: DateTime<Utc>,
}

impl UserReservation {
    /// Marks the reservation as canceled with the server's timestamp
    ///
    /// The only way the pair (`canceled`, `canceled_at`) changes, so the
    /// invariant `canceled == canceled_at.is_some()` always holds.
    pub fn cancel(&mut self, canceled_at: DateTime<Utc>) {
        self.canceled = true;
        self.canceled_at = Some(canceled_at);
    }
}

/// A reservation joined with its user, room, and slot,
/// as returned by the privileged `GET /reservations`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedReservation {
    /// Reservation identifier
    pub id: ReservationId,
    /// The reserving user
    pub user: UserProfile,
    /// The reserved room
    pub meeting_room: MeetingRoom,
    /// The reserved slot
    pub time_slot: TimeSlot,
    /// Whether the reservation has been canceled
    pub canceled: bool,
    /// When it was canceled; present exactly when `canceled` is true
    pub canceled_at: Option<DateTime<Utc>>,
    /// When it was reserved
    pub reserved_at: DateTime<Utc>,
}

/// Payload of `POST /users/me/reservations`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    /// Room to reserve
    pub meeting_room_id: MeetingRoomId,
    /// Slot to reserve
    pub time_slot_id: TimeSlotId,
}

/// Payload of `POST /auth/login`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Payload of `POST /auth/register`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username
    pub username: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_as_uuids() {
        let id = ReservationId::new();
        assert_eq!(format!("{id}"), id.as_uuid().to_string());
    }

    #[test]
    fn user_role_deserializes_lowercase() {
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert!(role.is_admin());

        let role: UserRole = serde_json::from_str("\"user\"").unwrap();
        assert!(!role.is_admin());
    }

    #[test]
    fn reservation_record_round_trips_snake_case_fields() {
        let json = serde_json::json!({
            "id": "7f0c0a4e-3f89-4a8e-bf21-5b2a3e6f9d01",
            "user_id": "6f1d7c2b-8e43-47f0-9a3b-0c4d5e6f7a82",
            "meeting_room_id": "5e2c6b1a-7d32-46ef-8b9a-1d3c4e5f6a73",
            "time_slot_id": "4d3b5a09-6c21-45de-7a89-2e4d5f6a7b64",
            "canceled": false,
            "canceled_at": null,
            "reserved_at": "2025-06-01T09:00:00Z",
        });

        let record: ReservationRecord = serde_json::from_value(json).unwrap();
        assert!(!record.canceled);
        assert!(record.canceled_at.is_none());
    }

    #[test]
    fn cancel_keeps_flag_and_timestamp_in_step() {
        let now = Utc::now();
        let mut reservation = UserReservation {
            id: ReservationId::new(),
            meeting_room: MeetingRoom {
                id: MeetingRoomId::new(),
                name: "Aurora".to_string(),
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
        };

        reservation.cancel(now);

        assert!(reservation.canceled);
        assert_eq!(reservation.canceled_at, Some(now));
    }
}
