//! Reservation backend client implementation
//!
//! [`RestClient`] reduces every response into the operation's outcome enum
//! by matching on the status code. reqwest never treats a delivered status
//! as an error, so the transport convention — any status is a normal value,
//! only a missing response is a failure — holds by construction; the only
//! `Err` paths are [`ApiError::Transport`] and a success body that will not
//! parse.

use crate::error::ApiError;
use crate::outcome::{
    AllReservationsOutcome, CancelReservationOutcome, CreateReservationOutcome, IdentityOutcome,
    LoginOutcome, LogoutOutcome, OwnReservationsOutcome, RegisterOutcome, RoomsOutcome,
};
use crate::types::{
    CreateReservationRequest, LoginRequest, RegisterRequest, ReservationId,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// The backend operations the client features depend on
///
/// Object-safe so feature environments can hold an `Arc<dyn BackendApi>`
/// and tests can substitute a scripted implementation.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Fetch the current session's profile
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures or an unreadable body.
    async fn current_user(&self) -> Result<IdentityOutcome, ApiError>;

    /// Authenticate with email and password
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures.
    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, ApiError>;

    /// Create a new account
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures.
    async fn register(&self, request: RegisterRequest) -> Result<RegisterOutcome, ApiError>;

    /// End the current session
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures.
    async fn logout(&self) -> Result<LogoutOutcome, ApiError>;

    /// List rooms that currently offer open time slots
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures or an unreadable body.
    async fn available_rooms(&self) -> Result<RoomsOutcome, ApiError>;

    /// Reserve a (room, slot) pair for the current user
    ///
    /// The server is the sole arbiter of the one-reservation-per-slot
    /// invariant; success must never be assumed before the `Created`
    /// outcome arrives.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures or an unreadable body.
    async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<CreateReservationOutcome, ApiError>;

    /// Cancel one of the current user's reservations
    ///
    /// Idempotent at the protocol level: canceling an already-canceled
    /// reservation is still a 200 with the original timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures or an unreadable body.
    async fn cancel_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> Result<CancelReservationOutcome, ApiError>;

    /// List the current user's reservation history
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures or an unreadable body.
    async fn own_reservations(&self) -> Result<OwnReservationsOutcome, ApiError>;

    /// List every reservation (requires the admin role)
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures or an unreadable body.
    async fn all_reservations(&self) -> Result<AllReservationsOutcome, ApiError>;
}

/// Production client for the reservation backend
///
/// Carries a cookie store so the session cookie set by `POST /auth/login`
/// rides along on every subsequent call.
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a new client for the backend at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl BackendApi for RestClient {
    async fn current_user(&self) -> Result<IdentityOutcome, ApiError> {
        let response = self
            .client
            .get(self.url("/users/me"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let profile = response
                    .json()
                    .await
                    .map_err(|e| ApiError::ResponseParse(e.to_string()))?;
                Ok(IdentityOutcome::Identified(profile))
            },
            StatusCode::UNAUTHORIZED => Ok(IdentityOutcome::NoSession),
            StatusCode::NOT_FOUND => Ok(IdentityOutcome::NotFound),
            status => Ok(IdentityOutcome::Unexpected(status.as_u16())),
        }
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::CREATED => Ok(LoginOutcome::LoggedIn),
            StatusCode::BAD_REQUEST => Ok(LoginOutcome::BadCredentials),
            StatusCode::NOT_FOUND => Ok(LoginOutcome::NotFound),
            status => Ok(LoginOutcome::Unexpected(status.as_u16())),
        }
    }

    async fn register(&self, request: RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::CREATED => Ok(RegisterOutcome::Registered),
            StatusCode::BAD_REQUEST => Ok(RegisterOutcome::InvalidInput),
            StatusCode::CONFLICT => Ok(RegisterOutcome::EmailTaken),
            status => Ok(RegisterOutcome::Unexpected(status.as_u16())),
        }
    }

    async fn logout(&self) -> Result<LogoutOutcome, ApiError> {
        let response = self
            .client
            .post(self.url("/auth/logout"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(LogoutOutcome::LoggedOut),
            status => Ok(LogoutOutcome::Unexpected(status.as_u16())),
        }
    }

    async fn available_rooms(&self) -> Result<RoomsOutcome, ApiError> {
        let response = self
            .client
            .get(self.url("/meeting-rooms/available"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let rooms = response
                    .json()
                    .await
                    .map_err(|e| ApiError::ResponseParse(e.to_string()))?;
                Ok(RoomsOutcome::Loaded(rooms))
            },
            status => Ok(RoomsOutcome::Unexpected(status.as_u16())),
        }
    }

    async fn create_reservation(
        &self,
        request: CreateReservationRequest,
    ) -> Result<CreateReservationOutcome, ApiError> {
        let response = self
            .client
            .post(self.url("/users/me/reservations"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::CREATED => {
                let record = response
                    .json()
                    .await
                    .map_err(|e| ApiError::ResponseParse(e.to_string()))?;
                Ok(CreateReservationOutcome::Created(record))
            },
            StatusCode::CONFLICT => Ok(CreateReservationOutcome::SlotConflict),
            status => Ok(CreateReservationOutcome::Unexpected(status.as_u16())),
        }
    }

    async fn cancel_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> Result<CancelReservationOutcome, ApiError> {
        let response = self
            .client
            .patch(self.url(&format!("/users/me/reservations/{reservation_id}")))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let record = response
                    .json()
                    .await
                    .map_err(|e| ApiError::ResponseParse(e.to_string()))?;
                Ok(CancelReservationOutcome::Canceled(record))
            },
            StatusCode::NOT_FOUND => Ok(CancelReservationOutcome::NotFound),
            status => Ok(CancelReservationOutcome::Unexpected(status.as_u16())),
        }
    }

    async fn own_reservations(&self) -> Result<OwnReservationsOutcome, ApiError> {
        let response = self
            .client
            .get(self.url("/users/me/reservations"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let reservations = response
                    .json()
                    .await
                    .map_err(|e| ApiError::ResponseParse(e.to_string()))?;
                Ok(OwnReservationsOutcome::Loaded(reservations))
            },
            status => Ok(OwnReservationsOutcome::Unexpected(status.as_u16())),
        }
    }

    async fn all_reservations(&self) -> Result<AllReservationsOutcome, ApiError> {
        let response = self
            .client
            .get(self.url("/reservations"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let reservations = response
                    .json()
                    .await
                    .map_err(|e| ApiError::ResponseParse(e.to_string()))?;
                Ok(AllReservationsOutcome::Loaded(reservations))
            },
            StatusCode::FORBIDDEN => Ok(AllReservationsOutcome::Forbidden),
            status => Ok(AllReservationsOutcome::Unexpected(status.as_u16())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn profile_json() -> serde_json::Value {
        serde_json::json!({
            "id": "7f0c0a4e-3f89-4a8e-bf21-5b2a3e6f9d01",
            "email": "ada@example.com",
            "name": "Ada Lovelace",
            "role": "user",
            "created_at": "2025-01-15T08:30:00Z",
        })
    }

    #[tokio::test]
    async fn current_user_200_is_identified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
            .mount(&server)
            .await;

        let client = RestClient::new(server.uri()).unwrap();
        let outcome = client.current_user().await.unwrap();

        match outcome {
            IdentityOutcome::Identified(profile) => {
                assert_eq!(profile.email, "ada@example.com");
                assert!(!profile.role.is_admin());
            },
            other => panic!("expected Identified, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn current_user_401_is_no_session_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = RestClient::new(server.uri()).unwrap();
        let outcome = client.current_user().await.unwrap();

        assert_eq!(outcome, IdentityOutcome::NoSession);
    }

    #[tokio::test]
    async fn current_user_404_and_500_are_distinct() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = RestClient::new(server.uri()).unwrap();
        assert_eq!(client.current_user().await.unwrap(), IdentityOutcome::NotFound);

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert_eq!(
            client.current_user().await.unwrap(),
            IdentityOutcome::Unexpected(500)
        );
    }

    #[tokio::test]
    async fn create_reservation_409_is_slot_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/me/reservations"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let client = RestClient::new(server.uri()).unwrap();
        let outcome = client
            .create_reservation(CreateReservationRequest {
                meeting_room_id: crate::types::MeetingRoomId::new(),
                time_slot_id: crate::types::TimeSlotId::new(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, CreateReservationOutcome::SlotConflict);
    }

    #[tokio::test]
    async fn cancel_reservation_dispatches_200_and_404() {
        let reservation_id = ReservationId::new();
        let record = serde_json::json!({
            "id": reservation_id.to_string(),
            "user_id": "6f1d7c2b-8e43-47f0-9a3b-0c4d5e6f7a82",
            "meeting_room_id": "5e2c6b1a-7d32-46ef-8b9a-1d3c4e5f6a73",
            "time_slot_id": "4d3b5a09-6c21-45de-7a89-2e4d5f6a7b64",
            "canceled": true,
            "canceled_at": "2025-06-02T12:00:00Z",
            "reserved_at": "2025-06-01T09:00:00Z",
        });

        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(format!("/users/me/reservations/{reservation_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(record))
            .mount(&server)
            .await;

        let client = RestClient::new(server.uri()).unwrap();
        match client.cancel_reservation(reservation_id).await.unwrap() {
            CancelReservationOutcome::Canceled(record) => {
                assert!(record.canceled);
                assert!(record.canceled_at.is_some());
            },
            other => panic!("expected Canceled, got {other:?}"),
        }

        let missing = ReservationId::new();
        Mock::given(method("PATCH"))
            .and(path(format!("/users/me/reservations/{missing}")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert_eq!(
            client.cancel_reservation(missing).await.unwrap(),
            CancelReservationOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn all_reservations_403_is_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reservations"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = RestClient::new(server.uri()).unwrap();
        assert_eq!(
            client.all_reservations().await.unwrap(),
            AllReservationsOutcome::Forbidden
        );
    }

    #[tokio::test]
    async fn login_dispatches_contract_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = RestClient::new(server.uri()).unwrap();
        let request = LoginRequest {
            email: "ada@example.com".to_string(),
            password: "correct horse".to_string(),
        };

        assert_eq!(client.login(request.clone()).await.unwrap(), LoginOutcome::LoggedIn);

        server.reset().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        assert_eq!(
            client.login(request).await.unwrap(),
            LoginOutcome::BadCredentials
        );
    }

    #[tokio::test]
    async fn transport_failure_is_an_error_not_an_outcome() {
        // Nothing listens on this port; the request never gets a response.
        let client = RestClient::new("http://127.0.0.1:9").unwrap();
        let result = client.current_user().await;

        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
