//! Scripted mock of the backend API for tests.
//!
//! Responses are queued per endpoint; each call pops the next one. An
//! endpoint with nothing scripted answers with a transport error, which a
//! correct test either expects or fails loudly on. Calls are recorded so
//! tests can assert how often an endpoint was hit — the session's
//! fetch-exactly-once rule, for instance.

use async_trait::async_trait;
use roombook_api::{
    AllReservationsOutcome, ApiError, BackendApi, CancelReservationOutcome,
    CreateReservationOutcome, CreateReservationRequest, IdentityOutcome, LoginOutcome,
    LoginRequest, LogoutOutcome, OwnReservationsOutcome, RegisterOutcome, RegisterRequest,
    ReservationId, RoomsOutcome,
};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

type Scripted<T> = Mutex<VecDeque<Result<T, ApiError>>>;

fn pop<T>(queue: &Scripted<T>, operation: &'static str) -> Result<T, ApiError> {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
        .unwrap_or_else(|| {
            Err(ApiError::Transport(format!(
                "no scripted response for {operation}"
            )))
        })
}

/// In-memory, scripted implementation of [`BackendApi`]
#[derive(Default)]
pub struct MockApi {
    identity: Scripted<IdentityOutcome>,
    login: Scripted<LoginOutcome>,
    register: Scripted<RegisterOutcome>,
    logout: Scripted<LogoutOutcome>,
    rooms: Scripted<RoomsOutcome>,
    create: Scripted<CreateReservationOutcome>,
    cancel: Scripted<CancelReservationOutcome>,
    own: Scripted<OwnReservationsOutcome>,
    all: Scripted<AllReservationsOutcome>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockApi {
    /// Creates a mock with nothing scripted
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next `current_user` response
    #[must_use]
    pub fn with_identity(self, response: Result<IdentityOutcome, ApiError>) -> Self {
        self.identity
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Scripts the next `login` response
    #[must_use]
    pub fn with_login(self, response: Result<LoginOutcome, ApiError>) -> Self {
        self.login
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Scripts the next `register` response
    #[must_use]
    pub fn with_register(self, response: Result<RegisterOutcome, ApiError>) -> Self {
        self.register
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Scripts the next `logout` response
    #[must_use]
    pub fn with_logout(self, response: Result<LogoutOutcome, ApiError>) -> Self {
        self.logout
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Scripts the next `available_rooms` response
    #[must_use]
    pub fn with_rooms(self, response: Result<RoomsOutcome, ApiError>) -> Self {
        self.rooms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Scripts the next `create_reservation` response
    #[must_use]
    pub fn with_create(self, response: Result<CreateReservationOutcome, ApiError>) -> Self {
        self.create
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Scripts the next `cancel_reservation` response
    #[must_use]
    pub fn with_cancel(self, response: Result<CancelReservationOutcome, ApiError>) -> Self {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Scripts the next `own_reservations` response
    #[must_use]
    pub fn with_own_reservations(self, response: Result<OwnReservationsOutcome, ApiError>) -> Self {
        self.own
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Scripts the next `all_reservations` response
    #[must_use]
    pub fn with_all_reservations(self, response: Result<AllReservationsOutcome, ApiError>) -> Self {
        self.all
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Returns the operations called so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, operation: &'static str) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(operation);
    }
}

#[async_trait]
impl BackendApi for MockApi {
    async fn current_user(&self) -> Result<IdentityOutcome, ApiError> {
        self.record("current_user");
        pop(&self.identity, "current_user")
    }

    async fn login(&self, _request: LoginRequest) -> Result<LoginOutcome, ApiError> {
        self.record("login");
        pop(&self.login, "login")
    }

    async fn register(&self, _request: RegisterRequest) -> Result<RegisterOutcome, ApiError> {
        self.record("register");
        pop(&self.register, "register")
    }

    async fn logout(&self) -> Result<LogoutOutcome, ApiError> {
        self.record("logout");
        pop(&self.logout, "logout")
    }

    async fn available_rooms(&self) -> Result<RoomsOutcome, ApiError> {
        self.record("available_rooms");
        pop(&self.rooms, "available_rooms")
    }

    async fn create_reservation(
        &self,
        _request: CreateReservationRequest,
    ) -> Result<CreateReservationOutcome, ApiError> {
        self.record("create_reservation");
        pop(&self.create, "create_reservation")
    }

    async fn cancel_reservation(
        &self,
        _reservation_id: ReservationId,
    ) -> Result<CancelReservationOutcome, ApiError> {
        self.record("cancel_reservation");
        pop(&self.cancel, "cancel_reservation")
    }

    async fn own_reservations(&self) -> Result<OwnReservationsOutcome, ApiError> {
        self.record("own_reservations");
        pop(&self.own, "own_reservations")
    }

    async fn all_reservations(&self) -> Result<AllReservationsOutcome, ApiError> {
        self.record("all_reservations");
        pop(&self.all, "all_reservations")
    }
}
