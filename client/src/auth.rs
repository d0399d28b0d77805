//! Login, registration, and logout flows.
//!
//! The forms validate locally before anything leaves the client, then each
//! submission reduces the backend's status into its own event. Wrong
//! credentials, an unknown account, and a taken email are expected outcomes
//! with their own notices; only unexpected statuses and transport failures
//! share the generic retry notice.
//!
//! The auth store never writes the session. After a successful login or
//! logout the embedding shell replaces the session identity through the
//! session store's own setter — one writer per shared resource.

use crate::types::Notice;
use roombook_api::{BackendApi, LoginOutcome, LoginRequest, LogoutOutcome, RegisterOutcome, RegisterRequest};
use roombook_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use roombook_macros::Action;
use roombook_runtime::Store;
use std::sync::Arc;

/// State of the auth forms
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    /// True while a request is in flight
    pub submitting: bool,
    /// True after a successful login, false after logout
    pub authenticated: bool,
    /// True after a successful registration
    pub registered: bool,
    /// Most recent notice (if any)
    pub last_notice: Option<Notice>,
}

impl AuthState {
    /// Creates the initial auth state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            submitting: false,
            authenticated: false,
            registered: false,
            last_notice: None,
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions for the auth flows
#[derive(Action, Clone, Debug)]
pub enum AuthAction {
    // ========== Commands ==========
    /// Command: submit the login form
    #[command]
    SubmitLogin {
        /// Email address
        email: String,
        /// Password
        password: String,
    },

    /// Command: submit the registration form
    #[command]
    SubmitRegistration {
        /// Desired username
        username: String,
        /// Email address
        email: String,
        /// Password
        password: String,
    },

    /// Command: log out
    #[command]
    SubmitLogout,

    // ========== Events ==========
    /// Event: credentials accepted (201)
    #[event]
    LoginSucceeded,

    /// Event: wrong email/password combination (400)
    #[event]
    LoginRejected,

    /// Event: no account with that email (404)
    #[event]
    LoginAccountMissing,

    /// Event: the login request hit an unexpected status or no response
    #[event]
    LoginFailed {
        /// What went wrong, for the log
        detail: String,
    },

    /// Event: account created (201)
    #[event]
    RegistrationSucceeded,

    /// Event: the backend rejected the submitted fields (400)
    #[event]
    RegistrationRejected,

    /// Event: the email is already registered (409)
    #[event]
    EmailTaken,

    /// Event: the registration request hit an unexpected status or no response
    #[event]
    RegistrationFailed {
        /// What went wrong, for the log
        detail: String,
    },

    /// Event: the session is gone (204)
    #[event]
    LogoutSucceeded,

    /// Event: the logout request hit an unexpected status or no response
    #[event]
    LogoutFailed {
        /// What went wrong, for the log
        detail: String,
    },

    /// Event: a form was rejected locally before any request was issued
    #[event]
    ValidationFailed {
        /// Why the form was rejected
        error: String,
    },
}

/// Environment dependencies for the auth reducer
#[derive(Clone)]
pub struct AuthEnvironment {
    /// Backend the auth endpoints live on
    pub api: Arc<dyn BackendApi>,
}

impl AuthEnvironment {
    /// Creates a new `AuthEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self { api }
    }
}

/// Reducer for the auth flows
#[derive(Clone, Debug)]
pub struct AuthReducer;

impl AuthReducer {
    /// Creates a new `AuthReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates login form fields
    fn validate_login(email: &str, password: &str) -> Result<(), String> {
        if !email.contains('@') {
            return Err("Please enter a valid email address.".to_string());
        }

        if password.len() < 8 {
            return Err("Password must be at least 8 characters.".to_string());
        }

        Ok(())
    }

    /// Validates registration form fields
    fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), String> {
        if username.trim().len() < 2 {
            return Err("Username must be at least 2 characters.".to_string());
        }

        Self::validate_login(email, password)
    }

    /// Applies an event to state
    fn apply_event(state: &mut AuthState, action: &AuthAction) {
        match action {
            AuthAction::LoginSucceeded => {
                state.submitting = false;
                state.authenticated = true;
                state.last_notice = Some(Notice::success("Login success"));
            }
            AuthAction::LoginRejected => {
                state.submitting = false;
                state.last_notice = Some(Notice::error(
                    "Please check your email and password again",
                ));
            }
            AuthAction::LoginAccountMissing => {
                state.submitting = false;
                state.last_notice = Some(Notice::error("User not found"));
            }
            AuthAction::LoginFailed { .. } => {
                state.submitting = false;
                state.last_notice = Some(Notice::error("Login failed, please try again"));
            }
            AuthAction::RegistrationSucceeded => {
                state.submitting = false;
                state.registered = true;
                state.last_notice = Some(Notice::success(
                    "Registration success, please login to continue",
                ));
            }
            AuthAction::RegistrationRejected => {
                state.submitting = false;
                state.last_notice = Some(Notice::error(
                    "Please check your username, email, and password again",
                ));
            }
            AuthAction::EmailTaken => {
                state.submitting = false;
                state.last_notice = Some(Notice::error("Email already registered"));
            }
            AuthAction::RegistrationFailed { .. } => {
                state.submitting = false;
                state.last_notice = Some(Notice::error("Registration failed, please try again"));
            }
            AuthAction::LogoutSucceeded => {
                state.submitting = false;
                state.authenticated = false;
            }
            AuthAction::LogoutFailed { .. } => {
                state.submitting = false;
                state.last_notice = Some(Notice::error("Logout failed, please try again"));
            }
            AuthAction::ValidationFailed { error } => {
                state.last_notice = Some(Notice::error(error.clone()));
            }
            // Commands are not applied to state
            AuthAction::SubmitLogin { .. }
            | AuthAction::SubmitRegistration { .. }
            | AuthAction::SubmitLogout => {}
        }
    }
}

impl Default for AuthReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AuthEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            AuthAction::SubmitLogin { email, password } => {
                if let Err(error) = Self::validate_login(&email, &password) {
                    Self::apply_event(state, &AuthAction::ValidationFailed { error });
                    return SmallVec::new();
                }

                state.submitting = true;

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    let request = LoginRequest { email, password };
                    let action = match api.login(request).await {
                        Ok(LoginOutcome::LoggedIn) => AuthAction::LoginSucceeded,
                        Ok(LoginOutcome::BadCredentials) => AuthAction::LoginRejected,
                        Ok(LoginOutcome::NotFound) => AuthAction::LoginAccountMissing,
                        Ok(LoginOutcome::Unexpected(status)) => {
                            tracing::error!(status, "login returned unexpected status");
                            AuthAction::LoginFailed {
                                detail: format!("unexpected status {status}"),
                            }
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "failed to login");
                            AuthAction::LoginFailed {
                                detail: error.to_string(),
                            }
                        }
                    };
                    Some(action)
                }))]
            }

            AuthAction::SubmitRegistration {
                username,
                email,
                password,
            } => {
                if let Err(error) = Self::validate_registration(&username, &email, &password) {
                    Self::apply_event(state, &AuthAction::ValidationFailed { error });
                    return SmallVec::new();
                }

                state.submitting = true;

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    let request = RegisterRequest {
                        username,
                        email,
                        password,
                    };
                    let action = match api.register(request).await {
                        Ok(RegisterOutcome::Registered) => AuthAction::RegistrationSucceeded,
                        Ok(RegisterOutcome::InvalidInput) => AuthAction::RegistrationRejected,
                        Ok(RegisterOutcome::EmailTaken) => AuthAction::EmailTaken,
                        Ok(RegisterOutcome::Unexpected(status)) => {
                            tracing::error!(status, "registration returned unexpected status");
                            AuthAction::RegistrationFailed {
                                detail: format!("unexpected status {status}"),
                            }
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "failed to register");
                            AuthAction::RegistrationFailed {
                                detail: error.to_string(),
                            }
                        }
                    };
                    Some(action)
                }))]
            }

            AuthAction::SubmitLogout => {
                state.submitting = true;

                let api = Arc::clone(&env.api);
                smallvec![Effect::Future(Box::pin(async move {
                    let action = match api.logout().await {
                        Ok(LogoutOutcome::LoggedOut) => AuthAction::LogoutSucceeded,
                        Ok(LogoutOutcome::Unexpected(status)) => {
                            tracing::error!(status, "logout returned unexpected status");
                            AuthAction::LogoutFailed {
                                detail: format!("unexpected status {status}"),
                            }
                        }
                        Err(error) => {
                            tracing::error!(error = %error, "failed to logout");
                            AuthAction::LogoutFailed {
                                detail: error.to_string(),
                            }
                        }
                    };
                    Some(action)
                }))]
            }

            // ========== Events ==========
            AuthAction::LoginSucceeded
            | AuthAction::LoginRejected
            | AuthAction::LoginAccountMissing
            | AuthAction::LoginFailed { .. }
            | AuthAction::RegistrationSucceeded
            | AuthAction::RegistrationRejected
            | AuthAction::EmailTaken
            | AuthAction::RegistrationFailed { .. }
            | AuthAction::LogoutSucceeded
            | AuthAction::LogoutFailed { .. }
            | AuthAction::ValidationFailed { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            }
        }
    }
}

/// The auth store type
pub type AuthStore = Store<AuthState, AuthAction, AuthEnvironment, AuthReducer>;
