//! Client-side types shared across features.

/// Severity of a user-facing notice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Something the user asked for worked
    Success,
    /// Something needs the user's attention
    Error,
}

/// A user-facing notice (the view layer renders these as toasts)
///
/// Each feature state keeps only its most recent notice; a notice is a
/// rendering hint, not part of the domain data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Message shown to the user
    pub message: String,
}

impl Notice {
    /// Creates a success notice
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error notice
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Returns true if this is an error notice
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, NoticeLevel::Error)
    }
}
