//! Collaborators the theme store talks to.
//!
//! The store never reaches for ambient globals: the session record, the
//! remote preference endpoint and the auth-error handler are all injected
//! through the traits in this module.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use super::preferences::{StoredPreferences, ThemePreferences};

/// Future returned by [`PreferenceSync::push`].
pub type SyncFuture = Pin<Box<dyn Future<Output = Result<(), SyncError>> + Send + 'static>>;

/// Failure of a remote preference sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The session is not authorized to write preferences.
    Unauthorized,
    /// The preferences never reached the endpoint (connection, I/O).
    Transport(String),
    /// The endpoint answered with a non-success status.
    Rejected {
        /// Status code reported by the endpoint
        status: u16,
        /// Response message
        message: String,
    },
}

impl SyncError {
    /// Returns true for authorization failures, which are delegated to the
    /// auth-error handler instead of being ignored.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Transport(reason) => write!(f, "transport error: {reason}"),
            Self::Rejected { status, message } => {
                write!(f, "rejected with status {status}: {message}")
            }
        }
    }
}

impl std::error::Error for SyncError {}

/// Best-effort remote persistence of theme preferences.
pub trait PreferenceSync: Send + Sync {
    /// Sends the full preference tuple to the remote endpoint.
    fn push(&self, prefs: ThemePreferences) -> SyncFuture;
}

/// Receives authorization failures from preference sync.
pub trait AuthErrorHandler: Send + Sync {
    /// Called once per sync attempt that failed with [`SyncError::Unauthorized`].
    fn on_unauthorized(&self, error: &SyncError);
}

/// Auth-error handler that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreAuthErrors;

impl AuthErrorHandler for IgnoreAuthErrors {
    fn on_unauthorized(&self, _error: &SyncError) {}
}

/// Synchronous accessor for the current user's stored preferences.
pub trait SessionSource: Send + Sync {
    /// Returns the preferences on the current session, if there is a session
    /// and it carries any.
    fn current_preferences(&self) -> Option<StoredPreferences>;
}

/// Session source for an anonymous user.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSession;

impl SessionSource for NoSession {
    fn current_preferences(&self) -> Option<StoredPreferences> {
        None
    }
}

/// Process-wide session change signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A user logged in; stored preferences should be re-read.
    LoggedIn,
    /// The user logged out; preferences return to the default tuple.
    LoggedOut,
}
