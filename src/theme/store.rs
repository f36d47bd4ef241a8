//! Theme preference state.
//!
//! [`ThemeStateStore`] owns the four preference fields and fans every change
//! out three ways:
//!
//! - a `watch` channel carrying the freshly derived [`ThemeTokens`] (render
//!   subscription)
//! - a `broadcast` channel carrying the new [`ThemePreferences`] (theme-changed
//!   signal, sent synchronously before the setter returns)
//! - a fire-and-forget [`PreferenceSync::push`] on the current Tokio runtime
//!
//! Sync results never touch local state. An unauthorized response is handed
//! to the injected [`AuthErrorHandler`], every other failure is logged and
//! dropped.

use std::fmt;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::palette::{ColorKey, FontFamily, FontSize};
use super::preferences::ThemePreferences;
use super::sync::{AuthErrorHandler, IgnoreAuthErrors, PreferenceSync, SessionEvent, SessionSource};
use super::tokens::{derive_tokens, ThemeTokens};

/// Buffered theme-changed messages per subscriber before it lags.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Whether a committed change is pushed to the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Persist {
    Yes,
    No,
}

/// Owner of the theme preferences and their derived tokens.
pub struct ThemeStateStore {
    prefs: ThemePreferences,
    tokens_tx: watch::Sender<ThemeTokens>,
    changes_tx: broadcast::Sender<ThemePreferences>,
    session: Arc<dyn SessionSource>,
    session_events: Option<broadcast::Receiver<SessionEvent>>,
    sync: Option<Arc<dyn PreferenceSync>>,
    auth_errors: Arc<dyn AuthErrorHandler>,
    pending_sync: Vec<JoinHandle<()>>,
}

impl ThemeStateStore {
    /// Creates a store and hydrates it from `session`.
    ///
    /// Without a session, or with a session that carries no preferences, the
    /// store starts from [`ThemePreferences::DEFAULT`].
    pub fn new(session: Arc<dyn SessionSource>) -> Self {
        let prefs = ThemePreferences::DEFAULT;
        let (tokens_tx, _) = watch::channel(derive_tokens(&prefs));
        let (changes_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        let mut store = Self {
            prefs,
            tokens_tx,
            changes_tx,
            session,
            session_events: None,
            sync: None,
            auth_errors: Arc::new(IgnoreAuthErrors),
            pending_sync: Vec::new(),
        };
        store.hydrate();
        store
    }

    /// Enables remote persistence of every preference change.
    pub fn with_sync(
        mut self,
        sync: Arc<dyn PreferenceSync>,
        auth_errors: Arc<dyn AuthErrorHandler>,
    ) -> Self {
        self.sync = Some(sync);
        self.auth_errors = auth_errors;
        self
    }

    /// Subscribes the store to login/logout signals.
    ///
    /// Signals are applied by [`ThemeStateStore::process_session_events`].
    pub fn with_session_events(mut self, events: broadcast::Receiver<SessionEvent>) -> Self {
        self.session_events = Some(events);
        self
    }

    /// Current preferences.
    #[must_use]
    pub const fn preferences(&self) -> ThemePreferences {
        self.prefs
    }

    /// Current derived tokens. Pure read.
    #[must_use]
    pub fn tokens(&self) -> ThemeTokens {
        *self.tokens_tx.borrow()
    }

    /// Receiver that always holds the latest fully derived token set.
    #[must_use]
    pub fn watch_tokens(&self) -> watch::Receiver<ThemeTokens> {
        self.tokens_tx.subscribe()
    }

    /// Subscribes to the theme-changed broadcast.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ThemePreferences> {
        self.changes_tx.subscribe()
    }

    /// Sets the primary color.
    pub fn set_primary_color(&mut self, color: ColorKey) {
        self.commit(
            ThemePreferences {
                primary_color: color,
                ..self.prefs
            },
            Persist::Yes,
        );
    }

    /// Sets the font family.
    pub fn set_font_family(&mut self, family: FontFamily) {
        self.commit(
            ThemePreferences {
                font_family: family,
                ..self.prefs
            },
            Persist::Yes,
        );
    }

    /// Sets the base font size.
    pub fn set_font_size(&mut self, size: FontSize) {
        self.commit(
            ThemePreferences {
                font_size: size,
                ..self.prefs
            },
            Persist::Yes,
        );
    }

    /// Enables or disables animations.
    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.commit(
            ThemePreferences {
                animations_enabled: enabled,
                ..self.prefs
            },
            Persist::Yes,
        );
    }

    /// Replaces all four fields at once: one broadcast, one sync attempt.
    pub fn apply(&mut self, prefs: ThemePreferences) {
        self.commit(prefs, Persist::Yes);
    }

    /// Restores the default tuple as a single combined update.
    pub fn reset_to_default(&mut self) {
        info!("Resetting theme preferences to defaults");
        self.commit(ThemePreferences::DEFAULT, Persist::Yes);
    }

    /// Re-reads preferences from the session source.
    ///
    /// Hydrated values came from the remote side, so they are not pushed back.
    pub fn hydrate(&mut self) {
        let prefs = match self.session.current_preferences() {
            Some(stored) if !stored.is_empty() => stored.resolve(),
            _ => {
                debug!("No stored theme preferences on session, using defaults");
                ThemePreferences::DEFAULT
            }
        };
        self.commit(prefs, Persist::No);
    }

    /// Applies every queued login/logout signal.
    ///
    /// Returns the number of signals handled.
    pub fn process_session_events(&mut self) -> usize {
        let Some(receiver) = self.session_events.as_mut() else {
            return 0;
        };

        let mut events = Vec::new();
        loop {
            match receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("Missed {skipped} session signals");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        for event in &events {
            match event {
                SessionEvent::LoggedIn => self.hydrate(),
                SessionEvent::LoggedOut => {
                    info!("Session ended, resetting theme preferences");
                    self.commit(ThemePreferences::DEFAULT, Persist::No);
                }
            }
        }
        events.len()
    }

    /// Waits for every outstanding sync attempt to settle.
    pub async fn flush_sync(&mut self) {
        for task in self.pending_sync.drain(..) {
            if let Err(err) = task.await {
                warn!("Preference sync task did not complete: {err}");
            }
        }
    }

    fn commit(&mut self, prefs: ThemePreferences, persist: Persist) {
        self.prefs = prefs;
        let tokens = derive_tokens(&prefs);
        self.tokens_tx.send_replace(tokens);
        debug!(
            color = %prefs.primary_color,
            font_family = %prefs.font_family,
            font_size = %prefs.font_size,
            animations = prefs.animations_enabled,
            "Theme tokens recomputed"
        );

        // Err only means nobody is listening.
        let _ = self.changes_tx.send(prefs);

        if persist == Persist::Yes {
            self.spawn_sync(prefs);
        }
    }

    fn spawn_sync(&mut self, prefs: ThemePreferences) {
        let Some(sync) = self.sync.clone() else {
            return;
        };
        let Ok(runtime) = Handle::try_current() else {
            debug!("No async runtime available, skipping preference sync");
            return;
        };

        self.pending_sync.retain(|task| !task.is_finished());

        let auth_errors = Arc::clone(&self.auth_errors);
        let task = runtime.spawn(async move {
            match sync.push(prefs).await {
                Ok(()) => debug!("Theme preferences synced"),
                Err(err) if err.is_unauthorized() => {
                    warn!("Theme preference sync was not authorized");
                    auth_errors.on_unauthorized(&err);
                }
                Err(err) => warn!("Theme preference sync failed: {err}"),
            }
        });
        self.pending_sync.push(task);
    }
}

impl fmt::Debug for ThemeStateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStateStore")
            .field("prefs", &self.prefs)
            .field("sync_enabled", &self.sync.is_some())
            .field("pending_sync", &self.pending_sync.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::preferences::StoredPreferences;
    use crate::theme::sync::{NoSession, SyncError, SyncFuture};
    use crate::theme::tokens::TokenName;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FixedSession(Option<StoredPreferences>);

    impl SessionSource for FixedSession {
        fn current_preferences(&self) -> Option<StoredPreferences> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct RecordingSync {
        pushed: Mutex<Vec<ThemePreferences>>,
        fail_with: Option<SyncError>,
    }

    impl PreferenceSync for RecordingSync {
        fn push(&self, prefs: ThemePreferences) -> SyncFuture {
            self.pushed.lock().unwrap().push(prefs);
            let result = self.fail_with.clone().map_or(Ok(()), Err);
            Box::pin(async move { result })
        }
    }

    #[derive(Default)]
    struct CountingAuth(AtomicUsize);

    impl AuthErrorHandler for CountingAuth {
        fn on_unauthorized(&self, _error: &SyncError) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_new_without_session_uses_defaults() {
        let store = ThemeStateStore::new(Arc::new(NoSession));
        assert_eq!(store.preferences(), ThemePreferences::DEFAULT);
        assert_eq!(store.tokens().get(TokenName::PrimaryText), "text-blue-600");
    }

    #[test]
    fn test_new_hydrates_from_session() {
        let stored = StoredPreferences {
            primary_color: Some("purple".to_string()),
            ..StoredPreferences::default()
        };
        let store = ThemeStateStore::new(Arc::new(FixedSession(Some(stored))));
        assert_eq!(store.preferences().primary_color, ColorKey::Purple);
        assert_eq!(store.tokens().primary_color(), ColorKey::Purple);
    }

    #[test]
    fn test_setters_work_without_runtime() {
        let sync = Arc::new(RecordingSync::default());
        let mut store = ThemeStateStore::new(Arc::new(NoSession))
            .with_sync(sync.clone(), Arc::new(IgnoreAuthErrors));
        store.set_font_size(FontSize::Small);
        assert_eq!(store.tokens().font_size, "text-sm");
        assert!(sync.pushed.lock().unwrap().is_empty());
    }

    #[test]
    fn test_each_setter_broadcasts_once() {
        let mut store = ThemeStateStore::new(Arc::new(NoSession));
        let mut changes = store.subscribe();

        store.set_primary_color(ColorKey::Red);
        store.set_font_family(FontFamily::Serif);
        store.set_animations_enabled(false);

        assert_eq!(changes.try_recv().unwrap().primary_color, ColorKey::Red);
        assert_eq!(changes.try_recv().unwrap().font_family, FontFamily::Serif);
        assert!(!changes.try_recv().unwrap().animations_enabled);
        assert!(changes.try_recv().is_err());
    }

    #[test]
    fn test_watch_sees_whole_token_set() {
        let mut store = ThemeStateStore::new(Arc::new(NoSession));
        let tokens = store.watch_tokens();
        store.set_primary_color(ColorKey::Green);
        let latest = *tokens.borrow();
        assert!(latest.iter().all(|(_, class)| class.contains("green")));
    }

    #[tokio::test]
    async fn test_reset_is_single_update() {
        let sync = Arc::new(RecordingSync::default());
        let mut store = ThemeStateStore::new(Arc::new(NoSession))
            .with_sync(sync.clone(), Arc::new(IgnoreAuthErrors));
        store.set_primary_color(ColorKey::Orange);
        store.set_font_size(FontSize::ExtraLarge);
        let mut changes = store.subscribe();

        store.reset_to_default();
        store.flush_sync().await;

        assert_eq!(store.preferences(), ThemePreferences::DEFAULT);
        assert_eq!(changes.try_recv().unwrap(), ThemePreferences::DEFAULT);
        assert!(changes.try_recv().is_err());
        let pushed = sync.pushed.lock().unwrap();
        assert_eq!(pushed.len(), 3);
        assert!(pushed.contains(&ThemePreferences::DEFAULT));
    }

    #[tokio::test]
    async fn test_unauthorized_goes_to_handler() {
        let sync = Arc::new(RecordingSync {
            fail_with: Some(SyncError::Unauthorized),
            ..RecordingSync::default()
        });
        let auth = Arc::new(CountingAuth::default());
        let mut store =
            ThemeStateStore::new(Arc::new(NoSession)).with_sync(sync, auth.clone());

        store.set_primary_color(ColorKey::Red);
        store.flush_sync().await;

        assert_eq!(auth.0.load(Ordering::SeqCst), 1);
        assert_eq!(store.preferences().primary_color, ColorKey::Red);
    }

    #[tokio::test]
    async fn test_network_failure_is_swallowed() {
        let sync = Arc::new(RecordingSync {
            fail_with: Some(SyncError::Transport("offline".to_string())),
            ..RecordingSync::default()
        });
        let auth = Arc::new(CountingAuth::default());
        let mut store =
            ThemeStateStore::new(Arc::new(NoSession)).with_sync(sync, auth.clone());

        store.set_primary_color(ColorKey::Red);
        store.flush_sync().await;

        assert_eq!(auth.0.load(Ordering::SeqCst), 0);
        assert_eq!(store.tokens().get(TokenName::PrimaryBg), "bg-red-600");
    }

    #[test]
    fn test_session_events() {
        let stored = StoredPreferences {
            primary_color: Some("teal".to_string()),
            ..StoredPreferences::default()
        };
        let (tx, rx) = broadcast::channel(4);
        let mut store = ThemeStateStore::new(Arc::new(FixedSession(Some(stored))))
            .with_session_events(rx);
        assert_eq!(store.preferences().primary_color, ColorKey::Teal);

        tx.send(SessionEvent::LoggedOut).unwrap();
        assert_eq!(store.process_session_events(), 1);
        assert_eq!(store.preferences(), ThemePreferences::DEFAULT);

        tx.send(SessionEvent::LoggedIn).unwrap();
        assert_eq!(store.process_session_events(), 1);
        assert_eq!(store.preferences().primary_color, ColorKey::Teal);

        assert_eq!(store.process_session_events(), 0);
    }
}
