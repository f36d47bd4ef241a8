//! Theme preferences and derived presentation tokens.
//!
//! - [`palette`]: enumerated colors, font families and font sizes
//! - [`preferences`]: the preference tuple and its loosely typed stored form
//! - [`tokens`]: pure derivation of class-string tokens
//! - [`sync`]: injected collaborators (session source, remote sync, auth handler)
//! - [`store`]: the stateful store tying them together

pub mod palette;
pub mod preferences;
pub mod store;
pub mod sync;
pub mod tokens;

pub use palette::{ColorKey, FontFamily, FontSize, UnknownKey};
pub use preferences::{StoredPreferences, ThemePreferences};
pub use store::ThemeStateStore;
pub use sync::{
    AuthErrorHandler, IgnoreAuthErrors, NoSession, PreferenceSync, SessionEvent, SessionSource,
    SyncError, SyncFuture,
};
pub use tokens::{derive_tokens, ThemeTokens, TokenName};
