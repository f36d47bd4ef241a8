//! Theme preference records.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::palette::{ColorKey, FontFamily, FontSize};

/// The four user-selectable theme preferences.
///
/// Every field is an enumerated value, so a `ThemePreferences` can never hold
/// a key that would produce a malformed derived token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePreferences {
    /// Accent color interpolated into the primary tokens
    pub primary_color: ColorKey,
    /// Font family class
    pub font_family: FontFamily,
    /// Base font size class
    pub font_size: FontSize,
    /// Whether transitions and animations are enabled
    #[serde(rename = "animations")]
    pub animations_enabled: bool,
}

impl ThemePreferences {
    /// The fixed default tuple: blue, `font-sans`, `text-base`, animations on.
    pub const DEFAULT: Self = Self {
        primary_color: ColorKey::Blue,
        font_family: FontFamily::Sans,
        font_size: FontSize::Base,
        animations_enabled: true,
    };
}

impl Default for ThemePreferences {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Preferences as stored on a user/session record.
///
/// The record comes from outside the process, so every field is optional and
/// loosely typed. [`StoredPreferences::resolve`] turns it into a valid
/// [`ThemePreferences`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPreferences {
    /// Raw color key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    /// Raw font family key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Raw font size key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    /// Animations flag
    #[serde(default, rename = "animations", skip_serializing_if = "Option::is_none")]
    pub animations_enabled: Option<bool>,
}

impl StoredPreferences {
    /// Returns true when the record carries no preference data at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary_color.is_none()
            && self.font_family.is_none()
            && self.font_size.is_none()
            && self.animations_enabled.is_none()
    }

    /// Resolves the record into valid preferences.
    ///
    /// Missing fields take their default. Unrecognised keys are clamped to the
    /// default as well and logged, never passed through.
    #[must_use]
    pub fn resolve(&self) -> ThemePreferences {
        let defaults = ThemePreferences::DEFAULT;
        ThemePreferences {
            primary_color: parse_or_default(self.primary_color.as_deref(), defaults.primary_color),
            font_family: parse_or_default(self.font_family.as_deref(), defaults.font_family),
            font_size: parse_or_default(self.font_size.as_deref(), defaults.font_size),
            animations_enabled: self
                .animations_enabled
                .unwrap_or(defaults.animations_enabled),
        }
    }
}

impl From<ThemePreferences> for StoredPreferences {
    fn from(prefs: ThemePreferences) -> Self {
        Self {
            primary_color: Some(prefs.primary_color.to_string()),
            font_family: Some(prefs.font_family.to_string()),
            font_size: Some(prefs.font_size.to_string()),
            animations_enabled: Some(prefs.animations_enabled),
        }
    }
}

fn parse_or_default<T>(raw: Option<&str>, default: T) -> T
where
    T: std::str::FromStr<Err = super::palette::UnknownKey>,
{
    match raw.map(str::parse::<T>) {
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            warn!("Ignoring stored theme preference: {err}");
            default
        }
        None => default,
    }
}
