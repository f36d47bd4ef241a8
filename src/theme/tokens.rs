//! Derived presentation tokens.
//!
//! Tokens are utility class strings built from the primary color. The full
//! table of `(TokenName, ColorKey)` pairs is generated once, so every class
//! the renderer can ever receive is enumerable up front and token derivation
//! is a handful of table lookups.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use super::palette::ColorKey;
use super::preferences::ThemePreferences;

/// Placeholder replaced with the color key inside a template.
const COLOR_PLACEHOLDER: &str = "{color}";

/// Number of color-dependent tokens.
pub const TOKEN_COUNT: usize = TokenName::ALL.len();

/// Name of a color-dependent token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenName {
    /// Accent text
    PrimaryText,
    /// Accent text on hover
    PrimaryTextHover,
    /// Solid accent background
    PrimaryBg,
    /// Solid accent background on hover
    PrimaryBgHover,
    /// Tinted accent background
    PrimaryBgLight,
    /// Filled button
    PrimaryButton,
    /// Accent border
    PrimaryBorder,
    /// Focus ring
    PrimaryRing,
    /// Horizontal accent gradient
    PrimaryGradient,
    /// Badge/pill
    PrimaryBadge,
}

impl TokenName {
    /// Every token name, in table order.
    pub const ALL: [Self; 10] = [
        Self::PrimaryText,
        Self::PrimaryTextHover,
        Self::PrimaryBg,
        Self::PrimaryBgHover,
        Self::PrimaryBgLight,
        Self::PrimaryButton,
        Self::PrimaryBorder,
        Self::PrimaryRing,
        Self::PrimaryGradient,
        Self::PrimaryBadge,
    ];

    /// Class template; `{color}` is replaced with the color key.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::PrimaryText => "text-{color}-600",
            Self::PrimaryTextHover => "hover:text-{color}-700",
            Self::PrimaryBg => "bg-{color}-600",
            Self::PrimaryBgHover => "hover:bg-{color}-700",
            Self::PrimaryBgLight => "bg-{color}-50",
            Self::PrimaryButton => "bg-{color}-600 hover:bg-{color}-700 text-white",
            Self::PrimaryBorder => "border-{color}-500",
            Self::PrimaryRing => "focus:ring-{color}-500",
            Self::PrimaryGradient => "bg-gradient-to-r from-{color}-500 to-{color}-700",
            Self::PrimaryBadge => "bg-{color}-100 text-{color}-800",
        }
    }

    /// Key under which the token is exposed to the renderer.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::PrimaryText => "primaryText",
            Self::PrimaryTextHover => "primaryTextHover",
            Self::PrimaryBg => "primaryBg",
            Self::PrimaryBgHover => "primaryBgHover",
            Self::PrimaryBgLight => "primaryBgLight",
            Self::PrimaryButton => "primaryButton",
            Self::PrimaryBorder => "primaryBorder",
            Self::PrimaryRing => "primaryRing",
            Self::PrimaryGradient => "primaryGradient",
            Self::PrimaryBadge => "primaryBadge",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

static TOKEN_TABLE: LazyLock<HashMap<(TokenName, ColorKey), String>> = LazyLock::new(|| {
    let mut table = HashMap::with_capacity(TOKEN_COUNT * ColorKey::ALL.len());
    for name in TokenName::ALL {
        for color in ColorKey::ALL {
            let class = name.template().replace(COLOR_PLACEHOLDER, color.as_str());
            table.insert((name, color), class);
        }
    }
    table
});

/// Looks up the class string for one token and color.
#[must_use]
pub fn lookup(name: TokenName, color: ColorKey) -> &'static str {
    // The table is total over both enums.
    TOKEN_TABLE
        .get(&(name, color))
        .map_or("", String::as_str)
}

/// Returns every class string the renderer can receive for color tokens.
pub fn all_classes() -> impl Iterator<Item = ((TokenName, ColorKey), &'static str)> {
    TOKEN_TABLE.iter().map(|(key, class)| (*key, class.as_str()))
}

/// Read-only token set derived from a [`ThemePreferences`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    primary_color: ColorKey,
    primary: [&'static str; TOKEN_COUNT],
    /// Font family class (passthrough)
    pub font_family: &'static str,
    /// Font size class (passthrough)
    pub font_size: &'static str,
    /// Animations flag (passthrough)
    pub animations: bool,
}

impl ThemeTokens {
    /// Returns the class string for a color token.
    #[must_use]
    pub fn get(&self, name: TokenName) -> &'static str {
        self.primary[name.index()]
    }

    /// Color the primary tokens were derived from.
    #[must_use]
    pub const fn primary_color(&self) -> ColorKey {
        self.primary_color
    }

    /// Iterates the color tokens in [`TokenName::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenName, &'static str)> + '_ {
        TokenName::ALL.into_iter().map(|name| (name, self.get(name)))
    }

    /// Class applied to animated elements.
    #[must_use]
    pub const fn transition_class(&self) -> &'static str {
        if self.animations {
            "transition-all duration-200"
        } else {
            "transition-none"
        }
    }
}

impl Default for ThemeTokens {
    fn default() -> Self {
        derive_tokens(&ThemePreferences::DEFAULT)
    }
}

/// Derives the full token set from preferences.
///
/// Pure: the same preferences always give an identical token set. All four
/// fields are read in one step, the whole set is rebuilt every time.
#[must_use]
pub fn derive_tokens(prefs: &ThemePreferences) -> ThemeTokens {
    let color = prefs.primary_color;
    ThemeTokens {
        primary_color: color,
        primary: TokenName::ALL.map(|name| lookup(name, color)),
        font_family: prefs.font_family.as_str(),
        font_size: prefs.font_size.as_str(),
        animations: prefs.animations_enabled,
    }
}
