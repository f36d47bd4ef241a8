//! Enumerated option sets for theme preferences.
//!
//! Every preference field holds one of these values. The string keys are the
//! ones the dashboard and the preference endpoint exchange (`"blue"`,
//! `"font-sans"`, `"text-base"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A string that does not name a member of an option set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey {
    /// Which option set was being parsed (e.g. "color").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownKey {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownKey {}

/// Primary accent color.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey {
    /// Blue (default)
    #[default]
    Blue,
    /// Indigo
    Indigo,
    /// Purple
    Purple,
    /// Pink
    Pink,
    /// Red
    Red,
    /// Orange
    Orange,
    /// Amber
    Amber,
    /// Green
    Green,
    /// Teal
    Teal,
    /// Cyan
    Cyan,
}

impl ColorKey {
    /// All selectable colors, in display order.
    pub const ALL: [Self; 10] = [
        Self::Blue,
        Self::Indigo,
        Self::Purple,
        Self::Pink,
        Self::Red,
        Self::Orange,
        Self::Amber,
        Self::Green,
        Self::Teal,
        Self::Cyan,
    ];

    /// Returns the key interpolated into utility class names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Amber => "amber",
            Self::Green => "green",
            Self::Teal => "teal",
            Self::Cyan => "cyan",
        }
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == key)
            .ok_or_else(|| UnknownKey::new("color", s))
    }
}

/// Font family utility class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// `font-sans` (default)
    #[default]
    #[serde(rename = "font-sans")]
    Sans,
    /// `font-serif`
    #[serde(rename = "font-serif")]
    Serif,
    /// `font-mono`
    #[serde(rename = "font-mono")]
    Mono,
}

impl FontFamily {
    /// All selectable font families.
    pub const ALL: [Self; 3] = [Self::Sans, Self::Serif, Self::Mono];

    /// Returns the utility class for this family.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sans => "font-sans",
            Self::Serif => "font-serif",
            Self::Mono => "font-mono",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontFamily {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == key || family.as_str()["font-".len()..] == key)
            .ok_or_else(|| UnknownKey::new("font family", s))
    }
}

/// Base font size utility class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontSize {
    /// `text-sm`
    #[serde(rename = "text-sm")]
    Small,
    /// `text-base` (default)
    #[default]
    #[serde(rename = "text-base")]
    Base,
    /// `text-lg`
    #[serde(rename = "text-lg")]
    Large,
    /// `text-xl`
    #[serde(rename = "text-xl")]
    ExtraLarge,
}

impl FontSize {
    /// All selectable sizes, smallest first.
    pub const ALL: [Self; 4] = [Self::Small, Self::Base, Self::Large, Self::ExtraLarge];

    /// Returns the utility class for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "text-sm",
            Self::Base => "text-base",
            Self::Large => "text-lg",
            Self::ExtraLarge => "text-xl",
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontSize {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == key || size.as_str()["text-".len()..] == key)
            .ok_or_else(|| UnknownKey::new("font size", s))
    }
}
