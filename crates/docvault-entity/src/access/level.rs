//! Access level enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use docvault_core::{AppError, ErrorCode};

/// Privilege tier a user holds on a folder.
///
/// Totally ordered: `Unset < None < Viewer < Uploader < Publisher`.
/// `Unset` only appears in requests and is never stored or resolved.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum AccessLevel {
    /// Not specified.
    #[default]
    Unset = 0,
    /// No access.
    None = 1,
    /// May list the folder and read published files.
    Viewer = 2,
    /// May additionally create files.
    Uploader = 3,
    /// Full control over the folder's content.
    Publisher = 4,
}

impl AccessLevel {
    /// The highest level; resolution stops once it is reached.
    pub const MAX: Self = Self::Publisher;

    /// Return the numeric privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        *self as u8
    }

    /// Check if this level grants at least `required`.
    pub fn has_at_least(&self, required: AccessLevel) -> bool {
        *self >= required
    }

    /// Returns `true` for the `Unset` sentinel.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Collapse `Unset` into `None` so it can be used as "not provided".
    pub fn specified(self) -> Option<Self> {
        if self.is_unset() { Option::None } else { Some(self) }
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::None => "none",
            Self::Viewer => "viewer",
            Self::Uploader => "uploader",
            Self::Publisher => "publisher",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for AccessLevel {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unset),
            1 => Ok(Self::None),
            2 => Ok(Self::Viewer),
            3 => Ok(Self::Uploader),
            4 => Ok(Self::Publisher),
            _ => Err(ErrorCode::InvalidAccessLevel.into()),
        }
    }
}

impl FromStr for AccessLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(raw) = s.parse::<u8>() {
            return Self::try_from(raw);
        }
        match s.to_lowercase().as_str() {
            "unset" => Ok(Self::Unset),
            "none" => Ok(Self::None),
            "viewer" => Ok(Self::Viewer),
            "uploader" => Ok(Self::Uploader),
            "publisher" => Ok(Self::Publisher),
            _ => Err(ErrorCode::InvalidAccessLevel.into()),
        }
    }
}
