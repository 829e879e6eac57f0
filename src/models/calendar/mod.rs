// Calendar module
// Owner-scoped calendar with a fixed color palette

use serde::{Deserialize, Serialize};

/// Palette key for calendar colors.
///
/// The remote store persists these as lowercase strings. Keys outside the
/// palette are mapped to the blue fallback when records are converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarColor {
    Blue,
    Green,
    Purple,
    Red,
    Yellow,
    Indigo,
}

impl Default for CalendarColor {
    fn default() -> Self {
        Self::Blue
    }
}

impl CalendarColor {
    /// Parse a stored color key. Returns `None` for anything outside the
    /// palette; callers decide whether to fall back.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "purple" => Some(Self::Purple),
            "red" => Some(Self::Red),
            "yellow" => Some(Self::Yellow),
            "indigo" => Some(Self::Indigo),
            _ => None,
        }
    }

    /// The stored string form of this key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Indigo => "indigo",
        }
    }
}

/// A user-owned calendar that groups events.
///
/// Calendars are created, edited and deleted only through the persistence
/// boundary; the grid reads them for color lookup and never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    pub id: String,
    pub name: String,
    pub color: CalendarColor,
    pub owner_id: String,
}

impl Calendar {
    /// Validate the calendar
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Calendar name cannot be empty".to_string());
        }
        Ok(())
    }
}
