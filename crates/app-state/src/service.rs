//! Service identifiers
//!
//! Each business vertical of the marketplace ("service") gets its own theme
//! override and route group. Identifiers arrive as plain strings from the host
//! router; they are parsed once at the boundary into [`ServiceId`] so the rest of
//! the app can match on them exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A business vertical of the app
///
/// [`ServiceId::Unknown`] stands in for any identifier that is not recognized.
/// It is a valid value everywhere and always resolves to the base theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    /// Main app shell (home, search, profile)
    Main,
    /// Courses, exams and tutoring
    Education,
    /// Appointments and reservations
    Booking,
    /// Clinics, doctors and prescriptions
    Healthcare,
    /// Events, tickets and streaming
    Entertainment,
    /// Any identifier the app does not know about
    #[serde(other)]
    Unknown,
}

impl ServiceId {
    /// All known services, in tab order
    pub fn known() -> [ServiceId; 5] {
        [
            ServiceId::Main,
            ServiceId::Education,
            ServiceId::Booking,
            ServiceId::Healthcare,
            ServiceId::Entertainment,
        ]
    }

    /// Stable string form used in routes and config files
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Main => "main",
            ServiceId::Education => "education",
            ServiceId::Booking => "booking",
            ServiceId::Healthcare => "healthcare",
            ServiceId::Entertainment => "entertainment",
            ServiceId::Unknown => "unknown",
        }
    }

    /// Whether this is one of the five real services
    pub fn is_known(&self) -> bool {
        !matches!(self, ServiceId::Unknown)
    }

    /// Parse a service identifier without logging
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn parse_quiet(s: &str) -> ServiceId {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "app" | "home" => ServiceId::Main,
            "education" => ServiceId::Education,
            "booking" => ServiceId::Booking,
            "healthcare" | "health" => ServiceId::Healthcare,
            "entertainment" => ServiceId::Entertainment,
            _ => ServiceId::Unknown,
        }
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = ServiceId::parse_quiet(s);
        if !id.is_known() {
            tracing::warn!(raw = s, "unrecognized service identifier, using base theme");
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_services() {
        assert_eq!("education".parse::<ServiceId>().unwrap(), ServiceId::Education);
        assert_eq!("Booking".parse::<ServiceId>().unwrap(), ServiceId::Booking);
        assert_eq!(" HEALTHCARE ".parse::<ServiceId>().unwrap(), ServiceId::Healthcare);
        assert_eq!("entertainment".parse::<ServiceId>().unwrap(), ServiceId::Entertainment);
        assert_eq!("main".parse::<ServiceId>().unwrap(), ServiceId::Main);
    }

    #[test]
    fn test_parse_unknown_degrades() {
        assert_eq!("groceries".parse::<ServiceId>().unwrap(), ServiceId::Unknown);
        assert_eq!("".parse::<ServiceId>().unwrap(), ServiceId::Unknown);
        assert!(!ServiceId::Unknown.is_known());
    }

    #[test]
    fn test_display_matches_as_str() {
        for id in ServiceId::known() {
            assert_eq!(id.to_string(), id.as_str());
            assert_eq!(ServiceId::parse_quiet(id.as_str()), id);
        }
    }

    #[test]
    fn test_serde_lowercase_and_unknown_fallback() {
        let json = serde_json::to_string(&ServiceId::Healthcare).unwrap();
        assert_eq!(json, "\"healthcare\"");

        let parsed: ServiceId = serde_json::from_str("\"karaoke\"").unwrap();
        assert_eq!(parsed, ServiceId::Unknown);
    }
}
