//! Symptom intake and assessment domain models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest selectable severity
pub const MIN_SEVERITY: u8 = 1;

/// Highest selectable severity
pub const MAX_SEVERITY: u8 = 10;

/// Severity preselected by the wizard (midpoint of the scale)
pub const DEFAULT_SEVERITY: u8 = 5;

/// Gender as collected by the intake wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other / prefer not to say
    Other,
}

impl Gender {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            other => Err(format!(
                "Invalid gender '{other}'. Must be one of: male, female, other"
            )),
        }
    }
}

/// Payload submitted to the symptom analysis endpoint
///
/// Built by the intake wizard from its form state at submission time.
/// `age` is `None` when the entered text did not start with a number; the
/// payload is sent regardless and the server decides whether it is valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymptomIntake {
    /// Free-text description of the symptoms
    pub symptoms: String,
    /// Age in years, as parsed from the entered text
    pub age: Option<i64>,
    /// Selected gender
    pub gender: Gender,
    /// How long the symptoms have lasted, e.g. "2 days"
    pub duration: String,
    /// Severity on a 1..=10 scale
    pub severity: u8,
}

/// Parses an age the way a browser's `parseInt` does
///
/// Leading whitespace and an optional sign are accepted, then the longest run
/// of ASCII digits is taken and anything after it is ignored. Returns `None`
/// when no digit follows.
///
/// ```
/// use mediclear::domain::symptoms::parse_age;
///
/// assert_eq!(parse_age("34"), Some(34));
/// assert_eq!(parse_age(" 34 years"), Some(34));
/// assert_eq!(parse_age("thirty"), None);
/// ```
pub fn parse_age(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Urgency classification returned by the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UrgencyLevel {
    /// Self-care is likely sufficient
    Normal,
    /// See a clinician soon
    Moderate,
    /// Seek care immediately
    Urgent,
    /// A level this client does not know about
    #[serde(other)]
    Unknown,
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UrgencyLevel::Normal => "NORMAL",
            UrgencyLevel::Moderate => "MODERATE",
            UrgencyLevel::Urgent => "URGENT",
            UrgencyLevel::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// One candidate condition in an assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PossibleCondition {
    /// Condition name
    pub condition: String,
    /// Likelihood in percent (0..=100)
    pub probability: u8,
    /// Plain-language description
    pub description: String,
}

/// Result of a symptom analysis
///
/// Read-only once received. The wizard holds at most one at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymptomAssessment {
    /// Server-issued identifier, when provided
    pub assessment_id: Option<String>,
    /// Urgency classification
    pub urgency_level: UrgencyLevel,
    /// Urgency score (0..=100)
    pub urgency_score: u8,
    /// Candidate conditions, most likely first
    pub possible_conditions: Vec<PossibleCondition>,
    /// Tests worth asking a clinician about
    pub recommended_tests: Vec<String>,
    /// Things to do now
    pub action_items: Vec<String>,
    /// Signs that warrant escalation
    pub warning_signs: Vec<String>,
    /// When to seek care
    pub when_to_seek_care: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_age_leading_integer() {
        assert_eq!(parse_age("34"), Some(34));
        assert_eq!(parse_age("  7"), Some(7));
        assert_eq!(parse_age("34abc"), Some(34));
        assert_eq!(parse_age("12.9"), Some(12));
        assert_eq!(parse_age("-3"), Some(-3));
        assert_eq!(parse_age("+40"), Some(40));
    }

    #[test]
    fn test_parse_age_non_numeric() {
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("abc"), None);
        assert_eq!(parse_age("-"), None);
        assert_eq!(parse_age("x34"), None);
    }

    #[test]
    fn test_gender_from_str() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" female ".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("o".parse::<Gender>().unwrap(), Gender::Other);
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn test_intake_serializes_unparsed_age_as_null() {
        let intake = SymptomIntake {
            symptoms: "cough".into(),
            age: None,
            gender: Gender::Other,
            duration: "1 week".into(),
            severity: DEFAULT_SEVERITY,
        };
        let json = serde_json::to_value(&intake).unwrap();
        assert!(json["age"].is_null());
        assert_eq!(json["gender"], "other");
        assert_eq!(json["severity"], 5);
    }

    #[test]
    fn test_urgency_level_unknown_fallback() {
        let level: UrgencyLevel = serde_json::from_str("\"URGENT\"").unwrap();
        assert_eq!(level, UrgencyLevel::Urgent);
        let level: UrgencyLevel = serde_json::from_str("\"CRITICAL\"").unwrap();
        assert_eq!(level, UrgencyLevel::Unknown);
    }
}
