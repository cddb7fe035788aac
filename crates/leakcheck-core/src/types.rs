//! Shared types used across LeakCheck.
//!
//! These types form the lookup contract: every backend receives an
//! [`Identifier`] and answers with a [`LeakResult`].

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of identifier being looked up.
///
/// Serialized as lowercase (`email`, `phone`, `login`), matching the
/// `type` query parameter of the lookup service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Email address
    #[default]
    Email,
    /// Phone number
    Phone,
    /// Username / login
    Login,
}

impl QueryKind {
    /// All query kinds, in selector order.
    pub const ALL: [QueryKind; 3] = [QueryKind::Email, QueryKind::Phone, QueryKind::Login];

    /// Wire name of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Login => "login",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "login" => Ok(Self::Login),
            other => Err(ValidationError::InvalidKind {
                value: other.to_string(),
            }),
        }
    }
}

/// A validated, kind-tagged lookup value.
///
/// The only rule enforced is that the value is non-empty after trimming.
/// Format matching (email syntax, phone digits) belongs to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    value: String,
    kind: QueryKind,
}

impl Identifier {
    /// Create an identifier from raw user input.
    ///
    /// The stored value is the trimmed input.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyInput`] if the trimmed input is empty.
    pub fn new(raw: &str, kind: QueryKind) -> Result<Self, ValidationError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        Ok(Self {
            value: value.to_string(),
            kind,
        })
    }

    /// The trimmed identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The declared kind.
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        self.kind
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// Severity tier of a lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No matches found
    Safe,
    /// One or two matches
    Warning,
    /// Three or more matches
    Danger,
}

impl Severity {
    /// Matches at or above this count are classified as [`Severity::Danger`].
    pub const DANGER_THRESHOLD: u32 = 3;

    /// Classify by number of matching leak records.
    #[must_use]
    pub fn from_match_count(count: u32) -> Self {
        if count >= Self::DANGER_THRESHOLD {
            Self::Danger
        } else if count >= 1 {
            Self::Warning
        } else {
            Self::Safe
        }
    }

    /// Wire name of this severity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a completed lookup.
///
/// Invariant: `severity == Safe` iff `match_count == 0` iff `breaches` is
/// empty. `match_count` is an aggregate reported by the backend and is not
/// required to equal `breaches.len()`.
///
/// Serialized in the lookup service wire form:
/// `{"type": "danger", "count": 4, "breaches": ["LinkedIn 2021"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LeakResultWire", into = "LeakResultWire")]
pub struct LeakResult {
    severity: Severity,
    match_count: u32,
    breaches: Vec<String>,
}

impl LeakResult {
    /// A result with no matches.
    #[must_use]
    pub fn safe() -> Self {
        Self {
            severity: Severity::Safe,
            match_count: 0,
            breaches: Vec::new(),
        }
    }

    /// Build a result, checking the safe-iff-empty invariant.
    ///
    /// # Errors
    /// Returns [`ValidationError::InconsistentResult`] if a `Safe` result
    /// carries matches, or a non-`Safe` result carries none.
    pub fn new(
        severity: Severity,
        match_count: u32,
        breaches: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let is_safe = severity == Severity::Safe;
        if is_safe != (match_count == 0) {
            return Err(ValidationError::InconsistentResult {
                reason: format!("severity {severity} with match count {match_count}"),
            });
        }
        if is_safe != breaches.is_empty() {
            return Err(ValidationError::InconsistentResult {
                reason: format!("severity {severity} with {} breach labels", breaches.len()),
            });
        }

        Ok(Self {
            severity,
            match_count,
            breaches,
        })
    }

    /// Classify a list of matched breach labels by their count.
    ///
    /// Three or more labels are `Danger`, one or two `Warning`, none `Safe`.
    #[must_use]
    pub fn from_breach_labels(breaches: Vec<String>) -> Self {
        let match_count = u32::try_from(breaches.len()).unwrap_or(u32::MAX);
        Self {
            severity: Severity::from_match_count(match_count),
            match_count,
            breaches,
        }
    }

    /// Severity tier.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Aggregate number of matches reported by the backend.
    #[must_use]
    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    /// Labels of the matched breaches, in backend order.
    #[must_use]
    pub fn breaches(&self) -> &[String] {
        &self.breaches
    }

    /// Whether no matches were found.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.severity == Severity::Safe
    }
}

#[derive(Serialize, Deserialize)]
struct LeakResultWire {
    #[serde(rename = "type")]
    severity: Severity,
    count: u32,
    #[serde(default)]
    breaches: Vec<String>,
}

impl TryFrom<LeakResultWire> for LeakResult {
    type Error = ValidationError;

    fn try_from(wire: LeakResultWire) -> Result<Self, Self::Error> {
        Self::new(wire.severity, wire.count, wire.breaches)
    }
}

impl From<LeakResult> for LeakResultWire {
    fn from(result: LeakResult) -> Self {
        Self {
            severity: result.severity,
            count: result.match_count,
            breaches: result.breaches,
        }
    }
}

/// A catalogued breach incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachRecord {
    /// Row identifier
    pub id: i64,
    /// Service name, e.g. `LinkedIn`
    pub name: String,
    /// Free-text date of the incident, e.g. `2021`
    pub date: String,
    /// Number of affected records
    pub records: i64,
    /// Human-readable description
    pub description: Option<String>,
}

impl BreachRecord {
    /// Label used in lookup results, e.g. `LinkedIn 2021`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_kind_parse() {
        assert_eq!("email".parse::<QueryKind>().unwrap(), QueryKind::Email);
        assert_eq!("phone".parse::<QueryKind>().unwrap(), QueryKind::Phone);
        assert_eq!("login".parse::<QueryKind>().unwrap(), QueryKind::Login);

        let err = "Email".parse::<QueryKind>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidKind { .. }));
    }

    #[test]
    fn test_query_kind_default_is_email() {
        assert_eq!(QueryKind::default(), QueryKind::Email);
    }

    #[test]
    fn test_identifier_trims() {
        let id = Identifier::new("  user42\t", QueryKind::Login).unwrap();
        assert_eq!(id.value(), "user42");
        assert_eq!(id.kind(), QueryKind::Login);
        assert_eq!(id.to_string(), "login:user42");
    }

    #[test]
    fn test_identifier_rejects_blank() {
        for raw in ["", " ", "\t\n", "   \r\n  "] {
            assert_eq!(
                Identifier::new(raw, QueryKind::Email),
                Err(ValidationError::EmptyInput)
            );
        }
    }

    #[test]
    fn test_identifier_has_no_format_rules() {
        // Not an email, still accepted: the backend owns format matching.
        assert!(Identifier::new("not-an-email", QueryKind::Email).is_ok());
        assert!(Identifier::new("abc", QueryKind::Phone).is_ok());
    }

    #[test]
    fn test_severity_from_match_count() {
        assert_eq!(Severity::from_match_count(0), Severity::Safe);
        assert_eq!(Severity::from_match_count(1), Severity::Warning);
        assert_eq!(Severity::from_match_count(2), Severity::Warning);
        assert_eq!(Severity::from_match_count(3), Severity::Danger);
        assert_eq!(Severity::from_match_count(40), Severity::Danger);
    }

    #[test]
    fn test_leak_result_invariant() {
        assert!(LeakResult::new(Severity::Safe, 0, vec![]).is_ok());
        assert!(LeakResult::new(Severity::Safe, 1, vec![]).is_err());
        assert!(LeakResult::new(Severity::Safe, 0, vec!["X 2020".into()]).is_err());
        assert!(LeakResult::new(Severity::Warning, 0, vec!["X 2020".into()]).is_err());
        assert!(LeakResult::new(Severity::Danger, 5, vec![]).is_err());

        // Count and label list may disagree for non-safe results.
        let result = LeakResult::new(Severity::Danger, 7, vec!["X 2020".into()]).unwrap();
        assert_eq!(result.match_count(), 7);
        assert_eq!(result.breaches().len(), 1);
    }

    #[test]
    fn test_from_breach_labels() {
        assert_eq!(LeakResult::from_breach_labels(vec![]), LeakResult::safe());

        let result = LeakResult::from_breach_labels(vec!["A 2019".into(), "B 2020".into()]);
        assert_eq!(result.severity(), Severity::Warning);
        assert_eq!(result.match_count(), 2);

        let result = LeakResult::from_breach_labels(vec![
            "A 2019".into(),
            "B 2020".into(),
            "C 2021".into(),
        ]);
        assert_eq!(result.severity(), Severity::Danger);
    }

    #[test]
    fn test_leak_result_wire_format() {
        let result = LeakResult::new(Severity::Warning, 1, vec!["Dropbox 2012".into()]).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "warning", "count": 1, "breaches": ["Dropbox 2012"]})
        );

        let parsed: LeakResult =
            serde_json::from_str(r#"{"type":"safe","count":0,"breaches":[]}"#).unwrap();
        assert!(parsed.is_safe());
    }

    #[test]
    fn test_leak_result_wire_rejects_inconsistent() {
        let parsed = serde_json::from_str::<LeakResult>(r#"{"type":"safe","count":2,"breaches":[]}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_breach_label() {
        let record = BreachRecord {
            id: 1,
            name: "LinkedIn".to_string(),
            date: "2021".to_string(),
            records: 700_000_000,
            description: None,
        };
        assert_eq!(record.label(), "LinkedIn 2021");
    }
}
