//! Severity module - urgency classification for incidents

use std::fmt;

/// Urgency of an incident
///
/// Servers may send tags outside the known three. Those incidents are kept
/// as [`Severity::Unclassified`] with the raw tag and render with the
/// fallback affordance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Requires immediate attention
    Critical,

    /// Needs review
    Warning,

    /// Informational only
    Info,

    /// Any other tag, as sent
    Unclassified(String),
}

/// Display affordance for a severity: the icon and the trailing marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordance {
    /// Icon name
    pub icon: &'static str,
    /// Short trailing marker
    pub marker: &'static str,
}

impl Affordance {
    /// Affordance used when a tag cannot be classified
    pub const fn fallback() -> Self {
        Self {
            icon: "ellipse",
            marker: "-",
        }
    }
}

impl Severity {
    /// Known severities, most urgent first
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Info];

    /// Get the severity tag as a string
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Unclassified(tag) => tag,
        }
    }

    /// Classify a raw tag, keeping unknown values as [`Severity::Unclassified`]
    ///
    /// # Examples
    ///
    /// ```
    /// use pulse_domain::Severity;
    ///
    /// assert_eq!(Severity::from_tag("CRITICAL"), Severity::Critical);
    /// let other = Severity::from_tag("emergency");
    /// assert_eq!(other.as_str(), "emergency");
    /// assert_eq!(other.affordance().icon, "ellipse");
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|| Severity::Unclassified(tag.trim().to_string()))
    }

    /// Whether the tag is one of the known three
    pub fn is_known(&self) -> bool {
        !matches!(self, Severity::Unclassified(_))
    }

    /// Parse a known severity tag (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "warning" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }

    /// Icon and marker used when rendering this severity
    pub fn affordance(&self) -> Affordance {
        match self {
            Severity::Critical => Affordance {
                icon: "alert-circle",
                marker: "!",
            },
            Severity::Warning => Affordance {
                icon: "warning",
                marker: "-",
            },
            Severity::Info => Affordance {
                icon: "information-circle",
                marker: "-",
            },
            Severity::Unclassified(_) => Affordance::fallback(),
        }
    }

    /// Trailing marker: `!` for critical incidents
    pub fn marker(&self) -> &'static str {
        self.affordance().marker
    }

    /// Affordance for a raw tag, falling back for unknown values
    pub fn affordance_for_tag(tag: &str) -> Affordance {
        Self::from_tag(tag).affordance()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid severity: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("critical"), Some(Severity::Critical));
        assert_eq!(Severity::parse("Warning"), Some(Severity::Warning));
        assert_eq!(Severity::parse(" INFO "), Some(Severity::Info));
        assert_eq!(Severity::parse("fatal"), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("critical".parse::<Severity>().is_ok());
        let err = "urgent".parse::<Severity>().unwrap_err();
        assert!(err.contains("urgent"));
    }

    #[test]
    fn test_affordances() {
        assert_eq!(Severity::Critical.affordance().icon, "alert-circle");
        assert_eq!(Severity::Warning.affordance().icon, "warning");
        assert_eq!(Severity::Info.affordance().icon, "information-circle");
        assert_eq!(Severity::Critical.marker(), "!");
        assert_eq!(Severity::Info.marker(), "-");
    }

    #[test]
    fn test_unknown_tag_uses_fallback_affordance() {
        assert_eq!(Severity::affordance_for_tag("bogus"), Affordance::fallback());
        assert_eq!(Severity::affordance_for_tag("bogus").icon, "ellipse");
        assert_eq!(
            Severity::affordance_for_tag("critical"),
            Severity::Critical.affordance()
        );
    }

    #[test]
    fn test_from_tag_keeps_unknown_values() {
        assert_eq!(Severity::from_tag(" Warning "), Severity::Warning);

        let other = Severity::from_tag("emergency");
        assert_eq!(other, Severity::Unclassified("emergency".to_string()));
        assert!(!other.is_known());
        assert_eq!(other.to_string(), "emergency");
        assert_eq!(other.affordance(), Affordance::fallback());
        assert!(Severity::Critical.is_known());
    }

    #[test]
    fn test_ordering_most_urgent_first() {
        let mut all = vec![
            Severity::Unclassified("x".to_string()),
            Severity::Info,
            Severity::Critical,
            Severity::Warning,
        ];
        all.sort();
        assert_eq!(&all[..3], &Severity::ALL[..]);
        assert!(!all[3].is_known());
    }
}
