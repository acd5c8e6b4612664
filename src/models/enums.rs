use serde::{Deserialize, Serialize};

/// Macro to generate a lenient level enum: known labels parse
/// case-insensitively, anything else is kept verbatim in `Unrecognized`.
macro_rules! level_enum {
    ($name:ident { $($variant:ident => $s:literal $(| $alias:literal)*),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unrecognized(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $s,)+
                    Self::Unrecognized(raw) => raw.as_str(),
                }
            }

            pub fn is_recognized(&self) -> bool {
                !matches!(self, Self::Unrecognized(_))
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                let normalized = raw.trim().to_ascii_lowercase();
                $(
                    if normalized == $s.to_ascii_lowercase() $(|| normalized == $alias)* {
                        return Self::$variant;
                    }
                )+
                Self::Unrecognized(raw.trim().to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::from(raw.as_str())
            }
        }

        impl From<$name> for String {
            fn from(level: $name) -> Self {
                level.as_str().to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::Unrecognized(String::new())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

level_enum!(RiskLevel {
    Low => "Low" | "minimal",
    Moderate => "Moderate" | "medium",
    High => "High",
    Critical => "Critical" | "severe",
});

level_enum!(Priority {
    High => "High" | "urgent",
    Medium => "Medium" | "moderate",
    Low => "Low",
});

impl RiskLevel {
    /// Severity rank, higher is worse. Unrecognized levels rank below `Low`.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Unrecognized(_) => 0,
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_parses_case_insensitively() {
        assert_eq!(RiskLevel::from("low"), RiskLevel::Low);
        assert_eq!(RiskLevel::from("MODERATE"), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from(" High "), RiskLevel::High);
        assert_eq!(RiskLevel::from("critical"), RiskLevel::Critical);
    }

    #[test]
    fn risk_level_aliases() {
        assert_eq!(RiskLevel::from("Medium"), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from("severe"), RiskLevel::Critical);
    }

    #[test]
    fn unknown_level_is_kept_verbatim() {
        let level = RiskLevel::from("Elevated-ish");
        assert_eq!(level, RiskLevel::Unrecognized("Elevated-ish".into()));
        assert_eq!(level.as_str(), "Elevated-ish");
        assert!(!level.is_recognized());
    }

    #[test]
    fn serde_round_trips_as_plain_string() {
        let level: RiskLevel = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(level, RiskLevel::High);
        assert_eq!(serde_json::to_string(&level).unwrap(), "\"High\"");

        let odd: Priority = serde_json::from_str("\"whenever\"").unwrap();
        assert_eq!(serde_json::to_string(&odd).unwrap(), "\"whenever\"");
    }

    #[test]
    fn priority_parses() {
        assert_eq!(Priority::from("high"), Priority::High);
        assert_eq!(Priority::from("Medium"), Priority::Medium);
        assert_eq!(Priority::from("low"), Priority::Low);
        assert!(!Priority::from("").is_recognized());
    }

    #[test]
    fn rank_is_monotonic() {
        let levels = [
            RiskLevel::Low,
            RiskLevel::Moderate,
            RiskLevel::High,
            RiskLevel::Critical,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }
}
