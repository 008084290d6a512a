use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Role of the requesting user, used to personalize content weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Fan,
    Sponsor,
    Talent,
}

impl UserType {
    /// Resolves a raw user type label.
    ///
    /// Unknown labels and anonymous requests resolve to `None`, which the
    /// weight table treats as neutral.
    pub fn resolve(raw: Option<&str>) -> Option<UserType> {
        match raw?.trim().to_ascii_lowercase().as_str() {
            "fan" => Some(UserType::Fan),
            "sponsor" => Some(UserType::Sponsor),
            "talent" => Some(UserType::Talent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Fan => "fan",
            UserType::Sponsor => "sponsor",
            UserType::Talent => "talent",
        }
    }
}

impl Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_types() {
        assert_eq!(UserType::resolve(Some("fan")), Some(UserType::Fan));
        assert_eq!(UserType::resolve(Some("SPONSOR")), Some(UserType::Sponsor));
        assert_eq!(UserType::resolve(Some(" talent")), Some(UserType::Talent));
    }

    #[test]
    fn test_resolve_unknown_or_missing_is_neutral() {
        assert_eq!(UserType::resolve(None), None);
        assert_eq!(UserType::resolve(Some("admin")), None);
        assert_eq!(UserType::resolve(Some("")), None);
    }
}
