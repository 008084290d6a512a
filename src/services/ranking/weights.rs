use std::collections::HashMap;

use crate::{
    error::RankingError,
    models::{Kind, KindWeights, UserType},
};

/// Largest multiplier a user type may apply to a kind
pub const MAX_USER_WEIGHT: f64 = 1e3;

/// User-type weight table
///
/// Every user type resolves to a full [`KindWeights`]; anonymous or unknown
/// requesters get the neutral table.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    fan: KindWeights,
    sponsor: KindWeights,
    talent: KindWeights,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            fan: KindWeights {
                video: 1.5,
                project: 1.0,
                challenge: 0.8,
            },
            sponsor: KindWeights {
                video: 0.9,
                project: 1.3,
                challenge: 1.4,
            },
            talent: KindWeights {
                video: 1.0,
                project: 1.4,
                challenge: 1.2,
            },
        }
    }
}

impl WeightTable {
    pub fn weights_for(&self, user_type: Option<UserType>) -> KindWeights {
        match user_type {
            Some(UserType::Fan) => self.fan,
            Some(UserType::Sponsor) => self.sponsor,
            Some(UserType::Talent) => self.talent,
            None => KindWeights::NEUTRAL,
        }
    }

    /// Builds a table from configuration, e.g. `{"fan": {"video": 2.0, ...}}`.
    ///
    /// User types absent from `raw` keep their built-in weights. A listed user
    /// type must give a strictly positive weight for every kind.
    pub fn from_overrides(
        raw: &HashMap<String, HashMap<String, f64>>,
    ) -> Result<Self, RankingError> {
        let mut table = Self::default();

        for (label, kinds) in raw {
            let user_type = UserType::resolve(Some(label.as_str())).ok_or_else(|| {
                RankingError::Configuration(format!("unknown user type '{}' in weight table", label))
            })?;

            let mut resolved: HashMap<Kind, f64> = HashMap::new();
            for (kind_label, weight) in kinds {
                let kind = Kind::parse(kind_label).ok_or_else(|| {
                    RankingError::Configuration(format!(
                        "unknown kind '{}' in weights for '{}'",
                        kind_label, label
                    ))
                })?;
                resolved.insert(kind, *weight);
            }

            let weights = KindWeights {
                video: required_weight(&resolved, user_type, Kind::Video)?,
                project: required_weight(&resolved, user_type, Kind::Project)?,
                challenge: required_weight(&resolved, user_type, Kind::Challenge)?,
            };

            match user_type {
                UserType::Fan => table.fan = weights,
                UserType::Sponsor => table.sponsor = weights,
                UserType::Talent => table.talent = weights,
            }
        }

        Ok(table)
    }
}

fn required_weight(
    resolved: &HashMap<Kind, f64>,
    user_type: UserType,
    kind: Kind,
) -> Result<f64, RankingError> {
    let weight = resolved.get(&kind).copied().ok_or_else(|| {
        RankingError::Configuration(format!("weights for '{}' are missing '{}'", user_type, kind))
    })?;

    if !weight.is_finite() || weight <= 0.0 || weight > MAX_USER_WEIGHT {
        return Err(RankingError::Configuration(format!(
            "weight for '{}'/'{}' must be positive and at most {}, got {}",
            user_type, kind, MAX_USER_WEIGHT, weight
        )));
    }

    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(entries: Vec<(&str, Vec<(&str, f64)>)>) -> HashMap<String, HashMap<String, f64>> {
        entries
            .into_iter()
            .map(|(user, kinds)| {
                (
                    user.to_string(),
                    kinds.into_iter().map(|(k, w)| (k.to_string(), w)).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_default_weights_are_positive() {
        let table = WeightTable::default();
        let user_types = [
            Some(UserType::Fan),
            Some(UserType::Sponsor),
            Some(UserType::Talent),
            None,
        ];
        for user_type in user_types {
            let weights = table.weights_for(user_type);
            for kind in Kind::ALL {
                assert!(weights.get(kind) > 0.0, "{:?}/{}", user_type, kind);
            }
        }
    }

    #[test]
    fn test_fan_prefers_videos() {
        let weights = WeightTable::default().weights_for(Some(UserType::Fan));
        assert_eq!(weights.video, 1.5);
        assert_eq!(weights.challenge, 0.8);
    }

    #[test]
    fn test_anonymous_is_neutral() {
        assert_eq!(WeightTable::default().weights_for(None), KindWeights::NEUTRAL);
    }

    #[test]
    fn test_overrides_replace_one_user_type() {
        let raw = overrides(vec![("talent", vec![("video", 0.5), ("project", 2.0), ("desafio", 1.1)])]);
        let table = WeightTable::from_overrides(&raw).unwrap();
        assert_eq!(
            table.weights_for(Some(UserType::Talent)),
            KindWeights {
                video: 0.5,
                project: 2.0,
                challenge: 1.1
            }
        );
        assert_eq!(
            table.weights_for(Some(UserType::Fan)),
            WeightTable::default().weights_for(Some(UserType::Fan))
        );
    }

    #[test]
    fn test_overrides_must_cover_every_kind() {
        let raw = overrides(vec![("fan", vec![("video", 1.2), ("project", 1.0)])]);
        let err = WeightTable::from_overrides(&raw).unwrap_err();
        assert!(matches!(err, RankingError::Configuration(msg) if msg.contains("challenge")));
    }

    #[test]
    fn test_overrides_reject_zero_weight() {
        let raw = overrides(vec![("sponsor", vec![("video", 0.0), ("project", 1.0), ("challenge", 1.0)])]);
        assert!(WeightTable::from_overrides(&raw).is_err());
    }

    #[test]
    fn test_overrides_reject_oversized_weight() {
        let raw = overrides(vec![("fan", vec![("video", 1e308), ("project", 1.0), ("challenge", 1.0)])]);
        let err = WeightTable::from_overrides(&raw).unwrap_err();
        assert!(matches!(err, RankingError::Configuration(msg) if msg.contains("video")));

        let raw = overrides(vec![("fan", vec![("video", MAX_USER_WEIGHT), ("project", 1.0), ("challenge", 1.0)])]);
        assert!(WeightTable::from_overrides(&raw).is_ok());
    }

    #[test]
    fn test_overrides_reject_unknown_labels() {
        let raw = overrides(vec![("admin", vec![("video", 1.0)])]);
        assert!(WeightTable::from_overrides(&raw).is_err());

        let raw = overrides(vec![("fan", vec![("podcast", 1.0)])]);
        assert!(WeightTable::from_overrides(&raw).is_err());
    }
}
