use std::collections::HashSet;

use serde::Deserialize;

use crate::error::EngineError;

/// Addresses excluded from derived views when the matching toggle is active:
/// team wallets on one side, protocol contract addresses on the other.
/// Membership is a case-insensitive exact match; the sets are stored
/// lower-cased.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    team: HashSet<String>,
    contracts: HashSet<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ExclusionFile {
    #[serde(default)]
    team: Vec<String>,
    #[serde(default)]
    contracts: Vec<String>,
}

impl ExclusionSet {
    pub fn new<T, C>(team: T, contracts: C) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Self {
            team: team.into_iter().map(|a| a.as_ref().to_lowercase()).collect(),
            contracts: contracts
                .into_iter()
                .map(|a| a.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Parse a `{ "team": [...], "contracts": [...] }` document. Both keys are
    /// optional; addresses are normalized to lower case.
    pub fn from_json_str(raw: &str) -> Result<Self, EngineError> {
        let file: ExclusionFile = serde_json::from_str(raw)?;
        Ok(Self::new(file.team, file.contracts))
    }

    pub fn is_team(&self, address: &str) -> bool {
        self.team.contains(&address.to_lowercase())
    }

    pub fn is_contract(&self, address: &str) -> bool {
        self.contracts.contains(&address.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.team.is_empty() && self.contracts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.team.len() + self.contracts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_is_case_insensitive() {
        let exclusions = ExclusionSet::new(["0xAbCd"], ["0xFF00"]);
        assert!(exclusions.is_team("0xabcd"));
        assert!(exclusions.is_team("0xABCD"));
        assert!(exclusions.is_contract("0xff00"));
        assert!(!exclusions.is_team("0xff00"));
        assert!(!exclusions.is_contract("0xabcd"));
    }

    #[test]
    fn test_from_json_str() {
        let exclusions =
            ExclusionSet::from_json_str(r#"{ "team": ["0xAA"], "contracts": ["0xBB", "0xCC"] }"#)
                .unwrap();
        assert_eq!(exclusions.len(), 3);
        assert!(exclusions.is_team("0xaa"));
        assert!(exclusions.is_contract("0xcc"));
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let exclusions = ExclusionSet::from_json_str("{}").unwrap();
        assert!(exclusions.is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(ExclusionSet::from_json_str("not json").is_err());
    }
}
