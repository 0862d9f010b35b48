use serde::{Deserialize, Serialize};

/// Vault selector: either every vault, or a single vault address. The wire
/// representation is the literal string `all` or the vault's token address.
#[derive(Debug, Clone, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VaultFilter {
    #[default]
    All,
    Vault(String),
}

impl VaultFilter {
    /// Whether the given token address passes this filter.
    pub fn matches(&self, token_address: &str) -> bool {
        match self {
            Self::All => true,
            Self::Vault(vault) => vault.eq_ignore_ascii_case(token_address),
        }
    }
}

impl From<String> for VaultFilter {
    fn from(value: String) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Vault(value)
        }
    }
}

impl From<VaultFilter> for String {
    fn from(value: VaultFilter) -> Self {
        match value {
            VaultFilter::All => "all".to_string(),
            VaultFilter::Vault(vault) => vault,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel() {
        assert_eq!(VaultFilter::from("all".to_string()), VaultFilter::All);
        assert_eq!(VaultFilter::from("ALL".to_string()), VaultFilter::All);
        assert_eq!(VaultFilter::from(String::new()), VaultFilter::All);
    }

    #[test]
    fn test_vault_match_is_case_insensitive() {
        let filter = VaultFilter::from("0xE567DCf433F97d787dF2359bDBF95dFd2B7aBF4E".to_string());
        assert!(filter.matches("0xe567dcf433f97d787df2359bdbf95dfd2b7abf4e"));
        assert!(!filter.matches("0xdE6d401E4B651F313edB7da0A11e072EEf4Ce7BE"));
    }
}
