//! Typed configuration parsed from the environment.

use std::str::FromStr;

/// Controls whether inbound webhook signatures are checked.
///
/// The bypass exists for local development against unsigned replays. It is
/// never inferred from a deployment-stage variable; it has to be set
/// explicitly, and anything unrecognized resolves to `Enforced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationMode {
    #[default]
    Enforced,
    Bypassed,
}

impl FromStr for VerificationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforced" => Ok(VerificationMode::Enforced),
            "bypassed" => Ok(VerificationMode::Bypassed),
            other => Err(format!("unknown verification mode '{}'", other)),
        }
    }
}

impl VerificationMode {
    /// Parse an environment value, staying enforced on anything unrecognized.
    pub fn from_env_value(value: &str) -> Self {
        value.parse().unwrap_or_else(|e: String| {
            log::warn!("{}, signature verification stays enforced", e);
            VerificationMode::Enforced
        })
    }
}

/// One registered identity provider and the URL of its published key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProviderConfig {
    pub id: String,
    pub jwks_url: String,
}

/// Parse the `IDENTITY_PROVIDERS` value: comma-separated `id=jwks_url` pairs.
pub fn parse_identity_providers(value: &str) -> Result<Vec<IdentityProviderConfig>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (id, jwks_url) = entry
                .split_once('=')
                .ok_or_else(|| format!("invalid provider entry '{}', expected id=jwks_url", entry))?;
            let (id, jwks_url) = (id.trim(), jwks_url.trim());
            if id.is_empty() || jwks_url.is_empty() {
                return Err(format!("invalid provider entry '{}', expected id=jwks_url", entry));
            }
            Ok(IdentityProviderConfig {
                id: id.to_string(),
                jwks_url: jwks_url.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_mode_defaults_to_enforced() {
        assert_eq!(VerificationMode::default(), VerificationMode::Enforced);
    }

    #[test]
    fn test_verification_mode_parses_both_values() {
        assert_eq!(
            "enforced".parse::<VerificationMode>().unwrap(),
            VerificationMode::Enforced
        );
        assert_eq!(
            "Bypassed".parse::<VerificationMode>().unwrap(),
            VerificationMode::Bypassed
        );
    }

    #[test]
    fn test_unknown_verification_mode_stays_enforced() {
        assert_eq!(
            VerificationMode::from_env_value("disabled"),
            VerificationMode::Enforced
        );
    }

    #[test]
    fn test_parse_identity_providers() {
        let providers = parse_identity_providers(
            "privy=https://auth.example.com/jwks.json, worldid=https://id.example.org/.well-known/jwks.json",
        )
        .unwrap();
        assert_eq!(providers.len(), 2);
        assert_eq!(providers[0].id, "privy");
        assert_eq!(providers[0].jwks_url, "https://auth.example.com/jwks.json");
        assert_eq!(providers[1].id, "worldid");
    }

    #[test]
    fn test_parse_identity_providers_rejects_malformed_entries() {
        assert!(parse_identity_providers("no-url-here").is_err());
        assert!(parse_identity_providers("id=").is_err());
        assert!(parse_identity_providers("=https://example.com").is_err());
    }

    #[test]
    fn test_parse_identity_providers_empty_value() {
        assert!(parse_identity_providers("").unwrap().is_empty());
    }
}
