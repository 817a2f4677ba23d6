//! Rate provider configuration model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DomainError;

/// Unique identifier for a Provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProviderId(Uuid);

impl ProviderId {
    /// Creates a new random ProviderId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ProviderId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProviderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProviderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Which concrete fetch implementation a provider record selects.
///
/// Stored explicitly alongside the record rather than inferred from the
/// provider name, so renaming a provider never changes its behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Live HTTP client for the CurrencyBeacon historical-rates API
    CurrencyBeacon,
    /// Pseudo-random rate generator for test and staging environments
    Synthetic,
}

impl ProviderKind {
    /// Returns the stable string form used in storage and APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::CurrencyBeacon => "currency_beacon",
            ProviderKind::Synthetic => "synthetic",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "currency_beacon" => Ok(ProviderKind::CurrencyBeacon),
            "synthetic" => Ok(ProviderKind::Synthetic),
            other => Err(DomainError::UnknownProviderKind(other.to_string())),
        }
    }
}

/// A configured rate provider.
///
/// The ingestion pipeline reads a fresh snapshot of active providers ordered
/// by ascending priority at the start of each resolution attempt; activation
/// and priority changes take effect on the next call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Provider {
    /// Unique identifier
    pub id: ProviderId,
    /// Human-readable name, unique
    #[schema(example = "currencybeacon")]
    pub name: String,
    /// Concrete fetch implementation to use
    pub kind: ProviderKind,
    /// Inactive providers are never invoked
    pub is_active: bool,
    /// Lower priority is tried first; ties break by insertion order
    #[schema(example = 1)]
    pub priority: i32,
    /// When the provider was registered
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl Provider {
    /// Creates a new provider record.
    ///
    /// # Validation
    /// - Name cannot be empty
    pub fn new(
        name: String,
        kind: ProviderKind,
        is_active: bool,
        priority: i32,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Provider name cannot be empty".into(),
            ));
        }

        Ok(Self {
            id: ProviderId::new(),
            name,
            kind,
            is_active,
            priority,
            created_at: Utc::now(),
        })
    }

    /// Reconstructs a provider from stored fields.
    pub fn from_parts(
        id: ProviderId,
        name: String,
        kind: ProviderKind,
        is_active: bool,
        priority: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            is_active,
            priority,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider =
            Provider::new("currencybeacon".into(), ProviderKind::CurrencyBeacon, true, 1).unwrap();
        assert_eq!(provider.name, "currencybeacon");
        assert_eq!(provider.kind, ProviderKind::CurrencyBeacon);
        assert!(provider.is_active);
    }

    #[test]
    fn test_empty_name_fails() {
        let result = Provider::new("  ".into(), ProviderKind::Synthetic, true, 1);
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_kind_string_roundtrip() {
        for kind in [ProviderKind::CurrencyBeacon, ProviderKind::Synthetic] {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(matches!(
            "fixer".parse::<ProviderKind>(),
            Err(DomainError::UnknownProviderKind(_))
        ));
    }
}
