//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_external_id, UserValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Internal user identifier, generated by the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque actor identifier handed over by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalId(String);

impl ExternalId {
    /// Create a new ExternalId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_external_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ExternalId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExternalId> for String {
    fn from(id: ExternalId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ExternalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ExternalId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Internal identity record for an authenticated actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    external_id: ExternalId,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build the record for a first-time actor
    pub fn provision(id: UserId, external_id: ExternalId) -> Self {
        Self {
            id,
            external_id,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate a stored record
    pub fn from_parts(
        id: UserId,
        external_id: ExternalId,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            external_id,
            is_active,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn external_id(&self) -> &ExternalId {
        &self.external_id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl StorageEntity for User {
    type Key = ExternalId;

    fn key(&self) -> Self::Key {
        self.external_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioned_user_is_active() {
        let external_id = ExternalId::new("user_abc").unwrap();
        let user = User::provision(UserId::generate(), external_id.clone());

        assert!(user.is_active());
        assert_eq!(user.external_id(), &external_id);
    }

    #[test]
    fn test_external_id_kept_verbatim() {
        let id = ExternalId::new(" Jane Doe|idp ").unwrap();
        assert_eq!(id.as_str(), " Jane Doe|idp ");
    }

    #[test]
    fn test_external_id_rejects_empty_on_deserialize() {
        let result: Result<ExternalId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_user_serialization() {
        let user = User::provision(UserId::generate(), ExternalId::new("user_abc").unwrap());
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["external_id"], "user_abc");
        assert_eq!(json["is_active"], true);
        assert_eq!(json["id"], user.id().to_string());
    }
}
