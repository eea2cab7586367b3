//! Charity profile aggregate and its validated scalar fields.

use super::{AccountId, CharityId, IdentityDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a charity name, matching the `VARCHAR(50)` column.
const MAX_NAME_LENGTH: usize = 50;

/// Maximum length for a registration number, matching the `VARCHAR(10)` column.
const MAX_REGISTRATION_NUMBER_LENGTH: usize = 10;

/// Display name of a charity organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharityName(String);

impl CharityName {
    /// Creates a validated, trimmed charity name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyCharityName`] when the value is
    /// blank, or [`IdentityDomainError::CharityNameTooLong`] when it exceeds
    /// 50 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyCharityName);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(IdentityDomainError::CharityNameTooLong(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CharityName {
    type Error = IdentityDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CharityName> for String {
    fn from(name: CharityName) -> Self {
        name.0
    }
}

impl fmt::Display for CharityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Official registration number of a charity, unique across the system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    /// Creates a validated registration number.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidRegistrationNumber`] when the
    /// trimmed value is empty, longer than 10 characters, or contains
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let is_valid = !trimmed.is_empty()
            && trimmed.chars().count() <= MAX_REGISTRATION_NUMBER_LENGTH
            && !trimmed.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(IdentityDomainError::InvalidRegistrationNumber(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the registration number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RegistrationNumber {
    type Error = IdentityDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RegistrationNumber> for String {
    fn from(number: RegistrationNumber) -> Self {
        number.0
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Charity profile aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charity {
    id: CharityId,
    account: AccountId,
    name: CharityName,
    registration_number: RegistrationNumber,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted charity profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCharityData {
    /// Persisted charity identifier.
    pub id: CharityId,
    /// Owning account.
    pub account: AccountId,
    /// Persisted display name.
    pub name: CharityName,
    /// Persisted registration number.
    pub registration_number: RegistrationNumber,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Charity {
    /// Creates a new charity profile owned by `account`.
    #[must_use]
    pub fn new(
        account: AccountId,
        name: CharityName,
        registration_number: RegistrationNumber,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CharityId::new(),
            account,
            name,
            registration_number,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a charity from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCharityData) -> Self {
        Self {
            id: data.id,
            account: data.account,
            name: data.name,
            registration_number: data.registration_number,
            created_at: data.created_at,
        }
    }

    /// Returns the charity identifier.
    #[must_use]
    pub const fn id(&self) -> CharityId {
        self.id
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &CharityName {
        &self.name
    }

    /// Returns the registration number.
    #[must_use]
    pub const fn registration_number(&self) -> &RegistrationNumber {
        &self.registration_number
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
