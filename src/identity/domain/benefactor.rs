//! Benefactor profile aggregate and availability attributes.

use super::{AccountId, BenefactorId, IdentityDomainError, ParseExperienceLevelError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Volunteering experience tier of a benefactor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// No prior volunteering experience.
    #[default]
    Beginner,
    /// Some prior volunteering experience.
    Intermediate,
    /// Extensive volunteering experience.
    Expert,
}

impl ExperienceLevel {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }

    /// Returns the numeric tier stored in the database.
    #[must_use]
    pub const fn tier(self) -> i16 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 1,
            Self::Expert => 2,
        }
    }

    /// Parses a numeric tier.
    ///
    /// # Errors
    ///
    /// Returns [`ParseExperienceLevelError`] for tiers other than 0, 1 or 2.
    pub fn from_tier(tier: i16) -> Result<Self, ParseExperienceLevelError> {
        match tier {
            0 => Ok(Self::Beginner),
            1 => Ok(Self::Intermediate),
            2 => Ok(Self::Expert),
            other => Err(ParseExperienceLevelError(other.to_string())),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ExperienceLevel {
    type Error = ParseExperienceLevelError;

    /// Accepts either the tier name or its numeric code.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "beginner" | "0" => Ok(Self::Beginner),
            "intermediate" | "1" => Ok(Self::Intermediate),
            "expert" | "2" => Ok(Self::Expert),
            _ => Err(ParseExperienceLevelError(value.to_owned())),
        }
    }
}

/// Hours per week a benefactor can volunteer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct WeeklyHours(u16);

impl WeeklyHours {
    const HOURS_PER_WEEK: u16 = 168;

    /// Creates a validated weekly hour count.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidWeeklyHours`] when the value
    /// exceeds the 168 hours in a week.
    pub const fn new(hours: u16) -> Result<Self, IdentityDomainError> {
        if hours > Self::HOURS_PER_WEEK {
            return Err(IdentityDomainError::InvalidWeeklyHours(hours));
        }
        Ok(Self(hours))
    }

    /// Returns the number of hours.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for WeeklyHours {
    type Error = IdentityDomainError;

    fn try_from(hours: u16) -> Result<Self, Self::Error> {
        Self::new(hours)
    }
}

impl From<WeeklyHours> for u16 {
    fn from(hours: WeeklyHours) -> Self {
        hours.0
    }
}

/// Benefactor profile aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefactor {
    id: BenefactorId,
    account: AccountId,
    experience: ExperienceLevel,
    free_time_per_week: WeeklyHours,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted benefactor profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBenefactorData {
    /// Persisted benefactor identifier.
    pub id: BenefactorId,
    /// Owning account.
    pub account: AccountId,
    /// Persisted experience tier.
    pub experience: ExperienceLevel,
    /// Persisted weekly availability.
    pub free_time_per_week: WeeklyHours,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Benefactor {
    /// Creates a new benefactor profile owned by `account`.
    #[must_use]
    pub fn new(
        account: AccountId,
        experience: ExperienceLevel,
        free_time_per_week: WeeklyHours,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: BenefactorId::new(),
            account,
            experience,
            free_time_per_week,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a benefactor from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBenefactorData) -> Self {
        Self {
            id: data.id,
            account: data.account,
            experience: data.experience,
            free_time_per_week: data.free_time_per_week,
            created_at: data.created_at,
        }
    }

    /// Returns the benefactor identifier.
    #[must_use]
    pub const fn id(&self) -> BenefactorId {
        self.id
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns the experience tier.
    #[must_use]
    pub const fn experience(&self) -> ExperienceLevel {
        self.experience
    }

    /// Returns the weekly availability.
    #[must_use]
    pub const fn free_time_per_week(&self) -> WeeklyHours {
        self.free_time_per_week
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
