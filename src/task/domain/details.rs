//! Descriptive task fields that the lifecycle treats as opaque.

use super::TaskDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a task title, matching the `VARCHAR(60)` column.
const MAX_TITLE_LENGTH: usize = 60;

/// Validated, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank, or
    /// [`TaskDomainError::TitleTooLong`] when it exceeds 60 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if trimmed.chars().count() > MAX_TITLE_LENGTH {
            return Err(TaskDomainError::TitleTooLong(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(title: TaskTitle) -> Self {
        title.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Gender restriction on who may volunteer for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderLimit {
    /// Only male volunteers.
    Male,
    /// Only female volunteers.
    Female,
}

impl GenderLimit {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for GenderLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for GenderLimit {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(TaskDomainError::InvalidGenderLimit(value.to_owned())),
        }
    }
}

/// Inclusive age window for volunteers; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AgeBounds")]
pub struct AgeLimit {
    from: Option<u8>,
    to: Option<u8>,
}

/// Unchecked wire form of [`AgeLimit`].
#[derive(Deserialize)]
struct AgeBounds {
    from: Option<u8>,
    to: Option<u8>,
}

impl TryFrom<AgeBounds> for AgeLimit {
    type Error = TaskDomainError;

    fn try_from(bounds: AgeBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.from, bounds.to)
    }
}

impl AgeLimit {
    /// Creates a validated age window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidAgeLimit`] when both bounds are set
    /// and `from` exceeds `to`.
    pub const fn new(from: Option<u8>, to: Option<u8>) -> Result<Self, TaskDomainError> {
        if let (Some(lower), Some(upper)) = (from, to) {
            if lower > upper {
                return Err(TaskDomainError::InvalidAgeLimit {
                    from: lower,
                    to: upper,
                });
            }
        }
        Ok(Self { from, to })
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn lower(self) -> Option<u8> {
        self.from
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn upper(self) -> Option<u8> {
        self.to
    }
}

/// Descriptive fields of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    title: TaskTitle,
    description: Option<String>,
    date: Option<NaiveDate>,
    #[serde(default)]
    age_limit: AgeLimit,
    gender_limit: Option<GenderLimit>,
}

impl TaskDetails {
    /// Creates task details with only a title.
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            date: None,
            age_limit: AgeLimit {
                from: None,
                to: None,
            },
            gender_limit: None,
        }
    }

    /// Sets the free-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the date the task takes place.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the volunteer age window.
    #[must_use]
    pub const fn with_age_limit(mut self, age_limit: AgeLimit) -> Self {
        self.age_limit = age_limit;
        self
    }

    /// Sets the volunteer gender restriction.
    #[must_use]
    pub const fn with_gender_limit(mut self, gender_limit: GenderLimit) -> Self {
        self.gender_limit = Some(gender_limit);
        self
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task date, if any.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the volunteer age window.
    #[must_use]
    pub const fn age_limit(&self) -> AgeLimit {
        self.age_limit
    }

    /// Returns the volunteer gender restriction, if any.
    #[must_use]
    pub const fn gender_limit(&self) -> Option<GenderLimit> {
        self.gender_limit
    }
}
