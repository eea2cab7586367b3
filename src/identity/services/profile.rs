//! Service layer for charity/benefactor registration and actor resolution.

use crate::identity::{
    domain::{
        AccountId, Actor, ActorRole, Benefactor, BenefactorId, Charity, CharityId, CharityName,
        ExperienceLevel, IdentityDomainError, RegistrationNumber, WeeklyHours,
    },
    ports::{ProfileRepository, ProfileRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a charity profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCharityRequest {
    name: String,
    registration_number: String,
}

impl RegisterCharityRequest {
    /// Creates a request with the required charity fields.
    #[must_use]
    pub fn new(name: impl Into<String>, registration_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registration_number: registration_number.into(),
        }
    }
}

/// Request payload for registering a benefactor profile.
///
/// Experience defaults to `beginner` and weekly free time to zero hours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterBenefactorRequest {
    experience: Option<String>,
    free_time_per_week: u16,
}

impl RegisterBenefactorRequest {
    /// Creates a request with default availability.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the experience tier, by name (`expert`) or code (`2`).
    #[must_use]
    pub fn with_experience(mut self, experience: impl Into<String>) -> Self {
        self.experience = Some(experience.into());
        self
    }

    /// Sets the weekly free time in hours.
    #[must_use]
    pub const fn with_free_time_per_week(mut self, hours: u16) -> Self {
        self.free_time_per_week = hours;
        self
    }
}

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProfileRepositoryError),
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile registration and actor resolution service.
#[derive(Clone)]
pub struct ProfileService<P, C>
where
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> ProfileService<P, C>
where
    P: ProfileRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(repository: Arc<P>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a charity profile for `account`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Domain`] when the name or registration
    /// number is invalid, or [`ProfileServiceError::Repository`] when the
    /// account already owns a charity or the registration number is taken.
    pub async fn register_charity(
        &self,
        account: AccountId,
        request: RegisterCharityRequest,
    ) -> ProfileServiceResult<Charity> {
        let RegisterCharityRequest {
            name,
            registration_number,
        } = request;
        let charity = Charity::new(
            account,
            CharityName::new(name)?,
            RegistrationNumber::new(registration_number)?,
            &*self.clock,
        );
        self.repository.store_charity(&charity).await?;
        tracing::info!(
            account = %account,
            charity_id = %charity.id(),
            "registered charity profile"
        );
        Ok(charity)
    }

    /// Registers a benefactor profile for `account`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Domain`] when the experience tier is
    /// unknown or the weekly hours exceed a week, or
    /// [`ProfileServiceError::Repository`] when the account already owns a
    /// benefactor profile.
    pub async fn register_benefactor(
        &self,
        account: AccountId,
        request: RegisterBenefactorRequest,
    ) -> ProfileServiceResult<Benefactor> {
        let experience = request
            .experience
            .as_deref()
            .map(ExperienceLevel::try_from)
            .transpose()
            .map_err(IdentityDomainError::from)?
            .unwrap_or_default();
        let hours = WeeklyHours::new(request.free_time_per_week)?;
        let benefactor = Benefactor::new(account, experience, hours, &*self.clock);
        self.repository.store_benefactor(&benefactor).await?;
        tracing::info!(
            account = %account,
            benefactor_id = %benefactor.id(),
            "registered benefactor profile"
        );
        Ok(benefactor)
    }

    /// Resolves the actor for `account` acting as `role`.
    ///
    /// Returns [`Actor::Unaffiliated`] when the account has no profile for
    /// the requested role.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when lookup fails.
    pub async fn resolve_actor(
        &self,
        account: AccountId,
        role: ActorRole,
    ) -> ProfileServiceResult<Actor> {
        let actor = match role {
            ActorRole::Charity => self
                .repository
                .find_charity_by_account(account)
                .await?
                .map(|charity| Actor::for_charity(&charity)),
            ActorRole::Benefactor => self
                .repository
                .find_benefactor_by_account(account)
                .await?
                .map(|benefactor| Actor::for_benefactor(&benefactor)),
        };
        Ok(actor.unwrap_or(Actor::Unaffiliated { account }))
    }

    /// Finds a charity by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when lookup fails.
    pub async fn find_charity(&self, id: CharityId) -> ProfileServiceResult<Option<Charity>> {
        Ok(self.repository.find_charity(id).await?)
    }

    /// Finds the charity owned by `account`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when lookup fails.
    pub async fn find_charity_by_account(
        &self,
        account: AccountId,
    ) -> ProfileServiceResult<Option<Charity>> {
        Ok(self.repository.find_charity_by_account(account).await?)
    }

    /// Finds a benefactor by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when lookup fails.
    pub async fn find_benefactor(
        &self,
        id: BenefactorId,
    ) -> ProfileServiceResult<Option<Benefactor>> {
        Ok(self.repository.find_benefactor(id).await?)
    }

    /// Finds the benefactor profile owned by `account`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Repository`] when lookup fails.
    pub async fn find_benefactor_by_account(
        &self,
        account: AccountId,
    ) -> ProfileServiceResult<Option<Benefactor>> {
        Ok(self.repository.find_benefactor_by_account(account).await?)
    }
}
