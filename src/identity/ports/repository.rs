//! Repository port for charity and benefactor profiles.

use crate::identity::domain::{
    AccountId, Benefactor, BenefactorId, Charity, CharityId, RegistrationNumber,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile repository operations.
pub type ProfileRepositoryResult<T> = Result<T, ProfileRepositoryError>;

/// Profile persistence contract.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Stores a new charity profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateCharityForAccount`] when the
    /// owning account already has a charity, or
    /// [`ProfileRepositoryError::DuplicateRegistrationNumber`] when another
    /// charity uses the same registration number.
    async fn store_charity(&self, charity: &Charity) -> ProfileRepositoryResult<()>;

    /// Stores a new benefactor profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileRepositoryError::DuplicateBenefactorForAccount`] when
    /// the owning account already has a benefactor profile.
    async fn store_benefactor(&self, benefactor: &Benefactor) -> ProfileRepositoryResult<()>;

    /// Finds a charity by identifier.
    async fn find_charity(&self, id: CharityId) -> ProfileRepositoryResult<Option<Charity>>;

    /// Finds the charity owned by an account.
    async fn find_charity_by_account(
        &self,
        account: AccountId,
    ) -> ProfileRepositoryResult<Option<Charity>>;

    /// Finds a benefactor by identifier.
    async fn find_benefactor(
        &self,
        id: BenefactorId,
    ) -> ProfileRepositoryResult<Option<Benefactor>>;

    /// Finds the benefactor profile owned by an account.
    async fn find_benefactor_by_account(
        &self,
        account: AccountId,
    ) -> ProfileRepositoryResult<Option<Benefactor>>;
}

/// Errors returned by profile repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileRepositoryError {
    /// The account already owns a charity profile.
    #[error("account {0} already has a charity profile")]
    DuplicateCharityForAccount(AccountId),

    /// The account already owns a benefactor profile.
    #[error("account {0} already has a benefactor profile")]
    DuplicateBenefactorForAccount(AccountId),

    /// Another charity is registered under the same number.
    #[error("duplicate registration number: {0}")]
    DuplicateRegistrationNumber(RegistrationNumber),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
