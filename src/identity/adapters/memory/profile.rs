//! In-memory repository for charity and benefactor profiles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{AccountId, Benefactor, BenefactorId, Charity, CharityId, RegistrationNumber},
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};

/// Thread-safe in-memory profile repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    state: Arc<RwLock<InMemoryProfileState>>,
}

#[derive(Debug, Default)]
struct InMemoryProfileState {
    charities: HashMap<CharityId, Charity>,
    charity_accounts: HashMap<AccountId, CharityId>,
    registration_numbers: HashMap<RegistrationNumber, CharityId>,
    benefactors: HashMap<BenefactorId, Benefactor>,
    benefactor_accounts: HashMap<AccountId, BenefactorId>,
}

impl InMemoryProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl std::fmt::Display) -> ProfileRepositoryError {
    ProfileRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn store_charity(&self, charity: &Charity) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.charity_accounts.contains_key(&charity.account()) {
            return Err(ProfileRepositoryError::DuplicateCharityForAccount(
                charity.account(),
            ));
        }
        if state
            .registration_numbers
            .contains_key(charity.registration_number())
        {
            return Err(ProfileRepositoryError::DuplicateRegistrationNumber(
                charity.registration_number().clone(),
            ));
        }

        state.charity_accounts.insert(charity.account(), charity.id());
        state
            .registration_numbers
            .insert(charity.registration_number().clone(), charity.id());
        state.charities.insert(charity.id(), charity.clone());
        Ok(())
    }

    async fn store_benefactor(&self, benefactor: &Benefactor) -> ProfileRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.benefactor_accounts.contains_key(&benefactor.account()) {
            return Err(ProfileRepositoryError::DuplicateBenefactorForAccount(
                benefactor.account(),
            ));
        }

        state
            .benefactor_accounts
            .insert(benefactor.account(), benefactor.id());
        state.benefactors.insert(benefactor.id(), benefactor.clone());
        Ok(())
    }

    async fn find_charity(&self, id: CharityId) -> ProfileRepositoryResult<Option<Charity>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.charities.get(&id).cloned())
    }

    async fn find_charity_by_account(
        &self,
        account: AccountId,
    ) -> ProfileRepositoryResult<Option<Charity>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .charity_accounts
            .get(&account)
            .and_then(|id| state.charities.get(id))
            .cloned())
    }

    async fn find_benefactor(
        &self,
        id: BenefactorId,
    ) -> ProfileRepositoryResult<Option<Benefactor>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.benefactors.get(&id).cloned())
    }

    async fn find_benefactor_by_account(
        &self,
        account: AccountId,
    ) -> ProfileRepositoryResult<Option<Benefactor>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .benefactor_accounts
            .get(&account)
            .and_then(|id| state.benefactors.get(id))
            .cloned())
    }
}
