//! `PostgreSQL` repository implementation for profile storage.

use super::{
    models::{BenefactorRow, CharityRow},
    schema::{benefactors, charities},
};
use crate::identity::{
    domain::{
        AccountId, Benefactor, BenefactorId, Charity, CharityId, CharityName, ExperienceLevel,
        PersistedBenefactorData, PersistedCharityData, RegistrationNumber, WeeklyHours,
    },
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by profile adapters.
pub type ProfilePgPool = Pool<ConnectionManager<PgConnection>>;

const CHARITY_ACCOUNT_CONSTRAINT: &str = "uq_charities_account";
const REGISTRATION_NUMBER_CONSTRAINT: &str = "uq_charities_registration_number";

/// `PostgreSQL`-backed profile repository.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: ProfilePgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProfilePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProfileRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProfileRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn store_charity(&self, charity: &Charity) -> ProfileRepositoryResult<()> {
        let account = charity.account();
        let registration_number = charity.registration_number().clone();
        let row = charity_to_row(charity);

        self.run_blocking(move |connection| {
            diesel::insert_into(charities::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if violates(info.as_ref(), REGISTRATION_NUMBER_CONSTRAINT) =>
                    {
                        ProfileRepositoryError::DuplicateRegistrationNumber(
                            registration_number.clone(),
                        )
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if violates(info.as_ref(), CHARITY_ACCOUNT_CONSTRAINT) =>
                    {
                        ProfileRepositoryError::DuplicateCharityForAccount(account)
                    }
                    _ => ProfileRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn store_benefactor(&self, benefactor: &Benefactor) -> ProfileRepositoryResult<()> {
        let account = benefactor.account();
        let row = benefactor_to_row(benefactor)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(benefactors::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProfileRepositoryError::DuplicateBenefactorForAccount(account)
                    }
                    _ => ProfileRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_charity(&self, id: CharityId) -> ProfileRepositoryResult<Option<Charity>> {
        self.run_blocking(move |connection| {
            let row = charities::table
                .filter(charities::id.eq(id.into_inner()))
                .select(CharityRow::as_select())
                .first::<CharityRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            row.map(row_to_charity).transpose()
        })
        .await
    }

    async fn find_charity_by_account(
        &self,
        account: AccountId,
    ) -> ProfileRepositoryResult<Option<Charity>> {
        self.run_blocking(move |connection| {
            let row = charities::table
                .filter(charities::account_id.eq(account.into_inner()))
                .select(CharityRow::as_select())
                .first::<CharityRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            row.map(row_to_charity).transpose()
        })
        .await
    }

    async fn find_benefactor(
        &self,
        id: BenefactorId,
    ) -> ProfileRepositoryResult<Option<Benefactor>> {
        self.run_blocking(move |connection| {
            let row = benefactors::table
                .filter(benefactors::id.eq(id.into_inner()))
                .select(BenefactorRow::as_select())
                .first::<BenefactorRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            row.map(row_to_benefactor).transpose()
        })
        .await
    }

    async fn find_benefactor_by_account(
        &self,
        account: AccountId,
    ) -> ProfileRepositoryResult<Option<Benefactor>> {
        self.run_blocking(move |connection| {
            let row = benefactors::table
                .filter(benefactors::account_id.eq(account.into_inner()))
                .select(BenefactorRow::as_select())
                .first::<BenefactorRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            row.map(row_to_benefactor).transpose()
        })
        .await
    }
}

fn violates(info: &dyn DatabaseErrorInformation, constraint: &str) -> bool {
    info.constraint_name().is_some_and(|name| name == constraint)
}

fn charity_to_row(charity: &Charity) -> CharityRow {
    CharityRow {
        id: charity.id().into_inner(),
        account_id: charity.account().into_inner(),
        name: charity.name().as_str().to_owned(),
        registration_number: charity.registration_number().as_str().to_owned(),
        created_at: charity.created_at(),
    }
}

fn row_to_charity(row: CharityRow) -> ProfileRepositoryResult<Charity> {
    let data = PersistedCharityData {
        id: CharityId::from_uuid(row.id),
        account: AccountId::from_uuid(row.account_id),
        name: CharityName::new(row.name).map_err(ProfileRepositoryError::persistence)?,
        registration_number: RegistrationNumber::new(row.registration_number)
            .map_err(ProfileRepositoryError::persistence)?,
        created_at: row.created_at,
    };
    Ok(Charity::from_persisted(data))
}

fn benefactor_to_row(benefactor: &Benefactor) -> ProfileRepositoryResult<BenefactorRow> {
    let free_time_per_week = i16::try_from(benefactor.free_time_per_week().value())
        .map_err(ProfileRepositoryError::persistence)?;
    Ok(BenefactorRow {
        id: benefactor.id().into_inner(),
        account_id: benefactor.account().into_inner(),
        experience: benefactor.experience().tier(),
        free_time_per_week,
        created_at: benefactor.created_at(),
    })
}

fn row_to_benefactor(row: BenefactorRow) -> ProfileRepositoryResult<Benefactor> {
    let hours =
        u16::try_from(row.free_time_per_week).map_err(ProfileRepositoryError::persistence)?;
    let data = PersistedBenefactorData {
        id: BenefactorId::from_uuid(row.id),
        account: AccountId::from_uuid(row.account_id),
        experience: ExperienceLevel::from_tier(row.experience)
            .map_err(ProfileRepositoryError::persistence)?,
        free_time_per_week: WeeklyHours::new(hours).map_err(ProfileRepositoryError::persistence)?,
        created_at: row.created_at,
    };
    Ok(Benefactor::from_persisted(data))
}
