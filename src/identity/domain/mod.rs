//! Domain model for accounts, charity and benefactor profiles, and actors.
//!
//! Profiles only carry the fields needed to identify ownership and to
//! describe a volunteer's availability. Authentication happens outside the
//! domain boundary; the domain starts from an already trusted [`AccountId`].

mod actor;
mod benefactor;
mod charity;
mod error;
mod ids;

pub use actor::{Actor, ActorRole};
pub use benefactor::{Benefactor, ExperienceLevel, PersistedBenefactorData, WeeklyHours};
pub use charity::{Charity, CharityName, PersistedCharityData, RegistrationNumber};
pub use error::{IdentityDomainError, ParseActorRoleError, ParseExperienceLevelError};
pub use ids::{AccountId, BenefactorId, CharityId};
