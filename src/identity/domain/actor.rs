//! The acting identity threaded explicitly through every task operation.

use super::{AccountId, Benefactor, BenefactorId, Charity, CharityId, ParseActorRoleError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role an account acts as for a single interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Acting on behalf of the account's charity profile.
    Charity,
    /// Acting as the account's benefactor profile.
    Benefactor,
}

impl ActorRole {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Charity => "charity",
            Self::Benefactor => "benefactor",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActorRole {
    type Error = ParseActorRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "charity" => Ok(Self::Charity),
            "benefactor" => Ok(Self::Benefactor),
            _ => Err(ParseActorRoleError(value.to_owned())),
        }
    }
}

/// Authenticated caller of a task operation.
///
/// An actor names exactly one role. An account holding both profiles picks
/// the role per interaction; an account without the profile it asked to act
/// as is [`Actor::Unaffiliated`] and is denied every role-gated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Actor {
    /// Account acting through its charity profile.
    Charity {
        /// Authenticated account.
        account: AccountId,
        /// Charity profile owned by the account.
        charity: CharityId,
    },
    /// Account acting through its benefactor profile.
    Benefactor {
        /// Authenticated account.
        account: AccountId,
        /// Benefactor profile owned by the account.
        benefactor: BenefactorId,
    },
    /// Authenticated account without a matching profile.
    Unaffiliated {
        /// Authenticated account.
        account: AccountId,
    },
}

impl Actor {
    /// Builds an actor acting through the given charity profile.
    #[must_use]
    pub const fn for_charity(charity: &Charity) -> Self {
        Self::Charity {
            account: charity.account(),
            charity: charity.id(),
        }
    }

    /// Builds an actor acting through the given benefactor profile.
    #[must_use]
    pub const fn for_benefactor(benefactor: &Benefactor) -> Self {
        Self::Benefactor {
            account: benefactor.account(),
            benefactor: benefactor.id(),
        }
    }

    /// Returns the authenticated account behind the actor.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        match self {
            Self::Charity { account, .. }
            | Self::Benefactor { account, .. }
            | Self::Unaffiliated { account } => *account,
        }
    }

    /// Returns the role the actor is acting as, if any.
    #[must_use]
    pub const fn role(&self) -> Option<ActorRole> {
        match self {
            Self::Charity { .. } => Some(ActorRole::Charity),
            Self::Benefactor { .. } => Some(ActorRole::Benefactor),
            Self::Unaffiliated { .. } => None,
        }
    }

    /// Returns the charity profile when acting as a charity.
    #[must_use]
    pub const fn charity_id(&self) -> Option<CharityId> {
        match self {
            Self::Charity { charity, .. } => Some(*charity),
            _ => None,
        }
    }

    /// Returns the benefactor profile when acting as a benefactor.
    #[must_use]
    pub const fn benefactor_id(&self) -> Option<BenefactorId> {
        match self {
            Self::Benefactor { benefactor, .. } => Some(*benefactor),
            _ => None,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Charity { account, charity } => write!(f, "charity {charity} (account {account})"),
            Self::Benefactor {
                account,
                benefactor,
            } => write!(f, "benefactor {benefactor} (account {account})"),
            Self::Unaffiliated { account } => write!(f, "account {account}"),
        }
    }
}
