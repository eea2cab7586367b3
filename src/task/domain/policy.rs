//! Authorization predicates for task operations.
//!
//! Each predicate is a pure function of the acting identity and the target.
//! Callers decide how a denial is reported; the predicates only answer
//! whether the operation is allowed.
//!
//! Task-scoped predicates trust the profile an [`Actor`] claims. The
//! lifecycle service confirms that claim against stored profiles before any
//! transition runs.

use super::{Task, TaskEvent};
use crate::identity::domain::{Actor, Charity, CharityId};

/// Allows posting a task for `charity` only to the account that owns it,
/// acting through that charity profile.
#[must_use]
pub fn can_create_task(actor: &Actor, charity: &Charity) -> bool {
    match actor {
        Actor::Charity {
            account,
            charity: acting_as,
        } => *account == charity.account() && *acting_as == charity.id(),
        Actor::Benefactor { .. } | Actor::Unaffiliated { .. } => false,
    }
}

/// Allows any benefactor to request a task.
#[must_use]
pub const fn can_request_task(actor: &Actor, _task: &Task) -> bool {
    matches!(actor, Actor::Benefactor { .. })
}

/// Allows the owning charity to accept or reject a request.
#[must_use]
pub fn can_respond_to_request(actor: &Actor, task: &Task) -> bool {
    owns_charity(actor, task.charity())
}

/// Allows the owning charity to mark the task as done.
#[must_use]
pub fn can_mark_done(actor: &Actor, task: &Task) -> bool {
    owns_charity(actor, task.charity())
}

/// Dispatches to the predicate that gates `event`.
#[must_use]
pub fn permits(actor: &Actor, task: &Task, event: TaskEvent) -> bool {
    match event {
        TaskEvent::Request(_) => can_request_task(actor, task),
        TaskEvent::Accept | TaskEvent::Reject => can_respond_to_request(actor, task),
        TaskEvent::MarkDone => can_mark_done(actor, task),
    }
}

fn owns_charity(actor: &Actor, charity: CharityId) -> bool {
    actor.charity_id() == Some(charity)
}
