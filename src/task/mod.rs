//! Task lifecycle management.
//!
//! A charity posts a task, a benefactor requests it, the charity accepts or
//! rejects the request, and finally marks the assigned task done. Every
//! transition is authorized against the acting [`Actor`] and guarded by the
//! task's current state inside the repository's atomic section, so two
//! concurrent requests for one pending task cannot both succeed.
//!
//! - Domain types, the state machine, and authorization in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! [`Actor`]: crate::identity::domain::Actor

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
