//! Account roles and profile registration for Goodwill.
//!
//! An authenticated account may register a charity profile, a benefactor
//! profile, or both. Every interaction with the task lifecycle is performed
//! through an explicit [`domain::Actor`] that names exactly one of those
//! roles. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
