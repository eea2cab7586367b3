//! Goodwill: volunteer task matching.
//!
//! Charities post tasks, benefactors request them, and the owning charity
//! accepts, rejects, and finally marks the work done. Every operation takes
//! an explicit [`identity::domain::Actor`] and is checked against the
//! task's authorization policy and state machine.
//!
//! # Architecture
//!
//! Goodwill follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//!
//! # Modules
//!
//! - [`identity`]: Charity and benefactor profiles and actor resolution
//! - [`task`]: Task creation, listing, and lifecycle transitions
//! - [`config`]: Layered configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod identity;
pub mod task;
pub mod telemetry;
