//! Project and task tracking.
//!
//! Projects group tasks; tasks move through `TODO`, `DOING` and `DONE`. A
//! project cannot be removed while it still owns active work, and overdue
//! tasks can be closed in bulk by the overdue sweep. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Validation and transition rules in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
