//! Taskboard: project and task tracking.
//!
//! This crate manages projects and the tasks inside them: creation with
//! validated fields, status changes, guarded project deletion, and a
//! periodic sweep that closes overdue work.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`tracking`]: Projects, tasks, validation rules, and services
//! - [`config`]: Environment-driven process configuration

pub mod config;
pub mod tracking;
