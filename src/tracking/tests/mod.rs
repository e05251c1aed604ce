//! Unit tests for the tracking module.
//!
//! Tests are organised by concern: domain behaviour, validation rules,
//! service orchestration, error classification, and row conversion.
