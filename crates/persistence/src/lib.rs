//! Persistence layer for the platform-config backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - Query timing and pool metrics helpers

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
