//! Domain layer for the platform-config backend.
//!
//! This crate contains:
//! - Domain models (Setting, Translation, Language, AuditLog)
//! - Domain services (audit entry builders, event publication, versioning)
//!
//! No database dependency; persistence lives in its own crate.

pub mod models;
pub mod services;
