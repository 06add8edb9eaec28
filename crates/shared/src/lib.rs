//! Shared utilities and common types for the platform-config backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (hashing, secret masking)
//! - JWT issuing and validation for admin authentication
//! - Common validation logic for keys, language codes and locales

pub mod crypto;
pub mod jwt;
pub mod validation;
