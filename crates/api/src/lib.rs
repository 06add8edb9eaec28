//! Admin dashboard backend for platform settings and translations.
//!
//! The server binary lives in `main.rs`; this library target exists so
//! integration tests can assemble the router and configuration directly.

pub mod app;
pub mod config;
pub mod error;
pub mod jobs;
pub mod middleware;
pub mod routes;
