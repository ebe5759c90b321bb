//! # Tenantflow Core
//!
//! This crate contains the domain models and configuration shared by the
//! Tenantflow client state layer. It holds no I/O: everything here is plain
//! data plus the pure derivations the stores expose.
//!
//! ## Module Organization
//!
//! - `models`: Tenant, subscription, plan, billing, and automation records
//! - `config`: Environment-driven client configuration

pub mod config;
pub mod models;

/// Current version of the Tenantflow core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
