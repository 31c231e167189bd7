//! # kitbox-types
//!
//! Core type definitions for the kitbox kit system.
//!
//! This crate is the foundation of the dependency graph -- all other
//! kitbox crates depend on it. It contains:
//!
//! - **[`error`]** -- [`KitError`], the error taxonomy for kit operations
//! - **[`command`]** -- [`CommandDefinition`], the dispatchable unit, and its
//!   handler protocol
//! - **[`kit`]** -- [`Kit`], a named and versioned bundle of commands
//! - **[`config`]** -- [`KitsConfig`], the persisted enablement document

pub mod command;
pub mod config;
pub mod error;
pub mod kit;

pub use command::{CommandDefinition, CommandHandler, CommandOutcome, InvocationContext};
pub use config::KitsConfig;
pub use error::{KitError, Result};
pub use kit::{Kit, KitBuilder, create_kit};
