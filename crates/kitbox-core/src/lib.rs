//! Kit registry and slash-command extension system.
//!
//! The pieces, leaves first:
//!
//! - [`slash`] -- the live dispatch table ([`SlashCommandRegistry`]) and the
//!   shared handle the host loop reads from.
//! - [`store`] -- the [`KitStore`] persistence seam with file-backed and
//!   in-memory implementations.
//! - [`registry`] -- the [`KitRegistry`] service reconciling persisted
//!   enablement with the live table.
//! - [`scope`] -- scoped injection: swap the live table for one kit's
//!   commands for the duration of a computation, restoring it on every
//!   exit path.
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = KitRegistry::open(store, shared_commands()).await;
//! registry.register(memkit)?;
//! registry.enable("memkit").await?;
//! let outcome = registry.dispatch("/mem-add-text hello", &mut ctx).await;
//! ```

pub mod registry;
pub mod scope;
pub mod slash;
pub mod store;

pub use registry::{KitRegistry, KitStatus};
pub use scope::{InjectionGuard, inject, with_kit};
pub use slash::{CommandTable, SharedCommands, SlashCommandRegistry, shared_commands};
pub use store::{FileKitStore, KitStore, MemoryKitStore};
