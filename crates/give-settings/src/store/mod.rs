//! Option store abstraction.
//!
//! The store is the persistent source of truth for plugin options. The
//! settings cache reads it in batches and subscribes to its mutations.

pub mod memory;
pub mod traits;

pub use memory::MemoryOptionStore;
pub use traits::{
    MutationHandler, MutationKind, OptionMutation, OptionRow, OptionStore, SubscriptionId,
};
