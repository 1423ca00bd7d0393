//! Option store trait definition.

use std::fmt;
use std::sync::Arc;

use give_core::Result;

/// A raw row read from the option store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    /// Option name.
    pub name: String,
    /// Raw serialized value, decoded by the cache at read time.
    pub value: String,
}

impl OptionRow {
    /// Creates a new row.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Kind of change applied to an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Added,
    Updated,
    Deleted,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            MutationKind::Added => "added",
            MutationKind::Updated => "updated",
            MutationKind::Deleted => "deleted",
        };
        f.write_str(kind)
    }
}

/// A change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMutation {
    /// Option that changed.
    pub name: String,
    /// What happened to it.
    pub kind: MutationKind,
}

/// Callback invoked synchronously after a mutation has been applied.
pub type MutationHandler = Arc<dyn Fn(&OptionMutation) + Send + Sync>;

/// Handle returned by [`OptionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A persistent key-value store of plugin options.
///
/// Values are raw text; decoding is the caller's concern. Implementations
/// must deliver notifications after the mutation is visible to `batch_get`
/// and without holding any lock a subscriber might need, because the
/// settings cache reads back from the store inside its handler.
pub trait OptionStore: Send + Sync {
    /// Reads every requested option that has a row, in a single round-trip.
    ///
    /// Options without a row are simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend cannot be queried.
    fn batch_get(&self, names: &[String]) -> Result<Vec<OptionRow>>;

    /// Registers `handler` for add/update/delete of any of `names`.
    fn subscribe(&self, names: &[String], handler: MutationHandler) -> SubscriptionId;

    /// Removes a subscription. Returns false if it was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Returns the name of this store, for logging.
    fn name(&self) -> &str;
}
