//! Extension points.
//!
//! An extension point is a named, ordered chain of transforms. Applying the
//! chain folds the value through every transform in registration order, so
//! a later transform sees (and may undo) what an earlier one did.

use std::fmt;
use std::sync::Arc;

use give_core::SettingsMap;
use parking_lot::RwLock;

use crate::registry::{Currencies, Gateways};

type Transform<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// A named, ordered chain of transforms over `T`.
///
/// # Example
///
/// ```
/// use give_settings::filters::FilterChain;
///
/// let chain = FilterChain::new("greeting");
/// chain.add(|s: String| s + " world");
/// chain.add(|s: String| s.to_uppercase());
///
/// assert_eq!(chain.apply("hello".to_string()), "HELLO WORLD");
/// ```
pub struct FilterChain<T> {
    name: &'static str,
    transforms: RwLock<Vec<Transform<T>>>,
}

impl<T> FilterChain<T> {
    /// Creates an empty chain.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            transforms: RwLock::new(Vec::new()),
        }
    }

    /// Appends a transform to the end of the chain.
    pub fn add<F>(&self, transform: F)
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.transforms.write().push(Arc::new(transform));
    }

    /// Folds `value` through every registered transform, in order.
    ///
    /// The chain is snapshotted first, so a transform may register further
    /// transforms without deadlocking; those apply from the next call on.
    pub fn apply(&self, value: T) -> T {
        let transforms = self.transforms.read().clone();
        transforms.iter().fold(value, |acc, transform| transform(acc))
    }

    /// Returns the name of the extension point.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of registered transforms.
    pub fn len(&self) -> usize {
        self.transforms.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.transforms.read().is_empty()
    }
}

impl<T> fmt::Debug for FilterChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("name", &self.name)
            .field("transforms", &self.len())
            .finish()
    }
}

/// The extension points consulted by the settings cache.
#[derive(Debug)]
pub struct Filters {
    /// Transforms the currency list before it is cached.
    pub register_currency: FilterChain<Currencies>,
    /// Transforms the gateway list before it is cached.
    pub register_gateway: FilterChain<Gateways>,
    /// Transforms the settings blob on every read.
    pub get_settings: FilterChain<SettingsMap>,
}

impl Filters {
    pub fn new() -> Self {
        Self {
            register_currency: FilterChain::new("register_currency"),
            register_gateway: FilterChain::new("register_gateway"),
            get_settings: FilterChain::new("get_settings"),
        }
    }
}

impl Default for Filters {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Gateway, default_gateways};

    #[test]
    fn test_empty_chain_is_identity() {
        let chain: FilterChain<i32> = FilterChain::new("noop");
        assert!(chain.is_empty());
        assert_eq!(chain.apply(7), 7);
    }

    #[test]
    fn test_registration_order_is_preserved() {
        let chain = FilterChain::new("order");
        chain.add(|v: Vec<&'static str>| {
            let mut v = v;
            v.push("first");
            v
        });
        chain.add(|v: Vec<&'static str>| {
            let mut v = v;
            v.push("second");
            v
        });

        assert_eq!(chain.apply(Vec::new()), vec!["first", "second"]);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_later_transform_can_undo_earlier() {
        let filters = Filters::new();
        filters.register_gateway.add(|mut g: Gateways| {
            g.insert("stripe".to_string(), Gateway::new("Stripe", "Credit Card"));
            g
        });
        filters.register_gateway.add(|mut g: Gateways| {
            g.shift_remove("stripe");
            g
        });

        let gateways = filters.register_gateway.apply(default_gateways());
        assert!(!gateways.contains_key("stripe"));
        assert_eq!(gateways.len(), 3);
    }

    #[test]
    fn test_transform_may_register_another() {
        let chain = Arc::new(FilterChain::new("reentrant"));
        let inner = Arc::downgrade(&chain);
        chain.add(move |v: i32| {
            if let Some(chain) = inner.upgrade()
                && chain.len() == 1
            {
                chain.add(|v: i32| v * 10);
            }
            v + 1
        });

        assert_eq!(chain.apply(1), 2);
        assert_eq!(chain.apply(1), 20);
    }

    #[test]
    fn test_hook_names() {
        let filters = Filters::default();
        assert_eq!(filters.register_currency.name(), "register_currency");
        assert_eq!(filters.register_gateway.name(), "register_gateway");
        assert_eq!(filters.get_settings.name(), "get_settings");
    }
}
