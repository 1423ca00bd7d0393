//! In-memory option store.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use give_core::{Result, SettingValue, encode_option_value};
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use super::{
    MutationHandler, MutationKind, OptionMutation, OptionRow, OptionStore, SubscriptionId,
};

struct Subscriber {
    id: SubscriptionId,
    names: HashSet<String>,
    handler: MutationHandler,
}

/// An option store kept in process memory.
///
/// Writes notify subscribers synchronously, after the row lock has been
/// released. Writing a value identical to the stored one is a no-op and
/// does not notify.
pub struct MemoryOptionStore {
    rows: RwLock<IndexMap<String, String>>,
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
    batch_reads: AtomicU64,
}

impl MemoryOptionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(IndexMap::new()),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            batch_reads: AtomicU64::new(0),
        }
    }

    /// Creates a store pre-filled with raw rows. No notifications are sent.
    pub fn with_rows<I, K, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        {
            let mut guard = store.rows.write();
            for (name, value) in rows {
                guard.insert(name.into(), value.into());
            }
        }
        store
    }

    /// Writes a raw row. Returns false if the stored value was already equal.
    pub fn set(&self, name: impl Into<String>, raw: impl Into<String>) -> bool {
        let name = name.into();
        let raw = raw.into();

        let kind = {
            let mut rows = self.rows.write();
            match rows.insert(name.clone(), raw.clone()) {
                Some(previous) if previous == raw => return false,
                Some(_) => MutationKind::Updated,
                None => MutationKind::Added,
            }
        };

        self.notify(OptionMutation { name, kind });
        true
    }

    /// Encodes and writes a structured value.
    ///
    /// # Errors
    ///
    /// Returns an encode error if the value cannot be encoded.
    pub fn set_value(&self, name: impl Into<String>, value: &SettingValue) -> Result<bool> {
        let raw = encode_option_value(value)?;
        Ok(self.set(name, raw))
    }

    /// Deletes a row. Returns false if there was nothing to delete.
    pub fn delete(&self, name: &str) -> bool {
        let removed = self.rows.write().shift_remove(name).is_some();
        if removed {
            self.notify(OptionMutation {
                name: name.to_string(),
                kind: MutationKind::Deleted,
            });
        }
        removed
    }

    /// Returns the raw row for an option, bypassing any cache.
    pub fn get_raw(&self, name: &str) -> Option<String> {
        self.rows.read().get(name).cloned()
    }

    /// Number of `batch_get` calls served so far.
    pub fn batch_reads(&self) -> u64 {
        self.batch_reads.load(Ordering::Relaxed)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    fn notify(&self, mutation: OptionMutation) {
        let handlers: Vec<MutationHandler> = self
            .subscribers
            .read()
            .iter()
            .filter(|s| s.names.contains(&mutation.name))
            .map(|s| s.handler.clone())
            .collect();

        debug!(
            option = %mutation.name,
            kind = %mutation.kind,
            subscribers = handlers.len(),
            "Option mutated"
        );

        for handler in handlers {
            handler(&mutation);
        }
    }
}

impl Default for MemoryOptionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionStore for MemoryOptionStore {
    fn batch_get(&self, names: &[String]) -> Result<Vec<OptionRow>> {
        self.batch_reads.fetch_add(1, Ordering::Relaxed);

        let rows = self.rows.read();
        Ok(names
            .iter()
            .filter_map(|name| rows.get(name).map(|value| OptionRow::new(name, value)))
            .collect())
    }

    fn subscribe(&self, names: &[String], handler: MutationHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push(Subscriber {
            id,
            names: names.iter().cloned().collect(),
            handler,
        });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() != before
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder(store: &MemoryOptionStore, names: &[&str]) -> Arc<Mutex<Vec<OptionMutation>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        store.subscribe(
            &names,
            Arc::new(move |m: &OptionMutation| sink.lock().push(m.clone())),
        );
        seen
    }

    #[test]
    fn test_batch_get_skips_missing_rows() {
        let store = MemoryOptionStore::with_rows([("give_version", "2.33.1")]);

        let rows = store
            .batch_get(&["give_settings".to_string(), "give_version".to_string()])
            .unwrap();

        assert_eq!(rows, vec![OptionRow::new("give_version", "2.33.1")]);
        assert_eq!(store.batch_reads(), 1);
    }

    #[test]
    fn test_set_notifies_added_then_updated() {
        let store = MemoryOptionStore::new();
        let seen = recorder(&store, &["give_version"]);

        assert!(store.set("give_version", "2.33.0"));
        assert!(store.set("give_version", "2.33.1"));

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].kind, MutationKind::Added);
        assert_eq!(seen[1].kind, MutationKind::Updated);
    }

    #[test]
    fn test_unchanged_write_is_silent() {
        let store = MemoryOptionStore::with_rows([("give_version", "2.33.1")]);
        let seen = recorder(&store, &["give_version"]);

        assert!(!store.set("give_version", "2.33.1"));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_delete_notifies_only_when_present() {
        let store = MemoryOptionStore::with_rows([("give_doing_upgrade", "1")]);
        let seen = recorder(&store, &["give_doing_upgrade"]);

        assert!(store.delete("give_doing_upgrade"));
        assert!(!store.delete("give_doing_upgrade"));

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, MutationKind::Deleted);
    }

    #[test]
    fn test_subscribers_only_see_their_keys() {
        let store = MemoryOptionStore::new();
        let seen = recorder(&store, &["give_settings"]);

        store.set("blogname", "Charity");
        assert!(seen.lock().is_empty());

        store.set("give_settings", "{}");
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_handler_can_read_back_from_store() {
        let store = Arc::new(MemoryOptionStore::new());
        let observed = Arc::new(Mutex::new(None));

        let reader = Arc::downgrade(&store);
        let sink = Arc::clone(&observed);
        store.subscribe(
            &["give_version".to_string()],
            Arc::new(move |m: &OptionMutation| {
                if let Some(store) = reader.upgrade() {
                    *sink.lock() = store.get_raw(&m.name);
                }
            }),
        );

        store.set("give_version", "3.0.0");
        assert_eq!(observed.lock().as_deref(), Some("3.0.0"));
    }

    #[test]
    fn test_unsubscribe() {
        let store = MemoryOptionStore::new();
        let id = store.subscribe(
            &["give_version".to_string()],
            Arc::new(|_: &OptionMutation| {}),
        );

        assert_eq!(store.subscriber_count(), 1);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_set_value_encodes_structured_values() {
        let store = MemoryOptionStore::new();
        let upgrades: SettingValue = vec!["v18_upgrades_core_setting"].into();

        store.set_value("give_completed_upgrades", &upgrades).unwrap();

        assert_eq!(
            store.get_raw("give_completed_upgrades").as_deref(),
            Some(r#"["v18_upgrades_core_setting"]"#)
        );
    }

    #[test]
    fn test_set_value_quotes_ambiguous_strings() {
        let store = MemoryOptionStore::new();

        store.set_value("give_version", &"2.33.1".into()).unwrap();
        store.set_value("give_doing_upgrade", &"false".into()).unwrap();
        store.set_value("give_paused_batches", &false.into()).unwrap();

        assert_eq!(store.get_raw("give_version").as_deref(), Some("2.33.1"));
        assert_eq!(
            store.get_raw("give_doing_upgrade").as_deref(),
            Some(r#""false""#)
        );
        assert_eq!(store.get_raw("give_paused_batches").as_deref(), Some("false"));
    }
}
