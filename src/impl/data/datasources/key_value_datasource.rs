use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

/// String key-value store backing both record collections, modeled after the
/// browser localStorage the original data lives in. Synchronous by design:
/// there is exactly one logical actor mutating state at a time.
pub trait KeyValueDatasource {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: String);

    fn remove_item(&mut self, key: &str);
}

/// Shared handle so both repositories (and the snapshot usecase) see the same
/// datasource.
pub(crate) type SharedDatasource<DS> = Arc<Mutex<DS>>;

/// In-memory implementation. The default backing store of the facade, and the
/// substitute tests inject instead of a real persistence layer.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueDatasource {
    items: HashMap<String, String>,
}

impl InMemoryKeyValueDatasource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueDatasource for InMemoryKeyValueDatasource {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut ds = InMemoryKeyValueDatasource::new();
        assert_eq!(ds.get_item("gestor_entities"), None);
        ds.set_item("gestor_entities", "[]".to_string());
        assert_eq!(ds.get_item("gestor_entities").as_deref(), Some("[]"));
        ds.set_item("gestor_entities", "[{}]".to_string());
        assert_eq!(ds.get_item("gestor_entities").as_deref(), Some("[{}]"));
        ds.remove_item("gestor_entities");
        assert_eq!(ds.get_item("gestor_entities"), None);
    }
}
