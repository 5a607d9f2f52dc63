//! In-memory plugin registry.
//!
//! Serves handles from a fixed table and records how often each name is
//! loaded. Used by tests and by embedders that link their plugins in.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::domain::ports::plugin_registry::{PluginLoadError, PluginRegistry};

/// Registry backed by a `name -> handle` table.
#[derive(Debug, Default)]
pub struct InMemoryRegistry<H> {
    handles: BTreeMap<String, H>,
    /// Names that are listed as known but fail to load, with the reason.
    failures: HashMap<String, String>,
    loads: RefCell<HashMap<String, usize>>,
    known_calls: Cell<usize>,
}

impl<H: Clone> InMemoryRegistry<H> {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, H)>,
        K: Into<String>,
    {
        Self {
            handles: entries.into_iter().map(|(k, h)| (k.into(), h)).collect(),
            failures: HashMap::new(),
            loads: RefCell::new(HashMap::new()),
            known_calls: Cell::new(0),
        }
    }

    pub fn with_plugin(mut self, name: impl Into<String>, handle: H) -> Self {
        self.handles.insert(name.into(), handle);
        self
    }

    /// Make a known name fail on `load`.
    pub fn failing(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.insert(name.into(), reason.into());
        self
    }

    pub fn load_count(&self, name: &str) -> usize {
        self.loads.borrow().get(name).copied().unwrap_or(0)
    }

    pub fn total_loads(&self) -> usize {
        self.loads.borrow().values().sum()
    }

    pub fn known_names_calls(&self) -> usize {
        self.known_calls.get()
    }
}

impl<H: Clone> PluginRegistry for InMemoryRegistry<H> {
    type Handle = H;

    fn known_names(&self) -> BTreeSet<String> {
        self.known_calls.set(self.known_calls.get() + 1);
        self.handles
            .keys()
            .chain(self.failures.keys())
            .cloned()
            .collect()
    }

    fn load(&self, name: &str) -> Result<H, PluginLoadError> {
        *self.loads.borrow_mut().entry(name.to_string()).or_default() += 1;

        if let Some(reason) = self.failures.get(name) {
            return Err(PluginLoadError::ValidationFailed {
                name: name.to_string(),
                reason: reason.clone(),
            });
        }
        self.handles
            .get(name)
            .cloned()
            .ok_or_else(|| PluginLoadError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_and_load() {
        let registry = InMemoryRegistry::new([("a", 1), ("b", 2)]).with_plugin("c", 3);
        let names: Vec<String> = registry.known_names().into_iter().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(registry.load("c").unwrap(), 3);
        assert_eq!(registry.load_count("c"), 1);
        assert_eq!(registry.known_names_calls(), 1);
    }

    #[test]
    fn test_unknown_name() {
        let registry: InMemoryRegistry<u8> = InMemoryRegistry::new(Vec::<(String, u8)>::new());
        assert!(matches!(registry.load("x"), Err(PluginLoadError::NotFound(_))));
    }

    #[test]
    fn test_failing_name_is_known() {
        let registry = InMemoryRegistry::new([("a", 1)]).failing("broken", "bad manifest");
        assert!(registry.known_names().contains("broken"));
        assert!(matches!(
            registry.load("broken"),
            Err(PluginLoadError::ValidationFailed { .. })
        ));
        assert_eq!(registry.total_loads(), 1);
    }
}
