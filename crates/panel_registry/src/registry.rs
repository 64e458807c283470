//! PanelRegistry - mutable panel collection with copy-on-write snapshots

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use contracts::{Panel, PanelConfig};
use tracing::{debug, info};

use crate::error::RegistryError;
use crate::snapshot::PanelSnapshot;

/// Insertion-ordered panels with unique names.
///
/// Readers clone the inner `Arc` under a short read lock. Writers mutate
/// through `Arc::make_mut`, which copies the list when a snapshot still holds
/// it, so readers never see a half-applied mutation.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: RwLock<Arc<Vec<Panel>>>,
}

impl PanelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(name, topic)` pairs, applying the same rules
    /// as [`add`](Self::add). Stops at the first rejected pair.
    pub fn from_panels<I, N, T>(panels: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (N, T)>,
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let registry = Self::new();
        for (name, topic) in panels {
            registry.add(name.as_ref(), topic.as_ref())?;
        }
        Ok(registry)
    }

    /// Build a registry from persisted panel entries.
    pub fn from_config(panels: &[PanelConfig]) -> Result<Self, RegistryError> {
        Self::from_panels(panels.iter().map(|p| (&p.name, &p.topic)))
    }

    /// Register a panel.
    ///
    /// Both fields are trimmed first. The new panel goes to the end of the
    /// list.
    ///
    /// # Errors
    /// - `InvalidField` if name or topic is empty after trimming
    /// - `DuplicateName` if the trimmed name is already registered
    pub fn add(&self, name: &str, topic: &str) -> Result<Panel, RegistryError> {
        let name = name.trim();
        let topic = topic.trim();

        if name.is_empty() {
            return Err(RegistryError::InvalidField { field: "name" });
        }
        if topic.is_empty() {
            return Err(RegistryError::InvalidField { field: "topic" });
        }

        let mut guard = self.write();
        if guard.iter().any(|panel| panel.name == name) {
            debug!(panel = name, "Rejected duplicate panel name");
            return Err(RegistryError::duplicate_name(name));
        }

        let panel = Panel::new(name, topic);
        Arc::make_mut(&mut guard).push(panel.clone());

        info!(panel = %panel.name, topic = %panel.topic, total = guard.len(), "Panel added");
        Ok(panel)
    }

    /// Remove the panel called `name`.
    pub fn remove(&self, name: &str) -> Result<Panel, RegistryError> {
        let mut guard = self.write();
        let index = guard
            .iter()
            .position(|panel| panel.name == name)
            .ok_or_else(|| RegistryError::not_found(name))?;

        let removed = Arc::make_mut(&mut guard).remove(index);
        info!(panel = %removed.name, total = guard.len(), "Panel removed");
        Ok(removed)
    }

    /// Remove the panel at `index` in current insertion order.
    pub fn remove_by_index(&self, index: usize) -> Result<Panel, RegistryError> {
        let mut guard = self.write();
        let len = guard.len();
        if index >= len {
            return Err(RegistryError::IndexOutOfRange { index, len });
        }

        let removed = Arc::make_mut(&mut guard).remove(index);
        info!(panel = %removed.name, index, total = guard.len(), "Panel removed");
        Ok(removed)
    }

    /// Snapshot of the current panels.
    pub fn list(&self) -> PanelSnapshot {
        PanelSnapshot::new(Arc::clone(&self.read()))
    }

    /// Topic bound to `name`, if registered.
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.read()
            .iter()
            .find(|panel| panel.name == name)
            .map(|panel| panel.topic.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().iter().any(|panel| panel.name == name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Export for persistence, in insertion order.
    pub fn to_config(&self) -> Vec<PanelConfig> {
        self.read()
            .iter()
            .map(|panel| PanelConfig {
                name: panel.name.to_string(),
                topic: panel.topic.clone(),
            })
            .collect()
    }

    // Every mutation validates before touching the list, so a poisoned lock
    // still guards a consistent value.
    fn read(&self) -> RwLockReadGuard<'_, Arc<Vec<Panel>>> {
        self.panels.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<Vec<Panel>>> {
        self.panels.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(registry: &PanelRegistry) -> Vec<String> {
        registry.list().iter().map(|p| p.name.to_string()).collect()
    }

    #[test]
    fn test_add_and_resolve() {
        let registry = PanelRegistry::new();
        registry.add("kitchen", "home/kitchen").unwrap();

        assert_eq!(registry.resolve("kitchen").as_deref(), Some("home/kitchen"));
        assert_eq!(registry.resolve("Kitchen"), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_trims_fields() {
        let registry = PanelRegistry::new();
        let panel = registry.add("  office \t", " home/office ").unwrap();

        assert_eq!(panel.name, "office");
        assert_eq!(panel.topic, "home/office");
        assert!(registry.contains("office"));
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let registry = PanelRegistry::new();
        assert_eq!(
            registry.add("   ", "t"),
            Err(RegistryError::InvalidField { field: "name" })
        );
        assert_eq!(
            registry.add("a", ""),
            Err(RegistryError::InvalidField { field: "topic" })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_name_keeps_original() {
        let registry = PanelRegistry::new();
        registry.add("a", "topic/original").unwrap();

        let err = registry.add(" a ", "topic/other").unwrap_err();
        assert_eq!(err, RegistryError::duplicate_name("a"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("a").as_deref(), Some("topic/original"));
    }

    #[test]
    fn test_shared_topic_is_allowed() {
        let registry = PanelRegistry::new();
        registry.add("a", "shared").unwrap();
        registry.add("b", "shared").unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_list_reflects_survivors_in_insertion_order() {
        let registry = PanelRegistry::new();
        for name in ["a", "b", "c", "d", "e"] {
            registry.add(name, &format!("t/{name}")).unwrap();
        }
        registry.remove("b").unwrap();
        registry.remove_by_index(2).unwrap(); // "d"

        assert_eq!(names(&registry), ["a", "c", "e"]);
    }

    #[test]
    fn test_readd_moves_panel_to_end() {
        let registry = PanelRegistry::from_panels([("a", "t/a"), ("b", "t/b")]).unwrap();
        registry.remove("a").unwrap();
        registry.add("a", "t/a2").unwrap();

        assert_eq!(names(&registry), ["b", "a"]);
        assert_eq!(registry.resolve("a").as_deref(), Some("t/a2"));
    }

    #[test]
    fn test_remove_unknown() {
        let registry = PanelRegistry::from_panels([("a", "t/a")]).unwrap();
        assert_eq!(registry.remove("z"), Err(RegistryError::not_found("z")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_by_index_out_of_range() {
        let registry = PanelRegistry::from_panels([("a", "t/a")]).unwrap();
        assert_eq!(
            registry.remove_by_index(1),
            Err(RegistryError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(names(&registry), ["a"]);
    }

    #[test]
    fn test_snapshot_is_isolated_from_mutation() {
        let registry = PanelRegistry::from_panels([("a", "t/a"), ("b", "t/b")]).unwrap();
        let before = registry.list();

        registry.remove("a").unwrap();
        registry.add("c", "t/c").unwrap();

        assert_eq!(before.len(), 2);
        assert_eq!(before.resolve("a"), Some("t/a"));
        assert!(!before.contains("c"));
        assert_eq!(names(&registry), ["b", "c"]);
    }

    #[test]
    fn test_targets_none_when_empty() {
        let registry = PanelRegistry::new();
        assert!(registry.list().targets().is_none());

        registry.add("a", "t/a").unwrap();
        let targets = registry.list().targets().unwrap();
        assert_eq!(targets.get("a").map(String::as_str), Some("t/a"));
    }

    #[test]
    fn test_from_config_rejects_duplicates() {
        let panels = vec![
            PanelConfig {
                name: "a".into(),
                topic: "t/a".into(),
            },
            PanelConfig {
                name: "a".into(),
                topic: "t/b".into(),
            },
        ];
        assert!(matches!(
            PanelRegistry::from_config(&panels),
            Err(RegistryError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_to_config_round_trip() {
        let registry = PanelRegistry::from_panels([("a", "t/a"), ("b", "t/b")]).unwrap();
        let exported = registry.to_config();
        let rebuilt = PanelRegistry::from_config(&exported).unwrap();
        assert_eq!(rebuilt.list().to_vec(), registry.list().to_vec());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_readers_never_see_partial_state() {
        let registry = Arc::new(PanelRegistry::new());

        let writer = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                for i in 0..200 {
                    registry.add(&format!("p{i}"), &format!("t/{i}")).unwrap();
                    if i % 3 == 0 {
                        registry.remove_by_index(0).unwrap();
                    }
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..3 {
            let registry = Arc::clone(&registry);
            readers.push(tokio::spawn(async move {
                for _ in 0..200 {
                    let snapshot = registry.list();
                    for panel in &snapshot {
                        let suffix = panel.name.trim_start_matches('p');
                        assert_eq!(panel.topic, format!("t/{suffix}"));
                    }
                    tokio::task::yield_now().await;
                }
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
    }
}
