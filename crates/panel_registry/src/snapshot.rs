//! Immutable view of the registry at one point in time

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::Arc;

use contracts::{Panel, PanelName};

/// Read-only snapshot returned by [`PanelRegistry::list`].
///
/// Cloning is O(1). Later registry mutations never show up in an existing
/// snapshot.
///
/// [`PanelRegistry::list`]: crate::PanelRegistry::list
#[derive(Debug, Clone, Default)]
pub struct PanelSnapshot {
    panels: Arc<Vec<Panel>>,
}

impl PanelSnapshot {
    pub(crate) fn new(panels: Arc<Vec<Panel>>) -> Self {
        Self { panels }
    }

    /// Topic bound to `name`, if registered.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.find(name).map(|panel| panel.topic.as_str())
    }

    pub fn find(&self, name: &str) -> Option<&Panel> {
        self.panels.iter().find(|panel| panel.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Panel names in insertion order.
    pub fn names(&self) -> Vec<PanelName> {
        self.panels.iter().map(|panel| panel.name.clone()).collect()
    }

    /// Name → topic map, or `None` when no panel is registered.
    pub fn targets(&self) -> Option<HashMap<PanelName, String>> {
        if self.panels.is_empty() {
            return None;
        }
        Some(
            self.panels
                .iter()
                .map(|panel| (panel.name.clone(), panel.topic.clone()))
                .collect(),
        )
    }

    /// Owned copy of the panels.
    pub fn to_vec(&self) -> Vec<Panel> {
        self.panels.as_ref().clone()
    }
}

impl Deref for PanelSnapshot {
    type Target = [Panel];

    fn deref(&self) -> &[Panel] {
        &self.panels
    }
}

impl<'a> IntoIterator for &'a PanelSnapshot {
    type Item = &'a Panel;
    type IntoIter = std::slice::Iter<'a, Panel>;

    fn into_iter(self) -> Self::IntoIter {
        self.panels.iter()
    }
}
