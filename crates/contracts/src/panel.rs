//! Panel identity and record types
//!
//! `PanelName` is an `Arc<str>` newtype: names are validated once when the
//! panel is registered and then cloned into every outcome of every dispatch.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Case-sensitive panel name, the selection key of the registry.
///
/// # Examples
/// ```
/// use contracts::PanelName;
///
/// let name: PanelName = "kitchen".into();
/// assert_eq!(name, "kitchen");
/// assert_eq!(name.clone().as_str(), "kitchen");
/// ```
#[derive(Clone, Default)]
pub struct PanelName(Arc<str>);

impl PanelName {
    /// Create a name from a string slice (no trimming or validation).
    #[inline]
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Borrow the name as `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for PanelName {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PanelName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PanelName {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PanelName {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PanelName {
    #[inline]
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for PanelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for PanelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PanelName({:?})", self.0)
    }
}

impl PartialEq for PanelName {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for PanelName {}

impl PartialEq<str> for PanelName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for PanelName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl PartialEq<String> for PanelName {
    #[inline]
    fn eq(&self, other: &String) -> bool {
        &*self.0 == other.as_str()
    }
}

// Must hash like `str` so `HashMap<PanelName, _>` can be queried with `&str`.
impl Hash for PanelName {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl Serialize for PanelName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PanelName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// One addressable destination: a unique name bound to a transport topic.
///
/// Panels are immutable; changing a topic means removing the panel and adding
/// it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub name: PanelName,
    pub topic: String,
}

impl Panel {
    pub fn new(name: impl Into<PanelName>, topic: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            topic: topic.into(),
        }
    }

    /// Human-readable label, `name (topic)`, used by selection menus.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.topic)
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_clone_shares_allocation() {
        let a: PanelName = "hallway".into();
        let b = a.clone();
        assert_eq!(a.as_str().as_ptr(), b.as_str().as_ptr());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let name: PanelName = "Kitchen".into();
        assert_eq!(name, "Kitchen");
        assert_ne!(name, PanelName::from("kitchen"));
    }

    #[test]
    fn test_lookup_by_str() {
        let mut topics: HashMap<PanelName, &str> = HashMap::new();
        topics.insert("office".into(), "home/panels/office");
        assert_eq!(topics.get("office"), Some(&"home/panels/office"));
    }

    #[test]
    fn test_panel_serde_shape() {
        let panel = Panel::new("office", "home/panels/office");
        let json = serde_json::to_string(&panel).unwrap();
        assert_eq!(json, r#"{"name":"office","topic":"home/panels/office"}"#);

        let parsed: Panel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, panel);
    }

    #[test]
    fn test_panel_label_and_display() {
        let panel = Panel::new("office", "home/panels/office");
        assert_eq!(panel.label(), "office (home/panels/office)");
        assert_eq!(panel.to_string(), "office: home/panels/office");
    }
}
