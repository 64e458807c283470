//! Dispatch outcome types

use serde::Serialize;

use crate::PanelName;

/// Result of one publish attempt to one resolved target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// The transport accepted the publish
    Delivered,
    /// The name does not resolve to any registered panel
    UnknownTarget,
    /// The transport rejected or failed the publish
    TransportFailure(String),
}

impl DeliveryStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Short label, also used as a metrics tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::UnknownTarget => "unknown_target",
            Self::TransportFailure(_) => "transport_failure",
        }
    }
}

/// Outcome for one entry of the resolved target list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetOutcome {
    pub target: PanelName,

    /// Topic the name resolved to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(flatten)]
    pub status: DeliveryStatus,
}

/// Aggregated result of one dispatch call.
///
/// Kept as a list rather than a map: when a name is targeted twice both
/// attempts are reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    entries: Vec<TargetOutcome>,
}

impl DispatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, outcome: TargetOutcome) {
        self.entries.push(outcome);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TargetOutcome> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[TargetOutcome] {
        &self.entries
    }

    /// Every status recorded for `name`, in resolution order.
    pub fn statuses_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DeliveryStatus> {
        self.entries
            .iter()
            .filter(move |entry| entry.target == name)
            .map(|entry| &entry.status)
    }

    /// First status recorded for `name`.
    pub fn status_of(&self, name: &str) -> Option<&DeliveryStatus> {
        self.entries
            .iter()
            .find(|entry| entry.target == name)
            .map(|entry| &entry.status)
    }

    pub fn delivered_count(&self) -> usize {
        self.count(|s| matches!(s, DeliveryStatus::Delivered))
    }

    pub fn unknown_count(&self) -> usize {
        self.count(|s| matches!(s, DeliveryStatus::UnknownTarget))
    }

    pub fn failure_count(&self) -> usize {
        self.count(|s| matches!(s, DeliveryStatus::TransportFailure(_)))
    }

    /// True when every attempted target was delivered (vacuously true when empty).
    pub fn all_delivered(&self) -> bool {
        self.entries.iter().all(|e| e.status.is_delivered())
    }

    fn count(&self, pred: impl Fn(&DeliveryStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.status)).count()
    }
}

impl IntoIterator for DispatchOutcome {
    type Item = TargetOutcome;
    type IntoIter = std::vec::IntoIter<TargetOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a DispatchOutcome {
    type Item = &'a TargetOutcome;
    type IntoIter = std::slice::Iter<'a, TargetOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<TargetOutcome> for DispatchOutcome {
    fn from_iter<I: IntoIterator<Item = TargetOutcome>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
