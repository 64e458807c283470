//! Notification requests
//!
//! `NotificationRequest` is the tagged form the dispatcher consumes.
//! `ServiceCall` is the loosely-shaped form automation callers send
//! (target at the top level or nested under `data`, string or list).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::PanelName;

/// Which panels a notification should reach.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TargetSelector {
    /// Every panel in the registry, in registry order
    #[default]
    All,
    /// Exactly one named panel
    Single(PanelName),
    /// An explicit list; order and duplicates are kept
    Many(Vec<PanelName>),
}

impl TargetSelector {
    /// Build a selector from a list of names.
    ///
    /// A single-element list stays `Many`, an empty list selects nothing.
    pub fn many<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<PanelName>,
    {
        Self::Many(names.into_iter().map(Into::into).collect())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<TargetField> for TargetSelector {
    fn from(field: TargetField) -> Self {
        match field {
            TargetField::One(name) => Self::Single(name),
            TargetField::Many(names) => Self::Many(names),
        }
    }
}

/// A message plus its routing and passthrough options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationRequest {
    /// Message body (may be empty)
    pub message: String,
    /// Target panels
    pub target: TargetSelector,
    /// Passthrough value published under `opt`
    pub options: Option<Value>,
}

impl NotificationRequest {
    /// Request addressed to all panels, without options.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: TargetSelector) -> Self {
        self.target = target;
        self
    }

    pub fn with_options(mut self, options: impl Into<Value>) -> Self {
        self.options = Some(options.into());
        self
    }
}

/// Target as it appears on the wire: a name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetField {
    One(PanelName),
    Many(Vec<PanelName>),
}

/// Nested `data` block of a service call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

/// Notification service call as sent by automation rules.
///
/// ```json
/// {"message": "Dinner is ready", "data": {"target": ["kitchen"], "options": "blink"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ServiceData>,
}

impl ServiceCall {
    /// Normalise into a tagged request.
    ///
    /// A top-level `target` takes precedence over `data.target`; when neither
    /// is given the request addresses every panel.
    pub fn into_request(self) -> NotificationRequest {
        let ServiceData {
            target: data_target,
            options,
        } = self.data.unwrap_or_default();

        let target = self
            .target
            .or(data_target)
            .map(TargetSelector::from)
            .unwrap_or_default();

        NotificationRequest {
            message: self.message,
            target,
            options,
        }
    }
}
