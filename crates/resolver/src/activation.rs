//! Integration activation seam
//!
//! Classification only produces a decision. Applying the build plugin is a
//! separate side effect performed through [`IntegrationActivator`], so the
//! surrounding build orchestrator decides what "apply" actually means.

use serde::Serialize;
use tracing::debug;

#[cfg_attr(test, mockall::automock)]
pub trait IntegrationActivator {
    /// Enables the build plugin identified by `plugin_id`
    fn activate(&mut self, plugin_id: &str);
}

/// Ordered record of applied plugins.
///
/// Applying the same id twice is a no-op, matching how a build system treats
/// repeated plugin application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AppliedPlugins {
    ids: Vec<String>,
}

impl AppliedPlugins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, plugin_id: &str) -> bool {
        self.ids.iter().any(|id| id == plugin_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl IntegrationActivator for AppliedPlugins {
    fn activate(&mut self, plugin_id: &str) {
        if self.contains(plugin_id) {
            debug!(plugin = plugin_id, "Plugin already applied");
            return;
        }
        self.ids.push(plugin_id.to_string());
    }
}
