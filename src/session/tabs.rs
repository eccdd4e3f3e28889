use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of the permanent graph-editor tab. It exists from construction and
/// cannot be closed.
pub const WORKFLOW_TAB_ID: &str = "workflow";

/// What a tab shows: the graph editor, or one externally-launched notebook
/// session keyed by `(project_id, name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabKind {
    Workflow,
    Session {
        #[serde(alias = "projectId")]
        project_id: String,
        name: String,
        url: String,
    },
}

/// One open workspace view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub title: String,
    #[serde(alias = "isActive")]
    pub is_active: bool,
    #[serde(flatten)]
    pub kind: TabKind,
}

/// Tracks open tabs. Tabs have no sub-states beyond active/inactive and no
/// background transitions; the three operations below are the only way state
/// changes. Exactly one tab is active at any time.
#[derive(Debug, Clone)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self {
            tabs: vec![Tab {
                id: WORKFLOW_TAB_ID.to_string(),
                title: "Workflow".to_string(),
                is_active: true,
                kind: TabKind::Workflow,
            }],
        }
    }

    /// Opens a session tab, or activates the existing tab for the same
    /// `(project_id, name)` key. At most one tab per session ever exists.
    /// Returns the id of the now-active tab.
    pub fn open(&mut self, project_id: &str, name: &str, url: &str) -> String {
        if let Some(idx) = self.tabs.iter().position(|t| {
            matches!(&t.kind, TabKind::Session { project_id: p, name: n, .. }
                if p == project_id && n == name)
        }) {
            self.activate(idx);
            return self.tabs[idx].id.clone();
        }

        self.tabs.push(Tab {
            id: Uuid::new_v4().to_string(),
            title: name.to_string(),
            is_active: false,
            kind: TabKind::Session {
                project_id: project_id.to_string(),
                name: name.to_string(),
                url: url.to_string(),
            },
        });
        let idx = self.tabs.len() - 1;
        self.activate(idx);
        self.tabs[idx].id.clone()
    }

    /// Closes a tab. No-op for the permanent workflow tab and for unknown
    /// ids. Closing the active tab falls back to the workflow tab.
    pub fn close(&mut self, tab_id: &str) {
        if tab_id == WORKFLOW_TAB_ID {
            return;
        }
        let Some(idx) = self.tabs.iter().position(|t| t.id == tab_id) else {
            return;
        };
        let was_active = self.tabs[idx].is_active;
        self.tabs.remove(idx);
        if was_active {
            // The workflow tab is always at index 0.
            self.activate(0);
        }
    }

    /// Activates exactly the given tab. An unknown id is an error and leaves
    /// activation unchanged.
    pub fn switch(&mut self, tab_id: &str) -> Result<(), SessionError> {
        let idx = self
            .tabs
            .iter()
            .position(|t| t.id == tab_id)
            .ok_or_else(|| SessionError::UnknownTab(tab_id.to_string()))?;
        self.activate(idx);
        Ok(())
    }

    pub fn active(&self) -> &Tab {
        self.tabs
            .iter()
            .find(|t| t.is_active)
            .unwrap_or(&self.tabs[0])
    }

    pub fn get(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn activate(&mut self, idx: usize) {
        for (i, tab) in self.tabs.iter_mut().enumerate() {
            tab.is_active = i == idx;
        }
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}
