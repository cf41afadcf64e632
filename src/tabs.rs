//! Exclusive tab selection within independent tab groups.
//!
//! Tab controls and panels are grouped by their enclosing container. Controls
//! and panels that sit in no container form one implicit page-wide group.
//! Within a group exactly one control is active once initialized, and the
//! only visible panel is the one that control targets.

use crate::page::{PanelMarkup, TabControlMarkup};
use log::*;

/// Delay before a freshly revealed panel fades in.
///
pub const PANEL_FADE_IN_MS: u64 = 10;

/// Errors that can occur while switching tabs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TabError {
    /// Control declares no target panel
    #[error("Tab control '{tab}' is missing a target panel")]
    MissingTarget { tab: String },

    /// Target panel is not part of the control's group
    #[error("Tab panel not found: {panel_id}")]
    PanelNotFound { panel_id: String },

    /// No tab control exists at the given index
    #[error("Unknown tab control {0}")]
    UnknownTab(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabEntry {
    /// Index of the control in the page's tab controls.
    pub control: usize,
    pub label: String,
    pub target: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabPanel {
    pub panel_id: String,
    pub body: Vec<String>,
    pub visible: bool,
    pub opacity: f32,
}

/// An independent scope of mutually exclusive tab/panel pairs.
///
#[derive(Debug, Clone, PartialEq)]
pub struct TabGroup {
    pub group_id: Option<String>,
    pub entries: Vec<TabEntry>,
    pub panels: Vec<TabPanel>,
}

impl TabGroup {
    fn new(group_id: Option<String>) -> Self {
        TabGroup {
            group_id,
            entries: vec![],
            panels: vec![],
        }
    }

    /// A group without tab controls never changes state.
    ///
    pub fn is_inert(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_entry(&self) -> Option<&TabEntry> {
        self.entries.iter().find(|entry| entry.active)
    }

    pub fn visible_panel_ids(&self) -> Vec<&str> {
        self.panels
            .iter()
            .filter(|panel| panel.visible)
            .map(|panel| panel.panel_id.as_str())
            .collect()
    }

    fn panel_index(&self, panel_id: &str) -> Option<usize> {
        self.panels.iter().position(|panel| panel.panel_id == panel_id)
    }

    /// Activate the entry at `position` and reveal its panel. Leaves the
    /// group untouched when the target cannot be located.
    ///
    pub fn select(&mut self, position: usize) -> Result<&str, TabError> {
        let entry = self
            .entries
            .get(position)
            .ok_or(TabError::UnknownTab(position))?;
        let target = entry.target.clone().ok_or_else(|| TabError::MissingTarget {
            tab: entry.label.clone(),
        })?;
        let panel_index = self
            .panel_index(&target)
            .ok_or(TabError::PanelNotFound { panel_id: target })?;

        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.active = index == position;
        }
        for (index, panel) in self.panels.iter_mut().enumerate() {
            panel.visible = index == panel_index;
        }
        let panel = &mut self.panels[panel_index];
        panel.opacity = 0.0;
        Ok(&panel.panel_id)
    }

    /// Settle the group's initial selection: the first control marked
    /// active in markup wins, otherwise the first control with a target.
    ///
    pub fn initialize(&mut self) -> Result<(), TabError> {
        if self.is_inert() {
            return Ok(());
        }
        let chosen = self
            .entries
            .iter()
            .position(|entry| entry.active)
            .or_else(|| self.entries.iter().position(|entry| entry.target.is_some()));

        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.active = Some(index) == chosen;
        }
        let target = chosen.and_then(|position| self.entries[position].target.clone());
        let panel_index = target.as_deref().and_then(|id| self.panel_index(id));
        for (index, panel) in self.panels.iter_mut().enumerate() {
            panel.visible = Some(index) == panel_index;
            panel.opacity = 1.0;
        }

        match (chosen, target, panel_index) {
            (_, Some(_), Some(_)) => Ok(()),
            (_, Some(panel_id), None) => Err(TabError::PanelNotFound { panel_id }),
            (Some(position), None, _) => Err(TabError::MissingTarget {
                tab: self.entries[position].label.clone(),
            }),
            (None, None, _) => Err(TabError::MissingTarget {
                tab: self.entries[0].label.clone(),
            }),
        }
    }
}

/// Every tab group on the current page.
///
#[derive(Debug, Clone, Default)]
pub struct TabStateMachine {
    groups: Vec<TabGroup>,
    owners: Vec<(usize, usize)>, // control index -> (group, position)
}

impl TabStateMachine {
    /// Build groups from the page's tab controls and panels. Groups appear in
    /// the order their first control (or panel) appears.
    ///
    pub fn from_markup(controls: &[TabControlMarkup], panels: &[PanelMarkup]) -> Self {
        let mut machine = TabStateMachine::default();
        for (control, markup) in controls.iter().enumerate() {
            let group = machine.group_for(&markup.container);
            let entries = &mut machine.groups[group].entries;
            machine.owners.push((group, entries.len()));
            entries.push(TabEntry {
                control,
                label: markup.label.clone(),
                target: markup.target.clone(),
                active: markup.active,
            });
        }
        for markup in panels {
            let group = machine.group_for(&markup.container);
            machine.groups[group].panels.push(TabPanel {
                panel_id: markup.id.clone(),
                body: markup.body.clone(),
                visible: !markup.hidden,
                opacity: 1.0,
            });
        }
        machine
    }

    fn group_for(&mut self, container: &Option<String>) -> usize {
        match self.groups.iter().position(|group| &group.group_id == container) {
            Some(index) => index,
            None => {
                self.groups.push(TabGroup::new(container.clone()));
                self.groups.len() - 1
            }
        }
    }

    /// Initialize every group, returning the diagnostics raised on the way.
    ///
    pub fn initialize(&mut self) -> Vec<TabError> {
        let mut diagnostics = vec![];
        for group in self.groups.iter_mut() {
            if let Err(e) = group.initialize() {
                warn!(
                    "Tab group '{}': {}",
                    group.group_id.as_deref().unwrap_or("page"),
                    e
                );
                diagnostics.push(e);
            }
        }
        diagnostics
    }

    /// Activate the tab control at `control`. Returns the owning group index
    /// and the revealed panel identifier.
    ///
    pub fn activate(&mut self, control: usize) -> Result<(usize, String), TabError> {
        let (group, position) = self
            .owner(control)
            .ok_or(TabError::UnknownTab(control))?;
        let panel_id = self.groups[group].select(position)?.to_string();
        debug!("Activated tab control {} showing panel '{}'", control, panel_id);
        Ok((group, panel_id))
    }

    /// Finish the fade-in of a revealed panel.
    ///
    pub fn fade_in(&mut self, group: usize, panel_id: &str) {
        if let Some(panel) = self
            .groups
            .get_mut(group)
            .and_then(|group| group.panels.iter_mut().find(|panel| panel.panel_id == panel_id))
        {
            panel.opacity = 1.0;
        }
    }

    pub fn owner(&self, control: usize) -> Option<(usize, usize)> {
        self.owners.get(control).copied()
    }

    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
