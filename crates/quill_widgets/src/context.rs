//! Widget Context - owns everything widgets share
//!
//! The WidgetContext provides:
//! - Widget registration with an optional interaction FSM per widget
//! - Dirty tracking, so hosts only re-render widgets whose state changed
//! - The element tree widgets render into
//! - The deferred task scheduler and the style resolver

use std::sync::Arc;

use quill_core::dom::ElementTree;
use quill_core::events::EventType;
use quill_core::fsm::{StateId, StateMachine};
use quill_core::scheduler::TaskScheduler;
use slotmap::{new_key_type, SlotMap};

use crate::style::{ScopedStyleResolver, StyleResolver};

new_key_type! {
    pub struct WidgetId;
}

/// Per-widget data stored in the context
#[derive(Debug)]
struct WidgetData {
    fsm: Option<StateMachine>,
    dirty: bool,
}

/// The main widget context that manages all widget state
pub struct WidgetContext {
    widgets: SlotMap<WidgetId, WidgetData>,
    tree: ElementTree,
    scheduler: TaskScheduler,
    styles: Arc<dyn StyleResolver>,
}

impl std::fmt::Debug for WidgetContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetContext")
            .field("widgets", &self.widgets.len())
            .field("tree", &self.tree)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetContext {
    /// Create a context using [`ScopedStyleResolver`] class names
    pub fn new() -> Self {
        Self::with_style_resolver(Arc::new(ScopedStyleResolver::new()))
    }

    pub fn with_style_resolver(styles: Arc<dyn StyleResolver>) -> Self {
        Self {
            widgets: SlotMap::with_key(),
            tree: ElementTree::new(),
            scheduler: TaskScheduler::new(),
            styles,
        }
    }

    // =========================================================================
    // Widget Registration
    // =========================================================================

    /// Register a new widget and get its ID
    pub fn register_widget(&mut self) -> WidgetId {
        self.widgets.insert(WidgetData {
            fsm: None,
            dirty: true,
        })
    }

    /// Register a widget with a state machine
    pub fn register_widget_with_fsm(&mut self, fsm: StateMachine) -> WidgetId {
        self.widgets.insert(WidgetData {
            fsm: Some(fsm),
            dirty: true,
        })
    }

    pub fn unregister_widget(&mut self, id: WidgetId) {
        self.widgets.remove(id);
    }

    pub fn is_registered(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(id)
    }

    // =========================================================================
    // State Machine Integration
    // =========================================================================

    /// Send an event to a widget's FSM, returning whether its state changed
    ///
    /// A state change marks the widget dirty.
    pub fn send_fsm_event(&mut self, widget_id: WidgetId, event: EventType) -> bool {
        let Some(data) = self.widgets.get_mut(widget_id) else {
            return false;
        };
        let Some(fsm) = data.fsm.as_mut() else {
            return false;
        };

        let before = fsm.current_state();
        let changed = fsm.send(event) != before;
        if changed {
            data.dirty = true;
        }
        changed
    }

    pub fn get_fsm_state(&self, widget_id: WidgetId) -> Option<StateId> {
        self.widgets
            .get(widget_id)?
            .fsm
            .as_ref()
            .map(StateMachine::current_state)
    }

    pub fn get_fsm(&self, widget_id: WidgetId) -> Option<&StateMachine> {
        self.widgets.get(widget_id)?.fsm.as_ref()
    }

    // =========================================================================
    // Dirty Tracking
    // =========================================================================

    /// Mark a widget as needing re-render
    pub fn mark_dirty(&mut self, widget_id: WidgetId) {
        if let Some(data) = self.widgets.get_mut(widget_id) {
            data.dirty = true;
        }
    }

    pub fn is_dirty(&self, widget_id: WidgetId) -> bool {
        self.widgets.get(widget_id).is_some_and(|d| d.dirty)
    }

    pub fn has_dirty(&self) -> bool {
        self.widgets.values().any(|d| d.dirty)
    }

    /// Clear one widget's dirty flag (call after re-rendering it)
    pub fn clear_dirty_widget(&mut self, widget_id: WidgetId) {
        if let Some(data) = self.widgets.get_mut(widget_id) {
            data.dirty = false;
        }
    }

    /// Clear all dirty flags
    pub fn clear_dirty(&mut self) {
        for data in self.widgets.values_mut() {
            data.dirty = false;
        }
    }

    // =========================================================================
    // Shared resources
    // =========================================================================

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    pub fn scheduler(&self) -> &TaskScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut TaskScheduler {
        &mut self.scheduler
    }

    pub fn styles(&self) -> &dyn StyleResolver {
        self.styles.as_ref()
    }

    /// Run one scheduler turn against the element tree
    pub fn tick(&mut self) -> usize {
        self.scheduler.run_pending(&mut self.tree)
    }
}
