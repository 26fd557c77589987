//! Height synchronisation for growable surfaces
//!
//! The wrapper of a multi-line input copies the intrinsic height of its first
//! child as an explicit style height, which lets a height transition animate
//! growth. The new content height is only known after layout, so every
//! measurement is deferred by one scheduler turn. One request, one task: no
//! coalescing and no cancellation.

use quill_core::dom::{Element, ElementId, ElementTree};
use quill_core::scheduler::{TaskId, TaskScheduler};

/// Label of the deferred measurement task
pub const TASK_LABEL: &str = "height-sync";

/// Keeps a wrapper element's height in step with its content
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightSyncProxy {
    wrapper: ElementId,
}

impl HeightSyncProxy {
    pub fn new(wrapper: ElementId) -> Self {
        Self { wrapper }
    }

    pub fn wrapper(&self) -> ElementId {
        self.wrapper
    }

    /// Queue one measurement for the next scheduler turn
    pub fn schedule(self, scheduler: &mut TaskScheduler) -> TaskId {
        scheduler.defer(TASK_LABEL, move |tree| {
            self.measure(tree);
        })
    }

    /// Copy the content height onto the wrapper now
    ///
    /// Returns the applied height, or `None` when the wrapper (or its
    /// content) is no longer in the tree.
    pub fn measure(&self, tree: &mut ElementTree) -> Option<f32> {
        let Some(content) = tree.get(self.wrapper).and_then(Element::first_child) else {
            tracing::debug!(wrapper = ?self.wrapper, "wrapper detached, skipping height sync");
            return None;
        };
        let height = tree.get(content)?.client_height;
        tree.get_mut(self.wrapper)?.style_height = Some(height);
        tracing::trace!(wrapper = ?self.wrapper, height, "wrapper height synced");
        Some(height)
    }
}
