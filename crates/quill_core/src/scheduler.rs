//! Deferred task scheduler
//!
//! Queues work for the next scheduler turn. Every call to
//! [`TaskScheduler::run_pending`] is one turn: it runs exactly the tasks that
//! were queued before it started, so a task deferred from inside another task
//! waits for the following turn.
//!
//! Tasks cannot be cancelled. They receive the element tree when they run and
//! must tolerate ids that no longer resolve.

use std::fmt;

use slotmap::{new_key_type, SlotMap};

use crate::dom::ElementTree;

new_key_type! {
    /// Handle of a queued task
    pub struct TaskId;
}

/// A unit of deferred work
pub type Task = Box<dyn FnOnce(&mut ElementTree) + Send>;

struct PendingTask {
    label: &'static str,
    task: Task,
}

/// FIFO queue of tasks deferred to the next turn
#[derive(Default)]
pub struct TaskScheduler {
    tasks: SlotMap<TaskId, PendingTask>,
    order: Vec<TaskId>,
    turns: u64,
}

impl fmt::Debug for TaskScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskScheduler")
            .field("pending", &self.order.len())
            .field("turns", &self.turns)
            .finish()
    }
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` for the next turn
    pub fn defer<F>(&mut self, label: &'static str, task: F) -> TaskId
    where
        F: FnOnce(&mut ElementTree) + Send + 'static,
    {
        let id = self.tasks.insert(PendingTask {
            label,
            task: Box::new(task),
        });
        self.order.push(id);
        tracing::trace!(label, turn = self.turns + 1, "task deferred");
        id
    }

    /// Number of tasks waiting for the next turn
    pub fn pending(&self) -> usize {
        self.order.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Labels of waiting tasks, in run order
    pub fn pending_labels(&self) -> Vec<&'static str> {
        self.order
            .iter()
            .filter_map(|id| self.tasks.get(*id).map(|t| t.label))
            .collect()
    }

    /// Number of turns run so far
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Run one turn, returning how many tasks ran
    pub fn run_pending(&mut self, tree: &mut ElementTree) -> usize {
        self.turns += 1;
        let order = std::mem::take(&mut self.order);
        let mut ran = 0;

        for id in order {
            let Some(PendingTask { label, task }) = self.tasks.remove(id) else {
                continue;
            };
            tracing::trace!(label, turn = self.turns, "task run");
            task(tree);
            ran += 1;
        }
        ran
    }
}
