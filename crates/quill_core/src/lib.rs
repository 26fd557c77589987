//! Quill Core Runtime
//!
//! Foundational primitives for Quill widgets:
//!
//! - **State Machines**: flat transition tables for widget interaction states
//! - **Events**: the element-level events hosts deliver to widgets
//! - **Element Tree**: the retained element hierarchy widgets render into
//! - **Scheduler**: deferral of work to the next scheduler turn
//!
//! # Example
//!
//! ```rust
//! use quill_core::dom::{ElementSpec, ElementTree};
//! use quill_core::scheduler::TaskScheduler;
//!
//! let mut tree = ElementTree::new();
//! let mut scheduler = TaskScheduler::new();
//!
//! let root = tree.build(&ElementSpec::new("div"), None).unwrap();
//! scheduler.defer("grow", move |tree| {
//!     if let Some(element) = tree.get_mut(root) {
//!         element.style_height = Some(40.0);
//!     }
//! });
//!
//! // Nothing happens until the next turn
//! assert_eq!(tree.get(root).unwrap().style_height, None);
//! scheduler.run_pending(&mut tree);
//! assert_eq!(tree.get(root).unwrap().style_height, Some(40.0));
//! ```

pub mod dom;
pub mod events;
pub mod fsm;
pub mod scheduler;

pub use dom::{Element, ElementId, ElementSpec, ElementTree, TreeError};
pub use events::{event_types, Event, EventData, EventType};
pub use fsm::{StateId, StateMachine, StateMachineBuilder, Transition};
pub use scheduler::{Task, TaskId, TaskScheduler};
