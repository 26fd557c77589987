//! Quill Widget Library
//!
//! A text input with FSM-driven focus, controlled and uncontrolled value
//! tracking, and dirty/clean reporting to an enclosing form control.
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! use quill_widgets::prelude::*;
//!
//! let filled = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&filled);
//! let form = FormControl::new().on_dirty(move || flag.store(true, Ordering::SeqCst));
//!
//! let mut ctx = WidgetContext::new();
//! let mut notes = InputConfig::new().multi_line(true).build(&mut ctx, Some(&form));
//! notes.mount(&mut ctx, None, Some(&form)).unwrap();
//!
//! // The host writes the text and delivers the change event
//! let editable = notes.editable().unwrap();
//! let change = ctx.tree_mut().input(editable, "first\nsecond").unwrap();
//! notes.handle_event(&mut ctx, &change, Some(&form));
//! assert!(filled.load(Ordering::SeqCst));
//!
//! // The wrapper height follows on the next turn
//! ctx.tick();
//! let wrapper = ctx.tree().get(notes.wrapper().unwrap()).unwrap();
//! assert!(wrapper.style_height.is_some());
//! ```

pub mod context;
pub mod error;
pub mod form_control;
pub mod height_sync;
pub mod input;
pub mod style;
pub mod surface;
pub mod textarea;
pub mod value;

pub use context::{WidgetContext, WidgetId};
pub use error::{InputError, Result};
pub use form_control::FormControl;
pub use input::{Input, InputConfig};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::context::{WidgetContext, WidgetId};
    pub use crate::error::{InputError, Result};
    pub use crate::form_control::FormControl;
    pub use crate::input::{states, Input, InputConfig};
    pub use crate::style::{ScopedStyleResolver, StyleResolver};
    pub use crate::surface::{CustomSurface, Surface, SurfaceProps};
    pub use crate::textarea::TextareaConfig;
    pub use crate::value::InputValue;

    pub use quill_core::events::{event_types, Event};
}
