//! Form control bridge
//!
//! The enclosing form field shares its `error` / `required` flags with the
//! inputs inside it and collects their dirty/clean notifications. Inputs
//! borrow it for the duration of a call and never keep it.

use std::fmt;
use std::sync::Arc;

/// Notification callback without arguments
pub type NotifyCallback = Arc<dyn Fn() + Send + Sync>;

/// Shared state of an enclosing form field
#[derive(Clone, Default)]
pub struct FormControl {
    pub error: Option<bool>,
    pub required: Option<bool>,
    on_dirty: Option<NotifyCallback>,
    on_clean: Option<NotifyCallback>,
}

impl fmt::Debug for FormControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormControl")
            .field("error", &self.error)
            .field("required", &self.required)
            .field("on_dirty", &self.on_dirty.is_some())
            .field("on_clean", &self.on_clean.is_some())
            .finish()
    }
}

impl FormControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(mut self, error: bool) -> Self {
        self.error = Some(error);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn on_dirty<F: Fn() + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.on_dirty = Some(Arc::new(callback));
        self
    }

    pub fn on_clean<F: Fn() + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.on_clean = Some(Arc::new(callback));
        self
    }

    /// Only an explicit `required == Some(true)` counts
    pub fn is_required(&self) -> bool {
        self.required == Some(true)
    }

    pub(crate) fn notify_dirty(&self) {
        if let Some(callback) = &self.on_dirty {
            callback();
        }
    }

    pub(crate) fn notify_clean(&self) {
        if let Some(callback) = &self.on_clean {
            callback();
        }
    }
}

/// Effective error flag: the input's own flag wins, then the form control's
pub fn resolve_error(own: Option<bool>, form_control: Option<&FormControl>) -> Option<bool> {
    own.or_else(|| form_control.and_then(|fc| fc.error))
}
