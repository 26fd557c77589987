//! Widget error types

use quill_core::dom::{ElementId, TreeError};
use thiserror::Error;

/// Caller-contract violations surfaced by widgets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// An operation needed the editable element before the widget was mounted
    #[error("input is not mounted")]
    NotMounted,

    /// `mount` was called on an already mounted widget
    #[error("input is already mounted")]
    AlreadyMounted,

    /// The widget's element was removed from the tree underneath it
    #[error("input element {0:?} is detached")]
    Detached(ElementId),

    /// A custom surface rendered no editable element
    #[error("surface `{0}` rendered no editable element")]
    MissingEditable(String),
}

impl From<TreeError> for InputError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::UnknownElement(id) => InputError::Detached(id),
        }
    }
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, InputError>;
