//! Value tracking
//!
//! Decides, per render, whether an input is controlled and whether the value
//! it currently observes is dirty (non-empty). Both checks are pure.

use std::fmt;

use quill_core::dom::Element;

/// A value supplied by the caller through the `value` prop
#[derive(Clone, Debug, PartialEq)]
pub enum InputValue {
    Text(String),
    Number(f64),
}

impl InputValue {
    /// Textual form, if the value is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InputValue::Text(text) => Some(text),
            InputValue::Number(_) => None,
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Text(text) => f.write_str(text),
            InputValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for InputValue {
    fn from(text: &str) -> Self {
        InputValue::Text(text.to_string())
    }
}

impl From<String> for InputValue {
    fn from(text: String) -> Self {
        InputValue::Text(text)
    }
}

impl From<f64> for InputValue {
    fn from(n: f64) -> Self {
        InputValue::Number(n)
    }
}

impl From<i32> for InputValue {
    fn from(n: i32) -> Self {
        InputValue::Number(f64::from(n))
    }
}

/// Something a dirty check can read a value from
///
/// Implemented by the input's props (controlled mode) and by the live
/// editable element (uncontrolled mode). Only textual values have a length;
/// numbers never count as dirty when read from props.
pub trait ValueSource {
    fn text_value(&self) -> Option<&str>;
}

impl ValueSource for Element {
    fn text_value(&self) -> Option<&str> {
        Some(&self.value)
    }
}

impl ValueSource for InputValue {
    fn text_value(&self) -> Option<&str> {
        self.as_text()
    }
}

/// True iff the source holds a non-empty textual value
pub fn is_dirty<S: ValueSource + ?Sized>(source: Option<&S>) -> bool {
    source
        .and_then(|s| s.text_value())
        .is_some_and(|text| !text.is_empty())
}

/// True iff the `value` prop is present and textual for this render
pub fn is_controlled(value: Option<&InputValue>) -> bool {
    matches!(value, Some(InputValue::Text(_)))
}
