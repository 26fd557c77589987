//! Style sheets and class-name composition
//!
//! Widgets declare which style rules they use with a [`StyleSheet`]; turning
//! a sheet into concrete class names is delegated to a [`StyleResolver`]
//! supplied by the host. [`ClassNames`] composes the resolved names with
//! state-dependent switches.

use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// A named set of style rules
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleSheet {
    pub name: &'static str,
    pub rules: &'static [&'static str],
}

impl StyleSheet {
    pub const fn new(name: &'static str, rules: &'static [&'static str]) -> Self {
        Self { name, rules }
    }
}

/// Rule names of the input style sheet
pub mod rules {
    pub const WRAPPER: &str = "wrapper";
    pub const FORM_CONTROL: &str = "form-control";
    pub const INKBAR: &str = "inkbar";
    pub const FOCUSED: &str = "focused";
    pub const ERROR: &str = "error";
    pub const INPUT: &str = "input";
    pub const TEXTAREA_WRAPPER: &str = "textarea-wrapper";
    pub const TEXTAREA: &str = "textarea";
    pub const DISABLED: &str = "disabled";
    pub const UNDERLINE: &str = "underline";
}

/// Style sheet used by [`crate::input::Input`]
pub const INPUT_STYLE_SHEET: StyleSheet = StyleSheet::new(
    "QuillInput",
    &[
        rules::WRAPPER,
        rules::FORM_CONTROL,
        rules::INKBAR,
        rules::FOCUSED,
        rules::ERROR,
        rules::INPUT,
        rules::TEXTAREA_WRAPPER,
        rules::TEXTAREA,
        rules::DISABLED,
        rules::UNDERLINE,
    ],
);

/// Concrete class names resolved for one style sheet
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classes {
    names: FxHashMap<&'static str, String>,
}

impl Classes {
    pub fn insert(&mut self, rule: &'static str, class_name: impl Into<String>) {
        self.names.insert(rule, class_name.into());
    }

    /// Class name for `rule`, or an empty string if the sheet lacks it
    pub fn get(&self, rule: &str) -> &str {
        self.names.get(rule).map(String::as_str).unwrap_or("")
    }
}

/// Turns style sheet definitions into concrete class names
pub trait StyleResolver: Send + Sync {
    fn render(&self, sheet: &StyleSheet) -> Classes;
}

/// Resolves every rule to `{sheet}-{rule}`
///
/// Counts how often it was asked to render, which hosts can use to verify
/// render frequency.
#[derive(Debug, Default)]
pub struct ScopedStyleResolver {
    renders: AtomicUsize,
}

impl ScopedStyleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::Relaxed)
    }
}

impl StyleResolver for ScopedStyleResolver {
    fn render(&self, sheet: &StyleSheet) -> Classes {
        self.renders.fetch_add(1, Ordering::Relaxed);
        let mut classes = Classes::default();
        for &rule in sheet.rules {
            classes.insert(rule, format!("{}-{}", sheet.name, rule));
        }
        classes
    }
}

/// Space-separated class list builder
#[derive(Clone, Debug, Default)]
pub struct ClassNames<'a> {
    parts: SmallVec<[&'a str; 8]>,
}

impl<'a> ClassNames<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, class_name: &'a str) -> Self {
        if !class_name.is_empty() {
            self.parts.push(class_name);
        }
        self
    }

    pub fn add_if(self, class_name: &'a str, enabled: bool) -> Self {
        if enabled {
            self.add(class_name)
        } else {
            self
        }
    }

    /// Append a caller-supplied class list, if any
    pub fn extend(self, class_name: Option<&'a str>) -> Self {
        match class_name {
            Some(class_name) => self.add(class_name),
            None => self,
        }
    }

    pub fn build(&self) -> String {
        self.parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_resolver_names_every_rule() {
        let resolver = ScopedStyleResolver::new();
        let classes = resolver.render(&INPUT_STYLE_SHEET);

        assert_eq!(classes.get(rules::WRAPPER), "QuillInput-wrapper");
        assert_eq!(classes.get(rules::TEXTAREA_WRAPPER), "QuillInput-textarea-wrapper");
        assert_eq!(classes.get("missing"), "");
        assert_eq!(resolver.render_count(), 1);
    }

    #[test]
    fn test_class_names_composition() {
        let classes = ClassNames::new()
            .add("base")
            .add_if("focused", true)
            .add_if("error", false)
            .add("")
            .extend(Some("custom"))
            .extend(None)
            .build();

        assert_eq!(classes, "base focused custom");
    }

    #[test]
    fn test_empty_class_names() {
        assert_eq!(ClassNames::new().build(), "");
    }
}
