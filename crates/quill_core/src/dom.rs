//! Retained element tree
//!
//! A minimal stand-in for the host's rendered element hierarchy. Widgets
//! describe what they want with [`ElementSpec`], the tree materializes it into
//! [`Element`]s addressed by [`ElementId`], and later renders are applied with
//! [`ElementTree::patch`].
//!
//! Ids are generational: once an element is removed every copy of its id
//! stops resolving, which is how late callbacks detect a detached element.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, Key, SlotMap};
use smallvec::SmallVec;
use thiserror::Error;

use crate::events::Event;

new_key_type! {
    /// Unique identifier for a mounted element
    pub struct ElementId;
}

impl ElementId {
    /// Raw form used as an event target
    pub fn raw(self) -> u64 {
        self.data().as_ffi()
    }
}

/// Element tree errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The id does not (or no longer) resolve to an element
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),
}

/// Result type for element tree operations
pub type Result<T> = std::result::Result<T, TreeError>;

/// Declarative description of an element and its children
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementSpec {
    pub tag: String,
    pub class_name: String,
    pub attributes: FxHashMap<String, String>,
    /// Value to force onto the element; `None` leaves the live value alone
    pub value: Option<String>,
    pub disabled: bool,
    /// Marks the element that receives focus and holds the editable value
    pub editable: bool,
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Find the first editable element, depth first
    pub fn find_editable(&self) -> Option<&ElementSpec> {
        if self.editable {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_editable())
    }

    fn same_shape(&self, element: &Element) -> bool {
        self.tag == element.tag && self.children.len() == element.children.len()
    }
}

/// A mounted element
#[derive(Clone, Debug, Default)]
pub struct Element {
    pub tag: String,
    pub class_name: String,
    pub attributes: FxHashMap<String, String>,
    /// Live value of editable elements
    pub value: String,
    pub disabled: bool,
    pub editable: bool,
    /// Explicit height assigned through the style, if any
    pub style_height: Option<f32>,
    /// Laid-out height of the element's content
    pub client_height: f32,
    parent: Option<ElementId>,
    children: SmallVec<[ElementId; 2]>,
}

impl Element {
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn first_child(&self) -> Option<ElementId> {
        self.children.first().copied()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }

    fn apply(&mut self, spec: &ElementSpec) {
        self.tag.clone_from(&spec.tag);
        self.class_name.clone_from(&spec.class_name);
        self.attributes.clone_from(&spec.attributes);
        self.disabled = spec.disabled;
        self.editable = spec.editable;
        if let Some(value) = &spec.value {
            self.value.clone_from(value);
        }
    }
}

/// Owns every mounted element and the focus pointer
#[derive(Debug, Default)]
pub struct ElementTree {
    elements: SlotMap<ElementId, Element>,
    focused: Option<ElementId>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Materialize a spec, optionally appending it to `parent`
    pub fn build(&mut self, spec: &ElementSpec, parent: Option<ElementId>) -> Result<ElementId> {
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(TreeError::UnknownElement(parent));
            }
        }

        let mut element = Element {
            parent,
            ..Default::default()
        };
        element.apply(spec);
        let id = self.elements.insert(element);

        for child in &spec.children {
            self.build(child, Some(id))?;
        }
        if let Some(parent) = parent.and_then(|p| self.elements.get_mut(p)) {
            parent.children.push(id);
        }

        Ok(id)
    }

    /// Bring a mounted subtree in line with `spec`
    ///
    /// Elements keep their identity (and live value, focus and style height)
    /// while tag and child count match; otherwise the mismatching subtree is
    /// rebuilt in place. Returns the id now occupying the slot.
    pub fn patch(&mut self, id: ElementId, spec: &ElementSpec) -> Result<ElementId> {
        let element = self.elements.get(id).ok_or(TreeError::UnknownElement(id))?;

        if !spec.same_shape(element) {
            return self.replace(id, spec);
        }

        let children = element.children.clone();
        if let Some(element) = self.elements.get_mut(id) {
            element.apply(spec);
        }
        for (child, child_spec) in children.into_iter().zip(&spec.children) {
            self.patch(child, child_spec)?;
        }
        Ok(id)
    }

    fn replace(&mut self, id: ElementId, spec: &ElementSpec) -> Result<ElementId> {
        let parent = self.get(id).and_then(Element::parent);
        let position = parent
            .and_then(|p| self.get(p))
            .and_then(|p| p.children.iter().position(|&c| c == id));

        self.remove(id);
        let new_id = self.build(spec, None)?;

        if let (Some(parent), Some(position)) = (parent, position) {
            if let Some(parent_element) = self.elements.get_mut(parent) {
                parent_element.children.insert(position, new_id);
            }
            if let Some(element) = self.elements.get_mut(new_id) {
                element.parent = Some(parent);
            }
        }
        Ok(new_id)
    }

    /// Remove an element and its whole subtree; unknown ids are ignored
    pub fn remove(&mut self, id: ElementId) {
        let Some(element) = self.elements.remove(id) else {
            return;
        };
        if self.focused == Some(id) {
            self.focused = None;
        }
        if let Some(parent) = element.parent.and_then(|p| self.elements.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        for child in element.children {
            self.remove(child);
        }
    }

    /// First editable element of a subtree, depth first
    pub fn find_editable(&self, root: ElementId) -> Option<ElementId> {
        let element = self.get(root)?;
        if element.editable {
            return Some(root);
        }
        element
            .children
            .iter()
            .find_map(|&child| self.find_editable(child))
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Move focus to `id`, returning whether focus actually moved
    pub fn focus(&mut self, id: ElementId) -> Result<bool> {
        if !self.contains(id) {
            return Err(TreeError::UnknownElement(id));
        }
        let moved = self.focused != Some(id);
        self.focused = Some(id);
        Ok(moved)
    }

    /// Drop focus from `id` if it holds it
    pub fn blur(&mut self, id: ElementId) -> bool {
        if self.focused == Some(id) {
            self.focused = None;
            true
        } else {
            false
        }
    }

    /// Simulate user input: write the live value and produce the change event
    /// the host would deliver for it.
    pub fn input(&mut self, id: ElementId, text: &str) -> Result<Event> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or(TreeError::UnknownElement(id))?;
        element.value.clear();
        element.value.push_str(text);
        Ok(Event::change(id.raw(), text))
    }
}
