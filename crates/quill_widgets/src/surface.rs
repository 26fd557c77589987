//! Editable surfaces
//!
//! The element an input actually renders: a native element named by tag, the
//! growable [`crate::textarea`] surface, or a caller-supplied component.

use std::fmt;
use std::sync::Arc;

use quill_core::dom::ElementSpec;
use rustc_hash::FxHashMap;

/// Tag of the default single-line surface
pub const DEFAULT_TAG: &str = "input";

/// A caller-supplied surface component
///
/// `render` receives the props the input computed for its surface and must
/// return a spec containing exactly one element flagged editable.
pub trait CustomSurface: Send + Sync {
    fn name(&self) -> &str;

    fn render(&self, props: &SurfaceProps) -> ElementSpec;
}

/// Surface requested through the input's config
#[derive(Clone)]
pub enum Surface {
    /// A native element, by tag
    Native(String),
    Custom(Arc<dyn CustomSurface>),
}

impl Default for Surface {
    fn default() -> Self {
        Surface::Native(DEFAULT_TAG.to_string())
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Native(tag) => f.debug_tuple("Native").field(tag).finish(),
            Surface::Custom(custom) => f.debug_tuple("Custom").field(&custom.name()).finish(),
        }
    }
}

impl Surface {
    /// Whether the caller left the surface at its default
    pub fn is_default(&self) -> bool {
        matches!(self, Surface::Native(tag) if tag == DEFAULT_TAG)
    }
}

/// The surface chosen for one render
#[derive(Clone, Copy)]
pub enum ResolvedSurface<'a> {
    Field(&'a str),
    Textarea,
    Custom(&'a dyn CustomSurface),
}

impl fmt::Debug for ResolvedSurface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedSurface::Field(tag) => f.debug_tuple("Field").field(tag).finish(),
            ResolvedSurface::Textarea => f.write_str("Textarea"),
            ResolvedSurface::Custom(custom) => {
                f.debug_tuple("Custom").field(&custom.name()).finish()
            }
        }
    }
}

impl ResolvedSurface<'_> {
    pub fn is_textarea(&self) -> bool {
        matches!(self, ResolvedSurface::Textarea)
    }
}

/// Pick the surface for this render
///
/// Multi-line only swaps in the textarea while the caller kept the default
/// surface; an explicit surface always wins.
pub fn resolve(surface: &Surface, multi_line: bool) -> ResolvedSurface<'_> {
    match surface {
        _ if multi_line && surface.is_default() => ResolvedSurface::Textarea,
        Surface::Native(tag) => ResolvedSurface::Field(tag.as_str()),
        Surface::Custom(custom) => ResolvedSurface::Custom(custom.as_ref()),
    }
}

/// Props an input hands to its surface
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceProps {
    pub class_name: String,
    pub disabled: bool,
    pub aria_required: bool,
    pub input_type: String,
    /// Value to force onto the element, if the caller supplied one
    pub value: Option<String>,
    /// Pass-through attributes; they override computed attributes
    pub attributes: FxHashMap<String, String>,
}

impl SurfaceProps {
    /// Apply the props to the editable element of a surface
    pub fn apply(&self, spec: ElementSpec) -> ElementSpec {
        let mut spec = spec
            .class_name(self.class_name.clone())
            .disabled(self.disabled)
            .value(self.value.clone())
            .attr("type", self.input_type.clone());
        if self.aria_required {
            spec = spec.attr("aria-required", "true");
        }
        for (name, value) in &self.attributes {
            spec.attributes.insert(name.clone(), value.clone());
        }
        spec
    }
}
