//! Growable multi-line surface
//!
//! Renders a wrapper around a `textarea` element. The wrapper's
//! `client_height` follows the text's line count; after every change the
//! surface reports its new height with a height-change event so the input
//! can animate its own wrapper toward it.

use quill_core::dom::{ElementId, ElementSpec, ElementTree};
use quill_core::events::Event;

use crate::surface::SurfaceProps;

/// Textarea configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TextareaConfig {
    /// Minimum number of visible rows
    pub rows: usize,
    pub font_size: f32,
    /// Line height multiplier
    pub line_height: f32,
    /// Vertical padding of the wrapper
    pub padding_y: f32,
}

impl Default for TextareaConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            font_size: 16.0,
            line_height: 1.25,
            padding_y: 6.0,
        }
    }
}

impl TextareaConfig {
    pub fn single_line_height(&self) -> f32 {
        self.font_size * self.line_height
    }

    /// Height of the wrapper needed to show `text` without scrolling
    pub fn content_height(&self, text: &str) -> f32 {
        let lines = text.split('\n').count().max(self.rows);
        lines as f32 * self.single_line_height() + self.padding_y * 2.0
    }
}

/// Build the textarea surface: `div.wrapper_class > textarea`
pub fn render(config: &TextareaConfig, wrapper_class: String, props: &SurfaceProps) -> ElementSpec {
    let textarea = ElementSpec::new("textarea")
        .editable()
        .attr("rows", config.rows.to_string());

    ElementSpec::new("div")
        .class_name(wrapper_class)
        .child(props.apply(textarea))
}

/// Lay out a mounted textarea surface from its live text
///
/// Returns the new content height, or `None` if the surface is gone.
pub fn layout(tree: &mut ElementTree, surface: ElementId, config: &TextareaConfig) -> Option<f32> {
    let editable = tree.find_editable(surface)?;
    let height = config.content_height(&tree.get(editable)?.value);
    tree.get_mut(surface)?.client_height = height;
    Some(height)
}

/// React to a change of the textarea's text
///
/// Re-lays out the surface and produces the height-change event it emits.
pub fn handle_change(
    tree: &mut ElementTree,
    surface: ElementId,
    config: &TextareaConfig,
) -> Option<Event> {
    let height = layout(tree, surface, config)?;
    Some(Event::height_change(surface.raw(), height))
}
