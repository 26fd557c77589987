//! Input widget with FSM-driven focus and form-control integration
//!
//! The Input widget provides:
//! - Controlled (value from props) and uncontrolled (value owned by the
//!   element) usage
//! - Dirty/clean notifications to its own callbacks and the enclosing
//!   [`FormControl`], at fixed lifecycle checkpoints
//! - Focused/unfocused state driven by a state machine
//! - A single-line field, a growable multi-line textarea, or a custom surface
//!
//! Lifecycle: [`Input::new`] → [`Input::mount`] → any number of
//! [`Input::update`] / [`Input::rebuild`] and [`Input::handle_event`] calls →
//! [`Input::unmount`].
//!
//! Switching one instance between controlled and uncontrolled usage is not
//! supported. It is reported with a warning and otherwise left alone.
//!
//! # Example
//!
//! ```rust
//! use quill_widgets::prelude::*;
//!
//! let mut ctx = WidgetContext::new();
//! let form = FormControl::new().required(true);
//!
//! let mut name = Input::new(&mut ctx, InputConfig::new().value(""), Some(&form));
//! name.mount(&mut ctx, None, Some(&form)).unwrap();
//! name.focus(&mut ctx).unwrap();
//!
//! assert!(name.is_focused(&ctx));
//! let editable = name.editable().unwrap();
//! assert_eq!(ctx.tree().get(editable).unwrap().attribute("aria-required"), Some("true"));
//! ```

use std::fmt;
use std::sync::Arc;

use quill_core::dom::{ElementId, ElementSpec};
use quill_core::events::{event_types, Event};
use quill_core::fsm::StateMachine;
use rustc_hash::FxHashMap;

use crate::context::{WidgetContext, WidgetId};
use crate::error::{InputError, Result};
use crate::form_control::{resolve_error, FormControl, NotifyCallback};
use crate::height_sync::HeightSyncProxy;
use crate::style::{rules, ClassNames, INPUT_STYLE_SHEET};
use crate::surface::{self, ResolvedSurface, Surface, SurfaceProps};
use crate::textarea::{self, TextareaConfig};
use crate::value::{self, InputValue, ValueSource};

/// Input focus states
pub mod states {
    pub const UNFOCUSED: u32 = 0;
    pub const FOCUSED: u32 = 1;
}

/// Callback receiving the element event that triggered it
pub type EventCallback = Arc<dyn Fn(&Event) + Send + Sync>;

/// Input configuration (the widget's props)
#[derive(Clone)]
pub struct InputConfig {
    /// Supplying a text value makes the input controlled
    pub value: Option<InputValue>,
    pub disabled: bool,
    pub disable_underline: bool,
    /// Overrides the form control's error flag when set
    pub error: Option<bool>,
    pub multi_line: bool,
    pub surface: Surface,
    /// Forwarded as the `type` attribute
    pub input_type: String,
    /// Extra classes for the wrapper element
    pub class_name: Option<String>,
    /// Extra classes for the editable element
    pub input_class_name: Option<String>,
    pub textarea: TextareaConfig,
    /// Forwarded verbatim to the editable element
    pub attributes: FxHashMap<String, String>,
    on_focus: Option<EventCallback>,
    on_blur: Option<EventCallback>,
    on_change: Option<EventCallback>,
    on_dirty: Option<NotifyCallback>,
    on_clean: Option<NotifyCallback>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            value: None,
            disabled: false,
            disable_underline: false,
            error: None,
            multi_line: false,
            surface: Surface::default(),
            input_type: "text".to_string(),
            class_name: None,
            input_class_name: None,
            textarea: TextareaConfig::default(),
            attributes: FxHashMap::default(),
            on_focus: None,
            on_blur: None,
            on_change: None,
            on_dirty: None,
            on_clean: None,
        }
    }
}

impl fmt::Debug for InputConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputConfig")
            .field("value", &self.value)
            .field("disabled", &self.disabled)
            .field("disable_underline", &self.disable_underline)
            .field("error", &self.error)
            .field("multi_line", &self.multi_line)
            .field("surface", &self.surface)
            .field("input_type", &self.input_type)
            .field("class_name", &self.class_name)
            .field("input_class_name", &self.input_class_name)
            .field("textarea", &self.textarea)
            .field("attributes", &self.attributes)
            // Skip callbacks, closures don't implement Debug
            .finish_non_exhaustive()
    }
}

impl ValueSource for InputConfig {
    fn text_value(&self) -> Option<&str> {
        self.value.as_ref().and_then(InputValue::as_text)
    }
}

impl InputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value (text makes the input controlled)
    pub fn value(mut self, value: impl Into<InputValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn disable_underline(mut self, disable: bool) -> Self {
        self.disable_underline = disable;
        self
    }

    /// Positive form of [`InputConfig::disable_underline`]
    pub fn underline(mut self, underline: bool) -> Self {
        self.disable_underline = !underline;
        self
    }

    pub fn error(mut self, error: bool) -> Self {
        self.error = Some(error);
        self
    }

    pub fn multi_line(mut self, multi_line: bool) -> Self {
        self.multi_line = multi_line;
        self
    }

    /// Render a different native element
    pub fn native(mut self, tag: impl Into<String>) -> Self {
        self.surface = Surface::Native(tag.into());
        self
    }

    pub fn surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn input_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.input_class_name = Some(class_name.into());
        self
    }

    /// Minimum visible rows of the multi-line surface
    pub fn rows(mut self, rows: usize) -> Self {
        self.textarea.rows = rows;
        self
    }

    pub fn textarea(mut self, textarea: TextareaConfig) -> Self {
        self.textarea = textarea;
        self
    }

    /// Add a pass-through attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn on_focus<F: Fn(&Event) + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.on_focus = Some(Arc::new(callback));
        self
    }

    pub fn on_blur<F: Fn(&Event) + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.on_blur = Some(Arc::new(callback));
        self
    }

    pub fn on_change<F: Fn(&Event) + Send + Sync + 'static>(mut self, callback: F) -> Self {
        self.on_change = Some(Arc::new(callback));
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

    /// Build the input widget
    pub fn build(self, ctx: &mut WidgetContext, form_control: Option<&FormControl>) -> Input {
        Input::new(ctx, self, form_control)
    }
}

/// Points at which the input classifies its value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Checkpoint {
    Construct,
    Mount,
    BeforeRender,
    Change,
}

/// Input widget
pub struct Input {
    id: WidgetId,
    config: InputConfig,
    wrapper: Option<ElementId>,
    editable: Option<ElementId>,
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("wrapper", &self.wrapper)
            .field("editable", &self.editable)
            .finish()
    }
}

impl Input {
    /// Create an input, running the construction checkpoint
    pub fn new(
        ctx: &mut WidgetContext,
        config: InputConfig,
        form_control: Option<&FormControl>,
    ) -> Self {
        let id = ctx.register_widget_with_fsm(Self::create_fsm());
        let input = Self {
            id,
            config,
            wrapper: None,
            editable: None,
        };
        input.on_construct(form_control);
        input
    }

    fn create_fsm() -> StateMachine {
        StateMachine::builder(states::UNFOCUSED)
            .on(states::UNFOCUSED, event_types::FOCUS, states::FOCUSED)
            .on(states::FOCUSED, event_types::BLUR, states::UNFOCUSED)
            .build()
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Outer wrapper element, once mounted
    pub fn wrapper(&self) -> Option<ElementId> {
        self.wrapper
    }

    /// The editable element, once mounted
    pub fn editable(&self) -> Option<ElementId> {
        self.editable
    }

    /// Whether the current props supply a text value
    pub fn is_controlled(&self) -> bool {
        value::is_controlled(self.config.value.as_ref())
    }

    pub fn is_focused(&self, ctx: &WidgetContext) -> bool {
        ctx.get_fsm_state(self.id) == Some(states::FOCUSED)
    }

    /// Error flag after falling back to the form control
    pub fn effective_error(&self, form_control: Option<&FormControl>) -> bool {
        resolve_error(self.config.error, form_control).unwrap_or(false)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Render into the element tree, optionally under `parent`
    ///
    /// Uncontrolled inputs classify the element's real initial value here,
    /// after it exists.
    pub fn mount(
        &mut self,
        ctx: &mut WidgetContext,
        parent: Option<ElementId>,
        form_control: Option<&FormControl>,
    ) -> Result<ElementId> {
        if self.wrapper.is_some() {
            return Err(InputError::AlreadyMounted);
        }

        let spec = self.render(ctx, form_control)?;
        let wrapper = ctx.tree_mut().build(&spec, parent)?;
        self.attach(ctx, wrapper)?;
        tracing::debug!(widget = ?self.id, ?wrapper, "input mounted");

        self.on_mount(ctx, form_control);
        Ok(wrapper)
    }

    /// Re-render with new props
    pub fn update(
        &mut self,
        ctx: &mut WidgetContext,
        next: InputConfig,
        form_control: Option<&FormControl>,
    ) -> Result<()> {
        self.on_before_render(&next, form_control);
        self.config = next;
        self.commit(ctx, form_control)
    }

    /// Re-render with the current props, e.g. after a focus change
    pub fn rebuild(
        &mut self,
        ctx: &mut WidgetContext,
        form_control: Option<&FormControl>,
    ) -> Result<()> {
        self.on_before_render(&self.config, form_control);
        self.commit(ctx, form_control)
    }

    /// Remove the input's elements and registration
    ///
    /// Deferred height measurements still queued become no-ops.
    pub fn unmount(self, ctx: &mut WidgetContext) {
        if let Some(wrapper) = self.wrapper {
            ctx.tree_mut().remove(wrapper);
        }
        ctx.unregister_widget(self.id);
        tracing::debug!(widget = ?self.id, "input unmounted");
    }

    fn attach(&mut self, ctx: &mut WidgetContext, wrapper: ElementId) -> Result<()> {
        let editable = ctx.tree().find_editable(wrapper).ok_or_else(|| {
            InputError::MissingEditable(format!("{:?}", self.config.surface))
        })?;
        self.wrapper = Some(wrapper);
        self.editable = Some(editable);

        if let Some(surface) = self.textarea_surface(ctx) {
            textarea::layout(ctx.tree_mut(), surface, &self.config.textarea);
        }
        ctx.clear_dirty_widget(self.id);
        Ok(())
    }

    fn commit(&mut self, ctx: &mut WidgetContext, form_control: Option<&FormControl>) -> Result<()> {
        let Some(wrapper) = self.wrapper else {
            // Not mounted yet, mount renders
            return Ok(());
        };
        let previous = self.editable_value(ctx);
        let spec = self.render(ctx, form_control)?;
        let wrapper = ctx.tree_mut().patch(wrapper, &spec)?;
        self.attach(ctx, wrapper)?;

        // A new value from props can change the line count just like typing
        if previous != self.editable_value(ctx) {
            if let Some(surface) = self.textarea_surface(ctx) {
                if let Some(height_event) =
                    textarea::handle_change(ctx.tree_mut(), surface, &self.config.textarea)
                {
                    self.handle_event(ctx, &height_event, form_control);
                }
            }
        }
        Ok(())
    }

    fn editable_value(&self, ctx: &WidgetContext) -> Option<String> {
        let editable = ctx.tree().get(self.editable?)?;
        Some(editable.value.clone())
    }

    // =========================================================================
    // Checkpoints
    // =========================================================================

    fn on_construct(&self, form_control: Option<&FormControl>) {
        if self.is_controlled() {
            self.check_dirty(Some(&self.config), form_control, Checkpoint::Construct);
        }
    }

    fn on_mount(&self, ctx: &WidgetContext, form_control: Option<&FormControl>) {
        if !self.is_controlled() {
            let element = self.editable.and_then(|id| ctx.tree().get(id));
            self.check_dirty(element, form_control, Checkpoint::Mount);
        }
    }

    fn on_before_render(&self, next: &InputConfig, form_control: Option<&FormControl>) {
        let controlled = self.is_controlled();
        if value::is_controlled(next.value.as_ref()) != controlled {
            tracing::warn!(
                widget = ?self.id,
                was_controlled = controlled,
                "input switched between controlled and uncontrolled usage; \
                 one instance must stay in a single mode"
            );
        }
        if controlled {
            self.check_dirty(Some(next), form_control, Checkpoint::BeforeRender);
        }
    }

    /// Classify `source` and notify; fires on every call, not only on edges
    fn check_dirty<S: ValueSource + ?Sized>(
        &self,
        source: Option<&S>,
        form_control: Option<&FormControl>,
        checkpoint: Checkpoint,
    ) -> bool {
        let dirty = value::is_dirty(source);
        tracing::debug!(widget = ?self.id, ?checkpoint, dirty, "input value classified");

        if dirty {
            if let Some(fc) = form_control {
                fc.notify_dirty();
            }
            if let Some(callback) = &self.config.on_dirty {
                callback();
            }
        } else {
            if let Some(fc) = form_control {
                fc.notify_clean();
            }
            if let Some(callback) = &self.config.on_clean {
                callback();
            }
        }
        dirty
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Handle an event delivered to the input's elements
    pub fn handle_event(
        &mut self,
        ctx: &mut WidgetContext,
        event: &Event,
        form_control: Option<&FormControl>,
    ) {
        match event.event_type {
            event_types::FOCUS => self.handle_focus(ctx, event),
            event_types::BLUR => self.handle_blur(ctx, event),
            event_types::CHANGE => self.handle_change(ctx, event, form_control),
            event_types::HEIGHT_CHANGE => self.handle_height_change(ctx, event),
            _ => {}
        }
    }

    fn handle_focus(&mut self, ctx: &mut WidgetContext, event: &Event) {
        if let Some(editable) = self.editable {
            if ctx.tree_mut().focus(editable).is_err() {
                tracing::debug!(widget = ?self.id, ?editable, "editable detached, ignoring focus");
                return;
            }
        }
        ctx.send_fsm_event(self.id, event_types::FOCUS);
        tracing::trace!(widget = ?self.id, "input focused");

        if let Some(callback) = &self.config.on_focus {
            callback(event);
        }
    }

    fn handle_blur(&mut self, ctx: &mut WidgetContext, event: &Event) {
        if let Some(editable) = self.editable {
            ctx.tree_mut().blur(editable);
        }
        ctx.send_fsm_event(self.id, event_types::BLUR);
        tracing::trace!(widget = ?self.id, "input blurred");

        if let Some(callback) = &self.config.on_blur {
            callback(event);
        }
    }

    fn handle_change(
        &mut self,
        ctx: &mut WidgetContext,
        event: &Event,
        form_control: Option<&FormControl>,
    ) {
        // Controlled inputs are classified at the next render instead
        if !self.is_controlled() {
            let element = self.editable.and_then(|id| ctx.tree().get(id));
            self.check_dirty(element, form_control, Checkpoint::Change);
        }

        if let Some(callback) = &self.config.on_change {
            callback(event);
        }

        if let Some(surface) = self.textarea_surface(ctx) {
            if let Some(height_event) =
                textarea::handle_change(ctx.tree_mut(), surface, &self.config.textarea)
            {
                self.handle_event(ctx, &height_event, form_control);
            }
        }
    }

    /// Only the mounted textarea surface's own reports schedule a measurement
    fn handle_height_change(&mut self, ctx: &mut WidgetContext, event: &Event) {
        let from_surface = self
            .textarea_surface(ctx)
            .is_some_and(|surface| surface.raw() == event.target);
        if !from_surface {
            tracing::trace!(widget = ?self.id, target = event.target, "ignoring foreign height change");
            return;
        }
        if let Some(wrapper) = self.wrapper {
            HeightSyncProxy::new(wrapper).schedule(ctx.scheduler_mut());
        }
    }

    /// Move element focus to the editable element
    ///
    /// Fails with [`InputError::NotMounted`] before [`Input::mount`].
    pub fn focus(&mut self, ctx: &mut WidgetContext) -> Result<()> {
        let editable = self.editable.ok_or(InputError::NotMounted)?;
        if ctx.tree_mut().focus(editable)? {
            self.handle_focus(ctx, &Event::focus(editable.raw()));
        }
        Ok(())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn resolved_surface(&self) -> ResolvedSurface<'_> {
        surface::resolve(&self.config.surface, self.config.multi_line)
    }

    /// The textarea's own wrapper, when the textarea surface is mounted
    fn textarea_surface(&self, ctx: &WidgetContext) -> Option<ElementId> {
        if !self.resolved_surface().is_textarea() {
            return None;
        }
        ctx.tree().get(self.wrapper?)?.first_child()
    }

    fn surface_props(&self, class_name: String, required: bool) -> SurfaceProps {
        SurfaceProps {
            class_name,
            disabled: self.config.disabled,
            aria_required: required,
            input_type: self.config.input_type.clone(),
            value: self.config.value.as_ref().map(ToString::to_string),
            attributes: self.config.attributes.clone(),
        }
    }

    /// Describe the elements for the current props and state
    ///
    /// Resolves the style sheet exactly once.
    pub fn render(
        &self,
        ctx: &WidgetContext,
        form_control: Option<&FormControl>,
    ) -> Result<ElementSpec> {
        let classes = ctx.styles().render(&INPUT_STYLE_SHEET);
        let config = &self.config;
        let error = self.effective_error(form_control);
        let required = form_control.is_some_and(FormControl::is_required);
        let resolved = self.resolved_surface();
        let underline = !config.disable_underline;

        let input_class = || {
            ClassNames::new()
                .add(classes.get(rules::INPUT))
                .add_if(classes.get(rules::UNDERLINE), underline)
                .add_if(classes.get(rules::DISABLED), config.disabled)
                .extend(config.input_class_name.as_deref())
                .build()
        };

        let surface = match resolved {
            ResolvedSurface::Field(tag) => self
                .surface_props(input_class(), required)
                .apply(ElementSpec::new(tag).editable()),
            ResolvedSurface::Textarea => {
                let textarea_class = ClassNames::new()
                    .add(classes.get(rules::INPUT))
                    .add(classes.get(rules::TEXTAREA))
                    .add_if(classes.get(rules::DISABLED), config.disabled)
                    .extend(config.input_class_name.as_deref())
                    .build();
                textarea::render(
                    &config.textarea,
                    classes.get(rules::TEXTAREA_WRAPPER).to_string(),
                    &self.surface_props(textarea_class, required),
                )
            }
            ResolvedSurface::Custom(custom) => {
                let spec = custom.render(&self.surface_props(input_class(), required));
                if spec.find_editable().is_none() {
                    return Err(InputError::MissingEditable(custom.name().to_string()));
                }
                spec
            }
        };

        let wrapper_class = ClassNames::new()
            .add(classes.get(rules::WRAPPER))
            .add_if(classes.get(rules::FORM_CONTROL), form_control.is_some())
            .add_if(classes.get(rules::INKBAR), underline)
            .add_if(classes.get(rules::FOCUSED), self.is_focused(ctx))
            .add_if(classes.get(rules::ERROR), error)
            // Textarea draws its underline on the wrapper
            .add_if(
                classes.get(rules::UNDERLINE),
                resolved.is_textarea() && underline,
            )
            .extend(config.class_name.as_deref())
            .build();

        Ok(ElementSpec::new("div")
            .class_name(wrapper_class)
            .child(surface))
    }
}
