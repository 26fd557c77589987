//! End-to-end input scenarios: lifecycle checkpoints, form-control
//! notifications, focus and multi-line height sync.

use std::sync::{Arc, Mutex};

use quill_widgets::height_sync::TASK_LABEL;
use quill_widgets::prelude::*;

/// Records notifications in delivery order
#[derive(Clone, Default)]
struct Log(Arc<Mutex<Vec<&'static str>>>);

impl Log {
    fn push(&self, entry: &'static str) {
        self.0.lock().unwrap().push(entry);
    }

    fn recorder(&self, entry: &'static str) -> impl Fn() + Send + Sync + 'static {
        let log = self.clone();
        move || log.push(entry)
    }

    fn take(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

fn form_with_log(log: &Log) -> FormControl {
    FormControl::new()
        .on_dirty(log.recorder("form:dirty"))
        .on_clean(log.recorder("form:clean"))
}

fn type_text(ctx: &mut WidgetContext, input: &mut Input, text: &str, form: Option<&FormControl>) {
    let editable = input.editable().unwrap();
    let event = ctx.tree_mut().input(editable, text).unwrap();
    input.handle_event(ctx, &event, form);
}

#[test]
fn test_controlled_empty_value_flow() {
    let log = Log::default();
    let form = form_with_log(&log);
    let mut ctx = WidgetContext::new();

    let config = |value: &str| {
        InputConfig::new()
            .value(value)
            .on_change(|_| {})
            .on_dirty(log.recorder("own:dirty"))
            .on_clean(log.recorder("own:clean"))
    };

    let mut input = Input::new(&mut ctx, config(""), Some(&form));
    assert_eq!(log.take(), vec!["form:clean", "own:clean"]);

    input.mount(&mut ctx, None, Some(&form)).unwrap();
    assert!(log.take().is_empty(), "controlled inputs skip the mount check");

    // Typing alone does not classify a controlled input
    let changed = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&changed);
    let with_change = config("").on_change(move |event: &Event| {
        seen.lock().unwrap().push(event.change_value().unwrap_or_default().to_string());
    });
    input.update(&mut ctx, with_change, Some(&form)).unwrap();
    log.take();

    type_text(&mut ctx, &mut input, "a", Some(&form));
    assert_eq!(*changed.lock().unwrap(), vec!["a".to_string()]);
    assert!(log.take().is_empty());

    // The owner feeds the value back, the next render reports dirty
    input.update(&mut ctx, config("a"), Some(&form)).unwrap();
    assert_eq!(log.take(), vec!["form:dirty", "own:dirty"]);

    input.update(&mut ctx, config(""), Some(&form)).unwrap();
    assert_eq!(log.take(), vec!["form:clean", "own:clean"]);
    assert!(input.is_controlled());
}

#[test]
fn test_notifications_are_not_deduplicated() {
    let log = Log::default();
    let form = form_with_log(&log);
    let mut ctx = WidgetContext::new();
    let mut input = InputConfig::new().value("x").build(&mut ctx, Some(&form));
    input.mount(&mut ctx, None, Some(&form)).unwrap();

    input.rebuild(&mut ctx, Some(&form)).unwrap();
    input.rebuild(&mut ctx, Some(&form)).unwrap();

    assert_eq!(log.take(), vec!["form:dirty"; 3]);
}

#[test]
fn test_uncontrolled_checked_once_after_mount() {
    let log = Log::default();
    let form = form_with_log(&log);
    let mut ctx = WidgetContext::new();

    let mut input = InputConfig::new()
        .on_clean(log.recorder("own:clean"))
        .build(&mut ctx, Some(&form));
    assert!(log.take().is_empty(), "nothing to inspect before mount");

    input.mount(&mut ctx, None, Some(&form)).unwrap();
    assert_eq!(log.take(), vec!["form:clean", "own:clean"]);

    // Re-renders do not re-check uncontrolled inputs
    input.rebuild(&mut ctx, Some(&form)).unwrap();
    assert!(log.take().is_empty());
}

#[test]
fn test_uncontrolled_change_checks_live_value() {
    let log = Log::default();
    let form = form_with_log(&log);
    let mut ctx = WidgetContext::new();
    let mut input = InputConfig::new()
        .on_change(|_| {})
        .build(&mut ctx, Some(&form));
    input.mount(&mut ctx, None, Some(&form)).unwrap();
    log.take();

    type_text(&mut ctx, &mut input, "hello", Some(&form));
    assert_eq!(log.take(), vec!["form:dirty"]);

    // A re-render keeps the typed value
    input.rebuild(&mut ctx, Some(&form)).unwrap();
    let editable = ctx.tree().get(input.editable().unwrap()).unwrap();
    assert_eq!(editable.value, "hello");

    type_text(&mut ctx, &mut input, "", Some(&form));
    assert_eq!(log.take(), vec!["form:clean"]);
}

#[test]
fn test_focus_and_blur_leave_dirtiness_alone() {
    let log = Log::default();
    let form = form_with_log(&log);
    let mut ctx = WidgetContext::new();
    let focus_log = log.clone();
    let blur_log = log.clone();
    let mut input = InputConfig::new()
        .value("text")
        .on_focus(move |_| focus_log.push("focus"))
        .on_blur(move |_| blur_log.push("blur"))
        .build(&mut ctx, Some(&form));
    input.mount(&mut ctx, None, Some(&form)).unwrap();
    log.take();
    let target = input.editable().unwrap().raw();

    input.handle_event(&mut ctx, &Event::focus(target), Some(&form));
    assert_eq!(ctx.get_fsm_state(input.id()), Some(states::FOCUSED));
    assert_eq!(log.take(), vec!["focus"]);

    input.handle_event(&mut ctx, &Event::blur(target), Some(&form));
    assert_eq!(ctx.get_fsm_state(input.id()), Some(states::UNFOCUSED));
    assert_eq!(log.take(), vec!["blur"]);
}

#[test]
fn test_focus_renders_focused_class() {
    let mut ctx = WidgetContext::new();
    let mut input = InputConfig::new().build(&mut ctx, None);
    let wrapper = input.mount(&mut ctx, None, None).unwrap();

    input.focus(&mut ctx).unwrap();
    assert!(ctx.is_dirty(input.id()));
    input.rebuild(&mut ctx, None).unwrap();
    assert!(ctx.tree().get(wrapper).unwrap().has_class("QuillInput-focused"));

    let blur = Event::blur(input.editable().unwrap().raw());
    input.handle_event(&mut ctx, &blur, None);
    input.rebuild(&mut ctx, None).unwrap();
    assert!(!ctx.tree().get(wrapper).unwrap().has_class("QuillInput-focused"));
    assert_eq!(ctx.tree().focused(), None);
}

#[test]
fn test_error_precedence() {
    let mut ctx = WidgetContext::new();
    let form = FormControl::new().error(true);

    let inherits = InputConfig::new().build(&mut ctx, Some(&form));
    assert!(inherits.effective_error(Some(&form)));

    let overrides = InputConfig::new().error(false).build(&mut ctx, Some(&form));
    assert!(!overrides.effective_error(Some(&form)));

    let standalone = InputConfig::new().build(&mut ctx, None);
    assert!(!standalone.effective_error(None));

    let mut rendered = InputConfig::new().error(false).build(&mut ctx, Some(&form));
    let wrapper = rendered.mount(&mut ctx, None, Some(&form)).unwrap();
    assert!(!ctx.tree().get(wrapper).unwrap().has_class("QuillInput-error"));
}

#[test]
fn test_aria_required_only_when_required() {
    let mut ctx = WidgetContext::new();
    let cases = [
        (Some(FormControl::new().required(true)), Some("true")),
        (Some(FormControl::new().required(false)), None),
        (Some(FormControl::new()), None),
        (None, None),
    ];

    for (form, expected) in cases {
        let mut input = InputConfig::new().build(&mut ctx, form.as_ref());
        input.mount(&mut ctx, None, form.as_ref()).unwrap();
        let editable = ctx.tree().get(input.editable().unwrap()).unwrap();
        assert_eq!(editable.attribute("aria-required"), expected);
    }
}

#[test]
fn test_multi_line_change_schedules_one_measurement() {
    let mut ctx = WidgetContext::new();
    let mut input = InputConfig::new().multi_line(true).build(&mut ctx, None);
    let wrapper = input.mount(&mut ctx, None, None).unwrap();
    assert_eq!(ctx.scheduler().pending(), 0, "mounting does not schedule a sync");

    type_text(&mut ctx, &mut input, "one\ntwo\nthree", None);
    assert_eq!(ctx.scheduler().pending_labels(), vec![TASK_LABEL]);
    assert_eq!(ctx.tree().get(wrapper).unwrap().style_height, None);

    assert_eq!(ctx.tick(), 1);
    let expected = TextareaConfig::default().content_height("one\ntwo\nthree");
    assert_eq!(ctx.tree().get(wrapper).unwrap().style_height, Some(expected));
    assert_eq!(ctx.tick(), 0);
}

#[test]
fn test_multi_line_measurements_are_not_coalesced() {
    let mut ctx = WidgetContext::new();
    let mut input = InputConfig::new().multi_line(true).build(&mut ctx, None);
    input.mount(&mut ctx, None, None).unwrap();

    type_text(&mut ctx, &mut input, "a", None);
    type_text(&mut ctx, &mut input, "a\nb", None);

    assert_eq!(ctx.scheduler().pending(), 2);
    assert_eq!(ctx.tick(), 2);
}

#[test]
fn test_measurement_after_unmount_is_a_no_op() {
    let mut ctx = WidgetContext::new();
    let mut input = InputConfig::new().multi_line(true).build(&mut ctx, None);
    input.mount(&mut ctx, None, None).unwrap();

    type_text(&mut ctx, &mut input, "pending", None);
    input.unmount(&mut ctx);

    assert_eq!(ctx.tick(), 1);
    assert!(ctx.tree().is_empty());
}

#[test]
fn test_single_line_never_schedules() {
    let mut ctx = WidgetContext::new();
    let mut input = InputConfig::new().build(&mut ctx, None);
    input.mount(&mut ctx, None, None).unwrap();

    type_text(&mut ctx, &mut input, "a\nb", None);

    assert_eq!(ctx.scheduler().pending(), 0);
}

#[test]
fn test_style_sheet_resolved_once_per_render() {
    let styles = Arc::new(ScopedStyleResolver::new());
    let mut ctx = WidgetContext::with_style_resolver(styles.clone());
    let mut input = InputConfig::new().value("v").build(&mut ctx, None);
    assert_eq!(styles.render_count(), 0);

    input.mount(&mut ctx, None, None).unwrap();
    assert_eq!(styles.render_count(), 1);

    input.update(&mut ctx, InputConfig::new().value("w"), None).unwrap();
    input.rebuild(&mut ctx, None).unwrap();
    assert_eq!(styles.render_count(), 3);
}

#[test]
fn test_mount_under_parent() {
    let mut ctx = WidgetContext::new();
    let form_root = ctx
        .tree_mut()
        .build(&quill_core::dom::ElementSpec::new("form"), None)
        .unwrap();

    let mut first = InputConfig::new().build(&mut ctx, None);
    let mut second = InputConfig::new().multi_line(true).build(&mut ctx, None);
    let a = first.mount(&mut ctx, Some(form_root), None).unwrap();
    let b = second.mount(&mut ctx, Some(form_root), None).unwrap();

    assert_eq!(ctx.tree().get(form_root).unwrap().children(), &[a, b]);

    first.unmount(&mut ctx);
    assert_eq!(ctx.tree().get(form_root).unwrap().children(), &[b]);
}

#[test]
fn test_switching_to_multi_line_replaces_surface() {
    let mut ctx = WidgetContext::new();
    let mut input = InputConfig::new().build(&mut ctx, None);
    let wrapper = input.mount(&mut ctx, None, None).unwrap();
    let single = input.editable().unwrap();

    input
        .update(&mut ctx, InputConfig::new().multi_line(true), None)
        .unwrap();

    assert_eq!(input.wrapper(), Some(wrapper));
    assert_ne!(input.editable(), Some(single));
    assert!(!ctx.tree().contains(single));
    let editable = ctx.tree().get(input.editable().unwrap()).unwrap();
    assert_eq!(editable.tag, "textarea");
}

#[test]
fn test_controlled_multi_line_reset_resyncs_height() {
    let mut ctx = WidgetContext::new();
    let config = |value: &str| InputConfig::new().multi_line(true).value(value);
    let textarea = TextareaConfig::default();
    let mut input = Input::new(&mut ctx, config(""), None);
    let wrapper = input.mount(&mut ctx, None, None).unwrap();

    type_text(&mut ctx, &mut input, "a\nb\nc", None);
    input.update(&mut ctx, config("a\nb\nc"), None).unwrap();
    assert_eq!(ctx.scheduler().pending(), 1, "feeding back the typed value is not a change");
    ctx.tick();
    let tall = textarea.content_height("a\nb\nc");
    assert_eq!(ctx.tree().get(wrapper).unwrap().style_height, Some(tall));

    // The owner clears the field programmatically
    input.update(&mut ctx, config(""), None).unwrap();
    assert_eq!(ctx.scheduler().pending_labels(), vec![TASK_LABEL]);
    assert_eq!(ctx.tree().get(wrapper).unwrap().style_height, Some(tall));

    ctx.tick();
    let short = textarea.content_height("");
    assert_eq!(ctx.tree().get(wrapper).unwrap().style_height, Some(short));

    // Same value again schedules nothing
    input.update(&mut ctx, config(""), None).unwrap();
    assert_eq!(ctx.scheduler().pending(), 0);
}

#[test]
fn test_switching_modes_is_reported_not_normalized() {
    let log = Log::default();
    let mut ctx = WidgetContext::new();
    let config = || {
        InputConfig::new()
            .on_dirty(log.recorder("own:dirty"))
            .on_clean(log.recorder("own:clean"))
    };

    let mut input = Input::new(&mut ctx, config().value("x"), None);
    input.mount(&mut ctx, None, None).unwrap();
    assert_eq!(log.take(), vec!["own:dirty"]);

    // Controlled before the update, so the missing value classifies as clean
    input.update(&mut ctx, config(), None).unwrap();
    assert_eq!(log.take(), vec!["own:clean"]);
    assert!(!input.is_controlled());
    let editable = ctx.tree().get(input.editable().unwrap()).unwrap();
    assert_eq!(editable.value, "x", "the element keeps its last value");

    // Uncontrolled before the update, so nothing is classified
    input.update(&mut ctx, config().value("y"), None).unwrap();
    assert!(log.take().is_empty());
    assert!(input.is_controlled());
    let editable = ctx.tree().get(input.editable().unwrap()).unwrap();
    assert_eq!(editable.value, "y");
}
