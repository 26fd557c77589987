//! Form Demo
//!
//! This example demonstrates:
//! - A required controlled field reporting to its form control
//! - An uncontrolled multi-line field growing with its text
//! - Focus moving between fields
//!
//! Run with: RUST_LOG=quill_widgets=debug cargo run -p quill_widgets --example form_demo

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quill_core::dom::ElementSpec;
use quill_widgets::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let filled = Arc::new(AtomicUsize::new(0));
    let dirty_count = Arc::clone(&filled);
    let email_form = FormControl::new()
        .required(true)
        .on_dirty(move || {
            dirty_count.fetch_add(1, Ordering::SeqCst);
        })
        .on_clean(|| tracing::info!("email is empty"));
    let notes_form = FormControl::new();

    let mut ctx = WidgetContext::new();
    let form = ctx.tree_mut().build(&ElementSpec::new("form"), None)?;

    let email_config = |value: &str| {
        InputConfig::new()
            .input_type("email")
            .value(value)
            .attr("placeholder", "you@example.com")
    };
    let mut email = Input::new(&mut ctx, email_config(""), Some(&email_form));
    email.mount(&mut ctx, Some(form), Some(&email_form))?;

    let mut notes = InputConfig::new()
        .multi_line(true)
        .rows(2)
        .on_change(|event| tracing::info!(text = ?event.change_value(), "notes changed"))
        .build(&mut ctx, Some(&notes_form));
    notes.mount(&mut ctx, Some(form), Some(&notes_form))?;

    // The host owns the email value and feeds every keystroke back
    email.focus(&mut ctx)?;
    for typed in ["a", "ad", "ada@example.com"] {
        if let Some(editable) = email.editable() {
            let change = ctx.tree_mut().input(editable, typed)?;
            email.handle_event(&mut ctx, &change, Some(&email_form));
        }
        email.update(&mut ctx, email_config(typed), Some(&email_form))?;
    }

    if let Some(editable) = email.editable() {
        email.handle_event(&mut ctx, &Event::blur(editable.raw()), Some(&email_form));
    }
    notes.focus(&mut ctx)?;
    if let Some(editable) = notes.editable() {
        let change = ctx.tree_mut().input(editable, "line one\nline two\nline three")?;
        notes.handle_event(&mut ctx, &change, Some(&notes_form));
    }
    ctx.tick();

    let notes_height = notes
        .wrapper()
        .and_then(|id| ctx.tree().get(id))
        .and_then(|wrapper| wrapper.style_height);
    tracing::info!(
        email_dirty_reports = filled.load(Ordering::SeqCst),
        ?notes_height,
        "form filled"
    );

    notes.unmount(&mut ctx);
    email.unmount(&mut ctx);
    Ok(())
}
