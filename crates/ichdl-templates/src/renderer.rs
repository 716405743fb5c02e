//! Handlebars rendering of HDL templates.

use crate::context::{is_supply_pin, RenderContext};
use crate::error::{Result, TemplateError};
use handlebars::{
    handlebars_helper, Context, Handlebars, Helper, HelperResult, Output,
    RenderContext as HbRenderContext, Template,
};
use tracing::trace;

/// Renders template text against a [`RenderContext`].
///
/// HTML escaping is off (templates emit HDL) and strict mode is on, so a
/// reference to an unknown field fails the render instead of printing
/// nothing.
pub struct HdlRenderer {
    handlebars: Handlebars<'static>,
}

impl HdlRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);
        Self::register_helpers(&mut handlebars);
        Self { handlebars }
    }

    fn register_helpers(hb: &mut Handlebars) {
        hb.register_helper("is_supply", Box::new(is_supply));
        hb.register_helper("bit_width", Box::new(bit_width));
        hb.register_helper("upper", Box::new(upper_helper));
        hb.register_helper("lower", Box::new(lower_helper));
        hb.register_helper("join", Box::new(join_helper));
        hb.register_helper("default", Box::new(default_helper));
    }

    /// Parse `source` without rendering it.
    pub fn check_syntax(&self, name: &str, source: &str) -> Result<()> {
        Template::compile(source)
            .map(|_| ())
            .map_err(|e| TemplateError::Syntax {
                template: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Render `source` (named `name` in errors) with `ctx`.
    pub fn render(&self, name: &str, source: &str, ctx: &RenderContext) -> Result<String> {
        self.check_syntax(name, source)?;
        trace!(template = %name, part = %ctx.part_number, "rendering");

        self.handlebars
            .render_template(source, ctx)
            .map_err(|e| TemplateError::Render {
                template: name.to_string(),
                message: e.to_string(),
            })
    }
}

impl Default for HdlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

handlebars_helper!(is_supply: |name: str| is_supply_pin(name));

// Bits needed to count `n` distinct values, at least one.
handlebars_helper!(bit_width: |n: u64| {
    if n <= 2 { 1 } else { u64::from(64 - (n - 1).leading_zeros()) }
});

fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut HbRenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    if let Some(s) = h.param(0).and_then(|v| v.value().as_str()) {
        out.write(&s.to_uppercase())?;
    }
    Ok(())
}

fn lower_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut HbRenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    if let Some(s) = h.param(0).and_then(|v| v.value().as_str()) {
        out.write(&s.to_lowercase())?;
    }
    Ok(())
}

/// `{{join list ", "}}`; the separator defaults to `", "`.
fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut HbRenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let separator = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .unwrap_or(", ");

    if let Some(items) = h.param(0).and_then(|v| v.value().as_array()) {
        let joined = items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(separator);
        out.write(&joined)?;
    }
    Ok(())
}

/// `{{default value "fallback"}}` prints `fallback` when `value` is null or empty.
fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut HbRenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = h.param(0).map(|v| v.value());
    let chosen = match value {
        Some(serde_json::Value::Null) | None => h.param(1).map(|v| v.value()),
        Some(serde_json::Value::String(s)) if s.is_empty() => h.param(1).map(|v| v.value()),
        other => other,
    };

    match chosen {
        Some(serde_json::Value::String(s)) => out.write(s)?,
        Some(serde_json::Value::Null) | None => {}
        Some(other) => out.write(&other.to_string())?,
    }
    Ok(())
}
