//! Template helpers registered on every renderer.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde_json::Value;

pub(super) fn register(registry: &mut Handlebars<'static>) {
    registry.register_helper("pascal", Box::new(pascal_helper));
    registry.register_helper("camel", Box::new(camel_helper));
    registry.register_helper("snake", Box::new(snake_helper));
    registry.register_helper("generic_list", Box::new(generic_list_helper));
    registry.register_helper("generic_constraints", Box::new(generic_constraints_helper));
    registry.register_helper("join", Box::new(join_helper));
}

fn text_param<'a>(h: &'a Helper, index: usize) -> &'a str {
    h.param(index).and_then(|v| v.value().as_str()).unwrap_or("")
}

fn array_param<'a>(h: &'a Helper, index: usize) -> &'a [Value] {
    h.param(index)
        .and_then(|v| v.value().as_array())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn pascal_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&text_param(h, 0).to_upper_camel_case())?;
    Ok(())
}

fn camel_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&text_param(h, 0).to_lower_camel_case())?;
    Ok(())
}

fn snake_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&text_param(h, 0).to_snake_case())?;
    Ok(())
}

/// `{{generic_list generics}}` renders `<T, U>`, or nothing for an empty list.
fn generic_list_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let names: Vec<&str> = array_param(h, 0)
        .iter()
        .filter_map(|g| g.get("name").and_then(Value::as_str))
        .collect();
    if !names.is_empty() {
        out.write(&format!("<{}>", names.join(", ")))?;
    }
    Ok(())
}

/// `{{generic_constraints generics}}` renders ` where T : class` for every
/// constrained parameter.
fn generic_constraints_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    for generic in array_param(h, 0) {
        let name = generic.get("name").and_then(Value::as_str);
        let constraint = generic.get("constraint").and_then(Value::as_str);
        if let (Some(name), Some(constraint)) = (name, constraint) {
            out.write(&format!(" where {name} : {constraint}"))?;
        }
    }
    Ok(())
}

/// `{{join items ", "}}`; the separator defaults to `", "`.
fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let separator = h.param(1).and_then(|v| v.value().as_str()).unwrap_or(", ");
    let items: Vec<String> = array_param(h, 0)
        .iter()
        .map(|item| match item {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect();
    out.write(&items.join(separator))?;
    Ok(())
}
