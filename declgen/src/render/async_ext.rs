//! Render model for async-extension units.

use serde::Serialize;

use super::hint_name;
use crate::grouping::{AsyncMember, EmissionUnit};
use crate::host::SymbolModel;
use crate::model::{GenericParam, Parameter, ReturnShape};
use crate::pipeline::GeneratorConfig;

/// One generated wrapper method.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AsyncMemberModel {
    /// Wrapper name.
    pub name: String,
    /// Generic parameters of the wrapper.
    pub generics: Vec<GenericParam>,
    /// Declared return type of the wrapper.
    pub return_type: String,
    /// Type of the wrapped receiver parameter.
    pub source_type: String,
    /// Rendered forwarded parameter declarations.
    pub parameters: Vec<String>,
    /// Call expression invoking the source method on `receiver`.
    pub call: String,
    /// The call produces a value the wrapper returns.
    pub returns_value: bool,
    /// The call result is itself awaited.
    pub awaits_call: bool,
    /// Suffix appended to every awaited expression.
    pub await_suffix: &'static str,
}

/// Everything the async template needs for one extension class.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AsyncUnitRenderModel {
    /// Output file hint.
    pub hint_name: String,
    /// Target namespace.
    pub namespace: Option<String>,
    /// Merged imports.
    pub imports: Vec<String>,
    /// Accessibility keyword of the class.
    pub accessibility: &'static str,
    /// Extension class name.
    pub class_name: String,
    /// Wrapper methods in declaration order.
    pub members: Vec<AsyncMemberModel>,
}

/// Build the render model for an async-extension unit.
#[must_use]
pub fn async_model<S>(
    unit: &EmissionUnit<AsyncMember>,
    config: &GeneratorConfig,
    symbols: &S,
) -> AsyncUnitRenderModel
where
    S: SymbolModel + ?Sized,
{
    AsyncUnitRenderModel {
        hint_name: hint_name(&unit.key, &[], &config.output_extension),
        namespace: unit.key.namespace.clone(),
        imports: unit.imports.clone(),
        accessibility: unit.accessibility.keyword(),
        class_name: unit.key.name.clone(),
        members: unit
            .members
            .iter()
            .map(|m| member(m, config, symbols))
            .collect(),
    }
}

fn member<S>(member: &AsyncMember, config: &GeneratorConfig, symbols: &S) -> AsyncMemberModel
where
    S: SymbolModel + ?Sized,
{
    let method = &member.method;
    let wrapper = config.receiver_wrapper.as_str();
    let (return_type, returns_value, awaits_call) = match &method.return_shape {
        ReturnShape::Void => (wrapper.to_owned(), false, false),
        ReturnShape::Plain(ty) => (format!("{wrapper}<{ty}>"), true, false),
        ReturnShape::Wrapped {
            wrapper,
            inner: Some(ty),
        } => (format!("{wrapper}<{ty}>"), true, true),
        ReturnShape::Wrapped {
            wrapper,
            inner: None,
        } => (wrapper.clone(), false, true),
    };
    let arguments: Vec<&str> = method.parameters.iter().map(|p| p.name.as_str()).collect();
    let call = match symbols.qualified_name(method.reference) {
        Some(qualified) if method.is_extension => {
            let mut all = vec!["receiver"];
            all.extend(&arguments);
            format!("global::{qualified}({})", all.join(", "))
        }
        _ => format!("receiver.{}({})", method.name, arguments.join(", ")),
    };
    AsyncMemberModel {
        name: member.generated_name.clone(),
        generics: method.generics.clone(),
        return_type,
        source_type: format!("{wrapper}<{}>", method.receiver),
        parameters: method.parameters.iter().map(declaration).collect(),
        call,
        returns_value,
        awaits_call,
        await_suffix: if member.settings.configure_await {
            ".ConfigureAwait(false)"
        } else {
            ""
        },
    }
}

fn declaration(parameter: &Parameter) -> String {
    let mut text = String::new();
    if let Some(keyword) = parameter.modifier.keyword() {
        text.push_str(keyword);
        text.push(' ');
    }
    text.push_str(&parameter.ty);
    text.push(' ');
    text.push_str(&parameter.name);
    if let Some(default) = &parameter.default_value {
        text.push_str(" = ");
        text.push_str(default);
    }
    text
}
