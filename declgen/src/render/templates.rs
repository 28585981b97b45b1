//! Built-in template text.

/// Registry name of the union template.
pub const UNION_TEMPLATE: &str = "union";
/// Registry name of the async-extension template.
pub const ASYNC_TEMPLATE: &str = "async_extensions";

pub(super) const UNION: &str = r#"// <auto-generated/>
// Generated for {{source_name}}.
#nullable enable
{{#each imports}}
using {{this}};
{{/each}}
{{#if namespace}}

namespace {{namespace}}
{
{{/if}}

{{#each tags}}
[{{attribute}}(typeof({{target}}), "{{tag}}")]
{{/each}}
partial {{kind}} {{name}}{{generic_list generics}}
{
{{#if generate_constructor}}
    private {{name}}() { }
{{/if}}
{{#each factories}}

    public static {{../self_type}} {{name}}({{parameters}}) => new {{variant}}({{arguments}});
{{/each}}
{{#each conversions}}

    public static implicit operator {{../self_type}}({{parameter_type}} {{parameter_name}}) => new {{variant}}({{parameter_name}});
{{/each}}
{{#if has_match}}

    public TResult Match<TResult>({{#each match_parameters}}{{func}} {{name}}{{#unless @last}}, {{/unless}}{{/each}})
    {
        return this switch
        {
{{#each match_arms}}
            {{pattern}} => {{invocation}},
{{/each}}
            _ => throw new global::System.InvalidOperationException("{{unknown_variant}}"),
        };
    }

    public void Switch({{#each match_parameters}}{{action}} {{name}}{{#unless @last}}, {{/unless}}{{/each}})
    {
        switch (this)
        {
{{#each match_arms}}
            case {{pattern}}:
                {{invocation}};
                return;
{{/each}}
        }

        throw new global::System.InvalidOperationException("{{unknown_variant}}");
    }
{{/if}}
}
{{#if namespace}}
}
{{/if}}
"#;

pub(super) const ASYNC_EXTENSIONS: &str = r#"// <auto-generated/>
#nullable enable
{{#each imports}}
using {{this}};
{{/each}}
{{#if namespace}}

namespace {{namespace}}
{
{{/if}}

{{accessibility}} static partial class {{class_name}}
{
{{#each members}}
{{#unless @first}}

{{/unless}}
    public static async {{return_type}} {{name}}{{generic_list generics}}(this {{source_type}} source{{#each parameters}}, {{this}}{{/each}}){{generic_constraints generics}}
    {
        var receiver = await source{{await_suffix}};
        {{#if returns_value}}return {{/if}}{{#if awaits_call}}await {{/if}}{{call}}{{#if awaits_call}}{{await_suffix}}{{/if}};
    }
{{/each}}
}
{{#if namespace}}
}
{{/if}}
"#;
