//! Grouping of valid descriptors into emission units.
//!
//! A unit is everything that ends up in one generated declaration. Members
//! are sorted by source location before any aggregate is computed, so the
//! units produced for a set of descriptors do not depend on the order in
//! which extraction delivered them.

mod unit;

pub use unit::{EmissionKey, EmissionUnit, merge_imports};

use std::collections::BTreeMap;

use crate::model::{
    Accessibility, MemberSignature, MethodDescriptor, SourceSpan, UnionDescriptor,
};
use crate::naming::NamePattern;
use crate::settings::{ResolvedAsyncSettings, ResolvedUnionSettings};

/// Async member together with its resolved settings and generated name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AsyncMember {
    /// Source method.
    pub method: MethodDescriptor,
    /// Resolved settings after validation.
    pub settings: ResolvedAsyncSettings,
    /// Formatted wrapper method name.
    pub generated_name: String,
}

impl AsyncMember {
    fn location(&self) -> &SourceSpan {
        &self.method.location
    }

    /// Overload identity of the generated wrapper.
    #[must_use]
    pub fn signature(&self) -> MemberSignature<'_> {
        self.method.signature()
    }
}

/// Valid union together with its resolved settings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnionMember {
    /// Union descriptor; its variants are rendered in declaration order.
    pub union: UnionDescriptor,
    /// Resolved settings after validation.
    pub settings: ResolvedUnionSettings,
}

/// Member dropped from a unit because an earlier member generates the same
/// name and signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateMember {
    /// Dropped member.
    pub dropped: AsyncMember,
    /// Location of the member that was kept.
    pub kept: SourceSpan,
    /// Qualified name of the unit both members belong to.
    pub unit: String,
}

/// Outcome of grouping async members.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AsyncGrouping {
    /// Units ordered by key.
    pub units: Vec<EmissionUnit<AsyncMember>>,
    /// Members dropped as duplicates, in declaration order.
    pub duplicates: Vec<DuplicateMember>,
}

/// Group async members by (namespace, accessibility, extension class name).
///
/// Each member is paired with its parsed class pattern. Patterns are parsed
/// during validation, so a malformed one aborts the pass before grouping.
#[must_use]
pub fn group_async(members: Vec<(AsyncMember, NamePattern)>) -> AsyncGrouping {
    let mut buckets: BTreeMap<EmissionKey, Vec<AsyncMember>> = BTreeMap::new();
    for (member, class_pattern) in members {
        let key = EmissionKey {
            namespace: member.settings.namespace.apply(member.method.namespace.as_deref()),
            accessibility: member.settings.accessibility,
            name: class_pattern.format(&member.method.receiver_name),
        };
        buckets.entry(key).or_default().push(member);
    }

    let mut grouping = AsyncGrouping::default();
    for (key, mut members) in buckets {
        members.sort_by(|a, b| a.location().cmp(b.location()));
        let mut kept: Vec<AsyncMember> = Vec::with_capacity(members.len());
        for member in members {
            let existing = kept.iter().find(|k| {
                k.generated_name == member.generated_name && k.signature() == member.signature()
            });
            if let Some(existing) = existing {
                tracing::debug!(
                    unit = %key.name,
                    member = %member.generated_name,
                    "dropping duplicate generated member"
                );
                grouping.duplicates.push(DuplicateMember {
                    kept: existing.location().clone(),
                    unit: key.qualified_name(),
                    dropped: member,
                });
            } else {
                kept.push(member);
            }
        }
        let imports = merge_imports(kept.iter().map(|m| m.method.imports.as_slice()));
        let accessibility = key
            .accessibility
            .min(Accessibility::minimum(kept.iter().map(|m| m.method.accessibility)));
        grouping.units.push(EmissionUnit {
            key,
            accessibility,
            members: kept,
            imports,
        });
    }
    grouping
        .duplicates
        .sort_by(|a, b| a.dropped.location().cmp(b.dropped.location()));
    tracing::debug!(
        units = grouping.units.len(),
        duplicates = grouping.duplicates.len(),
        "grouped async members"
    );
    grouping
}

/// One unit per union.
///
/// Each unit holds exactly one member; the variants it renders are the
/// member's variants, kept in declaration order. Units are ordered by key,
/// with the declaration location breaking ties between unions that share a
/// name in different files.
#[must_use]
pub fn group_unions(unions: Vec<UnionMember>) -> Vec<EmissionUnit<UnionMember>> {
    let mut units: Vec<EmissionUnit<UnionMember>> = unions
        .into_iter()
        .map(|member| EmissionUnit {
            key: EmissionKey {
                namespace: member.union.namespace.clone(),
                accessibility: member.union.accessibility,
                name: member.union.name.clone(),
            },
            accessibility: member.union.accessibility,
            imports: merge_imports([member.union.imports.as_slice()]),
            members: vec![member],
        })
        .collect();
    units.sort_by(|a, b| {
        a.key
            .cmp(&b.key)
            .then_with(|| first_location(a).cmp(&first_location(b)))
    });
    units
}

fn first_location(unit: &EmissionUnit<UnionMember>) -> Option<&SourceSpan> {
    unit.members.first().map(|m| &m.union.location)
}

#[cfg(test)]
mod tests;
