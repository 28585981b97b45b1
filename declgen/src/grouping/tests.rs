//! Unit tests for emission-unit grouping.

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};

use super::{AsyncMember, EmissionKey, UnionMember, group_async, group_unions, merge_imports};
use crate::model::{Accessibility, MethodDescriptor, Parameter, SourceSpan, UnionDescriptor};
use crate::naming::NamePattern;
use crate::settings::{NamespaceChoice, ResolvedAsyncSettings, ResolvedUnionSettings};

fn member(name: &str, receiver: &str, offset: usize, imports: &[&str]) -> AsyncMember {
    AsyncMember {
        method: MethodDescriptor {
            name: name.to_owned(),
            receiver_name: receiver.to_owned(),
            receiver: receiver.to_owned(),
            namespace: Some("Data".to_owned()),
            imports: imports.iter().map(|i| (*i).to_owned()).collect(),
            location: SourceSpan::new("Repository.cs", offset, offset + 10),
            ..MethodDescriptor::default()
        },
        settings: ResolvedAsyncSettings::default(),
        generated_name: format!("{name}Async"),
    }
}

fn with_patterns(members: Vec<AsyncMember>) -> Result<Vec<(AsyncMember, NamePattern)>> {
    members
        .into_iter()
        .map(|m| {
            let pattern = NamePattern::parse(&m.settings.class_pattern)
                .map_err(|e| anyhow!(e.to_string()))?;
            Ok((m, pattern))
        })
        .collect()
}

#[fixture]
fn members() -> Vec<AsyncMember> {
    vec![
        member("Get", "Repository", 10, &["System", "Data.Models"]),
        member("List", "Repository", 50, &["System.Linq", "System"]),
        member("Count", "Cache", 30, &["System"]),
        member("Save", "Repository", 90, &["Data.Models", "System.IO"]),
    ]
}

#[rstest]
fn groups_by_formatted_class_name(members: Vec<AsyncMember>) -> Result<()> {
    let grouping = group_async(with_patterns(members)?);
    let names: Vec<&str> = grouping.units.iter().map(|u| u.key.name.as_str()).collect();
    ensure!(
        names == ["CacheAsyncExtensions", "RepositoryAsyncExtensions"],
        "unexpected units {names:?}"
    );
    let Some(repo) = grouping.units.get(1) else {
        return Err(anyhow!("missing repository unit"));
    };
    let order: Vec<&str> = repo.members.iter().map(|m| m.method.name.as_str()).collect();
    ensure!(order == ["Get", "List", "Save"], "members out of order: {order:?}");
    ensure!(
        repo.imports == ["System", "Data.Models", "System.Linq", "System.IO"],
        "imports not merged in first-seen order: {:?}",
        repo.imports
    );
    Ok(())
}

#[rstest]
fn grouping_ignores_input_order(members: Vec<AsyncMember>) -> Result<()> {
    let expected = group_async(with_patterns(members.clone())?);
    for shift in 1..members.len() {
        let mut rotated = members.clone();
        rotated.rotate_left(shift);
        rotated.reverse();
        let actual = group_async(with_patterns(rotated)?);
        ensure!(actual == expected, "grouping changed after rotation {shift}");
    }
    Ok(())
}

#[rstest]
fn unit_accessibility_is_capped_by_members() -> Result<()> {
    let mut internal = member("Get", "Repository", 10, &[]);
    internal.method.accessibility = Accessibility::Internal;
    let public = member("List", "Repository", 20, &[]);
    let grouping = group_async(with_patterns(vec![public, internal])?);
    let unit = grouping.units.first().ok_or_else(|| anyhow!("no unit"))?;
    ensure!(unit.key.accessibility == Accessibility::Public, "key keeps request");
    ensure!(unit.accessibility == Accessibility::Internal, "unit is capped");
    Ok(())
}

#[rstest]
fn namespace_choice_splits_units() -> Result<()> {
    let first = member("Get", "Repository", 10, &[]);
    let mut second = member("List", "Repository", 20, &[]);
    second.settings.namespace = NamespaceChoice::Named(String::new());
    let grouping = group_async(with_patterns(vec![first, second])?);
    let keys: Vec<Option<&str>> = grouping
        .units
        .iter()
        .map(|u| u.key.namespace.as_deref())
        .collect();
    ensure!(keys == [None, Some("Data")], "global namespace sorts first: {keys:?}");
    Ok(())
}

#[rstest]
fn later_duplicates_are_dropped() -> Result<()> {
    let parameters = vec![Parameter {
        name: "id".to_owned(),
        ty: "int".to_owned(),
        ..Parameter::default()
    }];
    let mut first = member("Get", "Repository", 10, &[]);
    first.method.parameters.clone_from(&parameters);
    let mut later = member("Get", "Repository", 80, &[]);
    later.method.parameters = parameters;
    let overload = member("Get", "Repository", 40, &[]);

    let grouping = group_async(with_patterns(vec![later, overload, first])?);
    let unit = grouping.units.first().ok_or_else(|| anyhow!("no unit"))?;
    ensure!(unit.members.len() == 2, "overload with other signature is kept");
    ensure!(grouping.duplicates.len() == 1, "one duplicate expected");
    let duplicate = grouping.duplicates.first().ok_or_else(|| anyhow!("no duplicate"))?;
    ensure!(duplicate.dropped.method.location.start == 80, "later member dropped");
    ensure!(duplicate.kept.start == 10, "first member kept");
    ensure!(duplicate.unit == "Data.RepositoryAsyncExtensions", "unit {}", duplicate.unit);
    Ok(())
}

#[rstest]
fn unions_form_one_unit_each() {
    let union = |name: &str, ns: Option<&str>| UnionMember {
        union: UnionDescriptor {
            name: name.to_owned(),
            namespace: ns.map(str::to_owned),
            imports: vec!["System".to_owned(), "System".to_owned()],
            ..UnionDescriptor::default()
        },
        settings: ResolvedUnionSettings::default(),
    };
    let units = group_unions(vec![
        union("Shape", Some("Geometry")),
        union("Result", None),
        union("Option", Some("Geometry")),
    ]);
    let keys: Vec<String> = units.iter().map(|u| u.key.qualified_name()).collect();
    assert_eq!(keys, ["Result", "Geometry.Option", "Geometry.Shape"]);
    assert!(units.iter().all(|u| u.members.len() == 1));
    assert!(units.iter().all(|u| u.imports == ["System"]));
}

#[rstest]
fn merge_imports_keeps_first_occurrence() {
    let first = vec!["A".to_owned(), "B".to_owned()];
    let second = vec!["C".to_owned(), "A".to_owned()];
    assert_eq!(
        merge_imports([first.as_slice(), second.as_slice()]),
        ["A", "B", "C"]
    );
}

#[rstest]
fn keys_order_namespace_first() {
    let key = |ns: Option<&str>, name: &str| EmissionKey {
        namespace: ns.map(str::to_owned),
        accessibility: Accessibility::Public,
        name: name.to_owned(),
    };
    assert!(key(None, "Z") < key(Some("A"), "A"));
    assert!(key(Some("A"), "A") < key(Some("A"), "B"));
}
