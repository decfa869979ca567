//! Field overrides and transformations derived from the hints declared on
//! a metric entry's targets.

use super::common::{Target, Thresholds, Unit, ValueMapping};
use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref GROUPING_CLAUSE: Regex = Regex::new(r"\((.*?)\)").unwrap();
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Override {
    pub matcher: Matcher,
    pub properties: Vec<Property>,
}

impl Override {
    fn by_name(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            matcher: Matcher {
                id: "byName",
                options: name.into(),
            },
            properties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matcher {
    pub id: &'static str,
    pub options: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "id", content = "value")]
pub enum Property {
    #[serde(rename = "displayName")]
    DisplayName(String),
    #[serde(rename = "color")]
    Color(FixedColor),
    #[serde(rename = "thresholds")]
    Thresholds(Thresholds),
    #[serde(rename = "mappings")]
    Mappings(&'static [ValueMapping]),
    #[serde(rename = "custom.cellOptions")]
    CellOptions(CellOptions),
    #[serde(rename = "unit")]
    Unit(Unit),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedColor {
    pub fixed_color: &'static str,
    pub mode: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellOptions {
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

const GRADIENT_BACKGROUND: CellOptions = CellOptions {
    mode: "gradient",
    kind: "color-background",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "id", content = "options")]
pub enum Transformation {
    #[serde(rename = "merge")]
    Merge(MergeOptions),
    #[serde(rename = "filterFieldsByName")]
    FilterFieldsByName(FieldFilter),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOptions {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFilter {
    pub include: IncludeNames,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeNames {
    pub names: Vec<String>,
}

/// Returns the label names of the first parenthesized group in `expr`,
/// e.g. `sum by(type, name) (...)` yields `type` and `name`.
pub fn extract_grouping_fields(expr: &str) -> Result<Vec<String>> {
    let captures = GROUPING_CLAUSE
        .captures(expr)
        .ok_or_else(|| Error::NoGroupingClause {
            expr: expr.to_string(),
        })?;

    Ok(captures[1]
        .split(',')
        .map(|field| field.trim().to_string())
        .collect())
}

/// Merges the per-target query results into one table and keeps the
/// grouping labels plus one value column per target.
pub fn field_filter_transform(targets: &[Target]) -> Result<Vec<Transformation>> {
    let first = targets.first().ok_or_else(|| Error::NoGroupingClause {
        expr: String::new(),
    })?;

    let mut names = Vec::new();
    let fields = extract_grouping_fields(first.expr)?
        .into_iter()
        .chain(targets.iter().map(Target::value_field));

    for name in fields {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    Ok(vec![
        Transformation::Merge(MergeOptions::default()),
        Transformation::FilterFieldsByName(FieldFilter {
            include: IncludeNames { names },
        }),
    ])
}

/// Pins the series color of every target that declares one.
pub fn color_overrides(targets: &[Target]) -> Vec<Override> {
    targets
        .iter()
        .filter_map(|target| {
            target.color.map(|color| {
                Override::by_name(
                    target.legend_format,
                    vec![Property::Color(FixedColor {
                        fixed_color: color,
                        mode: "fixed",
                    })],
                )
            })
        })
        .collect()
}

/// One override per target for merged tables. Thresholds win over
/// mappings, mappings over datetime, otherwise the column is just renamed.
pub fn table_cell_overrides(targets: &[Target]) -> Vec<Override> {
    targets.iter().map(table_cell_override).collect()
}

fn table_cell_override(target: &Target) -> Override {
    let display_name = Property::DisplayName(target.legend_format.to_string());

    let properties = if let Some(thresholds) = target.thresholds {
        vec![
            display_name,
            Property::Thresholds(thresholds),
            Property::CellOptions(GRADIENT_BACKGROUND),
        ]
    } else if let Some(mappings) = target.mappings {
        vec![
            display_name,
            Property::Mappings(mappings),
            Property::CellOptions(GRADIENT_BACKGROUND),
        ]
    } else if target.datetime {
        vec![Property::Unit(Unit::DateTimeAsLocal)]
    } else {
        vec![display_name]
    };

    Override::by_name(target.value_field(), properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::common::*;

    const STATUS: &[ValueMapping] = &[ValueMapping::Null(MappingResult::new("N/A", "red", 2))];

    #[test]
    fn test_extract_grouping_fields() {
        let cases = vec![
            (
                "sum by(type, name) (emqx_rule_bridge_queuing{cluster=\"$cluster\"})",
                vec!["type", "name"],
            ),
            ("sum by(rule) (emqx_rule_exec_rate)", vec!["rule"]),
            ("max by( node ,resource ) (x)", vec!["node", "resource"]),
        ];

        for (expr, expected) in cases {
            let result = extract_grouping_fields(expr).unwrap();
            assert_eq!(result, expected, "Failed for expr: {}", expr);
        }
    }

    #[test]
    fn test_extract_grouping_fields_missing() {
        let result = extract_grouping_fields("emqx_cluster_status{cluster=\"$cluster\"}");
        assert!(matches!(result, Err(Error::NoGroupingClause { .. })));
    }

    #[test]
    fn test_field_filter_transform() {
        let targets = [
            Target::new("Status", "sum by(type, name) (emqx_rule_bridge_status)"),
            Target::new("Queuing", "sum by(type, name) (emqx_rule_bridge_queuing)"),
        ];

        let transformations = field_filter_transform(&targets).unwrap();
        assert_eq!(transformations.len(), 2);
        assert_eq!(transformations[0], Transformation::Merge(MergeOptions {}));

        let Transformation::FilterFieldsByName(filter) = &transformations[1] else {
            panic!("expected a field filter");
        };
        assert_eq!(
            filter.include.names,
            vec!["type", "name", "Value #status", "Value #queuing"]
        );

        let json = serde_json::to_value(&transformations).unwrap();
        assert_eq!(json[0]["id"], "merge");
        assert!(json[0]["options"].as_object().unwrap().is_empty());
        assert_eq!(json[1]["id"], "filterFieldsByName");
        assert_eq!(json[1]["options"]["include"]["names"][2], "Value #status");
    }

    #[test]
    fn test_field_filter_transform_empty() {
        assert!(matches!(
            field_filter_transform(&[]),
            Err(Error::NoGroupingClause { .. })
        ));
    }

    #[test]
    fn test_color_overrides() {
        let targets = [
            Target::new("Running", "max(emqx_cluster_nodes_running)").color("green"),
            Target::new("Unknown", "max(emqx_cluster_nodes_unknown)"),
            Target::new("Stopped", "max(emqx_cluster_nodes_stopped)").color("dark-red"),
        ];

        let overrides = color_overrides(&targets);
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides[1].matcher.options, "Stopped");

        let json = serde_json::to_value(&overrides[0]).unwrap();
        assert_eq!(json["matcher"]["id"], "byName");
        assert_eq!(json["matcher"]["options"], "Running");
        assert_eq!(json["properties"][0]["id"], "color");
        assert_eq!(json["properties"][0]["value"]["fixedColor"], "green");
        assert_eq!(json["properties"][0]["value"]["mode"], "fixed");
    }

    #[test]
    fn test_table_cell_override_priority() {
        let targets = [
            Target::new("Both", "sum by(rule) (a)")
                .mappings(STATUS)
                .thresholds(RED_AT_ONE),
            Target::new("Mapped", "sum by(rule) (b)").mappings(STATUS).datetime(),
            Target::new("Expiry At", "sum(c)").datetime(),
            Target::new("Max Conns", "sum(d)"),
        ];

        let overrides = table_cell_overrides(&targets);
        assert_eq!(overrides.len(), 4);

        assert_eq!(overrides[0].matcher.options, "Value #both");
        assert!(overrides[0]
            .properties
            .contains(&Property::Thresholds(RED_AT_ONE)));
        assert!(!overrides[0]
            .properties
            .iter()
            .any(|p| matches!(p, Property::Mappings(_))));

        assert_eq!(
            overrides[1].properties,
            vec![
                Property::DisplayName("Mapped".to_string()),
                Property::Mappings(STATUS),
                Property::CellOptions(GRADIENT_BACKGROUND),
            ]
        );

        assert_eq!(overrides[2].matcher.options, "Value #expiry_at");
        assert_eq!(
            overrides[2].properties,
            vec![Property::Unit(Unit::DateTimeAsLocal)]
        );

        assert_eq!(
            overrides[3].properties,
            vec![Property::DisplayName("Max Conns".to_string())]
        );
    }

    #[test]
    fn test_table_cell_override_json() {
        let targets = [Target::new("Deny last 15m", "sum by(resource) (x)").thresholds(RED_AT_ONE)];
        let json = serde_json::to_value(table_cell_overrides(&targets)).unwrap();

        let properties = &json[0]["properties"];
        assert_eq!(properties[0]["id"], "displayName");
        assert_eq!(properties[0]["value"], "Deny last 15m");
        assert_eq!(properties[1]["id"], "thresholds");
        assert_eq!(properties[1]["value"]["mode"], "absolute");
        assert_eq!(properties[2]["id"], "custom.cellOptions");
        assert_eq!(properties[2]["value"]["type"], "color-background");
        assert_eq!(properties[2]["value"]["mode"], "gradient");
    }
}
