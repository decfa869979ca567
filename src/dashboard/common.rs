use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Units understood by Grafana's field config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "none")]
    None,
    #[serde(rename = "s")]
    Seconds,
    #[serde(rename = "decbytes")]
    DecBytes,
    #[serde(rename = "dateTimeAsLocal")]
    DateTimeAsLocal,
}

/// How a metric entry is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Timeseries,
    Stat,
    Gauge,
    Table,
}

impl Format {
    /// Result format requested from the datasource for this entry's queries.
    pub fn target_format(&self) -> &'static str {
        match self {
            Format::Table => "table",
            _ => "time_series",
        }
    }

    /// Tables show the latest value per series, everything else a range.
    pub fn instant(&self) -> bool {
        matches!(self, Format::Table)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridPos {
    pub h: u32,
    pub w: u32,
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub const fn new(h: u32, w: u32, x: u32, y: u32) -> Self {
        Self { h, w, x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdStep {
    pub color: &'static str,
    pub value: Option<f64>,
}

impl ThresholdStep {
    /// Color used below every other step
    pub const fn base(color: &'static str) -> Self {
        Self { color, value: None }
    }

    pub const fn at(color: &'static str, value: f64) -> Self {
        Self {
            color,
            value: Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    Absolute,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub mode: ThresholdMode,
    pub steps: &'static [ThresholdStep],
}

pub const THRESHOLDS_2_STEPS: &[ThresholdStep] =
    &[ThresholdStep::base("green"), ThresholdStep::at("red", 80.0)];

pub const THRESHOLDS_3_STEPS: &[ThresholdStep] = &[
    ThresholdStep::base("green"),
    ThresholdStep::at("orange", 80.0),
    ThresholdStep::at("red", 90.0),
];

/// Any non-zero value is an error
pub const RED_AT_ONE: Thresholds = Thresholds {
    mode: ThresholdMode::Absolute,
    steps: &[ThresholdStep::base("green"), ThresholdStep::at("red", 1.0)],
};

/// Any non-zero value is a warning
pub const ORANGE_AT_ONE: Thresholds = Thresholds {
    mode: ThresholdMode::Absolute,
    steps: &[ThresholdStep::base("green"), ThresholdStep::at("orange", 1.0)],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingResult {
    pub color: &'static str,
    pub index: u32,
    pub text: &'static str,
}

impl MappingResult {
    pub const fn new(text: &'static str, color: &'static str, index: u32) -> Self {
        Self { color, index, text }
    }
}

/// A Grafana value mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMapping {
    /// Raw values rendered as the given results
    Value(&'static [(&'static str, MappingResult)]),
    /// Result rendered when the value is null
    Null(MappingResult),
}

impl Serialize for ValueMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            ValueMapping::Value(entries) => {
                map.serialize_entry("options", &ValueOptions(entries))?;
                map.serialize_entry("type", "value")?;
            }
            ValueMapping::Null(result) => {
                map.serialize_entry(
                    "options",
                    &SpecialOptions {
                        r#match: "null",
                        result,
                    },
                )?;
                map.serialize_entry("type", "special")?;
            }
        }
        map.end()
    }
}

struct ValueOptions(&'static [(&'static str, MappingResult)]);

impl Serialize for ValueOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(value, result)| (value, result)))
    }
}

#[derive(Serialize)]
struct SpecialOptions<'a> {
    r#match: &'static str,
    result: &'a MappingResult,
}

/// Health status as reported by `emqx_cluster_status`
pub const HEALTH_MAPPINGS: &[ValueMapping] = &[ValueMapping::Value(&[
    ("0", MappingResult::new("Unknown", "red", 2)),
    ("1", MappingResult::new("Unhealthy", "red", 1)),
    ("2", MappingResult::new("Healthy", "green", 0)),
])];

/// One query of a metric entry, with the hints that drive its overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub expr: &'static str,
    pub legend_format: &'static str,
    pub color: Option<&'static str>,
    pub thresholds: Option<Thresholds>,
    pub mappings: Option<&'static [ValueMapping]>,
    pub datetime: bool,
}

impl Target {
    pub const fn new(legend_format: &'static str, expr: &'static str) -> Self {
        Self {
            expr,
            legend_format,
            color: None,
            thresholds: None,
            mappings: None,
            datetime: false,
        }
    }

    pub const fn color(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }

    pub const fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    pub const fn mappings(mut self, mappings: &'static [ValueMapping]) -> Self {
        self.mappings = Some(mappings);
        self
    }

    pub const fn datetime(mut self) -> Self {
        self.datetime = true;
        self
    }

    /// Query reference id, also the suffix of the merged table column.
    pub fn slug(&self) -> String {
        slug(self.legend_format)
    }

    /// Column name this target gets once several queries are merged.
    pub fn value_field(&self) -> String {
        format!("Value #{}", self.slug())
    }
}

/// Lower-cases and joins whitespace separated words with `_`.
pub fn slug(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubchartLinks {
    pub subchart: &'static str,
    pub panels: &'static [&'static str],
}

/// A metric table entry: everything needed to build one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricEntry {
    pub key: &'static str,
    pub title: &'static str,
    pub format: Format,
    pub grid_pos: Option<GridPos>,
    pub targets: &'static [Target],
    pub subchart_links: Option<SubchartLinks>,
}

impl MetricEntry {
    pub const fn new(
        key: &'static str,
        title: &'static str,
        format: Format,
        targets: &'static [Target],
    ) -> Self {
        Self {
            key,
            title,
            format,
            grid_pos: None,
            targets,
            subchart_links: None,
        }
    }

    pub const fn grid_pos(mut self, grid_pos: GridPos) -> Self {
        self.grid_pos = Some(grid_pos);
        self
    }

    pub const fn links(mut self, subchart: &'static str, panels: &'static [&'static str]) -> Self {
        self.subchart_links = Some(SubchartLinks { subchart, panels });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowEntry {
    pub key: &'static str,
    pub title: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Exec Failed last 15m"), "exec_failed_last_15m");
        assert_eq!(slug("Exec Failed last 15m"), slug("Exec Failed last 15m"));
        assert_eq!(slug("Sub ACL Failure "), "sub_acl_failure");
        assert_eq!(slug("Max  Rate"), "max_rate");
        assert_eq!(slug("{{ instance }}"), "{{_instance_}}");
    }

    #[test]
    fn test_value_field() {
        let target = Target::new("Days Remaining", "sum(emqx_license_remaining_days)");
        assert_eq!(target.value_field(), "Value #days_remaining");
    }

    #[test]
    fn test_target_format() {
        assert_eq!(Format::Table.target_format(), "table");
        assert!(Format::Table.instant());
        assert_eq!(Format::Gauge.target_format(), "time_series");
        assert!(!Format::Stat.instant());
    }

    #[test]
    fn test_value_mapping_json() {
        let value = serde_json::to_value(HEALTH_MAPPINGS).unwrap();
        assert_eq!(value[0]["type"], "value");
        assert_eq!(value[0]["options"]["2"]["text"], "Healthy");
        assert_eq!(value[0]["options"]["0"]["index"], 2);

        let special = ValueMapping::Null(MappingResult::new("N/A", "red", 2));
        let value = serde_json::to_value(special).unwrap();
        assert_eq!(value["type"], "special");
        assert_eq!(value["options"]["match"], "null");
        assert_eq!(value["options"]["result"]["text"], "N/A");
    }

    #[test]
    fn test_threshold_json() {
        let value = serde_json::to_value(RED_AT_ONE).unwrap();
        assert_eq!(value["mode"], "absolute");
        assert!(value["steps"][0]["value"].is_null());
        assert_eq!(value["steps"][1]["color"], "red");
        assert_eq!(value["steps"][1]["value"], 1.0);
    }
}
