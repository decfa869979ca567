use super::common::*;
use super::links::{data_links, DataLink};
use super::overrides::{field_filter_transform, table_cell_overrides, Override, Transformation};
use super::templating::DATASOURCE;
use crate::error::Result;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// Summaries shown in a table legend
pub const LEGEND_CALCS: &[&str] = &["lastNotNull", "min", "max", "mean", "sum"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    TimeSeries,
    Stat,
    Gauge,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientMode {
    None,
    Opacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdsStyle {
    Off,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendDisplayMode {
    List,
    Table,
}

/// Caller supplied panel settings. Unset fields fall back to the defaults of
/// the panel kind; a set field replaces the default wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelOptions {
    pub title: Option<String>,
    pub grid_pos: Option<GridPos>,
    pub span: Option<u32>,
    pub datasource: Option<&'static str>,
    pub unit: Option<Unit>,
    pub gradient_mode: Option<GradientMode>,
    pub fill_opacity: Option<u32>,
    pub thresholds: Option<&'static [ThresholdStep]>,
    pub threshold_mode: Option<ThresholdMode>,
    pub thresholds_style: Option<ThresholdsStyle>,
    pub overrides: Option<Vec<Override>>,
    pub transformations: Option<Vec<Transformation>>,
    pub mappings: Option<&'static [ValueMapping]>,
    pub links: Option<Vec<DataLink>>,
    pub legend_display_mode: Option<LegendDisplayMode>,
    pub legend_calcs: Option<&'static [&'static str]>,
    pub max: Option<f64>,
}

macro_rules! merge_fields {
    ($base:ident, $over:ident, $($field:ident),+ $(,)?) => {
        PanelOptions {
            $($field: $over.$field.or($base.$field),)+
        }
    };
}

impl PanelOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Title and grid position taken from a metric table entry
    pub fn for_entry(entry: &MetricEntry) -> Self {
        Self {
            grid_pos: entry.grid_pos,
            ..Self::new(entry.title)
        }
    }

    /// Options for a table merging all of the entry's queries into columns
    pub fn table_for(entry: &MetricEntry) -> Result<Self> {
        Ok(Self::for_entry(entry)
            .transformations(field_filter_transform(entry.targets)?)
            .overrides(table_cell_overrides(entry.targets)))
    }

    pub fn grid_pos(mut self, grid_pos: GridPos) -> Self {
        self.grid_pos = Some(grid_pos);
        self
    }

    pub fn span(mut self, span: u32) -> Self {
        self.span = Some(span);
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn gradient_mode(mut self, mode: GradientMode) -> Self {
        self.gradient_mode = Some(mode);
        self
    }

    pub fn fill_opacity(mut self, opacity: u32) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }

    pub fn thresholds(mut self, steps: &'static [ThresholdStep]) -> Self {
        self.thresholds = Some(steps);
        self
    }

    pub fn threshold_mode(mut self, mode: ThresholdMode) -> Self {
        self.threshold_mode = Some(mode);
        self
    }

    pub fn thresholds_style(mut self, style: ThresholdsStyle) -> Self {
        self.thresholds_style = Some(style);
        self
    }

    pub fn overrides(mut self, overrides: Vec<Override>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn transformations(mut self, transformations: Vec<Transformation>) -> Self {
        self.transformations = Some(transformations);
        self
    }

    pub fn mappings(mut self, mappings: &'static [ValueMapping]) -> Self {
        self.mappings = Some(mappings);
        self
    }

    pub fn links(mut self, links: Vec<DataLink>) -> Self {
        self.links = Some(links);
        self
    }

    /// Links to the subchart panels the entry references, if any
    pub fn subchart_links(self, entry: &MetricEntry) -> Result<Self> {
        Ok(self.links(data_links(entry)?))
    }

    /// Legend rendered as a table with [`LEGEND_CALCS`] columns
    pub fn legend_table(mut self) -> Self {
        self.legend_display_mode = Some(LegendDisplayMode::Table);
        self.legend_calcs = Some(LEGEND_CALCS);
        self
    }

    /// Field-by-field merge: values set in `other` win.
    pub fn merge(self, other: PanelOptions) -> PanelOptions {
        let base = self;
        merge_fields!(
            base,
            other,
            title,
            grid_pos,
            span,
            datasource,
            unit,
            gradient_mode,
            fill_opacity,
            thresholds,
            threshold_mode,
            thresholds_style,
            overrides,
            transformations,
            mappings,
            links,
            legend_display_mode,
            legend_calcs,
            max,
        )
    }
}

impl PanelKind {
    pub fn defaults(&self) -> PanelOptions {
        let common = PanelOptions {
            datasource: Some(DATASOURCE),
            span: Some(2),
            unit: Some(Unit::None),
            thresholds: Some(THRESHOLDS_2_STEPS),
            threshold_mode: Some(ThresholdMode::Absolute),
            ..Default::default()
        };

        match self {
            PanelKind::TimeSeries => PanelOptions {
                grid_pos: Some(GridPos::new(8, 6, 0, 14)),
                unit: Some(Unit::Short),
                gradient_mode: Some(GradientMode::Opacity),
                fill_opacity: Some(0),
                thresholds_style: Some(ThresholdsStyle::Off),
                legend_display_mode: Some(LegendDisplayMode::List),
                legend_calcs: Some(&[]),
                ..common
            },
            PanelKind::Stat => PanelOptions {
                grid_pos: Some(GridPos::new(3, 6, 0, 1)),
                mappings: Some(HEALTH_MAPPINGS),
                ..common
            },
            PanelKind::Gauge => PanelOptions {
                grid_pos: Some(GridPos::new(6, 4, 6, 1)),
                thresholds: Some(THRESHOLDS_3_STEPS),
                threshold_mode: Some(ThresholdMode::Percentage),
                ..common
            },
            PanelKind::Table => PanelOptions {
                grid_pos: Some(GridPos::new(6, 10, 0, 42)),
                ..common
            },
        }
    }
}

/// One query of a panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTarget {
    pub expr: String,
    pub format: &'static str,
    pub hide: bool,
    pub instant: bool,
    pub interval_factor: u32,
    pub legend_format: String,
    pub ref_id: String,
}

impl QueryTarget {
    pub fn new(target: &Target, format: Format) -> Self {
        Self {
            expr: target.expr.to_string(),
            format: format.target_format(),
            hide: false,
            instant: format.instant(),
            interval_factor: 1,
            legend_format: target.legend_format.to_string(),
            ref_id: target.slug(),
        }
    }
}

/// A visualization: its kind, resolved options and queries. The id is
/// assigned when the dashboard is finalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    id: Option<u32>,
    kind: PanelKind,
    options: PanelOptions,
    targets: Vec<QueryTarget>,
}

impl Panel {
    pub fn new(kind: PanelKind, options: PanelOptions) -> Self {
        Self {
            id: None,
            kind,
            options: kind.defaults().merge(options),
            targets: Vec::new(),
        }
    }

    pub fn time_series(options: PanelOptions) -> Self {
        Self::new(PanelKind::TimeSeries, options)
    }

    pub fn stat(options: PanelOptions) -> Self {
        Self::new(PanelKind::Stat, options)
    }

    pub fn gauge(options: PanelOptions) -> Self {
        Self::new(PanelKind::Gauge, options)
    }

    pub fn table(options: PanelOptions) -> Self {
        Self::new(PanelKind::Table, options)
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub(super) fn set_id(&mut self, id: u32) {
        self.id = Some(id);
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        self.options.title.as_deref().unwrap_or_default()
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn targets(&self) -> &[QueryTarget] {
        &self.targets
    }

    /// Appends one query per target of the entry.
    pub fn add_targets(&mut self, entry: &MetricEntry) {
        self.targets.extend(
            entry
                .targets
                .iter()
                .map(|target| QueryTarget::new(target, entry.format)),
        );
    }

    fn to_json(&self) -> Value {
        let o = &self.options;
        let overrides = o.overrides.as_deref().unwrap_or_default();
        let mappings = o.mappings.unwrap_or_default();
        let thresholds = json!({
            "mode": o.threshold_mode,
            "steps": o.thresholds.unwrap_or_default(),
        });

        let (defaults, options) = match self.kind {
            PanelKind::TimeSeries => (
                json!({
                    "color": { "mode": "palette-classic" },
                    "custom": {
                        "axisLabel": "",
                        "axisPlacement": "auto",
                        "barAlignment": 0,
                        "drawStyle": "line",
                        "fillOpacity": o.fill_opacity,
                        "gradientMode": o.gradient_mode,
                        "hideFrom": { "legend": false, "tooltip": false, "viz": false },
                        "lineInterpolation": "linear",
                        "lineWidth": 1,
                        "pointSize": 5,
                        "scaleDistribution": { "type": "linear" },
                        "showPoints": "never",
                        "spanNulls": false,
                        "stacking": { "group": "A", "mode": "none" },
                        "thresholdsStyle": { "mode": o.thresholds_style },
                    },
                    "mappings": mappings,
                    "thresholds": thresholds,
                    "unit": o.unit,
                }),
                json!({
                    "legend": {
                        "calcs": o.legend_calcs.unwrap_or_default(),
                        "displayMode": o.legend_display_mode,
                        "placement": "bottom",
                    },
                    "tooltip": { "mode": "multi", "sort": "none" },
                }),
            ),
            PanelKind::Stat => (
                json!({
                    "color": { "mode": "thresholds" },
                    "custom": {},
                    "mappings": mappings,
                    "thresholds": thresholds,
                    "unit": o.unit,
                }),
                json!({
                    "colorMode": "background",
                    "graphMode": "none",
                    "justifyMode": "auto",
                    "orientation": "auto",
                    "reduceOptions": {
                        "calcs": ["lastNotNull"],
                        "fields": "/^Status$/",
                        "values": false,
                    },
                    "textMode": "auto",
                }),
            ),
            PanelKind::Gauge => (
                json!({
                    "color": { "mode": "thresholds" },
                    "mappings": mappings,
                    "max": o.max,
                    "min": 0,
                    "thresholds": thresholds,
                    "unit": o.unit,
                }),
                json!({
                    "orientation": "auto",
                    "reduceOptions": {
                        "calcs": ["mean"],
                        "fields": "",
                        "values": false,
                    },
                    "showThresholdLabels": false,
                    "showThresholdMarkers": true,
                }),
            ),
            PanelKind::Table => (
                json!({
                    "color": { "mode": "thresholds" },
                    "custom": {
                        "align": "auto",
                        "displayMode": "auto",
                        "filterable": true,
                    },
                    "mappings": mappings,
                    "thresholds": thresholds,
                    "unit": o.unit,
                }),
                json!({ "showHeader": true }),
            ),
        };

        json!({
            "datasource": o.datasource,
            "editable": true,
            "error": false,
            "fieldConfig": {
                "defaults": defaults,
                "overrides": overrides,
            },
            "gridPos": o.grid_pos,
            "id": self.id,
            "links": o.links.as_deref().unwrap_or_default(),
            "options": options,
            "span": o.span,
            "targets": self.targets,
            "title": self.title(),
            "transformations": o.transformations.as_deref().unwrap_or_default(),
            "transparent": false,
            "type": self.kind,
        })
    }
}

impl Serialize for Panel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
