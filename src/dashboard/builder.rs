use super::common::MetricEntry;
use super::panel::Panel;
use super::templating::{self, Template};
use crate::config::DashboardConfig;
use crate::error::{Error, Result};
use ringlog::*;
use serde_json::{json, Value};

const REFRESH_INTERVALS: &[&str] = &["5s", "10s", "30s", "1m", "5m", "15m", "30m", "1h", "2h", "1d"];
const TIME_OPTIONS: &[&str] = &["5m", "15m", "1h", "6h", "12h", "24h", "2d", "7d", "30d"];

/// A titled group of panels. Rows only grow.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    title: String,
    collapsed: bool,
    panels: Vec<Panel>,
}

impl Row {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    fn to_json(&self) -> Value {
        json!({
            "collapse": self.collapsed,
            "editable": true,
            "height": "250px",
            "panels": self.panels,
            "repeat": null,
            "showTitle": true,
            "title": self.title,
        })
    }
}

/// A dashboard under construction. Rows and panels are appended in display
/// order, then `assign_panel_ids` freezes the layout so it can be
/// serialized.
#[derive(Debug, Clone)]
pub struct Dashboard {
    title: String,
    uid: String,
    config: DashboardConfig,
    templating: Vec<Template>,
    rows: Vec<Row>,
    finalized: bool,
}

impl Dashboard {
    pub fn new(title: impl Into<String>, uid: impl Into<String>, config: &DashboardConfig) -> Self {
        Self {
            title: title.into(),
            uid: uid.into(),
            config: config.clone(),
            templating: templating::default_list(),
            rows: Vec::new(),
            finalized: false,
        }
    }

    /// Replaces the default datasource and cluster variables.
    pub fn templating(mut self, templating: Vec<Template>) -> Self {
        self.templating = templating;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finalized {
            return Err(Error::InvalidState("dashboard panel ids are already assigned"));
        }
        Ok(())
    }

    /// Opens a new row; subsequent panels land in it.
    pub fn add_row(&mut self, title: impl Into<String>, collapsed: bool) -> Result<()> {
        self.ensure_open()?;

        let title = title.into();
        debug!("{}: row '{}' (collapsed: {})", self.uid, title, collapsed);

        self.rows.push(Row {
            title,
            collapsed,
            panels: Vec::new(),
        });
        Ok(())
    }

    /// Appends a panel to the most recently added row.
    pub fn add_panel(&mut self, panel: Panel) -> Result<()> {
        self.ensure_open()?;

        let uid = &self.uid;
        let row = self
            .rows
            .last_mut()
            .ok_or(Error::InvalidState("panel added before any row"))?;

        debug!("{}: panel '{}' in row '{}'", uid, panel.title(), row.title);
        row.panels.push(panel);
        Ok(())
    }

    /// Gives the panel one query per target of `entry` and appends it.
    pub fn attach(&mut self, mut panel: Panel, entry: &MetricEntry) -> Result<()> {
        panel.add_targets(entry);
        self.add_panel(panel)
    }

    /// Numbers panels 1..n across rows in display order.
    pub fn assign_panel_ids(&mut self) -> Result<()> {
        self.ensure_open()?;

        let panels = self.rows.iter_mut().flat_map(|row| row.panels.iter_mut());
        for (id, panel) in (1..).zip(panels) {
            panel.set_id(id);
        }

        self.finalized = true;
        Ok(())
    }

    fn to_json(&self) -> Value {
        let rows: Vec<Value> = self.rows.iter().map(Row::to_json).collect();

        json!({
            "__inputs": [],
            "annotations": { "list": [] },
            "editable": true,
            "gnetId": null,
            "graphTooltip": 0,
            "hideControls": false,
            "id": null,
            "links": [],
            "panels": [],
            "refresh": self.config.refresh,
            "rows": rows,
            "schemaVersion": 12,
            "sharedCrosshair": false,
            "style": "dark",
            "tags": self.config.tags,
            "templating": { "list": self.templating },
            "time": {
                "from": self.config.time_from,
                "to": self.config.time_to,
            },
            "timepicker": {
                "hidden": false,
                "refresh_intervals": REFRESH_INTERVALS,
                "time_options": TIME_OPTIONS,
            },
            "timezone": self.config.timezone,
            "title": self.title,
            "uid": self.uid,
            "version": 0,
        })
    }

    /// Pretty printed dashboard JSON with sorted keys.
    pub fn serialize(&self) -> Result<String> {
        if !self.finalized {
            return Err(Error::InvalidState("panel ids must be assigned before serializing"));
        }

        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::common::{Format, Target};
    use crate::dashboard::panel::PanelOptions;

    const ENTRY: MetricEntry = MetricEntry::new(
        "connections",
        "Connections",
        Format::Timeseries,
        &[
            Target::new("Total", "sum(emqx_live_connections_count)"),
            Target::new("{{ instance }}", "sum by(instance) (emqx_connections_count)"),
        ],
    );

    fn panel(title: &str) -> Panel {
        Panel::time_series(PanelOptions::new(title))
    }

    fn dashboard() -> Dashboard {
        Dashboard::new("Overview", "overview", &DashboardConfig::default())
    }

    fn ids(dashboard: &Dashboard) -> Vec<Option<u32>> {
        dashboard
            .rows()
            .iter()
            .flat_map(|row| row.panels())
            .map(Panel::id)
            .collect()
    }

    #[test]
    fn test_assign_panel_ids() {
        let mut dashboard = dashboard();
        for (row, count) in [2, 0, 3].into_iter().enumerate() {
            dashboard.add_row(format!("row {row}"), false).unwrap();
            for i in 0..count {
                dashboard.add_panel(panel(&format!("panel {i}"))).unwrap();
            }
        }

        assert_eq!(ids(&dashboard), vec![None; 5]);
        dashboard.assign_panel_ids().unwrap();
        assert_eq!(
            ids(&dashboard),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
        assert!(dashboard.rows()[1].panels().is_empty());
    }

    #[test]
    fn test_add_panel_before_row() {
        let mut dashboard = dashboard();
        assert!(matches!(
            dashboard.add_panel(panel("orphan")),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(
            dashboard.attach(panel("orphan"), &ENTRY),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_panels_go_to_last_row() {
        let mut dashboard = dashboard();
        dashboard.add_row("General", false).unwrap();
        dashboard.add_panel(panel("a")).unwrap();
        dashboard.add_row("Event", true).unwrap();
        dashboard.add_panel(panel("b")).unwrap();

        let rows = dashboard.rows();
        assert_eq!(rows[0].panels()[0].title(), "a");
        assert_eq!(rows[1].panels()[0].title(), "b");
        assert!(rows[1].collapsed());
    }

    #[test]
    fn test_attach() {
        let mut dashboard = dashboard();
        dashboard.add_row("General", false).unwrap();
        dashboard.attach(panel("Connections"), &ENTRY).unwrap();

        let targets = dashboard.rows()[0].panels()[0].targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].ref_id, "total");
        assert_eq!(targets[1].ref_id, "{{_instance_}}");
        assert_eq!(targets[1].legend_format, "{{ instance }}");
        assert_eq!(targets[1].interval_factor, 1);
    }

    #[test]
    fn test_state_errors() {
        let mut dashboard = dashboard();
        dashboard.add_row("General", false).unwrap();
        assert!(matches!(dashboard.serialize(), Err(Error::InvalidState(_))));

        dashboard.assign_panel_ids().unwrap();
        assert!(matches!(dashboard.assign_panel_ids(), Err(Error::InvalidState(_))));
        assert!(matches!(dashboard.add_row("late", false), Err(Error::InvalidState(_))));
        assert!(matches!(dashboard.add_panel(panel("late")), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_serialize() {
        let mut dashboard = dashboard().templating(templating::nodes_list());
        dashboard.add_row("General", false).unwrap();
        dashboard.attach(panel("Connections"), &ENTRY).unwrap();
        dashboard.assign_panel_ids().unwrap();

        let first = dashboard.serialize().unwrap();
        let second = dashboard.serialize().unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("{\n  \"__inputs\": []"));

        let json: Value = serde_json::from_str(&first).unwrap();
        assert_eq!(json["uid"], "overview");
        assert_eq!(json["title"], "Overview");
        assert_eq!(json["schemaVersion"], 12);
        assert_eq!(json["refresh"], "5s");
        assert_eq!(json["time"]["from"], "now-5m");
        assert_eq!(json["tags"][0], "EMQX");
        assert_eq!(json["templating"]["list"][2]["name"], "node");
        assert_eq!(json["rows"][0]["title"], "General");
        assert_eq!(json["rows"][0]["collapse"], false);
        assert_eq!(json["rows"][0]["panels"][0]["id"], 1);
        assert!(json["panels"].as_array().unwrap().is_empty());
    }
}
