pub mod builder;
pub mod common;
pub mod links;
pub mod metrics;
pub mod overrides;
pub mod panel;
pub mod subcharts;
pub mod templating;

pub mod authentication;
pub mod authorization;
pub mod client_events;
pub mod messages;
pub mod overview;
pub mod rule_engine_count;
pub mod rule_engine_rate;

use self::builder::Dashboard;
use self::common::Format;
use self::panel::{Panel, PanelOptions};
use self::subcharts::Subchart;
use self::templating::Template;
use crate::config::Config;
use crate::error::{Error, Result};
use ringlog::*;
use std::path::{Path, PathBuf};

/// Every dashboard that can be generated, overview first
pub const DASHBOARD_NAMES: &[&str] = &[
    "overview",
    "messages",
    "client-events",
    "authentication",
    "authorization",
    "rule-engine-rate",
    "rule-engine-count",
];

/// Build a dashboard by name, with panel ids assigned
pub fn get_dashboard(name: &str, config: &Config) -> Result<Dashboard> {
    let mut dashboard = match name {
        "overview" => overview::dashboard(config)?,
        "messages" => messages::dashboard(config)?,
        "client-events" => client_events::dashboard(config)?,
        "authentication" => authentication::dashboard(config)?,
        "authorization" => authorization::dashboard(config)?,
        "rule-engine-rate" => rule_engine_rate::dashboard(config)?,
        "rule-engine-count" => rule_engine_count::dashboard(config)?,
        _ => return Err(Error::UnknownDashboard(name.to_string())),
    };

    dashboard.assign_panel_ids()?;

    let panels: usize = dashboard.rows().iter().map(|row| row.panels().len()).sum();
    info!(
        "generated dashboard '{}' ({} rows, {} panels)",
        dashboard.uid(),
        dashboard.rows().len(),
        panels
    );

    Ok(dashboard)
}

/// Generate all dashboard definitions
pub fn generate_all_dashboards(config: &Config) -> Result<Vec<Dashboard>> {
    DASHBOARD_NAMES
        .iter()
        .map(|name| get_dashboard(name, config))
        .collect()
}

/// Writes every dashboard to `<dir>/<uid>.json`, creating `dir` if needed.
pub fn write_all(dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for dashboard in generate_all_dashboards(config)? {
        let path = dir.join(format!("{}.json", dashboard.uid()));
        std::fs::write(&path, dashboard.serialize()?)?;
        debug!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// A dashboard for `subchart` with one open row titled after it
fn subchart_dashboard(
    subchart: &Subchart,
    config: &Config,
    templating: Vec<Template>,
) -> Result<Dashboard> {
    let mut dashboard =
        Dashboard::new(subchart.title, subchart.uid, &config.dashboard).templating(templating);
    dashboard.add_row(subchart.title, false)?;
    Ok(dashboard)
}

/// Layout shared by the authentication and authorization subcharts: wide
/// counter tables, narrower rate panels.
fn auth_dashboard(subchart: &Subchart, config: &Config) -> Result<Dashboard> {
    let mut dashboard = subchart_dashboard(subchart, config, templating::auth_list())?;

    for entry in subchart.panels {
        let panel = match entry.format {
            Format::Table => Panel::table(PanelOptions::table_for(entry)?.span(6)),
            _ => Panel::time_series(PanelOptions::for_entry(entry).span(4)),
        };
        dashboard.attach(panel, entry)?;
    }

    Ok(dashboard)
}
