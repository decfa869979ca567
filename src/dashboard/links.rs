use super::common::MetricEntry;
use super::subcharts;
use crate::error::{Error, Result};
use ringlog::*;
use serde::Serialize;

/// A panel data link as rendered by Grafana
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLink {
    pub target_blank: bool,
    pub title: String,
    pub url: String,
}

/// Where a subchart panel lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLink {
    pub uid: &'static str,
    pub title: &'static str,
    pub index: usize,
}

/// Finds `panel` in subchart `subchart`. The index is zero-based.
pub fn resolve_panel_link(subchart: &str, panel: &str) -> Result<PanelLink> {
    let unresolved = || Error::UnresolvedLink {
        subchart: subchart.to_string(),
        panel: panel.to_string(),
    };

    let chart = subcharts::get(subchart).ok_or_else(unresolved)?;
    let (index, entry) = chart.panel(panel).ok_or_else(unresolved)?;

    Ok(PanelLink {
        uid: chart.uid,
        title: entry.title,
        index,
    })
}

/// Relative url opening a single panel; `viewPanel` is one-based.
pub fn generate_link_url(uid: &str, title: &str, index: usize) -> String {
    format!(
        "/d/{uid}/{title}?orgId=1&refresh=10s&var-node=All&viewPanel={}",
        index + 1
    )
}

/// `subchart_rule_engine_exec_success` becomes `Rule Engine Exec Success`
fn pretty_panel_key(key: &str) -> String {
    key.replace("subchart_", "")
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Data links from an overview panel to each subchart panel it references.
pub fn data_links(entry: &MetricEntry) -> Result<Vec<DataLink>> {
    let Some(links) = entry.subchart_links else {
        return Ok(Vec::new());
    };

    links
        .panels
        .iter()
        .map(|panel| {
            let link = resolve_panel_link(links.subchart, panel)?;
            let url = generate_link_url(link.uid, link.title, link.index);
            trace!("{}: linking {} to {}", entry.key, panel, url);

            Ok(DataLink {
                target_blank: true,
                title: format!("Show {} Node Detail", pretty_panel_key(panel)),
                url,
            })
        })
        .collect()
}
