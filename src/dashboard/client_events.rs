use super::builder::Dashboard;
use super::common::THRESHOLDS_2_STEPS;
use super::panel::{Panel, PanelOptions};
use super::subchart_dashboard;
use super::subcharts::{version_stem, CLIENT_EVENTS};
use super::templating;
use crate::config::Config;
use crate::error::Result;

/// Per-node client event rates. Only the ACL panel of the configured broker
/// version is shown.
pub fn dashboard(config: &Config) -> Result<Dashboard> {
    let mut d = subchart_dashboard(&CLIENT_EVENTS, config, templating::nodes_list())?;
    let suffix = config.broker.version.key_suffix();

    let panels = CLIENT_EVENTS
        .panels
        .iter()
        .filter(|entry| version_stem(entry.key).is_none() || entry.key.ends_with(suffix));

    for entry in panels {
        let options = PanelOptions::for_entry(entry)
            .span(6)
            .legend_table()
            .thresholds(THRESHOLDS_2_STEPS);
        d.attach(Panel::time_series(options), entry)?;
    }

    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Version;
    use crate::dashboard::links::resolve_panel_link;

    fn build(version: Version) -> Dashboard {
        let mut config = Config::default();
        config.broker.version = version;
        dashboard(&config).unwrap()
    }

    #[test]
    fn test_acl_panel_by_version() {
        for (version, metric) in [
            (Version::V4, "emqx_client_check_acl"),
            (Version::V5, "emqx_client_authorize"),
        ] {
            let d = build(version);
            let panels = d.rows()[0].panels();
            assert_eq!(panels.len(), 7);

            let acl = panels.last().unwrap();
            assert_eq!(acl.title(), "Client ACL Auth Events");
            assert!(acl.targets()[0].expr.contains(metric));
            assert_eq!(acl.options().span, Some(6));
        }
    }

    #[test]
    fn test_links_match_layout() {
        for version in [Version::V4, Version::V5] {
            let d = build(version);
            let panels = d.rows()[0].panels();

            for entry in CLIENT_EVENTS.panels {
                let link = resolve_panel_link("client-events", entry.key).unwrap();
                if version_stem(entry.key).is_none() || entry.key.ends_with(version.key_suffix()) {
                    assert_eq!(panels[link.index].title(), entry.title, "{}", entry.key);
                }
            }
        }
    }
}
