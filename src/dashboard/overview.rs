use super::builder::Dashboard;
use super::common::{
    MetricEntry, RowEntry, ThresholdMode, Unit, THRESHOLDS_2_STEPS, THRESHOLDS_3_STEPS,
};
use super::metrics::*;
use super::overrides::color_overrides;
use super::panel::{GradientMode, Panel, PanelOptions, ThresholdsStyle};
use crate::config::{Config, Version};
use crate::error::Result;
use ringlog::*;

pub const UID: &str = "overview";
pub const TITLE: &str = "Overview";

/// Cluster wide overview. Enterprise adds the license and active connection
/// panels, v5 adds bridge queuing and the authentication rows.
pub fn dashboard(config: &Config) -> Result<Dashboard> {
    let is_ee = config.broker.edition.is_enterprise();
    let v5 = config.broker.version == Version::V5;

    let mut d = Dashboard::new(TITLE, UID, &config.dashboard);

    // General
    row(&mut d, &GENERAL_ROW, false)?;

    d.attach(Panel::stat(PanelOptions::for_entry(&CLUSTER_STATUS)), &CLUSTER_STATUS)?;

    if is_ee {
        d.attach(Panel::table(PanelOptions::table_for(&LICENSE)?), &LICENSE)?;
        d.attach(
            Panel::gauge(PanelOptions::for_entry(&ACTIVE_CONNECTIONS)),
            &ACTIVE_CONNECTIONS,
        )?;
    }

    d.attach(
        Panel::time_series(PanelOptions::for_entry(&CLUSTER_MESSAGE_RATE).thresholds(THRESHOLDS_2_STEPS)),
        &CLUSTER_MESSAGE_RATE,
    )?;

    d.attach(
        Panel::time_series(
            filled(&NODES_RUNNING)
                .thresholds(THRESHOLDS_2_STEPS)
                .overrides(color_overrides(NODES_RUNNING.targets)),
        ),
        &NODES_RUNNING,
    )?;

    d.attach(
        Panel::time_series(
            filled(&EXPORTER_LATENCY)
                .unit(Unit::Seconds)
                .thresholds(THRESHOLDS_2_STEPS),
        ),
        &EXPORTER_LATENCY,
    )?;

    d.attach(
        Panel::time_series(
            filled(&SESSIONS)
                .span(3)
                .thresholds_style(ThresholdsStyle::Area)
                .threshold_mode(ThresholdMode::Percentage)
                .thresholds(THRESHOLDS_3_STEPS),
        ),
        &SESSIONS,
    )?;

    for entry in [&CONNECTIONS, &SUBSCRIPTIONS] {
        d.attach(Panel::time_series(PanelOptions::for_entry(entry).span(3)), entry)?;
    }

    linked_time_series(&mut d, &RULE_ENGINE_LAST_5M_EXEC_RATE, 3)?;

    for entry in [&CONNECT_AUTH, &ACL_AUTH] {
        d.attach(
            Panel::time_series(PanelOptions::for_entry(entry).span(3).thresholds(THRESHOLDS_2_STEPS)),
            entry,
        )?;
    }

    if v5 {
        d.attach(
            Panel::time_series(PanelOptions::for_entry(&DATA_BRIDGE_QUEUING).span(3)),
            &DATA_BRIDGE_QUEUING,
        )?;
    }

    linked_time_series(&mut d, &RULE_ENGINE_CURRENT_EXEC_RATE, 3)?;

    for entry in [
        &RULE_ENGINE_EXEC_SUCCESS,
        &RULE_ENGINE_EXEC_FAILURE,
        &RULE_ENGINE_ACTION_SUCCESS,
        &RULE_ENGINE_ACTION_FAILURE,
    ] {
        let options = PanelOptions::for_entry(entry)
            .subchart_links(entry)?
            .span(3)
            .thresholds(THRESHOLDS_2_STEPS);
        d.attach(Panel::time_series(options), entry)?;
    }

    // Event
    row(&mut d, &EVENT_ROW, true)?;

    let acl_auth_events = if v5 {
        &CLIENT_ACL_AUTH_EVENTS_V5
    } else {
        &CLIENT_ACL_AUTH_EVENTS_V4
    };

    for entry in [
        &CLIENT_CONNECTION_EVENTS,
        &CLIENT_SUB_EVENTS,
        &CLIENT_CONNECT_AUTH_EVENTS,
        acl_auth_events,
    ] {
        let options = PanelOptions::for_entry(entry)
            .subchart_links(entry)?
            .span(3)
            .legend_table()
            .thresholds(THRESHOLDS_2_STEPS);
        d.attach(Panel::time_series(options), entry)?;
    }

    // Packets
    row(&mut d, &PACKETS_ROW, true)?;

    for entry in [
        &PACKETS_CONNECTIONS,
        &PACKETS_DISCONNECTIONS,
        &PACKETS_PUBLISH,
        &PACKETS_SUBSCRIBE_AND_UNSUBSCRIBE,
    ] {
        let options = PanelOptions::for_entry(entry)
            .span(3)
            .overrides(color_overrides(entry.targets))
            .legend_table()
            .thresholds(THRESHOLDS_2_STEPS);
        d.attach(Panel::time_series(options), entry)?;
    }

    // Messages
    row(&mut d, &MESSAGES_ROW, true)?;

    d.attach(
        Panel::time_series(
            PanelOptions::for_entry(&MESSAGES_COUNT)
                .subchart_links(&MESSAGES_COUNT)?
                .span(4)
                .overrides(color_overrides(MESSAGES_COUNT.targets))
                .legend_table(),
        ),
        &MESSAGES_COUNT,
    )?;

    d.attach(
        Panel::time_series(
            PanelOptions::for_entry(&MESSAGES_QOS_RECEIVED)
                .span(4)
                .overrides(color_overrides(MESSAGES_QOS_RECEIVED.targets))
                .thresholds(THRESHOLDS_2_STEPS),
        ),
        &MESSAGES_QOS_RECEIVED,
    )?;

    d.attach(
        Panel::time_series(
            PanelOptions::for_entry(&CLUSTER_TRAFFIC_STATISTICS)
                .span(4)
                .unit(Unit::DecBytes)
                .overrides(color_overrides(CLUSTER_TRAFFIC_STATISTICS.targets))
                .legend_table(),
        ),
        &CLUSTER_TRAFFIC_STATISTICS,
    )?;

    // Rule Engine
    row(&mut d, &RULE_ENGINE_ROW, true)?;

    d.attach(
        Panel::table(PanelOptions::table_for(&DATA_BRIDGE_STATUS)?.span(4)),
        &DATA_BRIDGE_STATUS,
    )?;
    d.attach(
        Panel::table(PanelOptions::table_for(&RULE_ENGINE_EXECUTE_COUNT)?.span(8)),
        &RULE_ENGINE_EXECUTE_COUNT,
    )?;

    if v5 {
        auth_row(
            &mut d,
            &CONNECT_AUTH_ROW,
            [
                &AUTHENTICATE_COUNT,
                &AUTHENTICATE_CURRENT_EXEC_RATE,
                &AUTHENTICATE_LAST_5M_EXEC_RATE,
            ],
        )?;
        auth_row(
            &mut d,
            &ACL_AUTH_ROW,
            [
                &AUTHORIZE_COUNT,
                &AUTHORIZE_CURRENT_EXEC_RATE,
                &AUTHORIZE_LAST_5M_EXEC_RATE,
            ],
        )?;
    }

    // System
    row(&mut d, &SYSTEM_ROW, true)?;

    for entry in [&LAST_1M_CPU_LOAD, &LAST_5M_CPU_LOAD, &LAST_15M_CPU_LOAD] {
        d.attach(
            Panel::time_series(PanelOptions::for_entry(entry).span(4).thresholds(THRESHOLDS_2_STEPS)),
            entry,
        )?;
    }

    Ok(d)
}

fn row(d: &mut Dashboard, row: &RowEntry, collapsed: bool) -> Result<()> {
    trace!("{}: opening {}", UID, row.key);
    d.add_row(row.title, collapsed)
}

/// Time series without gradient, filled at 15% opacity
fn filled(entry: &MetricEntry) -> PanelOptions {
    PanelOptions::for_entry(entry)
        .gradient_mode(GradientMode::None)
        .fill_opacity(15)
}

fn linked_time_series(d: &mut Dashboard, entry: &MetricEntry, span: u32) -> Result<()> {
    let options = PanelOptions::for_entry(entry).subchart_links(entry)?.span(span);
    d.attach(Panel::time_series(options), entry)
}

/// A counters table followed by its two rate panels, each linking to the
/// matching subchart panel.
fn auth_row(d: &mut Dashboard, row_entry: &RowEntry, entries: [&MetricEntry; 3]) -> Result<()> {
    row(d, row_entry, true)?;

    let [count, current, last_5m] = entries;
    d.attach(
        Panel::table(PanelOptions::table_for(count)?.subchart_links(count)?.span(4)),
        count,
    )?;
    linked_time_series(d, current, 4)?;
    linked_time_series(d, last_5m, 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Edition;
    use crate::dashboard::panel::PanelKind;

    fn build(edition: Edition, version: Version) -> Dashboard {
        let mut config = Config::default();
        config.broker.edition = edition;
        config.broker.version = version;
        dashboard(&config).unwrap()
    }

    fn titles(d: &Dashboard) -> Vec<&str> {
        d.rows()
            .iter()
            .flat_map(|row| row.panels())
            .map(|panel| panel.title())
            .collect()
    }

    fn row_titles(d: &Dashboard) -> Vec<&str> {
        d.rows().iter().map(|row| row.title()).collect()
    }

    #[test]
    fn test_enterprise_v5() {
        let d = build(Edition::Enterprise, Version::V5);
        assert_eq!(d.uid(), "overview");
        assert_eq!(
            row_titles(&d),
            vec![
                "General",
                "Event",
                "Packets",
                "Messages",
                "Rule Engine",
                "Connect Auth",
                "ACL Auth",
                "System"
            ]
        );

        let titles = titles(&d);
        assert_eq!(&titles[..3], &["Cluster Status", "License", "Active Connections"]);
        assert!(titles.contains(&"Data Bridge Queuing"));
        assert!(titles.contains(&"Authorize Count"));

        assert!(!d.rows()[0].collapsed());
        assert!(d.rows()[1..].iter().all(|row| row.collapsed()));
    }

    #[test]
    fn test_community_omits_license() {
        let d = build(Edition::Community, Version::V5);
        let titles = titles(&d);
        assert!(!titles.contains(&"License"));
        assert!(!titles.contains(&"Active Connections"));
        assert_eq!(titles[1], "Cluster Message Rate");
    }

    #[test]
    fn test_v4() {
        let d = build(Edition::Enterprise, Version::V4);
        assert!(!row_titles(&d).contains(&"Connect Auth"));
        assert!(!row_titles(&d).contains(&"ACL Auth"));
        assert!(!titles(&d).contains(&"Data Bridge Queuing"));

        let event = &d.rows()[1];
        let acl = &event.panels()[3];
        assert_eq!(acl.title(), "Client ACL Auth Events");
        assert!(acl.targets()[0].expr.contains("emqx_client_check_acl"));
        assert!(acl.options().links.as_ref().unwrap()[0]
            .url
            .starts_with("/d/client-events/"));
    }

    #[test]
    fn test_panel_options() {
        let d = build(Edition::Enterprise, Version::V5);
        let general = d.rows()[0].panels();

        let license = &general[1];
        assert_eq!(license.kind(), PanelKind::Table);
        assert!(license.targets().iter().all(|target| target.instant));
        assert_eq!(license.options().transformations.as_ref().unwrap().len(), 2);

        let sessions = general.iter().find(|p| p.title() == "Sessions").unwrap();
        assert_eq!(sessions.options().span, Some(3));
        assert_eq!(sessions.options().threshold_mode, Some(ThresholdMode::Percentage));
        assert_eq!(sessions.options().fill_opacity, Some(15));

        let latency = general.iter().find(|p| p.title() == "Exporter Latency").unwrap();
        assert_eq!(latency.options().unit, Some(Unit::Seconds));
        assert_eq!(latency.options().grid_pos, EXPORTER_LATENCY.grid_pos);

        let messages = &d.rows()[3].panels()[0];
        let links = messages.options().links.as_ref().unwrap();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].title, "Show Messages Received Rate Node Detail");
    }

    #[test]
    fn test_serializes() {
        for edition in [Edition::Enterprise, Edition::Community] {
            for version in [Version::V4, Version::V5] {
                let mut d = build(edition, version);
                d.assign_panel_ids().unwrap();
                assert!(d.serialize().unwrap().contains("\"uid\": \"overview\""));
            }
        }
    }
}
