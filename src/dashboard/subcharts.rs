//! Registry of the per-metric-family subchart dashboards that overview
//! panels link into. Panel order is significant: Grafana addresses a panel
//! by its position.

use super::common::Format::{Table, Timeseries};
use super::common::*;

pub struct Subchart {
    pub key: &'static str,
    pub uid: &'static str,
    pub title: &'static str,
    pub panels: &'static [MetricEntry],
}

impl Subchart {
    /// Position and entry of the panel stored under `key`. Panels that only
    /// one broker version shows share a slot with their other variants.
    pub fn panel(&self, key: &str) -> Option<(usize, &'static MetricEntry)> {
        let panels = self.panels;
        let found = panels.iter().position(|panel| panel.key == key)?;
        let stem = version_stem(key);

        let index = panels[..found]
            .iter()
            .filter(|panel| stem.is_none() || version_stem(panel.key) != stem)
            .count();

        Some((index, &panels[found]))
    }
}

const VERSION_SUFFIXES: &[&str] = &["_v4", "_v5"];

/// Key without its broker version suffix, for panels that exist once per
/// version
pub fn version_stem(key: &str) -> Option<&str> {
    VERSION_SUFFIXES
        .iter()
        .find_map(|suffix| key.strip_suffix(suffix))
}

pub const SUBCHARTS: &[&Subchart] = &[
    &MESSAGES,
    &AUTHENTICATION,
    &AUTHORIZATION,
    &CLIENT_EVENTS,
    &RULE_ENGINE_RATE,
    &RULE_ENGINE_COUNT,
];

pub fn get(key: &str) -> Option<&'static Subchart> {
    SUBCHARTS.iter().copied().find(|subchart| subchart.key == key)
}

pub const MESSAGES: Subchart = Subchart {
    key: "messages",
    uid: "messages",
    title: "Messages Subchart",
    panels: &[
        MetricEntry::new(
            "subchart_messages_sent_rate",
            "Messages Sent Rate",
            Timeseries,
            &[Target::new(
                "{{ instance }}",
                r#"sum by(instance) (irate(emqx_messages_sent{cluster="$cluster", instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_messages_received_rate",
            "Messages Received Rate",
            Timeseries,
            &[Target::new(
                "{{ instance }}",
                r#"sum by(instance) (irate(emqx_messages_received{cluster="$cluster", instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_messages_dropped_rate",
            "Messages Dropped Rate",
            Timeseries,
            &[Target::new(
                "{{ instance }}",
                r#"sum by(instance) (irate(emqx_messages_dropped{cluster="$cluster", instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
    ],
};

pub const AUTHENTICATION: Subchart = Subchart {
    key: "authentication",
    uid: "authentication",
    title: "Connect Auth Subchart",
    panels: &[
        MetricEntry::new(
            "subchart_authenticate_count",
            "Authenticate Count",
            Table,
            &[
                Target::new(
                    "Max Rate",
                    r#"max by(node, resource) (emqx_authentication_exec_max_rate{cluster="$cluster", node=~"$node", resource=~"$resource"})"#,
                ),
                Target::new(
                    "Total",
                    r#"sum by(node, resource) (emqx_authentication_total{cluster="$cluster", node=~"$node", resource=~"$resource"})"#,
                ),
                Target::new(
                    "Allow",
                    r#"sum by(node, resource) (emqx_authentication_allow_count{cluster="$cluster", node=~"$node", resource=~"$resource"})"#,
                ),
                Target::new(
                    "Deny last 15m",
                    r#"sum by(node, resource) (irate(emqx_authentication_deny_count{cluster="$cluster", node=~"$node", resource=~"$resource"}[15m]))"#,
                )
                .thresholds(RED_AT_ONE),
            ],
        ),
        MetricEntry::new(
            "subchart_authenticate_current_exec_rate",
            "Authenticate Current Exec Rate",
            Timeseries,
            &[Target::new(
                "{{node}} {{resource}}",
                r#"sum by(node, resource) (emqx_authentication_exec_rate{cluster="$cluster", node=~"$node", resource=~"$resource"})"#,
            )],
        ),
        MetricEntry::new(
            "subchart_authenticate_last_5m_exec_rate",
            "Authenticate Last 5m Exec Rate",
            Timeseries,
            &[Target::new(
                "{{node}} {{resource}}",
                r#"sum by(node, resource) (emqx_authentication_exec_last5m_rate{cluster="$cluster", node=~"$node", resource=~"$resource"})"#,
            )],
        ),
    ],
};

pub const AUTHORIZATION: Subchart = Subchart {
    key: "authorization",
    uid: "authorization",
    title: "ACL Auth Subchart",
    panels: &[
        MetricEntry::new(
            "subchart_authorize_count",
            "Authorize Count",
            Table,
            &[
                Target::new(
                    "Max Rate",
                    r#"max by(node, resource) (emqx_authorization_exec_max_rate{cluster="$cluster", node=~"$node", resource=~"$resource"})"#,
                ),
                Target::new(
                    "Total",
                    r#"sum by(node, resource) (emqx_authorization_total{cluster="$cluster", node=~"$node", resource=~"$resource"})"#,
                ),
                Target::new(
                    "Allow",
                    r#"sum by(node, resource) (emqx_authorization_allow_count{cluster="$cluster", node=~"$node", resource=~"$resource"})"#,
                ),
                Target::new(
                    "Deny last 15m",
                    r#"sum by(node, resource) (irate(emqx_authorization_deny_count{cluster="$cluster", node=~"$node", resource=~"$resource"}[15m]))"#,
                )
                .thresholds(RED_AT_ONE),
            ],
        ),
        MetricEntry::new(
            "subchart_authorize_current_exec_rate",
            "Authorize Current Exec Rate",
            Timeseries,
            &[Target::new(
                "{{node}} {{resource}}",
                r#"sum by(node, resource) (emqx_authorization_exec_rate{cluster="$cluster", node=~"$node", resource=~"$resource"})"#,
            )],
        ),
        MetricEntry::new(
            "subchart_authorize_last_5m_exec_rate",
            "Authorize Last 5m Exec Rate",
            Timeseries,
            &[Target::new(
                "{{node}} {{resource}}",
                r#"sum by(node, resource) (emqx_authorization_exec_last5m_rate{cluster="$cluster", node=~"$node", resource=~"$resource"})"#,
            )],
        ),
    ],
};

pub const CLIENT_EVENTS: Subchart = Subchart {
    key: "client-events",
    uid: "client-events",
    title: "Client Events Subchart",
    panels: &[
        MetricEntry::new(
            "subchart_client_connection_events",
            "Client Connection Events",
            Timeseries,
            &[Target::new(
                "{{ instance }} Connection",
                r#"sum by(instance) (irate(emqx_client_connected{cluster="$cluster",instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_client_disconnection_events",
            "Client Disconnection Events",
            Timeseries,
            &[Target::new(
                "{{ instance }} Disconnection",
                r#"sum by(instance) (irate(emqx_client_disconnected{cluster="$cluster", instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_client_sub_events",
            "Client Sub Events",
            Timeseries,
            &[Target::new(
                "{{ instance }} Subscribe",
                r#"sum by(instance) (irate(emqx_client_subscribe{cluster="$cluster", instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_client_unsub_events",
            "Client Unsub Events",
            Timeseries,
            &[Target::new(
                "{{ instance }} Unsubscribe",
                r#"sum by(instance) (irate(emqx_client_unsubscribe{cluster="$cluster", instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_client_connect_auth_events",
            "Client Connect Auth Events",
            Timeseries,
            &[Target::new(
                "{{ instance }} Connection Auth",
                r#"sum by(instance) (irate(emqx_client_authenticate{cluster="$cluster", instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_anonymous_auth_events",
            "Client Anonymous Auth Events",
            Timeseries,
            &[Target::new(
                "{{ instance }} Anonymous Auth",
                r#"sum by(instance) (irate(emqx_client_auth_anonymous{cluster="$cluster", instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_client_acl_auth_events_v4",
            "Client ACL Auth Events",
            Timeseries,
            &[Target::new(
                "{{ instance }} ACL Auth",
                r#"sum by(instance) (irate(emqx_client_check_acl{cluster="$cluster", instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_client_acl_auth_events_v5",
            "Client ACL Auth Events",
            Timeseries,
            &[Target::new(
                "{{ instance }} ACL Auth",
                r#"sum by(instance) (irate(emqx_client_authorize{cluster="$cluster", instance=~"$node"}[$__rate_interval]))"#,
            )],
        ),
    ],
};

pub const RULE_ENGINE_RATE: Subchart = Subchart {
    key: "rule-engine-rate",
    uid: "rule-engine-rate",
    title: "Rule Engine Rate Subchart",
    panels: &[
        MetricEntry::new(
            "subchart_rule_engine_current_exec_rate",
            "Rule Engine Current Exec Rate",
            Timeseries,
            &[Target::new(
                "{{ node }} {{ rule }}",
                r#"sum by(node, rule) (emqx_rule_exec_rate{cluster="$cluster", node=~"$node", rule=~"$rule"})"#,
            )],
        ),
        MetricEntry::new(
            "subchart_rule_engine_last_5m_exec_rate",
            "Rule Engine Last 5m Exec Rate",
            Timeseries,
            &[Target::new(
                "{{ node }}:{{ rule }}",
                r#"sum by(node, rule) (emqx_rule_exec_last5m_rate{cluster="$cluster", node=~"$node", rule=~"$rule"})"#,
            )],
        ),
    ],
};

/// Panel holding the per-rule counters table in [`RULE_ENGINE_COUNT`]
pub const RULE_ENGINE_EXECUTE_COUNT_KEY: &str = "subchart_rule_engine_execute_count";

pub const RULE_ENGINE_COUNT: Subchart = Subchart {
    key: "rule-engine-count",
    uid: "rule-engine-count",
    title: "Rule Engine Count Subchart",
    panels: &[
        MetricEntry::new(
            RULE_ENGINE_EXECUTE_COUNT_KEY,
            "Rule Engine Execute Count",
            Table,
            &[
                Target::new(
                    "Topic Hit Cout",
                    r#"sum by(node, rule) (emqx_rule_topic_hit_count{cluster="$cluster", node=~"$node", rule=~"$rule"})"#,
                ),
                Target::new(
                    "Max Rate",
                    r#"max by(node, rule) (emqx_rule_exec_max_rate{cluster="$cluster", node=~"$node", rule=~"$rule"})"#,
                ),
                Target::new(
                    "Exec Pass",
                    r#"sum by(node, rule) (emqx_rule_exec_pass_count{cluster="$cluster", node=~"$node", rule=~"$rule"})"#,
                ),
                Target::new(
                    "Exec Exception last 15m",
                    r#"sum by(node, rule) (irate(emqx_rule_exec_exception_count{cluster="$cluster", node=~"$node", rule=~"$rule"}[15m]))"#,
                )
                .thresholds(RED_AT_ONE),
                Target::new(
                    "Exec No Result 15m",
                    r#"sum by(node, rule) (emqx_rule_exec_no_result_count{cluster="$cluster", node=~"$node", rule=~"$rule"})"#,
                )
                .thresholds(ORANGE_AT_ONE),
                Target::new(
                    "Call Action Total",
                    r#"sum by(node, rule) (emqx_rule_action_total{cluster="$cluster", node=~"$node", rule=~"$rule"})"#,
                ),
                Target::new(
                    "Action Success",
                    r#"sum by(node, rule) (emqx_rule_action_success{cluster="$cluster", node=~"$node", rule=~"$rule"})"#,
                ),
                Target::new(
                    "Action Failed last 15m",
                    r#"sum by(node, rule) (increase(emqx_rule_action_failed{cluster="$cluster", node=~"$node", rule=~"$rule"}[15m]))"#,
                )
                .thresholds(RED_AT_ONE),
            ],
        ),
        MetricEntry::new(
            "subchart_rule_engine_exec_success",
            "Rule Engine Exec Success",
            Timeseries,
            &[Target::new(
                "{{ node }}:{{ rule }}",
                r#"sum by(rule) (irate(emqx_rule_exec_pass_count{cluster="$cluster", node=~"$node", rule=~"$rule"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_rule_engine_exec_failure",
            "Rule Engine Exec Exception",
            Timeseries,
            &[Target::new(
                "{{ node }}:{{ rule }}",
                r#"sum by(rule) (irate(emqx_rule_exec_exception_count{cluster="$cluster", node=~"$node", rule=~"$rule"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_rule_engine_action_success",
            "Rule Engine Action Success",
            Timeseries,
            &[Target::new(
                "{{ node }}:{{ rule }}",
                r#"sum by(rule) (irate(emqx_rule_action_success{cluster="$cluster", node=~"$node", rule=~"$rule"}[$__rate_interval]))"#,
            )],
        ),
        MetricEntry::new(
            "subchart_rule_engine_action_failure",
            "Rule Engine Action Failure",
            Timeseries,
            &[Target::new(
                "{{ node }}:{{ rule }}",
                r#"sum by(rule) (irate(emqx_rule_action_failed{cluster="$cluster", node=~"$node", rule=~"$rule"}[$__rate_interval]))"#,
            )],
        ),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::overrides::extract_grouping_fields;
    use std::collections::HashSet;

    #[test]
    fn test_subchart_lookup() {
        let subchart = get("rule-engine-rate").unwrap();
        assert_eq!(subchart.uid, "rule-engine-rate");

        let (index, panel) = subchart
            .panel("subchart_rule_engine_last_5m_exec_rate")
            .unwrap();
        assert_eq!(index, 1);
        assert_eq!(panel.title, "Rule Engine Last 5m Exec Rate");

        assert!(subchart.panel("subchart_missing").is_none());
        assert!(get("missing").is_none());
    }

    #[test]
    fn test_version_variants_share_a_slot() {
        assert_eq!(
            version_stem("subchart_client_acl_auth_events_v4"),
            Some("subchart_client_acl_auth_events")
        );
        assert_eq!(version_stem("subchart_client_sub_events"), None);

        let (anonymous, _) = CLIENT_EVENTS.panel("subchart_anonymous_auth_events").unwrap();
        let (v4, _) = CLIENT_EVENTS.panel("subchart_client_acl_auth_events_v4").unwrap();
        let (v5, entry) = CLIENT_EVENTS.panel("subchart_client_acl_auth_events_v5").unwrap();
        assert_eq!(anonymous, 5);
        assert_eq!(v4, 6);
        assert_eq!(v5, 6);
        assert!(entry.targets[0].expr.contains("emqx_client_authorize"));
    }

    #[test]
    fn test_unique_keys() {
        let subcharts: HashSet<_> = SUBCHARTS.iter().map(|s| s.key).collect();
        assert_eq!(subcharts.len(), SUBCHARTS.len());

        for subchart in SUBCHARTS {
            let panels: HashSet<_> = subchart.panels.iter().map(|p| p.key).collect();
            assert_eq!(panels.len(), subchart.panels.len(), "{}", subchart.key);
        }
    }

    #[test]
    fn test_table_panels_have_grouping_clause() {
        for subchart in SUBCHARTS {
            for panel in subchart.panels.iter().filter(|p| p.format == Table) {
                assert!(
                    extract_grouping_fields(panel.targets[0].expr).is_ok(),
                    "{}",
                    panel.key
                );
            }
        }
    }
}
