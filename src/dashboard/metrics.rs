//! The overview metric table. Every panel of the overview dashboard is
//! described by one entry here; the layout lives in `overview`.

use super::common::Format::{Gauge, Stat, Table, Timeseries};
use super::common::*;

// Rows

pub const GENERAL_ROW: RowEntry = RowEntry {
    key: "general_row",
    title: "General",
};
pub const EVENT_ROW: RowEntry = RowEntry {
    key: "event_row",
    title: "Event",
};
pub const PACKETS_ROW: RowEntry = RowEntry {
    key: "packets_row",
    title: "Packets",
};
pub const MESSAGES_ROW: RowEntry = RowEntry {
    key: "messages_row",
    title: "Messages",
};
pub const RULE_ENGINE_ROW: RowEntry = RowEntry {
    key: "rule_engine_row",
    title: "Rule Engine",
};
pub const CONNECT_AUTH_ROW: RowEntry = RowEntry {
    key: "connect_auth_row",
    title: "Connect Auth",
};
pub const ACL_AUTH_ROW: RowEntry = RowEntry {
    key: "acl_auth_row",
    title: "ACL Auth",
};
pub const SYSTEM_ROW: RowEntry = RowEntry {
    key: "system_row",
    title: "System",
};

const LICENSE_DAYS: Thresholds = Thresholds {
    mode: ThresholdMode::Absolute,
    steps: &[
        ThresholdStep::base("red"),
        ThresholdStep::at("#EAB839", 30.0),
        ThresholdStep::at("green", 90.0),
    ],
};

const BRIDGE_STATUS: &[ValueMapping] = &[
    ValueMapping::Value(&[
        ("1", MappingResult::new("Disconnected", "red", 1)),
        ("2", MappingResult::new("Connected", "green", 0)),
    ]),
    ValueMapping::Null(MappingResult::new("N/A", "red", 2)),
];

const RESOURCE_STATUS: &[ValueMapping] = &[
    ValueMapping::Value(&[
        ("1", MappingResult::new("Disconnected", "red", 1)),
        ("2", MappingResult::new("Connected", "green", 0)),
    ]),
    ValueMapping::Null(MappingResult::new("Unknown", "red", 2)),
];

// General

pub const CLUSTER_STATUS: MetricEntry = MetricEntry::new(
    "cluster_status",
    "Cluster Status",
    Stat,
    &[Target::new("Status", r#"emqx_cluster_status{cluster="$cluster"}"#)],
);

pub const LICENSE: MetricEntry = MetricEntry::new(
    "license",
    "License",
    Table,
    &[
        Target::new(
            "Days Remaining",
            r#"sum(emqx_license_remaining_days{cluster="$cluster"})"#,
        )
        .thresholds(LICENSE_DAYS),
        Target::new(
            "Expiry At",
            r#"sum(emqx_license_expiration_time{cluster="$cluster"})"#,
        )
        .datetime(),
        Target::new(
            "Max Conns",
            r#"sum(emqx_license_max_client_limit{cluster="$cluster"})"#,
        ),
    ],
)
.grid_pos(GridPos::new(3, 6, 0, 4));

pub const ACTIVE_CONNECTIONS: MetricEntry = MetricEntry::new(
    "active_connections",
    "Active Connections",
    Gauge,
    &[Target::new(
        "Connections",
        r#"sum(emqx_connections_count{instance=~".*", cluster="$cluster"})"#,
    )],
);

pub const CLUSTER_MESSAGE_RATE: MetricEntry = MetricEntry::new(
    "cluster_message_rate",
    "Cluster Message Rate",
    Timeseries,
    &[
        Target::new(
            "Msg Input Period Second",
            r#"emqx_messages_input_period_second{cluster="$cluster"}"#,
        ),
        Target::new(
            "Msg Output Period Second",
            r#"emqx_messages_output_period_second{cluster="$cluster"}"#,
        ),
    ],
)
.grid_pos(GridPos::new(6, 5, 10, 1));

pub const NODES_RUNNING: MetricEntry = MetricEntry::new(
    "nodes_running",
    "Nodes Running",
    Timeseries,
    &[
        Target::new(
            "Running",
            r#"max(emqx_cluster_nodes_running{instance=~".*", cluster="$cluster"})"#,
        )
        .color("green"),
        Target::new(
            "Stopped",
            r#"max(emqx_cluster_nodes_stopped{instance=~".*", cluster="$cluster"})"#,
        )
        .color("dark-red"),
    ],
)
.grid_pos(GridPos::new(6, 5, 15, 1));

pub const EXPORTER_LATENCY: MetricEntry = MetricEntry::new(
    "exporter_latency",
    "Exporter Latency",
    Timeseries,
    &[Target::new(
        "Latency",
        r#"sum(emqx_scrape_collector_duration_seconds{cluster="$cluster"})"#,
    )],
)
.grid_pos(GridPos::new(6, 4, 20, 1));

pub const SESSIONS: MetricEntry = MetricEntry::new(
    "sessions",
    "Sessions",
    Timeseries,
    &[
        Target::new("Max", r#"sum(emqx_license_max_client_limit{cluster="$cluster"})"#),
        Target::new(
            "Count",
            r#"sum(emqx_sessions_count{instance=~".*", cluster="$cluster"})"#,
        ),
        Target::new(
            "{{ instance }}",
            r#"sum by(instance) (emqx_sessions_count{cluster="$cluster"})"#,
        ),
    ],
);

pub const CONNECTIONS: MetricEntry = MetricEntry::new(
    "connections",
    "Connections",
    Timeseries,
    &[
        Target::new(
            "Total",
            r#"sum(emqx_live_connections_count{instance=~".*", cluster="$cluster"})"#,
        ),
        Target::new(
            "{{ instance }}",
            r#"sum by(instance) (emqx_connections_count{cluster="$cluster"})"#,
        ),
    ],
);

pub const SUBSCRIPTIONS: MetricEntry = MetricEntry::new(
    "subscriptions",
    "Subscriptions",
    Timeseries,
    &[
        Target::new(
            "Subscriptions",
            r#"sum(emqx_suboptions_count{instance=~".*", cluster="$cluster"})"#,
        ),
        Target::new(
            "{{ instance }}",
            r#"sum by(instance) (emqx_suboptions_count{cluster="$cluster"})"#,
        ),
    ],
);

pub const RULE_ENGINE_LAST_5M_EXEC_RATE: MetricEntry = MetricEntry::new(
    "rule_engine_last_5m_exec_rate",
    "Rule Engine Last 5m Exec Rate",
    Timeseries,
    &[Target::new(
        "{{ rule }}",
        r#"sum by(rule) (emqx_rule_exec_last5m_rate{cluster="$cluster", node=~".*"})"#,
    )],
)
.links("rule-engine-rate", &["subchart_rule_engine_last_5m_exec_rate"]);

pub const CONNECT_AUTH: MetricEntry = MetricEntry::new(
    "connect_auth",
    "Connect Auth",
    Timeseries,
    &[
        Target::new(
            "Auth Success",
            r#"sum(irate(emqx_packets_connect{instance=~".*", cluster="$cluster"}[$__rate_interval])) - sum(irate(emqx_packets_connack_error {instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        ),
        Target::new(
            "Auth Failure",
            r#"sum(irate(emqx_packets_connack_auth_error{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        ),
    ],
);

pub const ACL_AUTH: MetricEntry = MetricEntry::new(
    "acl_auth",
    "ACL Auth",
    Timeseries,
    &[
        Target::new(
            "Publish ACL Failure",
            r#"sum(irate(emqx_packets_publish_auth_error{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        ),
        Target::new(
            "Sub ACL Failure",
            r#"sum(irate(emqx_packets_subscribe_auth_error{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        ),
    ],
);

pub const DATA_BRIDGE_QUEUING: MetricEntry = MetricEntry::new(
    "data_bridge_queuing",
    "Data Bridge Queuing",
    Timeseries,
    &[Target::new(
        "{{type}}-{{name}}",
        r#"sum by(type, name) (emqx_rule_bridge_queuing{cluster="$cluster"})"#,
    )],
);

pub const RULE_ENGINE_CURRENT_EXEC_RATE: MetricEntry = MetricEntry::new(
    "rule_engine_current_exec_rate",
    "Rule Engine Current Exec Rate",
    Timeseries,
    &[Target::new(
        "{{ rule }}",
        r#"sum by(rule) (emqx_rule_exec_rate{cluster="$cluster", node=~".*"})"#,
    )],
)
.links("rule-engine-rate", &["subchart_rule_engine_current_exec_rate"]);

pub const RULE_ENGINE_EXEC_SUCCESS: MetricEntry = MetricEntry::new(
    "rule_engine_exec_success",
    "Rule Engine Exec Success",
    Timeseries,
    &[Target::new(
        "{{rule}}",
        r#"sum by(rule) (irate(emqx_rule_exec_pass_count{cluster="$cluster", node=~".*"}[$__rate_interval]))"#,
    )],
)
.links("rule-engine-count", &["subchart_rule_engine_exec_success"]);

pub const RULE_ENGINE_EXEC_FAILURE: MetricEntry = MetricEntry::new(
    "rule_engine_exec_failure",
    "Rule Engine Exec Failure",
    Timeseries,
    &[Target::new(
        "{{rule}}",
        r#"sum by(rule) (irate(emqx_rule_exec_failure_count{cluster="$cluster", node=~".*"}[$__rate_interval]))"#,
    )],
)
.links("rule-engine-count", &["subchart_rule_engine_exec_failure"]);

pub const RULE_ENGINE_ACTION_SUCCESS: MetricEntry = MetricEntry::new(
    "rule_engine_action_success",
    "Rule Engine Action Success",
    Timeseries,
    &[Target::new(
        "{{rule}}",
        r#"sum by(rule) (irate(emqx_rule_action_success{cluster="$cluster", node=~".*"}[$__rate_interval]))"#,
    )],
)
.links("rule-engine-count", &["subchart_rule_engine_action_success"]);

pub const RULE_ENGINE_ACTION_FAILURE: MetricEntry = MetricEntry::new(
    "rule_engine_action_failure",
    "Rule Engine Action Failure",
    Timeseries,
    &[Target::new(
        "{{rule}}",
        r#"sum by(rule) (irate(emqx_rule_action_failed{cluster="$cluster", node=~".*"}[$__rate_interval]))"#,
    )],
)
.links("rule-engine-count", &["subchart_rule_engine_action_failure"]);

// Event

pub const CLIENT_CONNECTION_EVENTS: MetricEntry = MetricEntry::new(
    "client_connection_events",
    "Client Connection Events",
    Timeseries,
    &[
        Target::new(
            "Connections",
            r#"sum(irate(emqx_client_connected{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        ),
        Target::new(
            "Disconnections",
            r#"sum(irate(emqx_client_disconnected{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        ),
    ],
)
.links(
    "client-events",
    &[
        "subchart_client_connection_events",
        "subchart_client_disconnection_events",
    ],
);

pub const CLIENT_SUB_EVENTS: MetricEntry = MetricEntry::new(
    "client_sub_events",
    "Client Sub Events",
    Timeseries,
    &[
        Target::new(
            "Subscribes",
            r#"sum(irate(emqx_client_subscribe{cluster="$cluster", instance=~".*"}[$__rate_interval]))"#,
        ),
        Target::new(
            "Unsubscribes",
            r#"sum(irate(emqx_client_unsubscribe{cluster="$cluster", instance=~".*"}[$__rate_interval]))"#,
        ),
    ],
)
.links(
    "client-events",
    &["subchart_client_sub_events", "subchart_client_unsub_events"],
);

pub const CLIENT_CONNECT_AUTH_EVENTS: MetricEntry = MetricEntry::new(
    "client_connect_auth_events",
    "Client Connect Auth Events",
    Timeseries,
    &[
        Target::new(
            "Connect Auth",
            r#"sum(irate(emqx_client_authenticate{cluster="$cluster",instance=~".*"}[$__rate_interval]))"#,
        ),
        Target::new(
            "Anonymous Auth",
            r#"sum(irate(emqx_client_auth_anonymous{cluster="$cluster", instance=~".*"}[$__rate_interval]))"#,
        ),
    ],
)
.links(
    "client-events",
    &[
        "subchart_client_connect_auth_events",
        "subchart_anonymous_auth_events",
    ],
);

pub const CLIENT_ACL_AUTH_EVENTS_V4: MetricEntry = MetricEntry::new(
    "client_acl_auth_events_v4",
    "Client ACL Auth Events",
    Timeseries,
    &[Target::new(
        "ACL Auth",
        r#"sum(irate(emqx_client_check_acl{cluster="$cluster", instance=~".*"}[$__rate_interval]))"#,
    )],
)
.links("client-events", &["subchart_client_acl_auth_events_v4"]);

pub const CLIENT_ACL_AUTH_EVENTS_V5: MetricEntry = MetricEntry::new(
    "client_acl_auth_events_v5",
    "Client ACL Auth Events",
    Timeseries,
    &[Target::new(
        "ACL Auth",
        r#"sum(irate(emqx_client_authorize{cluster="$cluster", instance=~".*"}[$__rate_interval]))"#,
    )],
)
.links("client-events", &["subchart_client_acl_auth_events_v5"]);

// Packets

pub const PACKETS_CONNECTIONS: MetricEntry = MetricEntry::new(
    "packets_connections",
    "Packets Connections",
    Timeseries,
    &[
        Target::new(
            "Packets Connect",
            r#"sum(irate(emqx_packets_connect{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("green"),
        Target::new(
            "Packets Connack Sent",
            r#"sum(irate(emqx_packets_connack_sent{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("blue"),
        Target::new(
            "Packets Connack Error",
            r#"sum(irate(emqx_packets_connack_error{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("red"),
    ],
);

pub const PACKETS_DISCONNECTIONS: MetricEntry = MetricEntry::new(
    "packets_disconnections",
    "Packets Disconnections",
    Timeseries,
    &[
        Target::new(
            "Packets Disconnect Sent",
            r#"sum(irate(emqx_packets_disconnect_sent{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("semi-dark-red"),
        Target::new(
            "Packets Disconnect Received",
            r#"sum(irate(emqx_packets_disconnect_received{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("super-light-red"),
    ],
);

pub const PACKETS_PUBLISH: MetricEntry = MetricEntry::new(
    "packets_publish",
    "Packets Publish",
    Timeseries,
    &[
        Target::new(
            "Packets Publish Sent",
            r#"sum(irate(emqx_packets_publish_sent{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("blue"),
        Target::new(
            "Packets Publish Received",
            r#"sum(irate(emqx_packets_publish_received{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("dark-purple"),
        Target::new(
            "Packets Publish Dropped",
            r#"sum(irate(emqx_packets_publish_dropped{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("super-light-red"),
        Target::new(
            "Packets Publish Error",
            r#"sum(irate(emqx_packets_publish_error{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("dark-red"),
    ],
);

pub const PACKETS_SUBSCRIBE_AND_UNSUBSCRIBE: MetricEntry = MetricEntry::new(
    "packets_subscribe_and_unsubscribe",
    "Packets Subscribe/Unsubscribe",
    Timeseries,
    &[
        Target::new(
            "Packets Subscribe Received",
            r#"sum(irate(emqx_packets_subscribe_received{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("dark-purple"),
        Target::new(
            "Packets Suback Sent",
            r#"sum(irate(emqx_packets_suback_sent{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("blue"),
        Target::new(
            "Packets Subscribe Error",
            r#"sum(irate(emqx_packets_subscribe_error{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("dark-red"),
        Target::new(
            "Packets Unsubscribe Received",
            r#"sum(irate(emqx_packets_unsubscribe_received{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("orange"),
        Target::new(
            "Packets Unsubscribe Error",
            r#"sum(irate(emqx_packets_unsubscribe_error{instance=~".*", cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("super-light-red"),
    ],
);

// Messages

pub const MESSAGES_COUNT: MetricEntry = MetricEntry::new(
    "messages_count",
    "Messages Count",
    Timeseries,
    &[
        Target::new(
            "Messages Received",
            r#"sum(irate(emqx_messages_received{instance=~".*",cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("dark-purple"),
        Target::new(
            "Messages Sent",
            r#"sum(irate(emqx_messages_sent{instance=~".*",cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("blue"),
        Target::new(
            "Messages Dropped",
            r#"sum(irate(emqx_messages_dropped{instance=~".*",cluster="$cluster"}[$__rate_interval]))"#,
        )
        .color("super-light-red"),
    ],
)
.links(
    "messages",
    &[
        "subchart_messages_received_rate",
        "subchart_messages_sent_rate",
        "subchart_messages_dropped_rate",
    ],
);

pub const MESSAGES_QOS_RECEIVED: MetricEntry = MetricEntry::new(
    "messages_qos_received",
    "Messages QOS Received",
    Timeseries,
    &[
        Target::new(
            "QOS0",
            r#"sum(irate(emqx_messages_qos0_received{cluster="$cluster", instance=~".*"}[$__rate_interval]))"#,
        ),
        Target::new(
            "QOS1",
            r#"sum(irate(emqx_messages_qos1_received{cluster="$cluster", instance=~".*"}[$__rate_interval]))"#,
        ),
        Target::new(
            "QOS2",
            r#"sum(irate(emqx_messages_qos2_received{cluster="$cluster", instance=~".*"}[$__rate_interval]))"#,
        ),
    ],
);

pub const CLUSTER_TRAFFIC_STATISTICS: MetricEntry = MetricEntry::new(
    "cluster_traffic_statistics",
    "Cluster Traffic Statistics",
    Timeseries,
    &[
        Target::new(
            "Bytes received",
            r#"sum(irate(emqx_bytes_received{instance=~".*",cluster="$cluster"}[$__rate_interval]))"#,
        ),
        Target::new(
            "Bytes sent",
            r#"sum(irate(emqx_bytes_sent{instance=~".*",cluster="$cluster"}[$__rate_interval]))"#,
        ),
    ],
);

// Rule Engine

pub const DATA_BRIDGE_STATUS: MetricEntry = MetricEntry::new(
    "data_bridge_status",
    "Data Bridge Status",
    Table,
    &[
        Target::new(
            "Status",
            r#"sum by(type, name) (emqx_rule_bridge_status{cluster="$cluster"})"#,
        )
        .mappings(BRIDGE_STATUS),
        Target::new(
            "Queuing",
            r#"sum by(type, name) (emqx_rule_bridge_queuing{cluster="$cluster"})"#,
        )
        .thresholds(RED_AT_ONE),
    ],
);

pub const RULE_ENGINE_EXECUTE_COUNT: MetricEntry = MetricEntry::new(
    "rule_engine_execute_count",
    "Rule Engine Execute Count",
    Table,
    &[
        Target::new(
            "Topic Hit Cout",
            r#"sum by(rule) (emqx_rule_topic_hit_count{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Max Rate",
            r#"max by(rule) (emqx_rule_exec_max_rate{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Exec Pass",
            r#"sum by(rule) (emqx_rule_exec_pass_count{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Exec Failed last 15m",
            r#"sum by(rule) (irate(emqx_rule_exec_failure_count{cluster="$cluster", node=~".*"}[15m]))"#,
        )
        .thresholds(RED_AT_ONE),
        Target::new(
            "Exec No Result",
            r#"sum by(rule) (emqx_rule_exec_no_result_count{cluster="$cluster", node=~".*"})"#,
        )
        .thresholds(ORANGE_AT_ONE),
        Target::new(
            "Call Action Total",
            r#"sum by(rule) (emqx_rule_action_total{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Action Success",
            r#"sum by(rule) (emqx_rule_action_success{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Action Failed last 15m",
            r#"sum by(rule) (increase(emqx_rule_action_failed{cluster="$cluster", node=~".*"}[15m]))"#,
        )
        .thresholds(RED_AT_ONE),
    ],
);

// Connect Auth

pub const AUTHENTICATE_COUNT: MetricEntry = MetricEntry::new(
    "authenticate_count",
    "Authenticate Count",
    Table,
    &[
        Target::new(
            "Status",
            r#"sum by(resource) (emqx_authentication_resource_status{cluster="$cluster"})"#,
        )
        .mappings(RESOURCE_STATUS),
        Target::new(
            "Max Rate",
            r#"max by(resource) (emqx_authentication_exec_max_rate{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Total",
            r#"sum by(resource) (emqx_authentication_total{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Allow",
            r#"sum by(resource) (emqx_authentication_allow_count{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Deny last 15m",
            r#"sum by(resource) (irate(emqx_authentication_deny_count{cluster="$cluster", node=~".*"}[15m]))"#,
        )
        .thresholds(RED_AT_ONE),
    ],
)
.links("authentication", &["subchart_authenticate_count"]);

pub const AUTHENTICATE_CURRENT_EXEC_RATE: MetricEntry = MetricEntry::new(
    "authenticate_current_exec_rate",
    "Authenticate Current Exec Rate",
    Timeseries,
    &[Target::new(
        "{{resource}}",
        r#"sum by(resource) (emqx_authentication_exec_rate{cluster="$cluster", node=~".*"})"#,
    )],
)
.links("authentication", &["subchart_authenticate_current_exec_rate"]);

pub const AUTHENTICATE_LAST_5M_EXEC_RATE: MetricEntry = MetricEntry::new(
    "authenticate_last_5m_exec_rate",
    "Authenticate Last 5m Exec Rate",
    Timeseries,
    &[Target::new(
        "{{resource}}",
        r#"sum by(resource) (emqx_authentication_exec_last5m_rate{cluster="$cluster", node=~".*"})"#,
    )],
)
.links("authentication", &["subchart_authenticate_last_5m_exec_rate"]);

// ACL Auth

pub const AUTHORIZE_COUNT: MetricEntry = MetricEntry::new(
    "authorize_count",
    "Authorize Count",
    Table,
    &[
        Target::new(
            "Status",
            r#"sum by(resource) (emqx_authorization_resource_status{cluster="$cluster"})"#,
        )
        .mappings(RESOURCE_STATUS),
        Target::new(
            "Max Rate",
            r#"max by(resource) (emqx_authorization_exec_max_rate{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Total",
            r#"sum by(resource) (emqx_authorization_total{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Allow",
            r#"sum by(resource) (emqx_authorization_allow_count{cluster="$cluster", node=~".*"})"#,
        ),
        Target::new(
            "Deny last 15m",
            r#"sum by(resource) (irate(emqx_authorization_deny_count{cluster="$cluster", node=~".*"}[15m]))"#,
        )
        .thresholds(RED_AT_ONE),
    ],
)
.links("authorization", &["subchart_authorize_count"]);

pub const AUTHORIZE_CURRENT_EXEC_RATE: MetricEntry = MetricEntry::new(
    "authorize_current_exec_rate",
    "Authorize Current Exec Rate",
    Timeseries,
    &[Target::new(
        "{{resource}}",
        r#"sum by(resource) (emqx_authorization_exec_rate{cluster="$cluster", node=~".*"})"#,
    )],
)
.links("authorization", &["subchart_authorize_current_exec_rate"]);

pub const AUTHORIZE_LAST_5M_EXEC_RATE: MetricEntry = MetricEntry::new(
    "authorize_last_5m_exec_rate",
    "Authorize Last 5m Exec Rate",
    Timeseries,
    &[Target::new(
        "{{resource}}",
        r#"sum by(resource) (emqx_authorization_exec_last5m_rate{cluster="$cluster", node=~".*"})"#,
    )],
)
.links("authorization", &["subchart_authorize_last_5m_exec_rate"]);

// System

pub const LAST_1M_CPU_LOAD: MetricEntry = MetricEntry::new(
    "last_1m_cpu_load",
    "Last 1m CPU Load",
    Timeseries,
    &[Target::new(
        "{{node}}",
        r#"sum by(node) (emqx_cluster_cpu_load{cluster="$cluster", load="load1"})"#,
    )],
);

pub const LAST_5M_CPU_LOAD: MetricEntry = MetricEntry::new(
    "last_5m_cpu_load",
    "Last 5m CPU Load",
    Timeseries,
    &[Target::new(
        "{{node}}",
        r#"sum by(node) (emqx_cluster_cpu_load{cluster="$cluster", load="load5"})"#,
    )],
);

pub const LAST_15M_CPU_LOAD: MetricEntry = MetricEntry::new(
    "last_15m_cpu_load",
    "Last 15m CPU Load",
    Timeseries,
    &[Target::new(
        "{{node}}",
        r#"sum by(node) (emqx_cluster_cpu_load{cluster="$cluster", load="load15"})"#,
    )],
);

/// Every overview entry
pub const ALL: &[&MetricEntry] = &[
    &CLUSTER_STATUS,
    &LICENSE,
    &ACTIVE_CONNECTIONS,
    &CLUSTER_MESSAGE_RATE,
    &NODES_RUNNING,
    &EXPORTER_LATENCY,
    &SESSIONS,
    &CONNECTIONS,
    &SUBSCRIPTIONS,
    &RULE_ENGINE_LAST_5M_EXEC_RATE,
    &CONNECT_AUTH,
    &ACL_AUTH,
    &DATA_BRIDGE_QUEUING,
    &RULE_ENGINE_CURRENT_EXEC_RATE,
    &RULE_ENGINE_EXEC_SUCCESS,
    &RULE_ENGINE_EXEC_FAILURE,
    &RULE_ENGINE_ACTION_SUCCESS,
    &RULE_ENGINE_ACTION_FAILURE,
    &CLIENT_CONNECTION_EVENTS,
    &CLIENT_SUB_EVENTS,
    &CLIENT_CONNECT_AUTH_EVENTS,
    &CLIENT_ACL_AUTH_EVENTS_V4,
    &CLIENT_ACL_AUTH_EVENTS_V5,
    &PACKETS_CONNECTIONS,
    &PACKETS_DISCONNECTIONS,
    &PACKETS_PUBLISH,
    &PACKETS_SUBSCRIBE_AND_UNSUBSCRIBE,
    &MESSAGES_COUNT,
    &MESSAGES_QOS_RECEIVED,
    &CLUSTER_TRAFFIC_STATISTICS,
    &DATA_BRIDGE_STATUS,
    &RULE_ENGINE_EXECUTE_COUNT,
    &AUTHENTICATE_COUNT,
    &AUTHENTICATE_CURRENT_EXEC_RATE,
    &AUTHENTICATE_LAST_5M_EXEC_RATE,
    &AUTHORIZE_COUNT,
    &AUTHORIZE_CURRENT_EXEC_RATE,
    &AUTHORIZE_LAST_5M_EXEC_RATE,
    &LAST_1M_CPU_LOAD,
    &LAST_5M_CPU_LOAD,
    &LAST_15M_CPU_LOAD,
];
