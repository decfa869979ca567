use serde::Serialize;

/// Variable through which every panel selects its Prometheus datasource
pub const DATASOURCE: &str = "${datasource}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Datasource,
    Query,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DatasourceRef {
    Variable(&'static str),
    Typed {
        #[serde(rename = "type")]
        kind: &'static str,
        uid: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TemplateQuery {
    Plain(&'static str),
    Standard {
        query: &'static str,
        #[serde(rename = "refId")]
        ref_id: &'static str,
    },
}

/// A dashboard template variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DatasourceRef>,
    pub hide: u8,
    pub include_all: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub multi: bool,
    pub name: &'static str,
    pub options: Vec<String>,
    pub query: TemplateQuery,
    pub refresh: u8,
    pub regex: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<u8>,
    #[serde(rename = "type")]
    pub kind: TemplateKind,
}

impl Template {
    fn datasource() -> Self {
        Self {
            datasource: None,
            hide: 0,
            include_all: false,
            label: Some("datasource"),
            multi: false,
            name: "datasource",
            options: Vec::new(),
            query: TemplateQuery::Plain("prometheus"),
            refresh: 1,
            regex: "",
            sort: None,
            kind: TemplateKind::Datasource,
        }
    }

    /// Multi-select variable fed by a Prometheus label query
    fn label_values(name: &'static str, query: &'static str, refresh: u8) -> Self {
        Self {
            datasource: Some(DatasourceRef::Typed {
                kind: "prometheus",
                uid: DATASOURCE,
            }),
            hide: 0,
            include_all: true,
            label: None,
            multi: true,
            name,
            options: Vec::new(),
            query: TemplateQuery::Standard {
                query,
                ref_id: "StandardVariableQuery",
            },
            refresh,
            regex: "",
            sort: Some(1),
            kind: TemplateKind::Query,
        }
    }

    fn cluster() -> Self {
        Self {
            include_all: false,
            multi: false,
            sort: Some(2),
            ..Self::label_values("cluster", "label_values(up, cluster)", 1)
        }
    }

    fn exporter_node() -> Self {
        Self::label_values(
            "node",
            r#"label_values({cluster="$cluster", from="exporter"}, node)"#,
            2,
        )
    }
}

/// Datasource and cluster selection, shared by every dashboard
pub fn default_list() -> Vec<Template> {
    vec![
        Template::datasource(),
        Template {
            datasource: Some(DatasourceRef::Variable(DATASOURCE)),
            query: TemplateQuery::Plain("label_values(up, cluster)"),
            sort: None,
            ..Template::cluster()
        },
    ]
}

/// Adds broker node selection
pub fn nodes_list() -> Vec<Template> {
    vec![
        Template::datasource(),
        Template::cluster(),
        Template::label_values(
            "node",
            r#"label_values(up{from="emqx",cluster="$cluster"}, instance)"#,
            1,
        ),
    ]
}

/// Adds exporter node and auth resource selection
pub fn auth_list() -> Vec<Template> {
    vec![
        Template::datasource(),
        Template::cluster(),
        Template::exporter_node(),
        Template::label_values(
            "resource",
            r#"label_values(emqx_authentication_resource_status{cluster="$cluster"}, resource)"#,
            1,
        ),
    ]
}

/// Adds exporter node and rule selection
pub fn rule_engine_list() -> Vec<Template> {
    vec![
        Template::datasource(),
        Template::cluster(),
        Template::exporter_node(),
        Template::label_values(
            "rule",
            r#"label_values({cluster="$cluster", node=~"$node", from="exporter"}, rule)"#,
            1,
        ),
    ]
}
