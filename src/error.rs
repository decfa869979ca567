use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while generating a dashboard. All of them are fatal: the
/// static tables need fixing, and nothing is written.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no grouping clause found in expression: {expr}")]
    NoGroupingClause { expr: String },

    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("can not find subchart link '{panel}' in subchart '{subchart}'")]
    UnresolvedLink { subchart: String, panel: String },

    #[error("unknown dashboard: {0}")]
    UnknownDashboard(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
