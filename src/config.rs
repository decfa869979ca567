use crate::error::{Error, Result};
use clap::ArgMatches;
use serde::Deserialize;
use std::path::Path;

/// EMQX edition the dashboards target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    #[default]
    #[serde(alias = "ee")]
    Enterprise,
    #[serde(alias = "ce")]
    Community,
}

impl Edition {
    pub fn is_enterprise(&self) -> bool {
        matches!(self, Edition::Enterprise)
    }
}

impl std::str::FromStr for Edition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ee" | "enterprise" => Ok(Edition::Enterprise),
            "ce" | "community" => Ok(Edition::Community),
            other => Err(Error::Config(format!("unsupported edition: {other}"))),
        }
    }
}

/// Major EMQX version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum Version {
    V4,
    #[default]
    V5,
}

impl Version {
    /// Suffix of the metric keys that only apply to this version
    pub fn key_suffix(&self) -> &'static str {
        match self {
            Version::V4 => "_v4",
            Version::V5 => "_v5",
        }
    }
}

impl TryFrom<u8> for Version {
    type Error = Error;

    fn try_from(version: u8) -> Result<Self> {
        match version {
            4 => Ok(Version::V4),
            5 => Ok(Version::V5),
            other => Err(Error::Config(format!("unsupported version: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrokerConfig {
    #[serde(default)]
    pub edition: Edition,
    #[serde(default)]
    pub version: Version,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default = "refresh")]
    pub refresh: String,
    #[serde(default = "time_from")]
    pub time_from: String,
    #[serde(default = "time_to")]
    pub time_to: String,
    #[serde(default = "tags")]
    pub tags: Vec<String>,
    #[serde(default = "timezone")]
    pub timezone: String,
}

fn refresh() -> String {
    "5s".into()
}

fn time_from() -> String {
    "now-5m".into()
}

fn time_to() -> String {
    "now".into()
}

fn tags() -> Vec<String> {
    vec!["EMQX".into(), "MQTT".into()]
}

fn timezone() -> String {
    "utc".into()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh: refresh(),
            time_from: time_from(),
            time_to: time_to(),
            tags: tags(),
            timezone: timezone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(skip)]
    pub verbose: u8,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl TryFrom<ArgMatches> for Config {
    type Error = Error;

    fn try_from(args: ArgMatches) -> Result<Self> {
        let mut config = match args.get_one::<String>("CONFIG") {
            Some(path) => Config::load(Path::new(path))?,
            None => Config::default(),
        };

        if let Some(edition) = args.get_one::<String>("EDITION") {
            config.broker.edition = edition.parse()?;
        }

        if let Some(version) = args.get_one::<u8>("VERSION") {
            config.broker.version = Version::try_from(*version)?;
        }

        config.verbose = *args.get_one::<u8>("VERBOSE").unwrap_or(&0);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.broker.edition, Edition::Enterprise);
        assert_eq!(config.broker.version, Version::V5);
        assert_eq!(config.dashboard.refresh, "5s");
        assert_eq!(config.dashboard.time_from, "now-5m");
        assert_eq!(config.dashboard.tags, vec!["EMQX", "MQTT"]);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [broker]
            edition = "ce"
            version = 4

            [dashboard]
            refresh = "10s"
            "#,
        )
        .unwrap();

        assert_eq!(config.broker.edition, Edition::Community);
        assert_eq!(config.broker.version, Version::V4);
        assert_eq!(config.dashboard.refresh, "10s");
        assert_eq!(config.dashboard.time_to, "now");
    }

    #[test]
    fn test_unsupported_version() {
        assert!(toml::from_str::<Config>("[broker]\nversion = 3\n").is_err());
        assert!(matches!(Version::try_from(6), Err(Error::Config(_))));
        assert!(matches!("xe".parse::<Edition>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[broker]\nedition = \"community\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(!config.broker.edition.is_enterprise());
        assert_eq!(config.broker.version, Version::V5);

        let missing = file.path().with_extension("missing");
        assert!(matches!(Config::load(&missing), Err(Error::Io(_))));
    }

    #[test]
    fn test_example_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/dashboards.toml");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\nrefresh_rate = \"5s\"").unwrap();
        assert!(matches!(Config::load(file.path()), Err(Error::Toml(_))));
    }
}
