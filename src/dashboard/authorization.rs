use super::builder::Dashboard;
use super::subcharts::AUTHORIZATION;
use crate::config::Config;
use crate::error::Result;

/// Per-node, per-resource authorization counters and rates
pub fn dashboard(config: &Config) -> Result<Dashboard> {
    super::auth_dashboard(&AUTHORIZATION, config)
}
