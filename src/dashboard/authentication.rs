use super::builder::Dashboard;
use super::subcharts::AUTHENTICATION;
use crate::config::Config;
use crate::error::Result;

/// Per-node, per-resource authentication counters and rates
pub fn dashboard(config: &Config) -> Result<Dashboard> {
    super::auth_dashboard(&AUTHENTICATION, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::panel::PanelKind;

    #[test]
    fn test_dashboard() {
        let d = dashboard(&Config::default()).unwrap();
        assert_eq!(d.uid(), "authentication");
        assert_eq!(d.title(), "Connect Auth Subchart");

        let panels = d.rows()[0].panels();
        assert_eq!(panels.len(), 3);
        assert_eq!(panels[0].kind(), PanelKind::Table);
        assert_eq!(panels[0].options().span, Some(6));
        assert_eq!(panels[1].options().span, Some(4));
        assert_eq!(panels[0].targets()[0].ref_id, "max_rate");
    }
}
