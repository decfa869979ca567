use super::builder::Dashboard;
use super::panel::{Panel, PanelOptions};
use super::subchart_dashboard;
use super::subcharts::RULE_ENGINE_RATE;
use super::templating;
use crate::config::Config;
use crate::error::Result;

pub fn dashboard(config: &Config) -> Result<Dashboard> {
    let mut d = subchart_dashboard(&RULE_ENGINE_RATE, config, templating::rule_engine_list())?;

    for entry in RULE_ENGINE_RATE.panels {
        d.attach(Panel::time_series(PanelOptions::for_entry(entry).span(6)), entry)?;
    }

    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard() {
        let mut d = dashboard(&Config::default()).unwrap();
        assert_eq!(d.uid(), "rule-engine-rate");

        let panels = d.rows()[0].panels();
        assert_eq!(panels.len(), 2);
        assert!(panels.iter().all(|p| p.options().span == Some(6)));

        d.assign_panel_ids().unwrap();
        let json: serde_json::Value = serde_json::from_str(&d.serialize().unwrap()).unwrap();
        assert_eq!(json["templating"]["list"][3]["name"], "rule");
    }
}
