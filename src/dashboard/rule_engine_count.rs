use super::builder::Dashboard;
use super::common::THRESHOLDS_2_STEPS;
use super::panel::{Panel, PanelOptions};
use super::subchart_dashboard;
use super::subcharts::{RULE_ENGINE_COUNT, RULE_ENGINE_EXECUTE_COUNT_KEY};
use super::templating;
use crate::config::Config;
use crate::error::Result;

/// The per-rule counters table across the full width, then one small time
/// series per counter.
pub fn dashboard(config: &Config) -> Result<Dashboard> {
    let mut d = subchart_dashboard(&RULE_ENGINE_COUNT, config, templating::rule_engine_list())?;

    for entry in RULE_ENGINE_COUNT.panels {
        let panel = if entry.key == RULE_ENGINE_EXECUTE_COUNT_KEY {
            Panel::table(PanelOptions::table_for(entry)?.span(12))
        } else {
            Panel::time_series(
                PanelOptions::for_entry(entry)
                    .span(3)
                    .thresholds(THRESHOLDS_2_STEPS),
            )
        };
        d.attach(panel, entry)?;
    }

    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::panel::PanelKind;

    #[test]
    fn test_dashboard() {
        let d = dashboard(&Config::default()).unwrap();
        assert_eq!(d.uid(), "rule-engine-count");

        let panels = d.rows()[0].panels();
        assert_eq!(panels.len(), 5);
        assert_eq!(panels[0].kind(), PanelKind::Table);
        assert_eq!(panels[0].options().span, Some(12));
        assert_eq!(panels[0].targets().len(), 8);
        assert!(panels[0].targets().iter().all(|t| t.format == "table"));

        assert_eq!(panels[4].title(), "Rule Engine Action Failure");
        assert_eq!(panels[4].kind(), PanelKind::TimeSeries);
        assert!(panels[4].targets()[0].expr.contains("emqx_rule_action_failed"));
    }
}
