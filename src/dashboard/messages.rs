use super::builder::Dashboard;
use super::overrides::color_overrides;
use super::panel::{Panel, PanelOptions};
use super::subchart_dashboard;
use super::subcharts::MESSAGES;
use super::templating;
use crate::config::Config;
use crate::error::Result;

/// Per-node message rates
pub fn dashboard(config: &Config) -> Result<Dashboard> {
    let mut d = subchart_dashboard(&MESSAGES, config, templating::nodes_list())?;

    for entry in MESSAGES.panels {
        let options = PanelOptions::for_entry(entry)
            .span(4)
            .overrides(color_overrides(entry.targets))
            .legend_table();
        d.attach(Panel::time_series(options), entry)?;
    }

    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::panel::LegendDisplayMode;

    #[test]
    fn test_dashboard() {
        let d = dashboard(&Config::default()).unwrap();
        assert_eq!(d.uid(), "messages");
        assert_eq!(d.rows().len(), 1);
        assert_eq!(d.rows()[0].title(), "Messages Subchart");
        assert!(!d.rows()[0].collapsed());

        let panels = d.rows()[0].panels();
        assert_eq!(panels.len(), 3);
        assert_eq!(panels[1].title(), "Messages Received Rate");
        assert_eq!(panels[1].options().span, Some(4));
        assert_eq!(
            panels[1].options().legend_display_mode,
            Some(LegendDisplayMode::Table)
        );
    }
}
