use clap::{value_parser, Arg, ArgAction, Command};
use ringlog::*;
use std::io::Write;
use std::path::PathBuf;

mod config;
mod dashboard;
mod error;

use config::Config;
use error::Result;

fn main() {
    let args = cli().get_matches();

    let list = args.get_flag("LIST");
    let all = args.get_flag("ALL");
    let name = args
        .get_one::<String>("DASHBOARD")
        .cloned()
        .unwrap_or_else(|| "overview".to_string());
    let output_dir = args.get_one::<PathBuf>("OUTPUT_DIR").cloned();

    let config = match Config::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // configure debug log
    let debug_output: Box<dyn Output> = Box::new(Stderr::new());

    let level = match config.verbose {
        0 => Level::Info,
        1 => Level::Debug,
        _ => Level::Trace,
    };

    let debug_log = if level <= Level::Info {
        LogBuilder::new().format(ringlog::default_format)
    } else {
        LogBuilder::new()
    }
    .output(debug_output)
    .build()
    .expect("failed to initialize debug log");

    let mut log = MultiLogBuilder::new()
        .level_filter(level.to_level_filter())
        .default(debug_log)
        .build()
        .start();

    let result = if list {
        print_names()
    } else if all {
        match output_dir {
            Some(dir) => write_all(&dir, &config),
            None => print_all(&config),
        }
    } else {
        print_one(&name, &config)
    };

    if let Err(e) = result {
        error!("{e}");
        let _ = log.flush();
        std::process::exit(1);
    }

    let _ = log.flush();
}

fn cli() -> Command {
    Command::new("emqx-dashboards")
        .about("Generates Grafana dashboards for monitoring EMQX clusters")
        .disable_version_flag(true)
        .arg(
            Arg::new("DASHBOARD")
                .help("Dashboard to generate")
                .value_parser(dashboard::DASHBOARD_NAMES.to_vec())
                .default_value("overview")
                .index(1),
        )
        .arg(
            Arg::new("EDITION")
                .long("edition")
                .short('e')
                .help("EMQX Enterprise (ee) or EMQX Community (ce)")
                .value_parser(["ee", "ce"]),
        )
        .arg(
            Arg::new("VERSION")
                .long("version")
                .short('v')
                .help("EMQX major version")
                .value_parser(value_parser!(u8).range(4..=5)),
        )
        .arg(
            Arg::new("CONFIG")
                .long("config")
                .short('c')
                .help("TOML configuration file")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("ALL")
                .long("all")
                .help("Generate every dashboard")
                .action(ArgAction::SetTrue)
                .conflicts_with("LIST"),
        )
        .arg(
            Arg::new("OUTPUT_DIR")
                .long("output-dir")
                .short('o')
                .help("Write each dashboard to <DIR>/<uid>.json")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf))
                .requires("ALL"),
        )
        .arg(
            Arg::new("LIST")
                .long("list")
                .short('l')
                .help("List the available dashboards")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("VERBOSE")
                .long("verbose")
                .help("Increase verbosity")
                .action(ArgAction::Count),
        )
}

fn print_names() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for name in dashboard::DASHBOARD_NAMES {
        writeln!(stdout, "{name}")?;
    }
    Ok(())
}

fn print_one(name: &str, config: &Config) -> Result<()> {
    let dashboard = dashboard::get_dashboard(name, config)?;
    writeln!(std::io::stdout().lock(), "{}", dashboard.serialize()?)?;
    Ok(())
}

fn print_all(config: &Config) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for dashboard in dashboard::generate_all_dashboards(config)? {
        writeln!(stdout, "{}", dashboard.serialize()?)?;
    }
    Ok(())
}

fn write_all(dir: &std::path::Path, config: &Config) -> Result<()> {
    for path in dashboard::write_all(dir, config)? {
        info!("wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Edition, Version};
    use clap::ArgMatches;

    fn parse(args: &[&str]) -> ArgMatches {
        cli().try_get_matches_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["emqx-dashboards"]);
        assert_eq!(args.get_one::<String>("DASHBOARD").unwrap(), "overview");

        let config = Config::try_from(args).unwrap();
        assert_eq!(config.broker.edition, Edition::Enterprise);
        assert_eq!(config.broker.version, Version::V5);
        assert_eq!(config.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let args = parse(&[
            "emqx-dashboards",
            "client-events",
            "-e",
            "ce",
            "-v",
            "4",
            "--verbose",
            "--verbose",
        ]);
        assert_eq!(args.get_one::<String>("DASHBOARD").unwrap(), "client-events");

        let config = Config::try_from(args).unwrap();
        assert_eq!(config.broker.edition, Edition::Community);
        assert_eq!(config.broker.version, Version::V4);
        assert_eq!(config.verbose, 2);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[broker]\nedition = \"ce\"\nversion = 4\n\n[dashboard]\nrefresh = \"30s\""
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let config = Config::try_from(parse(&["emqx-dashboards", "-c", path, "-v", "5"])).unwrap();
        assert_eq!(config.broker.edition, Edition::Community);
        assert_eq!(config.broker.version, Version::V5);
        assert_eq!(config.dashboard.refresh, "30s");
    }

    #[test]
    fn test_rejected_args() {
        for args in [
            vec!["emqx-dashboards", "missing"],
            vec!["emqx-dashboards", "-v", "3"],
            vec!["emqx-dashboards", "-e", "xe"],
            vec!["emqx-dashboards", "-o", "out"],
            vec!["emqx-dashboards", "--all", "--list"],
        ] {
            assert!(cli().try_get_matches_from(&args).is_err(), "{args:?}");
        }
    }
}
