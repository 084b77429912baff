//! Command-line interface
//!
//! Runs with no arguments: settings from `linode-uptime.ini`, hosts from
//! `/tmp/inventory.json`. Flags only override those defaults.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::inventory::DEFAULT_INVENTORY_PATH;
use crate::RunOptions;

/// Uptime check reconciler
///
/// Creates uptime checks for inventory hosts that have none and re-activates
/// paused ones. Prints `N:<label>` for each new check and `U:<id>` for each
/// updated one.
#[derive(Parser, Debug)]
#[command(name = "linode-uptime")]
#[command(about = "Reconcile provider uptime checks against a host inventory", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the INI config file
    ///
    /// Defaults to linode-uptime.ini next to the executable, then in the
    /// current directory.
    #[arg(short, long, env = "LINODE_UPTIME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the inventory JSON file
    #[arg(short, long, env = "LINODE_UPTIME_INVENTORY", default_value = DEFAULT_INVENTORY_PATH)]
    pub inventory: PathBuf,

    /// Print planned actions without creating or updating checks
    #[arg(long)]
    pub dry_run: bool,

    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            config_path: self.config.clone(),
            inventory_path: self.inventory.clone(),
            dry_run: self.dry_run,
        }
    }

    /// Log level used when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Install the stderr log subscriber; `RUST_LOG` takes precedence
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = Cli::try_parse_from(["linode-uptime"]).unwrap();
        let options = cli.run_options();

        if std::env::var_os("LINODE_UPTIME_INVENTORY").is_none() {
            assert_eq!(options.inventory_path, PathBuf::from(DEFAULT_INVENTORY_PATH));
        }
        assert!(!options.dry_run);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "linode-uptime",
            "--config",
            "/etc/linode-uptime.ini",
            "--inventory",
            "/var/lib/inventory.json",
            "--dry-run",
            "-vv",
        ])
        .unwrap();
        let options = cli.run_options();

        assert_eq!(options.config_path, Some(PathBuf::from("/etc/linode-uptime.ini")));
        assert_eq!(options.inventory_path, PathBuf::from("/var/lib/inventory.json"));
        assert!(options.dry_run);
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["linode-uptime", "-q", "-v"]).is_err());

        let cli = Cli::try_parse_from(["linode-uptime", "-q"]).unwrap();
        assert_eq!(cli.log_level(), "error");
    }

    #[test]
    fn test_verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
