pub mod hosts;
pub mod scan;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use pscan_common::config::Config;
use pscan_common::config::file::FileConfig;
use pscan_common::network::ports::PortList;

#[derive(Parser)]
#[command(name = "pscan", version)]
#[command(about = "Fast TCP port scanner for a persisted list of hosts.")]
pub struct CommandLine {
    /// Config file [default: ~/.pscan.toml, skipped if missing]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// File holding the hosts list, one host per line [default: pScan.hosts]
    #[arg(short = 'f', long, global = true, env = "PSCAN_HOSTS_FILE")]
    pub hosts_file: Option<PathBuf>,

    /// Reduce output (-q drops headers, -qq prints bare results)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the hosts list
    Hosts {
        #[command(subcommand)]
        action: HostsAction,
    },
    /// Run a port scan on every host in the list
    #[command(alias = "s")]
    Scan(ScanArgs),
}

#[derive(Subcommand)]
pub enum HostsAction {
    /// Add new host(s) to the list
    #[command(alias = "a")]
    Add {
        #[arg(required = true)]
        hosts: Vec<String>,
    },
    /// List hosts in the list
    #[command(alias = "l")]
    List,
    /// Delete host(s) from the list
    #[command(alias = "d")]
    Delete {
        #[arg(required = true)]
        hosts: Vec<String>,
    },
}

#[derive(Args)]
pub struct ScanArgs {
    /// Ports to scan, e.g. "22,80,8000-8010" [default: 22,80,443]
    #[arg(short, long, env = "PSCAN_PORTS")]
    pub ports: Option<PortList>,

    /// Connect timeout per probe, in milliseconds [default: 1000]
    #[arg(long, value_parser = RangedU64ValueParser::<u64>::new().range(1..))]
    pub timeout_ms: Option<u64>,

    /// Maximum number of probes in flight [default: 64]
    #[arg(short, long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub concurrency: Option<usize>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Reads the config file (if any) and merges it under flags and environment.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let file: FileConfig =
            FileConfig::load(self.config.as_deref()).context("loading config file")?;
        self.config_with(&file)
    }

    /// Flag or environment beats the file, which beats the built-in default.
    pub fn config_with(&self, file: &FileConfig) -> anyhow::Result<Config> {
        let defaults: Config = Config::default();

        let mut cfg: Config = Config {
            hosts_file: self
                .hosts_file
                .clone()
                .or_else(|| file.hosts_file.clone())
                .unwrap_or(defaults.hosts_file),
            ports: file.port_list()?.unwrap_or(defaults.ports),
            probe_timeout: file
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.probe_timeout),
            concurrency: file.concurrency.unwrap_or(defaults.concurrency),
            quiet: self.quiet,
        };

        if let Commands::Scan(args) = &self.command {
            if let Some(ports) = &args.ports {
                cfg.ports = ports.clone();
            }
            if let Some(ms) = args.timeout_ms {
                cfg.probe_timeout = Duration::from_millis(ms);
            }
            if let Some(concurrency) = args.concurrency {
                cfg.concurrency = concurrency;
            }
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_flags_end_up_in_config() {
        let cli = CommandLine::try_parse_from([
            "pscan", "-f", "my.hosts", "scan", "-p", "443,22", "--timeout-ms", "250", "-c", "8",
        ])
        .unwrap();

        let cfg: Config = cli.config_with(&FileConfig::default()).unwrap();
        assert_eq!(cfg.hosts_file, PathBuf::from("my.hosts"));
        assert_eq!(cfg.ports.as_slice(), [443, 22]);
        assert_eq!(cfg.probe_timeout, Duration::from_millis(250));
        assert_eq!(cfg.concurrency, 8);
    }

    fn file_config() -> FileConfig {
        FileConfig {
            hosts_file: Some(PathBuf::from("from-file.hosts")),
            ports: Some("9090".to_string()),
            timeout_ms: Some(300),
            concurrency: Some(5),
        }
    }

    #[test]
    fn file_fills_what_flags_leave_unset() {
        let cli = CommandLine::try_parse_from(["pscan", "scan", "-c", "2"]).unwrap();

        let cfg: Config = cli.config_with(&file_config()).unwrap();

        assert_eq!(cfg.hosts_file, PathBuf::from("from-file.hosts"));
        assert_eq!(cfg.probe_timeout, Duration::from_millis(300));
        assert_eq!(cfg.concurrency, 2);
    }

    #[test]
    fn flags_beat_file() {
        let cli = CommandLine::try_parse_from([
            "pscan", "-f", "flag.hosts", "scan", "-p", "7070", "--timeout-ms", "50",
        ])
        .unwrap();

        let cfg: Config = cli.config_with(&file_config()).unwrap();

        assert_eq!(cfg.hosts_file, PathBuf::from("flag.hosts"));
        assert_eq!(cfg.ports.as_slice(), [7070]);
        assert_eq!(cfg.probe_timeout, Duration::from_millis(50));
        assert_eq!(cfg.concurrency, 5);
    }

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let cli = CommandLine::try_parse_from(["pscan", "hosts", "list", "--config", "x.toml"]).unwrap();

        let cfg: Config = cli.config_with(&FileConfig::default()).unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert_eq!(cfg.probe_timeout, Duration::from_secs(1));
        assert_eq!(cfg.concurrency, 64);
    }

    #[test]
    fn env_beats_file_and_flag_beats_env() {
        // Only this test sets PSCAN_PORTS, and no other test asserts on ports it did not pass.
        unsafe { std::env::set_var("PSCAN_PORTS", "8080") };

        let from_env = CommandLine::try_parse_from(["pscan", "scan"]).unwrap();
        let from_flag = CommandLine::try_parse_from(["pscan", "scan", "-p", "7070"]).unwrap();

        unsafe { std::env::remove_var("PSCAN_PORTS") };

        let file = file_config();
        assert_eq!(from_env.config_with(&file).unwrap().ports.as_slice(), [8080]);
        assert_eq!(from_flag.config_with(&file).unwrap().ports.as_slice(), [7070]);
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        let missing = missing.to_str().unwrap();
        let cli = CommandLine::try_parse_from(["pscan", "--config", missing, "hosts", "list"]).unwrap();

        assert!(cli.load_config().is_err());
    }

    #[test]
    fn hosts_add_requires_a_host() {
        assert!(CommandLine::try_parse_from(["pscan", "hosts", "add"]).is_err());

        let cli = CommandLine::try_parse_from(["pscan", "hosts", "a", "h1", "h2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Hosts { action: HostsAction::Add { ref hosts } } if hosts == &["h1", "h2"]
        ));
    }

    #[test]
    fn bad_ports_are_rejected_before_scanning() {
        assert!(CommandLine::try_parse_from(["pscan", "scan", "-p", "0"]).is_err());
        assert!(CommandLine::try_parse_from(["pscan", "scan", "-p", "80-20"]).is_err());
        assert!(CommandLine::try_parse_from(["pscan", "scan", "-c", "0"]).is_err());
    }

    #[test]
    fn quiet_counts_and_is_global() {
        let cli = CommandLine::try_parse_from(["pscan", "hosts", "list", "-qq"]).unwrap();
        assert_eq!(cli.quiet, 2);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        CommandLine::command().debug_assert();
    }
}
