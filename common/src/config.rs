pub mod file;

use std::path::PathBuf;
use std::time::Duration;

use crate::network::ports::PortList;

pub const DEFAULT_HOSTS_FILE: &str = "pScan.hosts";
pub const DEFAULT_CONCURRENCY: usize = 64;

/// Runtime settings resolved from flags, environment and the config file.
#[derive(Clone, Debug)]
pub struct Config {
    /// Path of the line-delimited hosts file.
    pub hosts_file: PathBuf,
    pub ports: PortList,
    /// Upper bound for a single TCP connect attempt.
    pub probe_timeout: Duration,
    /// Maximum number of resolutions and probes in flight.
    pub concurrency: usize,
    /// 0 prints everything, 1 drops headers, 2 prints bare results.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_file: PathBuf::from(DEFAULT_HOSTS_FILE),
            ports: PortList::default(),
            probe_timeout: Duration::from_secs(1),
            concurrency: DEFAULT_CONCURRENCY,
            quiet: 0,
        }
    }
}
