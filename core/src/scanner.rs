//! The scan **engine**: resolves every host of a [`HostSet`] and probes the requested
//! TCP ports on the ones that resolve.
//!
//! Work is split into jobs (one lookup per host, one probe per host and port) pulled off
//! a queue by a fixed number of tokio tasks: at most `concurrency` jobs exist at any
//! time. A host's probes are queued only once its lookup succeeds and go to the front
//! of the queue, so hosts tend to complete one after another. Each outcome is written
//! into a slot indexed by host and port position, so the returned results follow host
//! order first and the caller's port order second, regardless of completion order.
//!
//! Nothing here fails outright. An unresolvable host becomes a result with
//! `resolvable = false`, and a probe that goes wrong is a closed port.

pub mod resolver;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use pscan_common::config::Config;
use pscan_common::hosts::HostSet;
use pscan_common::network::port::{PortState, ScanResult};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::network::tcp::{Prober, TcpProber};
use resolver::{Resolver, SystemResolver};

const MAX_CONCURRENCY: usize = 4_096;

/// Invoked with `(hosts_done, hosts_total)` each time a host finishes.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

pub fn clamp_concurrency(value: usize) -> usize {
    value.clamp(1, MAX_CONCURRENCY)
}

#[derive(Clone, Copy, Debug)]
enum Job {
    Resolve { host: usize },
    Probe { host: usize, port: usize },
}

#[derive(Debug)]
enum Outcome {
    Resolved { host: usize, resolvable: bool },
    Probed { host: usize, port: usize, state: PortState },
}

/// Per-host accumulator. `resolvable` stays `None` until the lookup reports back.
struct HostSlot {
    resolvable: Option<bool>,
    states: Vec<PortState>,
    pending: usize,
}

impl HostSlot {
    fn new(ports: &[u16]) -> Self {
        Self {
            resolvable: None,
            // A probe job that dies leaves its port closed.
            states: ports.iter().map(|&port| PortState::closed(port)).collect(),
            pending: 0,
        }
    }

    fn into_result(self, host: &str) -> ScanResult {
        match self.resolvable {
            Some(true) => ScanResult::resolved(host, self.states),
            _ => ScanResult::unresolvable(host),
        }
    }
}

pub struct ScanEngine<P = TcpProber, R = SystemResolver> {
    prober: Arc<P>,
    resolver: Arc<R>,
    concurrency: usize,
    on_host_scanned: Option<ProgressCallback>,
}

impl ScanEngine {
    /// Engine using real TCP connects and the system resolver.
    pub fn new(cfg: &Config) -> Self {
        Self::with_parts(
            TcpProber::new(cfg.probe_timeout),
            SystemResolver,
            cfg.concurrency,
        )
    }
}

impl<P, R> ScanEngine<P, R>
where
    P: Prober + 'static,
    R: Resolver + 'static,
{
    pub fn with_parts(prober: P, resolver: R, concurrency: usize) -> Self {
        Self {
            prober: Arc::new(prober),
            resolver: Arc::new(resolver),
            concurrency: clamp_concurrency(concurrency),
            on_host_scanned: None,
        }
    }

    pub fn on_host_scanned<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.on_host_scanned = Some(Arc::new(callback));
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Scans every host in `hosts`, in the set's current order, against `ports`.
    ///
    /// Returns only after every host has been handled, with exactly one result per host.
    pub async fn run(&self, hosts: &HostSet, ports: &[u16]) -> Vec<ScanResult> {
        let total: usize = hosts.len();
        let started: Instant = Instant::now();
        info!(
            "Scanning {total} hosts on {} ports ({} jobs in flight max)",
            ports.len(),
            self.concurrency
        );

        let names: Arc<[String]> = hosts.iter().cloned().collect();
        let port_list: Arc<[u16]> = Arc::from(ports);
        let mut slots: Vec<HostSlot> = (0..total).map(|_| HostSlot::new(ports)).collect();
        let mut queue: VecDeque<Job> = (0..total).map(|host| Job::Resolve { host }).collect();
        let mut workers: JoinSet<Outcome> = JoinSet::new();
        let mut finished: usize = 0;

        loop {
            while workers.len() < self.concurrency {
                let Some(job) = queue.pop_front() else {
                    break;
                };
                workers.spawn(execute(
                    job,
                    self.prober.clone(),
                    self.resolver.clone(),
                    names.clone(),
                    port_list.clone(),
                ));
            }

            let Some(joined) = workers.join_next().await else {
                break;
            };
            let outcome: Outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("A scan job failed: {e}");
                    continue;
                }
            };

            match outcome {
                Outcome::Resolved { host, resolvable: false } => {
                    warn!("{} could not be resolved, skipping its ports", names[host]);
                    slots[host].resolvable = Some(false);
                    finished += 1;
                    self.report(finished, total);
                }
                Outcome::Resolved { host, resolvable: true } => {
                    slots[host].resolvable = Some(true);
                    slots[host].pending = ports.len();
                    if ports.is_empty() {
                        finished += 1;
                        self.report(finished, total);
                    }
                    for port in (0..ports.len()).rev() {
                        queue.push_front(Job::Probe { host, port });
                    }
                }
                Outcome::Probed { host, port, state } => {
                    let slot: &mut HostSlot = &mut slots[host];
                    slot.states[port] = state;
                    slot.pending -= 1;
                    if slot.pending == 0 {
                        finished += 1;
                        self.report(finished, total);
                    }
                }
            }
        }

        let results: Vec<ScanResult> = slots
            .into_iter()
            .zip(names.iter())
            .map(|(slot, host)| slot.into_result(host))
            .collect();

        info!(
            "Scan finished in {:.2}s",
            started.elapsed().as_secs_f64()
        );
        results
    }

    fn report(&self, done: usize, total: usize) {
        if let Some(cb) = &self.on_host_scanned {
            cb(done, total);
        }
    }
}

async fn execute<P, R>(
    job: Job,
    prober: Arc<P>,
    resolver: Arc<R>,
    names: Arc<[String]>,
    ports: Arc<[u16]>,
) -> Outcome
where
    P: Prober + 'static,
    R: Resolver + 'static,
{
    match job {
        Job::Resolve { host } => Outcome::Resolved {
            host,
            resolvable: resolver.resolves(&names[host]).await,
        },
        Job::Probe { host, port } => Outcome::Probed {
            host,
            port,
            state: prober.probe(&names[host], ports[port]).await,
        },
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
