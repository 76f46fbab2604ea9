use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Context;
use pscan_common::config::Config;
use pscan_common::hosts::{HostSet, store};
use pscan_common::network::port::{ScanResult, state_label};
use pscan_core::scanner::ScanEngine;
use tracing::{Instrument, Span};

use crate::terminal::{format, print, spinner};

pub async fn scan(out: &mut impl Write, cfg: &Config) -> anyhow::Result<()> {
    let mut hosts: HostSet = HostSet::new();
    store::load(&mut hosts, &cfg.hosts_file).context("loading hosts list")?;

    if hosts.is_empty() {
        print::header(out, "no hosts to scan", cfg.quiet)?;
        writeln!(
            out,
            "{} is empty, add hosts with `pscan hosts add <host>`",
            cfg.hosts_file.display()
        )?;
        return Ok(());
    }

    let span: Span = spinner::scan_progress_span(hosts.len(), cfg.quiet);
    let start_time: Instant = Instant::now();

    let results: Vec<ScanResult> = {
        let progress: Span = span.clone();
        let engine = ScanEngine::new(cfg)
            .on_host_scanned(move |_done, _total| spinner::report_host_scanned(&progress));
        engine.run(&hosts, cfg.ports.as_slice()).instrument(span).await
    };

    scan_ends(out, &results, start_time.elapsed(), cfg)
}

fn scan_ends(
    out: &mut impl Write,
    results: &[ScanResult],
    total_time: Duration,
    cfg: &Config,
) -> anyhow::Result<()> {
    if cfg.quiet > 1 {
        return print_plain(out, results);
    }

    print::header(out, "Port Scan", cfg.quiet)?;
    for (idx, result) in results.iter().enumerate() {
        print::tree_head(out, idx, &result.host)?;
        print::as_tree_one_level(out, format::result_to_details(result))?;
        if idx + 1 != results.len() {
            writeln!(out)?;
        }
    }

    let summary = format::summary_line(results, total_time.as_secs_f64());
    match cfg.quiet {
        0 => {
            print::fat_separator(out)?;
            print::centerln(out, &summary.to_string())?;
        }
        _ => {
            writeln!(out)?;
            writeln!(out, "{summary}")?;
        }
    }
    Ok(())
}

/// Uncolored output for `-qq`, suited to piping.
fn print_plain(out: &mut impl Write, results: &[ScanResult]) -> anyhow::Result<()> {
    for result in results {
        if !result.resolvable {
            writeln!(out, "{}: Host not found", result.host)?;
            writeln!(out)?;
            continue;
        }

        writeln!(out, "{}:", result.host)?;
        for state in &result.port_states {
            writeln!(out, "\t{}: {}", state.port, state_label(state.open))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
