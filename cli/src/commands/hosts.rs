use std::io::Write;

use anyhow::Context;
use pscan_common::config::Config;
use pscan_common::hosts::{HostSet, store};

fn load(cfg: &Config) -> anyhow::Result<HostSet> {
    let mut set: HostSet = HostSet::new();
    store::load(&mut set, &cfg.hosts_file).context("loading hosts list")?;
    Ok(set)
}

pub fn add(out: &mut impl Write, cfg: &Config, hosts: &[String]) -> anyhow::Result<()> {
    let mut set: HostSet = load(cfg)?;

    for host in hosts {
        set.add(host.as_str())?;
        writeln!(out, "Added host: {host}")?;
    }

    store::save(&set, &cfg.hosts_file).context("saving hosts list")?;
    Ok(())
}

pub fn list(out: &mut impl Write, cfg: &Config) -> anyhow::Result<()> {
    let set: HostSet = load(cfg)?;

    for host in &set {
        writeln!(out, "{host}")?;
    }
    Ok(())
}

pub fn delete(out: &mut impl Write, cfg: &Config, hosts: &[String]) -> anyhow::Result<()> {
    let mut set: HostSet = load(cfg)?;

    for host in hosts {
        set.remove(host)?;
        writeln!(out, "Deleted host: {host}")?;
    }

    store::save(&set, &cfg.hosts_file).context("saving hosts list")?;
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
