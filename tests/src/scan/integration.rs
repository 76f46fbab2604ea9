use std::time::Duration;

use pscan_common::config::Config;
use pscan_common::hosts::HostSet;
use pscan_common::network::port::{PortState, ScanResult};
use pscan_core::scanner::ScanEngine;
use tokio::net::TcpListener;

fn engine() -> ScanEngine {
    let cfg = Config {
        probe_timeout: Duration::from_millis(500),
        concurrency: 8,
        ..Config::default()
    };
    ScanEngine::new(&cfg)
}

/// Returns a port that had a listener a moment ago and no longer does.
async fn closed_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(port)
}

#[tokio::test]
async fn unresolvable_host_yields_single_empty_result() -> anyhow::Result<()> {
    let mut hosts = HostSet::new();
    hosts.add("nonexistent.invalid")?;

    let results = engine().run(&hosts, &[22, 80, 443]).await;

    assert_eq!(results, vec![ScanResult::unresolvable("nonexistent.invalid")]);
    Ok(())
}

#[tokio::test]
async fn loopback_open_and_closed_ports_in_request_order() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let open_port = listener.local_addr()?.port();
    let closed_port = closed_port().await?;

    let mut hosts = HostSet::new();
    hosts.add("localhost")?;

    let results = engine().run(&hosts, &[open_port, closed_port]).await;

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.host, "localhost");
    assert!(result.resolvable);
    assert_eq!(
        result.port_states,
        vec![PortState::new(open_port, true), PortState::closed(closed_port)]
    );

    // Reversing the request reverses the output.
    let results = engine().run(&hosts, &[closed_port, open_port]).await;
    assert_eq!(
        results[0].port_states,
        vec![PortState::closed(closed_port), PortState::new(open_port, true)]
    );
    Ok(())
}

#[tokio::test]
async fn mixed_hosts_keep_set_order() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    let mut hosts = HostSet::new();
    for host in ["localhost", "127.0.0.1", "bad.invalid"] {
        hosts.add(host)?;
    }

    let results = engine().run(&hosts, &[port]).await;

    let order: Vec<&str> = results.iter().map(|r| r.host.as_str()).collect();
    assert_eq!(order, ["127.0.0.1", "bad.invalid", "localhost"]);
    assert!(results[0].port_states[0].open);
    assert!(!results[1].resolvable);
    assert!(results[1].port_states.is_empty());
    assert!(results[2].port_states[0].open);
    Ok(())
}
