use std::time::Duration;

use async_trait::async_trait;
use pscan_common::network::port::PortState;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Decides whether a single TCP port on a host accepts connections.
///
/// Implementations never fail: anything short of an established connection is a
/// closed port.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, host: &str, port: u16) -> PortState;
}

/// Full TCP connect probe bounded by a fixed timeout.
#[derive(Clone, Copy, Debug)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, host: &str, port: u16) -> PortState {
        // The timeout covers the lookup done by `connect` as well as the handshake.
        let open: bool = match timeout(self.timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                true
            }
            Ok(Err(e)) => {
                debug!("{host}:{port} closed ({e})");
                false
            }
            Err(_elapsed) => {
                debug!("{host}:{port} timed out after {:?}", self.timeout);
                false
            }
        };
        PortState::new(port, open)
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
