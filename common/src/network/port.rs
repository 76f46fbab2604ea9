//! # Scan Result Model
//!
//! Plain data produced by the scan engine. Display concerns (colors, wording) live
//! with the caller; [`state_label`] is only the plain-text fallback.

/// Verdict for a single TCP port on a single host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortState {
    pub port: u16,
    pub open: bool,
}

impl PortState {
    pub fn new(port: u16, open: bool) -> Self {
        Self { port, open }
    }

    pub fn closed(port: u16) -> Self {
        Self::new(port, false)
    }
}

/// Outcome of scanning one host.
///
/// `port_states` follows the order of the requested ports and is always empty when
/// the host could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanResult {
    pub host: String,
    pub resolvable: bool,
    pub port_states: Vec<PortState>,
}

impl ScanResult {
    pub fn resolved(host: impl Into<String>, port_states: Vec<PortState>) -> Self {
        Self {
            host: host.into(),
            resolvable: true,
            port_states,
        }
    }

    pub fn unresolvable(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            resolvable: false,
            port_states: Vec::new(),
        }
    }

    pub fn open_ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.port_states.iter().filter(|s| s.open).map(|s| s.port)
    }
}

pub fn state_label(open: bool) -> &'static str {
    if open { "open" } else { "closed" }
}
