//! # Port List
//!
//! Parses the ports requested for a scan.
//!
//! Accepted input is a comma-separated list whose parts are either a single port
//! (`80`) or an inclusive range (`8000-8010`). Order is kept as written and repeated
//! ports keep only their first position.

use std::collections::HashSet;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_PORTS: &str = "22,80,443";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortListError {
    #[error("port list is empty")]
    Empty,
    #[error("invalid port '{0}': expected a number between 1 and 65535")]
    InvalidPort(String),
    #[error("invalid range '{0}': start is greater than end")]
    ReversedRange(String),
}

/// An ordered, duplicate-free list of TCP ports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortList(Vec<u16>);

impl PortList {
    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PortList {
    fn default() -> Self {
        DEFAULT_PORTS
            .parse()
            .unwrap_or_else(|_| PortList(vec![22, 80, 443]))
    }
}

impl FromStr for PortList {
    type Err = PortListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ports: Vec<u16> = Vec::new();
        let mut seen: HashSet<u16> = HashSet::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            for port in parse_part(part)? {
                if seen.insert(port) {
                    ports.push(port);
                }
            }
        }

        if ports.is_empty() {
            return Err(PortListError::Empty);
        }
        Ok(PortList(ports))
    }
}

impl From<PortList> for Vec<u16> {
    fn from(list: PortList) -> Self {
        list.0
    }
}

/// Parses either "80" or "8000-8010".
fn parse_part(part: &str) -> Result<Vec<u16>, PortListError> {
    let Some((start_str, end_str)) = part.split_once('-') else {
        return Ok(vec![parse_port(part)?]);
    };

    let start: u16 = parse_port(start_str.trim())?;
    let end: u16 = parse_port(end_str.trim())?;
    if start > end {
        return Err(PortListError::ReversedRange(part.to_string()));
    }
    Ok((start..=end).collect())
}

fn parse_port(s: &str) -> Result<u16, PortListError> {
    match s.parse::<u16>() {
        Ok(0) | Err(_) => Err(PortListError::InvalidPort(s.to_string())),
        Ok(port) => Ok(port),
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
