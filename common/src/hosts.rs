//! # Host List
//!
//! An ordered, deduplicated collection of scan targets.
//!
//! Identifiers are opaque strings (DNS names or IP literals). The set keeps them
//! sorted byte-wise after every [`HostSet::add`], [`HostSet::remove`] and
//! [`HostSet::search`], so iteration order right after any of those calls is the
//! sorted order. The only way to bypass that is loading a hosts file, which keeps
//! the file's order and duplicates until the next search-driven call.
//!
//! There is no internal locking. A `HostSet` that may change while a scan is running
//! must be guarded by its owner.

pub mod store;

use tracing::debug;

use crate::error::HostsError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostSet {
    hosts: Vec<String>,
}

impl HostSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts the set, then binary-searches for `host`.
    ///
    /// Returns the index of the match in the freshly sorted sequence.
    pub fn search(&mut self, host: &str) -> Option<usize> {
        self.hosts.sort();
        self.hosts.binary_search_by(|h| h.as_str().cmp(host)).ok()
    }

    /// Adds `host`, failing with [`HostsError::AlreadyExists`] if it is present.
    pub fn add(&mut self, host: impl Into<String>) -> Result<(), HostsError> {
        let host: String = host.into();
        if self.search(&host).is_some() {
            return Err(HostsError::AlreadyExists(host));
        }

        // `search` left the set sorted, so inserting at the partition point keeps it that way.
        let at: usize = self.hosts.partition_point(|h| h < &host);
        debug!("adding {host} at position {at}");
        self.hosts.insert(at, host);
        Ok(())
    }

    /// Removes exactly one entry equal to `host`.
    pub fn remove(&mut self, host: &str) -> Result<(), HostsError> {
        let Some(idx) = self.search(host) else {
            return Err(HostsError::NotFound(host.to_string()));
        };
        self.hosts.remove(idx);
        debug!("removed {host}");
        Ok(())
    }

    /// Membership test. Goes through [`HostSet::search`], so it sorts the set in place
    /// first, which is why it needs `&mut self`.
    pub fn contains(&mut self, host: &str) -> bool {
        self.search(host).is_some()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.hosts.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.hosts
    }

    /// Appends without a duplicate check or re-sort. Used by the store loader.
    pub(crate) fn push_unchecked(&mut self, host: String) {
        self.hosts.push(host);
    }
}

impl<'a> IntoIterator for &'a HostSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
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
