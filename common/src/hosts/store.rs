//! Line-delimited persistence for [`HostSet`].
//!
//! The file holds one identifier per line, newline-terminated, with no header or
//! escaping. A missing file is an empty set.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::HostsError;
use crate::hosts::HostSet;

/// Appends every line of `path` to `set`, verbatim and without deduplication.
pub fn load(set: &mut HostSet, path: impl AsRef<Path>) -> Result<(), HostsError> {
    let path: &Path = path.as_ref();

    let file: File = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist, starting with an empty list", path.display());
            return Ok(());
        }
        Err(e) => return Err(HostsError::io(path, e)),
    };

    let mut count: usize = 0;
    for line in BufReader::new(file).lines() {
        let line: String = line.map_err(|e| HostsError::io(path, e))?;
        set.push_unchecked(line);
        count += 1;
    }

    debug!("loaded {count} hosts from {}", path.display());
    Ok(())
}

/// Replaces `path` with the set's identifiers in their current order.
///
/// The content goes to a uniquely named temporary file in the same directory, which
/// is then persisted over the target, so readers never observe a half-written list.
pub fn save(set: &HostSet, path: impl AsRef<Path>) -> Result<(), HostsError> {
    let path: &Path = path.as_ref();

    let mut output: String = String::new();
    for host in set {
        output.push_str(host);
        output.push('\n');
    }

    let mut file: NamedTempFile =
        NamedTempFile::new_in(parent_dir(path)).map_err(|e| HostsError::io(path, e))?;
    file.write_all(output.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| HostsError::io(path, e))?;
    file.persist(path).map_err(|e| HostsError::io(path, e.error))?;

    debug!("saved {} hosts to {}", set.len(), path.display());
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
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
