use pscan_common::error::HostsError;
use pscan_common::hosts::{HostSet, store};
use tempfile::TempDir;

/// Mirrors the add command: load, mutate, save, then a fresh process loads again.
#[test]
fn hosts_survive_a_save_load_cycle() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("pScan.hosts");

    let mut first = HostSet::new();
    store::load(&mut first, &path)?;
    assert!(first.is_empty());

    for host in ["scanme.example", "192.168.0.10", "::1"] {
        first.add(host)?;
    }
    store::save(&first, &path)?;

    let mut second = HostSet::new();
    store::load(&mut second, &path)?;
    assert_eq!(second.as_slice(), first.as_slice());

    second.remove("192.168.0.10")?;
    store::save(&second, &path)?;

    let mut third = HostSet::new();
    store::load(&mut third, &path)?;
    assert_eq!(third.len(), 2);
    assert!(!third.contains("192.168.0.10"));
    Ok(())
}

#[test]
fn duplicates_from_a_hand_edited_file_still_block_add() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("pScan.hosts");
    std::fs::write(&path, "b.example\na.example\nb.example\n")?;

    let mut set = HostSet::new();
    store::load(&mut set, &path)?;
    assert_eq!(set.len(), 3);

    assert!(matches!(set.add("b.example"), Err(HostsError::AlreadyExists(_))));
    assert_eq!(set.as_slice(), ["a.example", "b.example", "b.example"]);
    Ok(())
}
