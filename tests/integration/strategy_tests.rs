use dupescan::duplicates::{DuplicateFinder, FinderConfig, ScanResult, Strategy};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn scan(root: &Path, config: FinderConfig) -> ScanResult {
    DuplicateFinder::new(config).find_duplicates(root).unwrap().0
}

fn as_sets(result: &ScanResult) -> BTreeSet<BTreeSet<PathBuf>> {
    result
        .groups
        .iter()
        .map(|g| g.files.iter().cloned().collect())
        .collect()
}

#[test]
fn test_strategies_agree_on_large_files() {
    let dir = tempdir().unwrap();
    let base: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();

    let mut late_diff = base.clone();
    late_diff[49_999] ^= 0xff;
    let mut boundary_diff = base.clone();
    boundary_diff[4096] ^= 0xff;

    fs::write(dir.path().join("base1"), &base).unwrap();
    fs::write(dir.path().join("base2"), &base).unwrap();
    fs::write(dir.path().join("late1"), &late_diff).unwrap();
    fs::write(dir.path().join("late2"), &late_diff).unwrap();
    fs::write(dir.path().join("boundary"), &boundary_diff).unwrap();

    let checksum = scan(dir.path(), FinderConfig::default().with_strategy(Strategy::Checksum));
    let compare = scan(dir.path(), FinderConfig::default().with_strategy(Strategy::Compare));

    assert_eq!(checksum.len(), 2);
    assert_eq!(as_sets(&checksum), as_sets(&compare));
}

#[test]
fn test_strategies_produce_same_order() {
    let dir = tempdir().unwrap();
    for (name, content) in [
        ("a", "xx"),
        ("b", "yy"),
        ("c", "zz"),
        ("d", "yy"),
        ("e", "xx"),
        ("f", "zz"),
    ] {
        fs::write(dir.path().join(name), content).unwrap();
    }

    let checksum = scan(dir.path(), FinderConfig::default().with_strategy(Strategy::Checksum));
    let compare = scan(dir.path(), FinderConfig::default().with_strategy(Strategy::Compare));

    assert_eq!(checksum, compare);
    assert_eq!(checksum.len(), 3);
    assert!(checksum.groups[0].files[0].ends_with("a"));
}

#[test]
fn test_tiny_chunk_sizes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"chunk boundaries").unwrap();
    fs::write(dir.path().join("b"), b"chunk boundaries").unwrap();
    fs::write(dir.path().join("c"), b"chunk boundariez").unwrap();

    for strategy in [Strategy::Checksum, Strategy::Compare] {
        let config = FinderConfig::default()
            .with_strategy(strategy)
            .with_hash_chunk_size(1)
            .with_compare_chunk_size(3);
        let result = scan(dir.path(), config);

        assert_eq!(result.len(), 1, "strategy {strategy}");
        assert_eq!(result.groups[0].len(), 2);
    }
}
