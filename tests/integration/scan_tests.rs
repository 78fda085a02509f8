use dupescan::duplicates::{DuplicateFinder, FinderConfig, Strategy};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

fn write(path: PathBuf, content: &[u8]) -> PathBuf {
    File::create(&path).unwrap().write_all(content).unwrap();
    path
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (result, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(result.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write(dir.path().join("a.txt"), b"content a");
    write(dir.path().join("b.txt"), b"content b");
    write(dir.path().join("c.txt"), b"content c");

    let finder = DuplicateFinder::with_defaults();
    let (result, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(result.is_empty());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.candidate_files, 3);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_duplicate_files() {
    let dir = tempdir().unwrap();
    let a = write(dir.path().join("a.txt"), b"duplicate");
    let b = write(dir.path().join("b.txt"), b"duplicate");
    write(dir.path().join("c.txt"), b"unique");

    let finder = DuplicateFinder::with_defaults();
    let (result, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.groups[0].files, vec![a, b]);
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.duplicate_files, 1);
    assert_eq!(summary.reclaimable_space, 9);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("subdir");
    let deeper = sub.join("deeper");
    fs::create_dir_all(&deeper).unwrap();

    let top = write(dir.path().join("a.txt"), b"nested duplicate");
    let mid = write(sub.join("b.txt"), b"nested duplicate");
    let low = write(deeper.join("c.txt"), b"nested duplicate");

    let finder = DuplicateFinder::with_defaults();
    let (result, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result.groups[0].files, vec![top, mid, low]);
}

#[test]
fn test_scan_multiple_groups_ascending_size() {
    let dir = tempdir().unwrap();
    write(dir.path().join("long1"), b"a much longer duplicate");
    write(dir.path().join("long2"), b"a much longer duplicate");
    write(dir.path().join("short1"), b"dup");
    write(dir.path().join("short2"), b"dup");
    write(dir.path().join("short3"), b"dup");

    let finder = DuplicateFinder::with_defaults();
    let (result, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.groups[0].size, 3);
    assert_eq!(result.groups[0].len(), 3);
    assert_eq!(result.groups[1].size, 23);
    assert_eq!(summary.duplicate_files, 3);
}

#[test]
fn test_scan_same_size_split_by_content() {
    let dir = tempdir().unwrap();
    let a1 = write(dir.path().join("1"), b"aaaa");
    let b1 = write(dir.path().join("2"), b"bbbb");
    let a2 = write(dir.path().join("3"), b"aaaa");
    let b2 = write(dir.path().join("4"), b"bbbb");

    let finder = DuplicateFinder::with_defaults();
    let (result, _) = finder.find_duplicates(dir.path()).unwrap();

    let lists: Vec<Vec<PathBuf>> = result.groups.into_iter().map(|g| g.files).collect();
    assert_eq!(lists, vec![vec![a1, a2], vec![b1, b2]]);
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    for i in 0..20 {
        let content = format!("content {}", i % 4);
        write(dir.path().join(format!("file{i:02}")), content.as_bytes());
    }

    let finder = DuplicateFinder::with_defaults();
    let (first, _) = finder.find_duplicates(dir.path()).unwrap();
    let (second, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_thread_count_does_not_change_result() {
    let dir = tempdir().unwrap();
    for i in 0..30 {
        let content = vec![b'x'; 10 + i % 5];
        write(dir.path().join(format!("f{i:02}")), &content);
    }

    let baseline = DuplicateFinder::new(FinderConfig::default().with_io_threads(1))
        .find_duplicates(dir.path())
        .unwrap()
        .0;

    for threads in [2, 8] {
        for strategy in [Strategy::Checksum, Strategy::Compare] {
            let config = FinderConfig::default()
                .with_io_threads(threads)
                .with_strategy(strategy);
            let (result, _) = DuplicateFinder::new(config)
                .find_duplicates(dir.path())
                .unwrap();
            assert_eq!(result, baseline, "{threads} threads, {strategy}");
        }
    }
}

#[test]
fn test_hidden_files_are_scanned() {
    let dir = tempdir().unwrap();
    let hidden_dir = dir.path().join(".hidden");
    fs::create_dir(&hidden_dir).unwrap();
    write(dir.path().join(".dotfile"), b"secret");
    write(hidden_dir.join("copy"), b"secret");

    let (result, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(result.len(), 1);
}
