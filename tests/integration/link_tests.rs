use dupescan::duplicates::DuplicateFinder;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_hardlinks_reported_as_separate_entries() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    let hardlink = dir.path().join("hardlink.txt");

    File::create(&original)
        .unwrap()
        .write_all(b"identical content")
        .unwrap();

    if let Err(e) = fs::hard_link(&original, &hardlink) {
        eprintln!("Skipping hardlink test: failed to create hardlink: {}", e);
        return;
    }

    let finder = DuplicateFinder::with_defaults();
    let (result, summary) = finder.find_duplicates(dir.path()).unwrap();

    // Two directory entries, same content
    assert_eq!(summary.total_files, 2);
    assert_eq!(result.len(), 1);
    assert_eq!(result.groups[0].files, vec![hardlink, original]);
}

#[test]
#[cfg(unix)]
fn test_symlinks_are_not_followed() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target.txt");
    File::create(&target)
        .unwrap()
        .write_all(b"linked content")
        .unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).unwrap();

    let (result, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
#[cfg(unix)]
fn test_symlinked_directory_is_not_entered() {
    let outside = tempdir().unwrap();
    File::create(outside.path().join("copy.txt"))
        .unwrap()
        .write_all(b"same bytes")
        .unwrap();

    let dir = tempdir().unwrap();
    File::create(dir.path().join("copy.txt"))
        .unwrap()
        .write_all(b"same bytes")
        .unwrap();
    std::os::unix::fs::symlink(outside.path(), dir.path().join("elsewhere")).unwrap();

    let (result, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(summary.total_files, 1);
}
