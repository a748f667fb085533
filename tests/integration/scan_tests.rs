use dupe_remover::scanner::{ScanError, Walker, WalkerConfig};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let records = Walker::new(dir.path(), WalkerConfig::default())
        .scan()
        .unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_scan_completeness() {
    let dir = tempdir().unwrap();
    let files = [
        ("top.txt", 3),
        ("a/one.bin", 10),
        ("a/b/two.bin", 0),
        ("a/b/c/three.bin", 7),
        ("d/top.txt", 5),
    ];
    for (rel, size) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, vec![b'x'; size]).unwrap();
    }
    fs::create_dir_all(dir.path().join("empty/dir")).unwrap();

    let records = Walker::new(dir.path(), WalkerConfig::default())
        .scan()
        .unwrap();

    assert_eq!(records.len(), files.len());
    let found: HashSet<(PathBuf, u64)> = records.iter().map(|r| (r.path(), r.size)).collect();
    for (rel, size) in files {
        assert!(
            found.contains(&(dir.path().join(rel), size as u64)),
            "missing {}",
            rel
        );
    }
    assert!(records.iter().all(|r| !r.checked));
}

#[test]
fn test_scan_names_are_base_names() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("photo.jpg"), b"jpg").unwrap();

    let records = Walker::new(dir.path(), WalkerConfig::default())
        .scan()
        .unwrap();

    assert_eq!(records[0].name, "photo.jpg");
    assert_eq!(records[0].directory, dir.path().join("sub"));
}

#[test]
fn test_scan_missing_root_fails() {
    let dir = tempdir().unwrap();
    let result = Walker::new(&dir.path().join("gone"), WalkerConfig::default()).scan();
    assert!(matches!(result, Err(ScanError::NotFound(_))));
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_aborts_scan() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"a").unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("inner.txt"), b"i").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not apply to privileged users
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = Walker::new(dir.path(), WalkerConfig::default()).scan();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    match result {
        Err(ScanError::PermissionDenied(path)) => assert_eq!(path, locked),
        other => panic!("Expected PermissionDenied, got {:?}", other),
    }
}
