use dupe_remover::duplicates::find_duplicate_groups;
use dupe_remover::scanner::{Walker, WalkerConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_report_scenario() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/report.txt", &[b'r'; 10]);
    write(dir.path(), "b/report.txt", &[b'r'; 10]);
    write(dir.path(), "c/report.txt", &[b'r'; 99]);

    let mut records = Walker::new(dir.path(), WalkerConfig::default())
        .scan()
        .unwrap();
    let groups = find_duplicate_groups(&mut records);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].anchor.path(), dir.path().join("a/report.txt"));
    assert_eq!(groups[0].matches.len(), 1);
    assert_eq!(groups[0].matches[0].path(), dir.path().join("b/report.txt"));

    let c = dir.path().join("c/report.txt");
    assert!(groups.iter().all(|g| !g.paths().contains(&c)));
}

#[test]
fn test_sibling_copy_is_detected() {
    let dir = tempdir().unwrap();
    write(dir.path(), "docs/notes.md", b"# notes\n");
    fs::create_dir(dir.path().join("backup")).unwrap();
    fs::copy(
        dir.path().join("docs/notes.md"),
        dir.path().join("backup/notes.md"),
    )
    .unwrap();

    let mut records = Walker::new(dir.path(), WalkerConfig::default())
        .scan()
        .unwrap();
    let groups = find_duplicate_groups(&mut records);

    assert_eq!(groups.len(), 1);
    let paths = groups[0].paths();
    assert!(paths.contains(&dir.path().join("docs/notes.md")));
    assert!(paths.contains(&dir.path().join("backup/notes.md")));
}

#[test]
fn test_same_content_different_name_not_grouped() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"same");
    write(dir.path(), "b.txt", b"same");

    let mut records = Walker::new(dir.path(), WalkerConfig::default())
        .scan()
        .unwrap();
    assert!(find_duplicate_groups(&mut records).is_empty());
}

#[test]
fn test_different_content_same_name_and_size_grouped() {
    let dir = tempdir().unwrap();
    write(dir.path(), "x/data.bin", b"aaaa");
    write(dir.path(), "y/data.bin", b"bbbb");

    let mut records = Walker::new(dir.path(), WalkerConfig::default())
        .scan()
        .unwrap();
    let groups = find_duplicate_groups(&mut records);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size(), 4);
}

#[test]
fn test_three_copies_form_one_group() {
    let dir = tempdir().unwrap();
    for d in ["1", "2", "3"] {
        write(dir.path(), &format!("{}/pic.png", d), b"png");
    }

    let mut records = Walker::new(dir.path(), WalkerConfig::default())
        .scan()
        .unwrap();
    let groups = find_duplicate_groups(&mut records);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].anchor.directory, dir.path().join("1"));
    assert_eq!(groups[0].match_count(), 2);
    assert_eq!(records.iter().filter(|r| r.checked).count(), 2);
}
