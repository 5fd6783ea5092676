use dupfinder::duplicates::{DuplicateFinder, FinderConfig};
use dupfinder::scanner::{ExcludeRule, Hasher, WalkerConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn finder_with(rules: Vec<ExcludeRule>) -> DuplicateFinder {
    DuplicateFinder::new(
        FinderConfig::default().with_walker_config(WalkerConfig::new(false, rules)),
    )
}

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_segment_rule_prunes_directory() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/lib.rs", b"code");
    write(dir.path(), ".git/objects/ab", b"code");

    let (report, summary) = finder_with(vec![ExcludeRule::Segment(".git".into())])
        .find_duplicates(dir.path())
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
fn test_glob_rule_excludes_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.tmp", b"scratch");
    write(dir.path(), "b.tmp", b"scratch");
    write(dir.path(), "a.txt", b"keep");
    write(dir.path(), "b.txt", b"keep");

    let (report, _) = finder_with(vec![ExcludeRule::Glob("**/*.tmp".into())])
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(report.len(), 1);
    assert!(report.get(&Hasher::hash_bytes(b"keep")).is_some());
    assert!(report.get(&Hasher::hash_bytes(b"scratch")).is_none());
}

#[test]
fn test_substring_rule_matches_inside_names() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cache_old/one", b"same");
    write(dir.path(), "mycache/two", b"same");
    write(dir.path(), "keep/three", b"same");

    let (report, summary) = finder_with(vec![ExcludeRule::Substring("cache".into())])
        .find_duplicates(dir.path())
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(summary.total_files, 1);
}

#[test]
fn test_default_rule_skips_recycle_bin_only() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docs/a.txt", b"doc");
    write(dir.path(), "docs/b.txt", b"doc");

    let (report, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(report.len(), 1);
}

#[test]
fn test_no_rules_scans_everything() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "x/1", b"v");
    write(dir.path(), "y/2", b"v");

    let (report, summary) = finder_with(Vec::new())
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(summary.total_files, 2);
}
