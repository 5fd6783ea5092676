use dupfinder::duplicates::DuplicateFinder;
use dupfinder::scanner::Hasher;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_duplicates_across_roots() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let a = first.path().join("photo.jpg");
    let b = second.path().join("copy_of_photo.jpg");
    fs::write(&a, b"jpeg bytes").unwrap();
    fs::write(&b, b"jpeg bytes").unwrap();
    fs::write(first.path().join("unique.txt"), b"only here").unwrap();

    let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
    let (report, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&roots)
        .unwrap();

    assert_eq!(summary.roots, 2);
    assert_eq!(summary.total_files, 3);
    assert_eq!(
        report.get(&Hasher::hash_bytes(b"jpeg bytes")).unwrap(),
        &[a, b][..]
    );
}

#[test]
fn test_members_follow_root_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let in_first = first.path().join("z.bin");
    let in_second = second.path().join("a.bin");
    fs::write(&in_first, b"payload").unwrap();
    fs::write(&in_second, b"payload").unwrap();

    let digest = Hasher::hash_bytes(b"payload");

    let (forward, _) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[first.path().to_path_buf(), second.path().to_path_buf()])
        .unwrap();
    assert_eq!(forward.get(&digest).unwrap(), &[in_first.clone(), in_second.clone()][..]);

    let (backward, _) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[second.path().to_path_buf(), first.path().to_path_buf()])
        .unwrap();
    assert_eq!(backward.get(&digest).unwrap(), &[in_second, in_first][..]);
}

#[test]
fn test_same_root_twice_reports_every_file_as_duplicate() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("single.txt");
    fs::write(&file, b"alone").unwrap();

    let roots: Vec<PathBuf> = vec![dir.path().to_path_buf(), dir.path().to_path_buf()];
    let (report, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&roots)
        .unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(
        report.get(&Hasher::hash_bytes(b"alone")).unwrap(),
        &[file.clone(), file][..]
    );
}

#[test]
fn test_nested_roots_are_not_merged() {
    let dir = TempDir::new().unwrap();
    let inner = dir.path().join("inner");
    fs::create_dir(&inner).unwrap();
    fs::write(inner.join("x.txt"), b"x").unwrap();

    let (report, summary) = DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[dir.path().to_path_buf(), inner.clone()])
        .unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(report.len(), 1);
}

#[test]
fn test_no_roots_is_an_error() {
    assert!(DuplicateFinder::with_defaults()
        .find_duplicates_in_paths(&[])
        .is_err());
}
