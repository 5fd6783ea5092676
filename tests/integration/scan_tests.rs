use dupfinder::duplicates::{DuplicateFinder, FinderConfig};
use dupfinder::scanner::Hasher;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_groups_identical_content_across_subdirectories() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.txt", b"same content");
    let b = write(dir.path(), "nested/deeper/b.txt", b"same content");
    write(dir.path(), "c.txt", b"different content");

    let finder = DuplicateFinder::with_defaults();
    let (report, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(report.len(), 1);
    let members = report.get(&Hasher::hash_bytes(b"same content")).unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.contains(&a));
    assert!(members.contains(&b));

    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.hashed_files, 3);
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.duplicate_files, 1);
    assert!(!summary.has_errors());
}

#[test]
fn test_names_do_not_matter() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "same_name.txt", b"one");
    write(dir.path(), "sub/same_name.txt", b"two");

    let (report, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_empty_files_form_a_group() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "empty1", b"");
    write(dir.path(), "empty2", b"");
    write(dir.path(), "empty3", b"");

    let (report, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    let empty = Hasher::hash_bytes(b"");
    assert_eq!(empty.to_hex(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    assert_eq!(report.get(&empty).map(<[PathBuf]>::len), Some(3));
}

#[test]
fn test_empty_directory_has_no_duplicates() {
    let dir = TempDir::new().unwrap();
    let (report, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(summary.total_files, 0);
}

#[test]
fn test_large_file_spans_several_buffers() {
    let dir = TempDir::new().unwrap();
    let content: Vec<u8> = (0..300_000u32).map(|i| (i % 251) as u8).collect();
    write(dir.path(), "big1.bin", &content);
    write(dir.path(), "big2.bin", &content);

    let mut altered = content.clone();
    *altered.last_mut().unwrap() ^= 0xff;
    write(dir.path(), "big3.bin", &altered);

    let finder = DuplicateFinder::new(FinderConfig::default().with_buffer_size(64 * 1024));
    let (report, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.get(&Hasher::hash_bytes(&content)).unwrap().len(), 2);
    assert_eq!(summary.bytes_hashed, 3 * 300_000);
}

#[test]
fn test_thread_count_does_not_change_result() {
    let dir = TempDir::new().unwrap();
    for i in 0..40 {
        write(dir.path(), &format!("d{}/f{}.txt", i % 5, i), format!("{}", i % 7).as_bytes());
    }

    let single = DuplicateFinder::new(FinderConfig::default().with_io_threads(1))
        .find_duplicates(dir.path())
        .unwrap()
        .0;
    let many = DuplicateFinder::new(FinderConfig::default().with_io_threads(8))
        .find_duplicates(dir.path())
        .unwrap()
        .0;

    assert_eq!(single, many);
    assert_eq!(single.len(), 7);
}
