use assetfs::Metadata;
use assetfs_demo::assets;
use std::io::{Read, Seek, SeekFrom};

fn names(entries: &[Metadata]) -> Vec<&str> {
    entries.iter().map(Metadata::name).collect()
}

#[test]
fn root_lists_top_level_entries() {
    let fs = assets();
    let mut root = fs.open("/").unwrap();
    let stat = root.stat();
    assert!(stat.is_dir());
    assert_eq!(stat.name(), "/");

    let entries = root.read_dir(0).unwrap();
    assert_eq!(names(&entries), vec!["a.txt", "bin", "sub"]);
    assert!(!entries[0].is_dir());
    assert!(entries[1].is_dir());
    assert!(entries[2].is_dir());
}

#[test]
fn text_file_reads_back() {
    let fs = assets();
    let mut file = fs.open("/a.txt").unwrap();
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    assert_eq!(text, "hello");
    assert_eq!(file.stat().len(), 5);
    file.close().unwrap();
}

#[test]
fn nested_directory_lists_children() {
    let fs = assets();
    let mut sub = fs.open("/sub").unwrap();
    assert_eq!(names(&sub.read_dir(0).unwrap()), vec!["b.txt"]);

    let mut file = fs.open("/sub/b.txt").unwrap();
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    assert_eq!(text, "world");
}

#[test]
fn binary_file_round_trips_every_byte() {
    let fs = assets();
    let mut file = fs.open("/bin/all-bytes.bin").unwrap();
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();

    let expected: Vec<u8> = (0..4).flat_map(|_| 0..=255u8).collect();
    assert_eq!(data.len(), 1024);
    assert_eq!(data, expected);
}

#[test]
fn missing_path_is_not_found() {
    let fs = assets();
    let err = fs.open("/nope.txt").unwrap_err();
    assert!(err.is_not_found());
    assert!(!fs.contains("/nope.txt"));
}

#[test]
#[should_panic(expected = "seek is not supported")]
fn seeking_embedded_file_panics() {
    let fs = assets();
    let mut file = fs.open("/a.txt").unwrap();
    let _ = file.seek(SeekFrom::Start(1));
}
