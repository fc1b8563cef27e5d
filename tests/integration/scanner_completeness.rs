//! Integration tests for link discovery

use super::test_utils::LinkTree;
use linkfs::{LinkError, LinkScanner};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[test]
fn test_scanner_finds_every_link_exactly_once() {
    let tree = LinkTree::new();
    tree.file("shared/base.yml", b"base\n");

    let mut expected = BTreeSet::new();
    for depth in 0..4 {
        for i in 0..5 {
            let dir: String = (0..depth).map(|d| format!("level{}/", d)).collect();
            let link = format!("pkg/{}f{}.yml.link", dir, i);
            let included = format!("{}shared/base.yml", "../".repeat(depth + 1));
            tree.link(&link, &included, b"base\n");
            expected.insert(PathBuf::from(link));
        }
        tree.file(&format!("pkg/{}plain{}.yml", "level0/".repeat(depth.min(1)), depth), b"x");
    }

    let sandbox = tree.sandbox();
    let links = LinkScanner::new(&sandbox).scan("pkg").unwrap();

    let found: Vec<PathBuf> = links.iter().map(|l| l.link_file_path().to_path_buf()).collect();
    let unique: BTreeSet<PathBuf> = found.iter().cloned().collect();
    assert_eq!(found.len(), 20);
    assert_eq!(unique, expected);
    assert!(links.iter().all(|l| l.is_up_to_date()));
}

#[test]
fn test_scan_is_deterministic() {
    let tree = LinkTree::new();
    tree.file("shared/base.yml", b"base\n");
    for name in ["z", "m", "a", "q"] {
        tree.link(&format!("pkg/{name}.yml.link"), "../shared/base.yml", b"base\n");
    }
    let sandbox = tree.sandbox();
    let scanner = LinkScanner::new(&sandbox);

    let first = scanner.find("pkg").unwrap();
    let second = scanner.find("pkg").unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0], PathBuf::from("pkg/a.yml.link"));
    assert_eq!(first[3], PathBuf::from("pkg/z.yml.link"));
}

#[test]
fn test_scan_from_root() {
    let tree = LinkTree::new();
    tree.file("base.yml", b"base\n")
        .link("a.yml.link", "base.yml", b"base\n")
        .link("sub/b.yml.link", "../base.yml", b"base\n");

    let sandbox = tree.sandbox();
    assert_eq!(LinkScanner::new(&sandbox).find(".").unwrap().len(), 2);
}

#[test]
fn test_scan_missing_directory_is_scan_error() {
    let tree = LinkTree::new();
    let sandbox = tree.sandbox();

    let err = LinkScanner::new(&sandbox).scan("does/not/exist").unwrap_err();
    assert!(matches!(err, LinkError::Scan { .. }));
}

#[test]
fn test_one_malformed_link_fails_the_scan() {
    let tree = LinkTree::new();
    tree.file("base.yml", b"base\n")
        .link("pkg/a.yml.link", "../base.yml", b"base\n")
        .file("pkg/b.yml.link", b"\n");

    let sandbox = tree.sandbox();
    let err = LinkScanner::new(&sandbox).scan("pkg").unwrap_err();
    assert!(matches!(err, LinkError::MalformedLink { .. }));
}

#[cfg(unix)]
#[test]
fn test_directory_symlink_out_of_root_is_not_walked() {
    let outside = LinkTree::new();
    outside
        .file("secret.yml", b"secret\n")
        .link("evil.yml.link", "secret.yml", b"secret\n");

    let tree = LinkTree::new();
    tree.file("base.yml", b"base\n")
        .link("pkg/a.yml.link", "../base.yml", b"base\n");
    std::os::unix::fs::symlink(outside.root(), tree.root().join("pkg/outside")).unwrap();

    let sandbox = tree.sandbox();
    let found = LinkScanner::new(&sandbox).find("pkg").unwrap();
    assert_eq!(found, vec![PathBuf::from("pkg/a.yml.link")]);

    let links = LinkScanner::new(&sandbox).scan("pkg").unwrap();
    assert_eq!(links.len(), 1);
    assert!(links.iter().all(|l| !l.link_file_path().starts_with("pkg/outside")));
}

#[cfg(unix)]
#[test]
fn test_link_file_symlink_out_of_root_fails_the_scan() {
    let outside = LinkTree::new();
    outside
        .file("secret.yml", b"secret\n")
        .link("evil.yml.link", "secret.yml", b"secret\n");

    let tree = LinkTree::new();
    tree.file("base.yml", b"base\n")
        .link("pkg/a.yml.link", "../base.yml", b"base\n");
    std::os::unix::fs::symlink(
        outside.root().join("evil.yml.link"),
        tree.root().join("pkg/bad.yml.link"),
    )
    .unwrap();

    let sandbox = tree.sandbox();
    let found = LinkScanner::new(&sandbox).find("pkg").unwrap();
    assert!(found.contains(&PathBuf::from("pkg/bad.yml.link")));

    let err = LinkScanner::new(&sandbox).scan("pkg").unwrap_err();
    assert!(matches!(err, LinkError::OutsideSandbox { .. }), "{err}");
}
