//! Integration tests for link maintenance: include, update and create

use super::test_utils::LinkTree;
use linkfs::checksum::checksum;
use linkfs::link::{self, ChecksumUpdate, Link};
use linkfs::LinkError;
use std::path::Path;

const FIELDS: &[u8] = b"- name: source.ip\n  type: ip\n";
const AGENT: &[u8] = b"- name: agent.id\n  type: keyword\n";

fn package_tree() -> LinkTree {
    let tree = LinkTree::new();
    tree.file("shared/fields.yml", FIELDS)
        .file("shared/agent.yml", AGENT)
        .unchecked_link("src/links/fields.yml.link", "../../shared/fields.yml")
        .unchecked_link("src/links/nested/agent.yml.link", "../../../shared/agent.yml");
    tree
}

#[test]
fn test_include_all_into_other_directory() {
    let tree = package_tree();
    let sandbox = tree.sandbox();

    let included = link::include_all(&sandbox, "src/links", "dist/links").unwrap();

    assert_eq!(included.len(), 2);
    assert_eq!(tree.read("dist/links/fields.yml"), FIELDS);
    assert_eq!(tree.read("dist/links/nested/agent.yml"), AGENT);
    assert!(!tree.root().join("src/links/fields.yml").exists());

    assert_eq!(
        tree.read_string("src/links/fields.yml.link"),
        format!("../../shared/fields.yml {}\n", checksum(FIELDS))
    );
    assert_eq!(
        tree.read_string("src/links/nested/agent.yml.link"),
        format!("../../../shared/agent.yml {}\n", checksum(AGENT))
    );
    assert!(included.iter().all(Link::is_up_to_date));
}

#[test]
fn test_include_all_in_place() {
    let tree = package_tree();
    let sandbox = tree.sandbox();

    link::include_all(&sandbox, "src/links", "").unwrap();

    assert_eq!(tree.read("src/links/fields.yml"), FIELDS);
    assert_eq!(tree.read("src/links/nested/agent.yml"), AGENT);
}

#[test]
fn test_include_all_is_repeatable() {
    let tree = package_tree();
    let sandbox = tree.sandbox();

    link::include_all(&sandbox, "src/links", "dist").unwrap();
    let first = tree.read_string("src/links/fields.yml.link");
    link::include_all(&sandbox, "src/links", "dist").unwrap();

    assert_eq!(tree.read_string("src/links/fields.yml.link"), first);
    assert_eq!(tree.read("dist/fields.yml"), FIELDS);
}

#[test]
fn test_include_all_with_no_links_is_empty() {
    let tree = LinkTree::new();
    tree.file("src/links/readme.md", b"no links here\n");

    let included = link::include_all(&tree.sandbox(), "src/links", "dist").unwrap();
    assert!(included.is_empty());
    assert!(!tree.root().join("dist").exists());
}

#[test]
fn test_update_all_reports_changes_once() {
    let tree = package_tree();
    let sandbox = tree.sandbox();

    let first = link::update_all(&sandbox, "src").unwrap();
    assert!(first.iter().all(|(_, u)| *u == ChecksumUpdate::Changed));

    let second = link::update_all(&sandbox, "src").unwrap();
    assert!(second.iter().all(|(_, u)| *u == ChecksumUpdate::Unchanged));
    assert!(link::stale_links(&sandbox, "src").unwrap().is_empty());
}

#[test]
fn test_stale_links_lists_only_stale() {
    let tree = package_tree();
    let sandbox = tree.sandbox();
    link::update_all(&sandbox, "src").unwrap();
    tree.file("shared/agent.yml", b"- name: agent.name\n");

    let stale = link::stale_links(&sandbox, "src").unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(
        stale[0].link_file_path(),
        Path::new("src/links/nested/agent.yml.link")
    );
}

#[test]
fn test_create_link_then_resolve() {
    let tree = package_tree();
    let sandbox = tree.sandbox();

    let created = link::create_link(&sandbox, "pkg/agent.yml.link", "../shared/agent.yml").unwrap();
    assert!(created.is_up_to_date());

    let parsed = Link::parse(&sandbox, "pkg/agent.yml.link").unwrap();
    assert_eq!(parsed, created);
    assert_eq!(parsed.target_file_path(), Path::new("pkg/agent.yml"));
}

#[test]
fn test_create_link_requires_suffix() {
    let tree = package_tree();
    let err = link::create_link(&tree.sandbox(), "pkg/agent.yml", "../shared/agent.yml").unwrap_err();
    assert!(matches!(err, LinkError::NotALinkFile { .. }));
}

#[test]
fn test_include_all_stops_at_missing_reference() {
    let tree = package_tree();
    tree.unchecked_link("src/links/broken.yml.link", "../../shared/missing.yml");

    let err = link::include_all(&tree.sandbox(), "src/links", "dist").unwrap_err();
    assert!(matches!(err, LinkError::ReferenceUnavailable { .. }));
    assert!(!tree.root().join("dist").exists());
}
