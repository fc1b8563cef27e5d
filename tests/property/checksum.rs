//! Checksum determinism and link update properties

use super::fixture::LinkTree;
use linkfs::checksum::{checksum, checksum_reader, CHECKSUM_HEX_LEN};
use linkfs::link::Link;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Same content always yields the same lowercase hex digest
    #[test]
    fn checksum_is_deterministic(content in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let first = checksum(&content);
        prop_assert_eq!(&first, &checksum(&content));
        prop_assert_eq!(first.len(), CHECKSUM_HEX_LEN);
        prop_assert!(first.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    /// Streaming and in-memory checksums agree
    #[test]
    fn checksum_reader_matches_slice(content in proptest::collection::vec(any::<u8>(), 0..20_000)) {
        let streamed = checksum_reader(content.as_slice()).unwrap();
        prop_assert_eq!(streamed, checksum(&content));
    }

    /// A link whose checksum was just recorded parses as up to date and
    /// a second update writes nothing
    #[test]
    fn update_checksum_is_idempotent(
        content in proptest::collection::vec(any::<u8>(), 0..512),
        name in "[a-z]{1,8}",
    ) {
        let tree = LinkTree::new();
        tree.file("shared/data.bin", &content)
            .unchecked_link(&format!("pkg/{}.bin.link", name), "../shared/data.bin");
        let sandbox = tree.sandbox();
        let link_path = format!("pkg/{}.bin.link", name);

        let (updated, first) = Link::parse(&sandbox, &link_path).unwrap().update_checksum(&sandbox).unwrap();
        prop_assert!(first.is_changed());
        prop_assert!(updated.is_up_to_date());

        let written = tree.read_string(&link_path);
        let (_, second) = Link::parse(&sandbox, &link_path).unwrap().update_checksum(&sandbox).unwrap();
        prop_assert!(!second.is_changed());
        prop_assert_eq!(tree.read_string(&link_path), written);
    }

    /// Remapping never touches anything but the target path
    #[test]
    fn remap_only_changes_target(to in "[a-z]{1,6}(/[a-z]{1,6}){0,2}") {
        let tree = LinkTree::new();
        tree.file("shared/a.yml", b"a\n")
            .unchecked_link("src/links/a.yml.link", "../../shared/a.yml");
        let sandbox = tree.sandbox();

        let link = Link::parse(&sandbox, "src/links/a.yml.link").unwrap();
        let remapped = link.clone().remap_target_directory("src/links", &to);

        let expected_target = format!("{}/a.yml", to);
        prop_assert_eq!(remapped.target_file_path(), std::path::Path::new(&expected_target));
        prop_assert_eq!(remapped.link_file_path(), link.link_file_path());
        prop_assert_eq!(remapped.included_path(), link.included_path());
        prop_assert_eq!(remapped.declared_checksum(), link.declared_checksum());
    }
}
