//! Property tests for locating the top-level directory of a bundle.

use proptest::prelude::*;

use release_deployer::domain::services::{archive_prefix, locate_top_level, TopLevelEntry};
use release_deployer::ErrorKind;

fn entry_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._-]{1,24}").unwrap()
}

fn entries() -> impl Strategy<Value = Vec<TopLevelEntry>> {
    proptest::collection::vec(
        (entry_name(), any::<bool>()).prop_map(|(name, is_dir)| TopLevelEntry { name, is_dir }),
        0..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Success means exactly one directory carries the prefix.
    #[test]
    fn property_locate_succeeds_only_on_unique_match(
        entries in entries(),
        prefix in "[a-z]{1,4}-",
    ) {
        let candidates: Vec<&TopLevelEntry> = entries
            .iter()
            .filter(|e| e.is_dir && e.name.starts_with(&prefix))
            .collect();

        match locate_top_level(&entries, &prefix) {
            Ok(name) => {
                prop_assert_eq!(candidates.len(), 1);
                prop_assert_eq!(&name, &candidates[0].name);
            }
            Err(err) => {
                prop_assert_ne!(candidates.len(), 1);
                prop_assert_eq!(err.kind(), ErrorKind::ExtractionLayout);
            }
        }
    }

    /// PROPERTY: Files never count as the bundle directory.
    #[test]
    fn property_files_are_ignored(
        owner in "[a-z]{1,8}",
        repo in "[a-z]{1,8}",
        revision in "[0-9a-f]{7}",
    ) {
        let prefix = archive_prefix(&owner, &repo);
        let name = format!("{}{}", prefix, revision);
        let entries = vec![
            TopLevelEntry::file(format!("{}.txt", name)),
            TopLevelEntry::dir(name.clone()),
        ];
        prop_assert_eq!(locate_top_level(&entries, &prefix).unwrap(), name);
    }
}
