//! Property tests for configuration overlay and tree relocation.

use proptest::prelude::*;
use tempfile::tempdir;

use release_deployer::application::{overlay, relocate};

fn relative_path() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap();
    proptest::collection::vec(segment, 1..=4).prop_map(|segments| segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Overlay copies bytes exactly, replacing any previous content.
    #[test]
    fn property_overlay_is_byte_exact(
        contents in proptest::collection::vec(any::<u8>(), 0..2048),
        previous in proptest::collection::vec(any::<u8>(), 0..64),
        target in relative_path(),
    ) {
        let dir = tempdir().unwrap();
        let source = dir.path().join("input.bin");
        std::fs::write(&source, &contents).unwrap();

        let target = dir.path().join("tree").join(&target);
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, &previous).unwrap();

        overlay("configJson", &source, &target).unwrap();

        prop_assert_eq!(std::fs::read(&target).unwrap(), contents);
    }

    /// PROPERTY: Relocating twice leaves only the latest tree at the target.
    #[test]
    fn property_relocate_replaces_previous_tree(
        first in "[a-z]{1,8}",
        second in "[a-z]{1,8}",
    ) {
        let dir = tempdir().unwrap();
        let target = dir.path().join("worker");

        for (round, marker) in [(0, &first), (1, &second)] {
            let from = dir.path().join(format!("scratch-{}", round));
            std::fs::create_dir_all(&from).unwrap();
            std::fs::write(from.join(format!("{}.js", marker)), marker.as_bytes()).unwrap();
            relocate(&from, &target).unwrap();
            prop_assert!(!from.exists());
        }

        let names: Vec<String> = std::fs::read_dir(&target)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        prop_assert_eq!(names, vec![format!("{}.js", second)]);
    }
}
