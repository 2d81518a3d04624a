//! Property tests for release document parsing.

use proptest::prelude::*;

use release_deployer::infrastructure::github::parse_release;
use release_deployer::ErrorKind;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Arbitrary bytes never panic; failures are transport errors.
    #[test]
    fn property_parse_release_never_panics(
        body in proptest::collection::vec(any::<u8>(), 0..512),
        tag in "[A-Za-z0-9._/-]{1,16}",
    ) {
        if let Err(err) = parse_release(&body, &tag) {
            prop_assert_eq!(err.kind(), ErrorKind::Transport);
        }
    }

    /// PROPERTY: Asset order from the service is preserved.
    #[test]
    fn property_asset_order_preserved(
        names in proptest::collection::vec("[a-z]{1,8}\\.zip", 0..6),
    ) {
        let assets: Vec<serde_json::Value> = names
            .iter()
            .map(|n| serde_json::json!({"name": n, "browser_download_url": format!("https://dl/{}", n)}))
            .collect();
        let body = serde_json::json!({"tag_name": "v1", "assets": assets}).to_string();

        let release = parse_release(body.as_bytes(), "v1").unwrap();
        let parsed: Vec<String> = release.assets.into_iter().map(|a| a.name).collect();
        prop_assert_eq!(parsed, names);
    }
}
