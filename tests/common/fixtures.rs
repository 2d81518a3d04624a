//! Test fixtures: configuration contents and archive builders.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const TOOL_CONFIG: &str = r#"name = "gateway"
main = "src/index.js"
compatibility_date = "2024-01-01"
"#;

pub const APP_CONFIG: &str = r#"{"servers":[{"alias":"api","url":"https://api.example.com"}]}"#;

/// Zip archive holding `files` (path, contents)
pub fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, contents) in files {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Source bundle of `acme/gw` with a `worker/` subtree
pub fn bundle_zip() -> Vec<u8> {
    zip_bytes(&[
        ("acme-gw-1a2b3c/", ""),
        ("acme-gw-1a2b3c/README.md", "# gw\n"),
        ("acme-gw-1a2b3c/worker/", ""),
        ("acme-gw-1a2b3c/worker/package.json", r#"{"name":"worker"}"#),
        ("acme-gw-1a2b3c/worker/src/", ""),
        ("acme-gw-1a2b3c/worker/src/index.js", "export default {};\n"),
    ])
}

/// Release document as the release service returns it
pub fn release_json(
    tag: &str,
    assets: &[(&str, String)],
    zipball_url: Option<String>,
) -> serde_json::Value {
    let assets: Vec<serde_json::Value> = assets
        .iter()
        .map(|(name, url)| {
            serde_json::json!({
                "name": name,
                "browser_download_url": url,
                "size": 1,
            })
        })
        .collect();
    serde_json::json!({
        "tag_name": tag,
        "draft": false,
        "assets": assets,
        "zipball_url": zipball_url,
    })
}

/// Deployer configuration pointing at `api_url`, with a shell deploy command
///
/// The deploy command records its working directory, arguments and
/// `RELEASE_TAG` into `deploy-record` one level above its working directory.
pub fn deployer_toml(api_url: &str, extra: &str) -> String {
    format!(
        r#"[release]
owner = "acme"
repo = "gw"
api_url = "{api_url}"

[deploy]
setup = []

[deploy.command]
program = "sh"
args = ["-c", "{script}", "deploy"]
{extra}
"#,
        api_url = api_url,
        script = DEPLOY_SCRIPT,
        extra = extra,
    )
}

/// Shell body of the fake deploy command; `$DEPLOY_EXIT` selects its exit code
pub const DEPLOY_SCRIPT: &str = r#"test -f wrangler.toml || exit 9; printf '%s\\n' \"$(pwd)\" \"$RELEASE_TAG\" \"$*\" > ../deploy-record; if [ -n \"$DEPLOY_EXIT\" ]; then echo 'auth error' >&2; exit \"$DEPLOY_EXIT\"; fi"#;
