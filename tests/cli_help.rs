use std::process::Command;

#[test]
fn test_help_lists_inputs() {
    let bin = env!("CARGO_BIN_EXE_release-deployer");

    let output = Command::new(bin).arg("--help").output().unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--version-tag", "--config-json", "--tool-config", "--strategy", "--json"] {
        assert!(
            stdout.contains(flag),
            "help output should mention {}; got:\n{}",
            flag,
            stdout
        );
    }
}

#[test]
fn test_version_flag() {
    let bin = env!("CARGO_BIN_EXE_release-deployer");

    let output = Command::new(bin).arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_strategy_is_rejected() {
    let bin = env!("CARGO_BIN_EXE_release-deployer");

    let output = Command::new(bin)
        .args(["--strategy", "tarball"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown staging strategy 'tarball'"), "{}", stderr);
}
