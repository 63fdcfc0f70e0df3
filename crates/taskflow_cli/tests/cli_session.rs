use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskflow-{nanos}-{name}"))
}

fn run(dir: &PathBuf, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_taskflow");
    Command::new(exe)
        .args(args)
        .env("TASKFLOW_DATA_DIR", dir)
        .output()
        .expect("failed to run command")
}

#[test]
fn login_persists_the_display_name_across_invocations() {
    let dir = temp_dir("cli-login");

    let output = run(&dir, &["login", "Rin"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Signed in as Rin"));
    assert_eq!(
        std::fs::read_to_string(dir.join("taskTrackerUser")).unwrap(),
        "Rin"
    );

    let output = run(&dir, &["whoami"]);
    std::fs::remove_dir_all(&dir).ok();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Rin");
}

#[test]
fn login_rejects_a_blank_name() {
    let dir = temp_dir("cli-login-blank");

    let output = run(&dir, &["login", "   "]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: invalid_input"));
}

#[test]
fn logout_forgets_the_display_name() {
    let dir = temp_dir("cli-logout");

    assert!(run(&dir, &["login", "Rin"]).status.success());
    let output = run(&dir, &["logout"]);
    assert!(output.status.success());
    let user_file = dir.join("taskTrackerUser");
    let exists = user_file.exists();

    let output_whoami = run(&dir, &["whoami"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(!exists);
    assert!(output_whoami.status.success());
    assert!(String::from_utf8_lossy(&output_whoami.stdout).contains("Not signed in"));
}

#[test]
fn whoami_emits_json_when_asked() {
    let dir = temp_dir("cli-whoami-json");

    assert!(run(&dir, &["login", "Rin"]).status.success());
    let output = run(&dir, &["whoami", "--json"]);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(json["user"], "Rin");
}
