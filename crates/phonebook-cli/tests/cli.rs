use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

struct Env {
    temp: TempDir,
}

impl Env {
    fn new() -> Self {
        let temp = TempDir::new().expect("temp dir");
        let config_dir = temp.path().join("config").join("phonebook");
        fs::create_dir_all(&config_dir).expect("config dir");
        let config_path = config_dir.join("config.toml");
        fs::write(&config_path, "[latency]\nadd_ms = 0\ndelete_ms = 0\n").expect("write config");
        restrict_permissions(&config_path);
        Self { temp }
    }

    fn db_path(&self) -> PathBuf {
        self.temp.path().join("phonebook.sqlite3")
    }

    fn output(&self, args: &[&str]) -> Output {
        let db_path = self.db_path();
        cargo_bin_cmd!("phonebook")
            .env("XDG_CONFIG_HOME", self.temp.path().join("config"))
            .env("XDG_DATA_HOME", self.temp.path().join("data"))
            .env_remove("RUST_LOG")
            .args(["--db-path", db_path.to_str().expect("db path")])
            .args(args)
            .output()
            .expect("run command")
    }

    fn run(&self, args: &[&str]) -> String {
        let output = self.output(args);
        assert!(output.status.success(), "command failed: {:?}", output);
        String::from_utf8(output.stdout).expect("utf8")
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let stdout = self.run(&full);
        serde_json::from_str(&stdout).expect("parse json")
    }
}

fn restrict_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).expect("metadata").permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms).expect("chmod");
    }
}

#[test]
fn cli_add_list_delete_flow() {
    let env = Env::new();

    let created = env.run_json(&["add", "--name", " Jo ", "--phone", "9876543210"]);
    assert_eq!(created["name"], "Jo");
    assert_eq!(created["phone"], "+91 9876543210");
    let id = created["id"].as_i64().expect("id");

    env.run(&["add", "--name", "Ravi", "--phone", "+91-9123456780"]);

    let list = env.run_json(&["list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Jo");
    assert_eq!(items[1]["phone"], "+91 9123456780");

    let deleted = env.run(&["delete", &id.to_string(), "--yes"]);
    assert_eq!(deleted.trim(), format!("deleted {}", id));

    let list = env.run_json(&["list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Ravi");
}

#[test]
fn cli_rejects_invalid_input_with_exit_code() {
    let env = Env::new();

    let output = env.output(&["add", "--name", "A", "--phone", "9876543210"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("Please enter a valid name (at least 2 characters)."));

    let output = env.output(&["add", "--name", "Jo", "--phone", "5876543210"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("Please enter a valid Indian phone number."));

    let list = env.run(&["list"]);
    assert_eq!(list.trim(), "no contacts");
}

#[test]
fn cli_rejects_duplicate_phone() {
    let env = Env::new();
    env.run(&["add", "--name", "Jo", "--phone", "9876543210"]);

    let output = env.output(&["add", "--name", "Amit", "--phone", "+91-9876543210"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("Phone number already exists."));

    let list = env.run_json(&["list"]);
    assert_eq!(list.as_array().expect("array").len(), 1);
}

#[test]
fn cli_delete_unknown_id_succeeds() {
    let env = Env::new();
    env.run(&["add", "--name", "Jo", "--phone", "9876543210"]);

    let report = env.run_json(&["delete", "42"]);
    assert_eq!(report["deleted"], false);
    assert_eq!(report["remaining"], 1);

    let output = env.output(&["delete", "forty-two"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_delete_without_confirmation_keeps_contact() {
    let env = Env::new();
    let created = env.run_json(&["add", "--name", "Jo", "--phone", "9876543210"]);
    let id = created["id"].as_i64().expect("id").to_string();

    // stdin is empty, which counts as "no".
    let stdout = env.run(&["delete", &id]);
    assert_eq!(stdout.trim(), "cancelled");

    let list = env.run_json(&["list"]);
    assert_eq!(list.as_array().expect("array").len(), 1);
}

#[test]
fn cli_escapes_control_characters_in_names() {
    let env = Env::new();
    env.run(&["add", "--name", "Jo\u{1b}[2J", "--phone", "9876543210"]);

    let list = env.run(&["list"]);
    assert!(!list.contains('\u{1b}'));
    assert!(list.contains("Jo\\u{1b}[2J"));
}

#[test]
fn cli_reports_corrupt_storage() {
    let env = Env::new();
    env.run(&["list"]);

    corrupt_contacts_slot(&env);

    let output = env.output(&["list"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("stored contacts are corrupt"));
}

#[test]
fn cli_backup_writes_file() {
    let env = Env::new();
    env.run(&["add", "--name", "Jo", "--phone", "9876543210"]);

    let out = env.temp.path().join("backups").join("copy.sqlite3");
    let report = env.run_json(&["backup", "--out", out.to_str().expect("out path")]);
    assert!(out.exists());
    assert_eq!(report["contacts"], 1);
    assert!(report["size_bytes"].as_u64().expect("size") > 0);
}

#[test]
fn cli_backup_of_corrupt_slot_omits_count() {
    let env = Env::new();
    env.run(&["list"]);
    corrupt_contacts_slot(&env);

    let out = env.temp.path().join("corrupt.sqlite3");
    let report = env.run_json(&["backup", "--out", out.to_str().expect("out path")]);
    assert!(out.exists());
    assert!(report["contacts"].is_null());
}

#[test]
fn cli_emits_completions() {
    let output = cargo_bin_cmd!("phonebook")
        .args(["completions", "bash"])
        .output()
        .expect("run command");
    assert!(output.status.success());
    let script = String::from_utf8(output.stdout).expect("utf8");
    assert!(script.contains("phonebook"));
}

fn corrupt_contacts_slot(env: &Env) {
    let store = phonebook_store::Store::open(&env.db_path()).expect("open store");
    store.migrate().expect("migrate");
    store
        .slots()
        .set(1, "contacts", "not json")
        .expect("corrupt slot");
}
