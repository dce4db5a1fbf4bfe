// tests/cli/configuration.rs
use predicates::prelude::*;

use crate::common::{CounterSite, bin};

#[test]
fn missing_log_dir_is_a_configuration_error() {
    let site = CounterSite::empty();
    let missing = site.path().join("nope");

    bin()
        .env_remove("REMOTE_ADDR")
        .arg("--log-dir")
        .arg(&missing)
        .arg("show")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("logDir"));
    assert!(!missing.exists());
}

#[test]
fn missing_record_files_are_a_configuration_error() {
    let site = CounterSite::empty();

    site.cmd().arg("show").assert().code(2).stderr(predicate::str::contains("countFile"));
}

#[test]
fn unknown_set_key_is_rejected() {
    let site = CounterSite::new();

    site.cmd()
        .args(["--set", "useImages=true", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown option 'useImages'"));
}

#[test]
fn flags_override_set_pairs_which_override_the_options_file() {
    let site = CounterSite::with_records(r#"{"currentCount":"7"}"#, "");
    let options = site.write("options.json", r##"{"visitorTextString":"file #%s","uniqueOnly":true}"##);

    site.cmd()
        .arg("--config")
        .arg(&options)
        .args(["--set", "visitorTextString=set #%s", "show"])
        .assert()
        .success()
        .stdout("set #7\n");

    site.cmd()
        .arg("--config")
        .arg(&options)
        .args(["--set", "visitorTextString=set #%s", "--visitor-text", "flag #%s", "show"])
        .assert()
        .success()
        .stdout("flag #7\n");

    site.cmd()
        .arg("--config")
        .arg(&options)
        .args(["--set", "uniqueOnly=false", "hit"])
        .assert()
        .success()
        .stdout("file #8\n");
}

#[test]
fn options_file_with_unknown_key_is_rejected() {
    let site = CounterSite::new();
    let options = site.write("options.json", r#"{"log_dir":"/tmp"}"#);

    site.cmd().arg("--config").arg(&options).arg("show").assert().code(2);
}

#[test]
fn bad_visitor_text_is_rejected() {
    let site = CounterSite::new();

    site.cmd()
        .args(["--visitor-text", "no placeholder", "show"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("visitorTextString"));
}

#[test]
fn init_creates_directory_and_records() {
    let site = CounterSite::empty();
    let logs = site.path().join("counter").join("logs");

    bin()
        .arg("--log-dir")
        .arg(&logs)
        .args(["init", "--start", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));
    assert_eq!(std::fs::read_to_string(logs.join("counter.json")).unwrap(), r#"{"currentCount":"100"}"#);
    assert_eq!(std::fs::read_to_string(logs.join("ips.json")).unwrap(), r#"{"ipList":[]}"#);

    bin()
        .arg("--log-dir")
        .arg(&logs)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("use --force"));
    assert_eq!(std::fs::read_to_string(logs.join("counter.json")).unwrap(), r#"{"currentCount":"100"}"#);

    bin().arg("--log-dir").arg(&logs).args(["init", "--force"]).assert().success();
    assert_eq!(std::fs::read_to_string(logs.join("counter.json")).unwrap(), r#"{"currentCount":"0"}"#);
}

#[test]
fn migrate_imports_legacy_text_records() {
    let site = CounterSite::empty();
    let count = site.write("counter.txt", "250\n");
    let ips = site.write("ips.txt", "8.8.8.8\n1.1.1.1\n");

    site.cmd()
        .arg("migrate")
        .arg("--legacy-count")
        .arg(&count)
        .arg("--legacy-ips")
        .arg(&ips)
        .assert()
        .success()
        .stdout(predicate::str::contains("migrated count 250 and 2 address(es)"));

    assert_eq!(site.count_record(), r#"{"currentCount":"250"}"#);
    site.cmd().args(["hit", "--address", "1.1.1.1"]).assert().success().stdout("You are visitor #250\n");
}
