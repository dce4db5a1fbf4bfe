// tests/cli/smoke_tests.rs
use predicates::prelude::*;
use serde_json::Value;

use crate::common::{CounterSite, bin};

#[test]
fn shows_help() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("visit_counter").and(predicate::str::contains("hit")));
}

#[test]
fn hit_counts_a_new_visitor_once() {
    let site = CounterSite::new();

    for _ in 0..2 {
        site.cmd().args(["hit", "--address", "8.8.8.8"]).assert().success().stdout("You are visitor #1\n");
    }
    assert_eq!(site.count_record(), r#"{"currentCount":"1"}"#);
    assert_eq!(site.ip_record(), r#"{"ipList":["8.8.8.8"]}"#);
}

#[test]
fn hit_reads_remote_addr_from_the_environment() {
    let site = CounterSite::new();

    site.cmd().env("REMOTE_ADDR", "1.1.1.1").arg("hit").assert().success();
    site.cmd().env("REMOTE_ADDR", "9.9.9.9").arg("hit").assert().success().stdout("You are visitor #2\n");
}

#[test]
fn hit_without_an_address_fails_in_unique_mode() {
    let site = CounterSite::new();

    site.cmd()
        .arg("hit")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unable to determine the visitor's address"));
    assert_eq!(site.count_record(), r#"{"currentCount":"0"}"#);
}

#[test]
fn non_unique_mode_counts_every_hit() {
    let site = CounterSite::with_records(r#"{"currentCount":"998"}"#, "");

    for _ in 0..3 {
        site.cmd().args(["hit", "--unique-only", "false"]).assert().success();
    }
    site.cmd().arg("show").assert().success().stdout("You are visitor #1,001\n");
}

#[test]
fn honoured_dnt_renders_without_counting() {
    let site = CounterSite::with_records(r#"{"currentCount":"1000"}"#, r#"{"ipList":[]}"#);

    site.cmd()
        .args(["--honor-dnt", "hit", "--address", "8.8.8.8", "--dnt"])
        .assert()
        .success()
        .stdout("You are visitor #1,000\n");
    assert_eq!(site.count_record(), r#"{"currentCount":"1000"}"#);
    assert_eq!(site.ip_record(), r#"{"ipList":[]}"#);
}

#[test]
fn hit_json_reports_disposition() {
    let site = CounterSite::new();
    site.cmd().args(["hit", "--address", "8.8.8.8"]).assert().success();

    let output = site.cmd().args(["hit", "--address", "8.8.8.8", "--format", "json"]).output().unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["disposition"], "repeat");
    assert_eq!(json["rendered"], "You are visitor #1");
}

#[test]
fn trusted_proxy_header_is_used() {
    let site = CounterSite::new();

    site.cmd()
        .env("REMOTE_ADDR", "10.0.0.1")
        .env("HTTP_X_FORWARDED_FOR", "192.168.0.7, 8.8.4.4")
        .args(["hit", "--trust-proxy"])
        .assert()
        .success();
    site.cmd().args(["addresses", "--json"]).assert().success().stdout("[\"8.8.4.4\"]\n");
}

#[test]
fn explicit_address_wins_over_forwarded_header() {
    let site = CounterSite::new();

    site.cmd()
        .env("HTTP_X_FORWARDED_FOR", "8.8.4.4")
        .args(["hit", "--address", "1.1.1.1", "--trust-proxy"])
        .assert()
        .success();
    site.cmd().arg("addresses").assert().success().stdout("1.1.1.1\n");
}

#[test]
fn as_image_renders_digit_tags() {
    let site = CounterSite::with_records(r#"{"currentCount":"42"}"#, "");
    let images = site.path().join("digits");
    std::fs::create_dir(&images).unwrap();

    let expected = format!(
        "<img src=\"{dir}/4.gif\" alt=\"4\" />&nbsp;<img src=\"{dir}/2.gif\" alt=\"2\" />\n",
        dir = images.display().to_string().replace('\\', "/")
    );
    site.cmd()
        .args(["--as-image", "--image-ext", "gif", "--image-dir"])
        .arg(&images)
        .arg("show")
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn addresses_lists_one_per_line() {
    let site = CounterSite::with_records(r#"{"currentCount":"2"}"#, r#"{"ipList":["","8.8.8.8","1.1.1.1"]}"#);

    site.cmd().arg("addresses").assert().success().stdout("8.8.8.8\n1.1.1.1\n");
}

#[test]
fn corrupt_count_fails_without_resetting() {
    let site = CounterSite::with_records("{\"currentCount\":", "");

    site.cmd()
        .args(["hit", "--unique-only", "false"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("counter record"));
    assert_eq!(site.count_record(), "{\"currentCount\":");
}
