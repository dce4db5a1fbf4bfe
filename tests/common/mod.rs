// tests/common/mod.rs
//! Shared fixtures for the CLI tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use tempfile::TempDir;

const CGI_VARS: [&str; 6] =
    ["REMOTE_ADDR", "HTTP_X_FORWARDED_FOR", "HTTP_X_REAL_IP", "HTTP_CLIENT_IP", "HTTP_DNT", "HTTP_SEC_GPC"];

/// A scratch log directory with the record files in place.
pub struct CounterSite {
    dir: TempDir,
}

#[allow(dead_code)]
impl CounterSite {
    pub fn new() -> Self {
        Self::with_records(r#"{"currentCount":"0"}"#, r#"{"ipList":[""]}"#)
    }

    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn with_records(count: &str, ips: &str) -> Self {
        let site = Self::empty();
        fs::write(site.count_path(), count).unwrap();
        fs::write(site.ip_path(), ips).unwrap();
        site
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn count_path(&self) -> PathBuf {
        self.dir.path().join("counter.json")
    }

    pub fn ip_path(&self) -> PathBuf {
        self.dir.path().join("ips.json")
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn count_record(&self) -> String {
        fs::read_to_string(self.count_path()).unwrap()
    }

    pub fn ip_record(&self) -> String {
        fs::read_to_string(self.ip_path()).unwrap()
    }

    /// The binary pointed at this site, with no CGI variables inherited.
    pub fn cmd(&self) -> Command {
        let mut cmd = bin();
        for var in CGI_VARS {
            cmd.env_remove(var);
        }
        cmd.env_remove("RUST_LOG");
        cmd.arg("--log-dir").arg(self.path());
        cmd
    }
}

pub fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_visit_counter"))
}
