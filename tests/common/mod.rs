use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    tmp: TempDir,
    pub config: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let db = tmp.path().join("intake.db");
        let config = tmp.path().join("intake.toml");

        fs::write(
            &config,
            format!(
                "[database]\npath = {:?}\n\n[intake]\nhistory_limit = 5\n\n[logging]\nfilter = \"warn\"\n",
                db.to_str().expect("db path utf8")
            ),
        )
        .expect("write config");

        Self { tmp, config }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    pub fn write_json(&self, name: &str, value: &Value) -> String {
        let path = self.path(name);
        fs::write(&path, serde_json::to_string_pretty(value).expect("serialize fixture"))
            .expect("write fixture");
        path.to_str().expect("fixture path utf8").to_string()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("comp-intake");
        cmd.current_dir(self.tmp.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config.to_str().expect("config path utf8"));
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}
