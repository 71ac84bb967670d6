//! Common test support utilities and fixtures
//!
//! Shared by the CLI and pipeline integration tests.

#![allow(dead_code)]

use serde_json::json;
use std::{fs, path::Path, path::PathBuf, process::Command};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Result of running a CLI command
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A test workspace with temporary directory and config management
pub struct Workspace {
    pub root: TempDir,
    pub config_path: PathBuf,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Create a new temporary workspace
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let config_path = root.path().join(".prfiles.toml");
        Self { root, config_path }
    }

    /// Write configuration TOML to the workspace
    pub fn write_config(&self, toml: &str) {
        fs::write(&self.config_path, toml).expect("Failed to write config");
    }

    /// Write a file to upload, returning its absolute path
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let file = self.root.path().join(name);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file, contents).expect("Failed to write file");
        file
    }

    /// Get the workspace root path
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Get the config file path as string
    pub fn config_str(&self) -> &str {
        self.config_path.to_str().expect("Config path not UTF-8")
    }
}

/// Run the prfiles CLI with given arguments
///
/// GitHub variables from the calling environment are removed so only the
/// arguments and the workspace config are in play.
pub fn run_cli(args: &[&str], cwd: Option<&Path>) -> CliOutput {
    let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "--quiet", "--manifest-path", manifest, "--"]);
    cmd.args(args);
    cmd.env_remove("GITHUB_AUTH_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_USER_NAME")
        .env_remove("RUST_LOG");

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().expect("Failed to execute cargo run");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Mount the happy path for `octo/hello`: base `main` at `S1`, new branch
/// `docs` at `S2`, two blobs, tree `T1`, commit `C1` and pull request #5
pub async fn mount_happy_path(server: &MockServer) {
    let responses = [
        ("GET", "/repos/octo/hello/branches/main", 200_u16, json!({"commit": {"sha": "S1"}})),
        ("POST", "/repos/octo/hello/git/refs", 201, json!({"object": {"sha": "S2"}})),
        ("POST", "/repos/octo/hello/git/trees", 201, json!({"sha": "T1"})),
        (
            "POST",
            "/repos/octo/hello/git/commits",
            201,
            json!({"sha": "C1", "html_url": "https://github.com/octo/hello/commit/C1"}),
        ),
        (
            "POST",
            "/repos/octo/hello/git/refs/heads/docs",
            200,
            json!({"object": {"sha": "C1"}}),
        ),
        (
            "POST",
            "/repos/octo/hello/pulls",
            201,
            json!({
                "number": 5,
                "url": "https://api.github.com/repos/octo/hello/pulls/5",
                "html_url": "https://github.com/octo/hello/pull/5",
            }),
        ),
        (
            "POST",
            "/repos/octo/hello/issues/5/labels",
            200,
            json!([{"name": "docs"}]),
        ),
    ];

    for (verb, endpoint, status, body) in responses {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path("/repos/octo/hello/git/blobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "B1"})))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/hello/git/blobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"sha": "B2"})))
        .with_priority(2)
        .mount(server)
        .await;
}
