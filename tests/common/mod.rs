#![allow(dead_code)]
//! Shared test utilities for CLI integration tests.
//!
//! A fake container runtime is a small shell script in a temp directory. It
//! records its argv (one argument per line) to `argv.txt` and then prints a
//! canned inspection document, or fails like an unreachable daemon would.

use assert_cmd::Command;
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn bridge_ip_cmd() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("bridge-ip").expect("binary not found");
    cmd.env_remove("BRIDGE_IP_RUNTIME")
        .env_remove("BRIDGE_IP_SUDO")
        .env_remove("RUST_LOG");
    cmd
}

/// Inspection document for the bridge network with the given
/// `(id, name, ipv4_address)` containers.
pub fn bridge_json(containers: &[(&str, &str, &str)]) -> String {
    let containers: serde_json::Map<String, serde_json::Value> = containers
        .iter()
        .map(|(id, name, addr)| {
            (
                id.to_string(),
                serde_json::json!({
                    "Name": name,
                    "EndpointID": format!("ep-{id}"),
                    "MacAddress": "02:42:ac:11:00:02",
                    "IPv4Address": addr,
                    "IPv6Address": ""
                }),
            )
        })
        .collect();

    serde_json::json!([{
        "Name": "bridge",
        "Id": "f2de39df4171b0dc801e8002d1d999b77256983dfc63041c0f34030aa3977566",
        "Scope": "local",
        "Driver": "bridge",
        "IPAM": { "Config": [{ "Subnet": "172.17.0.0/16", "Gateway": "172.17.0.1" }] },
        "Containers": containers,
        "Options": { "com.docker.network.bridge.default_bridge": "true" }
    }])
    .to_string()
}

pub struct FakeRuntime {
    dir: TempDir,
}

impl FakeRuntime {
    /// Runtime that prints `stdout` and exits successfully.
    pub fn printing(stdout: &str) -> Self {
        Self::printing_bytes(stdout.as_bytes())
    }

    /// Runtime that prints raw `stdout` bytes and exits successfully.
    pub fn printing_bytes(stdout: &[u8]) -> Self {
        let runtime = Self::empty();
        fs::write(runtime.dir.path().join("inspect.json"), stdout).unwrap();
        runtime.write_script(
            "docker",
            &format!(
                "printf '%s\\n' \"$@\" > '{dir}/argv.txt'\ncat '{dir}/inspect.json'\n",
                dir = runtime.dir.path().display()
            ),
        );
        runtime
    }

    /// Runtime that writes `stderr` and exits with `code`.
    pub fn failing(stderr: &str, code: i32) -> Self {
        let runtime = Self::empty();
        fs::write(runtime.dir.path().join("stderr.txt"), stderr).unwrap();
        runtime.write_script(
            "docker",
            &format!(
                "cat '{dir}/stderr.txt' >&2\nexit {code}\n",
                dir = runtime.dir.path().display()
            ),
        );
        runtime
    }

    fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Install a `sudo` stand-in that records its argv and runs the rest.
    pub fn with_fake_sudo(self) -> Self {
        self.write_script(
            "sudo",
            &format!(
                "printf '%s\\n' \"$@\" > '{dir}/sudo_argv.txt'\n[ \"$1\" = \"--\" ] && shift\nexec \"$@\"\n",
                dir = self.dir.path().display()
            ),
        );
        self
    }

    fn write_script(&self, name: &str, body: &str) {
        let path = self.dir.path().join(name);
        {
            let mut file = fs::File::create(&path).unwrap();
            write!(file, "#!/bin/sh\n{body}").unwrap();
            file.sync_all().unwrap();
        }
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn program(&self) -> PathBuf {
        self.dir.path().join("docker")
    }

    /// Arguments the runtime was last invoked with.
    pub fn recorded_argv(&self) -> Vec<String> {
        read_lines(&self.dir.path().join("argv.txt"))
    }

    /// Arguments the fake `sudo` was last invoked with.
    pub fn recorded_sudo_argv(&self) -> Vec<String> {
        read_lines(&self.dir.path().join("sudo_argv.txt"))
    }

    /// `PATH` with the fake runtime's directory first.
    pub fn path_env(&self) -> std::ffi::OsString {
        let mut paths = vec![self.dir.path().to_path_buf()];
        if let Some(existing) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&existing));
        }
        std::env::join_paths(paths).unwrap()
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
