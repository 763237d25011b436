use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NETWORK_JSON: &str = r#"{
  "nodes": [
    { "id": "a", "x": 0, "y": 0 },
    { "id": "b", "x": 1, "y": 0 },
    { "id": "c", "x": 2, "y": 0 },
    { "id": "d", "x": 1, "y": 1 },
    { "id": "e", "x": 9, "y": 9 }
  ],
  "edges": [
    { "from": "a", "to": "b" },
    { "from": "b", "to": "c" },
    { "from": "a", "to": "d", "weight": 5 },
    { "from": "d", "to": "c" }
  ]
}"#;

const NETWORK_TOML: &str = r#"
[[nodes]]
id = "north"
x = 0
y = 2

[[nodes]]
id = "middle"
x = 0
y = 1

[[nodes]]
id = "south"
x = 0
y = 0

[[edges]]
from = "north"
to = "middle"
weight = 2

[[edges]]
from = "middle"
to = "south"
weight = 3
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("network.json"), NETWORK_JSON).unwrap();
        std::fs::write(dir.path().join("network.toml"), NETWORK_TOML).unwrap();
        Self { dir }
    }

    fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn config(&self) -> PathBuf {
        self.file("config.toml")
    }

    fn pnba(&self) -> Command {
        let mut cmd = Command::cargo_bin("pnba").unwrap();
        cmd.env("PNBA_CONFIG", self.config()).env_remove("RUST_LOG");
        cmd
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_search_prints_shortest_path() {
    let fixture = Fixture::new();
    fixture
        .pnba()
        .args(["search", arg(&fixture.file("network.json")), "a", "c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a -> b -> c"))
        .stdout(predicate::str::contains("(2 hops, distance 2)"));
}

#[test]
fn test_search_json_output() {
    let fixture = Fixture::new();
    let output = fixture
        .pnba()
        .args(["search", arg(&fixture.file("network.json")), "d", "b", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["path"], serde_json::json!(["d", "c", "b"]));
    assert_eq!(outcome["distance"], 2);
    assert!(outcome["stats"]["visited"].as_u64().unwrap() >= 1);
}

#[test]
fn test_search_same_node() {
    let fixture = Fixture::new();
    fixture
        .pnba()
        .args(["search", arg(&fixture.file("network.json")), "a", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 hops, distance 0)"));
}

#[test]
fn test_search_unreachable() {
    let fixture = Fixture::new();
    fixture
        .pnba()
        .args(["search", arg(&fixture.file("network.json")), "a", "e"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No path from a to e"));
}

#[test]
fn test_search_unknown_node_fails() {
    let fixture = Fixture::new();
    fixture
        .pnba()
        .args(["search", arg(&fixture.file("network.json")), "a", "zz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown node 'zz'"));
}

#[test]
fn test_search_toml_with_tokio_runner_and_manhattan() {
    let fixture = Fixture::new();
    fixture
        .pnba()
        .args([
            "search",
            arg(&fixture.file("network.toml")),
            "north",
            "south",
            "--runner",
            "tokio",
            "--heuristic",
            "manhattan",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("north -> middle -> south"))
        .stdout(predicate::str::contains("distance 5"));
}

#[test]
fn test_search_uses_config_defaults() {
    let fixture = Fixture::new();
    std::fs::write(fixture.config(), "format = \"json\"\nrunner = \"tokio\"\n").unwrap();

    fixture
        .pnba()
        .args(["search", arg(&fixture.file("network.json")), "a", "c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"path\""));
}

#[test]
fn test_search_rejects_unknown_heuristic() {
    let fixture = Fixture::new();
    fixture
        .pnba()
        .args([
            "search",
            arg(&fixture.file("network.json")),
            "a",
            "c",
            "--heuristic",
            "chebyshev",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown heuristic"));
}

#[test]
fn test_check_reports_counts() {
    let fixture = Fixture::new();
    fixture
        .pnba()
        .args(["check", arg(&fixture.file("network.json"))])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 nodes, 4 edges"));
}

#[test]
fn test_check_rejects_dangling_edge() {
    let fixture = Fixture::new();
    let broken = fixture.file("broken.json");
    std::fs::write(
        &broken,
        r#"{ "nodes": [{ "id": "a" }], "edges": [{ "from": "a", "to": "b" }] }"#,
    )
    .unwrap();

    fixture
        .pnba()
        .args(["check", arg(&broken)])
        .assert()
        .failure();
}

#[test]
fn test_config_set_get_and_list() {
    let fixture = Fixture::new();
    fixture
        .pnba()
        .args(["config", "set", "heuristic", "euclidean"])
        .assert()
        .success();

    fixture
        .pnba()
        .args(["config", "get", "heuristic"])
        .assert()
        .success()
        .stdout("euclidean\n");

    fixture
        .pnba()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("runner = thread"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let fixture = Fixture::new();
    fixture
        .pnba()
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let fixture = Fixture::new();
    fixture.pnba().args(["config", "init"]).assert().success();
    assert!(fixture.config().exists());

    fixture
        .pnba()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    fixture
        .pnba()
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_path_honours_override() {
    let fixture = Fixture::new();
    fixture
        .pnba()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_completions() {
    Command::cargo_bin("pnba")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pnba"));
}
