// CLI behavior against the built-in seed and seed files

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn rackops() -> Command {
    let mut cmd = Command::cargo_bin("rackops").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_subcommand_shows_getting_started() {
    rackops()
        .assert()
        .success()
        .stdout(predicate::str::contains("rackops console"))
        .stdout(predicate::str::contains("rackops list"));
}

#[test]
fn test_list_team_lead_shows_every_order() {
    rackops()
        .args(["list", "--role", "team-lead"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== All work orders =="))
        .stdout(predicate::str::contains("WO-20240701-001"))
        .stdout(predicate::str::contains("WO-20240701-002"))
        .stdout(predicate::str::contains("WO-20240630-005"));
}

#[test]
fn test_list_employee_shows_only_assigned() {
    // Default current user is emp-002 (Li Jing)
    rackops()
        .args(["list", "--role", "employee"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, Li Jing - your tasks"))
        .stdout(predicate::str::contains("WO-20240630-005"))
        .stdout(predicate::str::contains("WO-20240701-001").not());
}

#[test]
fn test_list_json_is_parseable() {
    let output = rackops()
        .args(["list", "--role", "team-lead", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let orders: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 3);
    assert_eq!(orders[0]["status"], "pending");
    assert_eq!(orders[1]["type"], "switch-fault");
}

#[test]
fn test_show_unknown_order_fails() {
    rackops()
        .args(["show", "WO-nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No work order WO-nope"));
}

#[test]
fn test_show_prints_required_parts() {
    rackops()
        .args(["show", "WO-20240701-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("storage: B-05-3"))
        .stdout(predicate::str::contains("-> required: 256GB (16 x 16GB) DDR4"));
}

#[test]
fn test_console_reads_stdin() {
    rackops()
        .arg("console")
        .write_stdin("open #1\nparts\nsn sn9abcdef123\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("! Parts received"))
        .stdout(predicate::str::contains("! SN verified"));
}

#[test]
fn test_seed_file_and_current_user_from_env() {
    let mut seed = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        seed,
        r#"{{
            "employees": [{{"id": "t-1", "name": "Ana"}}, {{"id": "t-2", "name": "Bo"}}],
            "work_orders": [{{
                "id": "WO-X",
                "title": "Swap NIC",
                "type": "server-reconfiguration",
                "status": "in-progress",
                "assigned_to": ["t-2"]
            }}]
        }}"#
    )
    .unwrap();

    rackops()
        .args(["list", "--role", "employee", "--seed"])
        .arg(seed.path())
        .env("RACKOPS__CONSOLE__CURRENT_USER", "t-2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, Bo - your tasks"))
        .stdout(predicate::str::contains("WO-X"));
}

#[test]
fn test_unknown_current_user_is_rejected() {
    rackops()
        .arg("roster")
        .env("RACKOPS__CONSOLE__CURRENT_USER", "ghost")
        .assert()
        .failure()
        .stderr(predicate::str::contains("current_user"));
}

#[test]
fn test_toml_seed_file_is_loaded() {
    let mut seed = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        seed,
        r#"
[[employees]]
id = "t-1"
name = "Ana"

[[work_orders]]
id = "WO-T"
title = "Rack new storage node"
type = "server-racking"
status = "pending"
"#
    )
    .unwrap();

    rackops()
        .args(["list", "--role", "team-lead", "--seed"])
        .arg(seed.path())
        .env("RACKOPS__CONSOLE__CURRENT_USER", "t-1")
        .assert()
        .success()
        .stdout(predicate::str::contains("WO-T"))
        .stdout(predicate::str::contains("Rack new storage node"));
}

#[test]
fn test_yaml_seed_file_is_rejected() {
    let mut seed = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(seed, "employees: []").unwrap();

    rackops()
        .args(["roster", "--seed"])
        .arg(seed.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported seed file extension: yaml"));
}

#[test]
fn test_missing_seed_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    rackops()
        .args(["roster", "--seed"])
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read seed file"));
}

#[test]
fn test_console_runs_script_file() {
    let mut script = tempfile::NamedTempFile::new().unwrap();
    writeln!(script, "# close out the memory upgrade").unwrap();
    writeln!(script, "open #1\nparts\nsn SN9ABCDEF123\ndone\nclose\nquit").unwrap();

    rackops()
        .args(["console", "--script"])
        .arg(script.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("! Hardware operation recorded"))
        .stdout(predicate::str::contains("! Work order completed"))
        .stdout(predicate::str::contains("WO-20240701-001  [Completed]"));
}

#[test]
fn test_console_missing_script_fails() {
    let dir = tempfile::tempdir().unwrap();

    rackops()
        .args(["console", "--script"])
        .arg(dir.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open script"));
}
