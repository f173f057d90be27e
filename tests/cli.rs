//! Binary behaviour: report on stdout, errors on stderr, exit status.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

const VALID: &str = "Number of processes: 2
Arrival times: 0 1
CPU bursts: 4 3
Context switch time (milliseconds): 1
Time quantum for Round Robin: 2
";

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("u-cpusched-cli-{}-{test}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_u-cpusched"))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn valid_file_prints_report_and_succeeds() {
    let dir = scratch_dir("valid");
    let path = dir.join("workload.txt");
    fs::write(&path, VALID).unwrap();

    let output = binary().arg(&path).output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Gantt Chart:\n| P1 | P1 | P1 | P1 | CS | P2 | P2 | P2 |\n"));
    assert!(out.contains("Waiting time for each process:\nP1: 0\nP2: 4\n"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn default_input_is_processes_txt() {
    let dir = scratch_dir("default");
    fs::write(dir.join("processes.txt"), VALID).unwrap();

    let output = binary().current_dir(&dir).output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Turnaround time for each process:\nP1: 4\nP2: 7\n"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn invalid_workload_fails_without_output() {
    let dir = scratch_dir("invalid");
    let path = dir.join("workload.txt");
    fs::write(&path, "Number of processes: 0\n").unwrap();

    let output = binary().arg(&path).output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "stdout: {}", stdout(&output));
    assert!(stderr(&output).contains("Invalid number of processes: 0"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_fails_without_output() {
    let dir = scratch_dir("missing");

    let output = binary().arg(dir.join("absent.txt")).output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("unable to open input file"));
    fs::remove_dir_all(&dir).unwrap();
}
