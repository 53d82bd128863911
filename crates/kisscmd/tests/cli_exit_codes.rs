#![cfg(all(unix, feature = "cli"))]

use std::process::{Command, Output};

fn missing_device() -> String {
    format!(
        "/nonexistent/kisscmd-tty-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    )
}

fn kisscmd(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kisscmd"))
        .args(args)
        .env_remove("KISSCMD_LOG_LEVEL")
        .output()
        .expect("kisscmd should run")
}

fn run_command(command: &str, value: Option<&str>) -> Output {
    let device = missing_device();
    let mut args = vec![device.as_str(), "57600", command];
    args.extend(value);
    kisscmd(&args)
}

#[test]
fn bare_invocation_prints_usage_with_command_table() {
    let output = kisscmd(&[]);

    assert_eq!(output.status.code(), Some(2));
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Available commands"));
    assert!(text.contains("SETSERNO"));
    assert!(text.contains("GETVER"));
}

#[test]
fn help_exits_zero() {
    let output = kisscmd(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("SETHW"));
}

#[test]
fn missing_command_returns_2() {
    let device = missing_device();
    let output = kisscmd(&[device.as_str(), "57600"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unrecognized_command_returns_4() {
    let output = run_command("SETFOO", None);
    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unrecognized command"));
}

#[test]
fn slot_time_range_is_enforced() {
    assert_eq!(run_command("SETSLOT", Some("256")).status.code(), Some(5));
    assert_eq!(run_command("SETSLOT", Some("-1")).status.code(), Some(5));
    assert_eq!(run_command("SETSLOT", Some("ten")).status.code(), Some(5));
    assert_eq!(run_command("SETSLOT", None).status.code(), Some(2));
}

#[test]
fn valid_slot_time_gets_as_far_as_opening_the_port() {
    assert_eq!(run_command("SETSLOT", Some("255")).status.code(), Some(3));
}

#[test]
fn serial_number_length_is_enforced() {
    assert_eq!(run_command("SETSERNO", Some("1234567")).status.code(), Some(5));
    assert_eq!(run_command("SETSERNO", Some("12345678")).status.code(), Some(3));
}

#[test]
fn command_names_are_case_insensitive() {
    assert_eq!(run_command("getver", None).status.code(), Some(3));
}

#[test]
fn unopenable_device_returns_3() {
    let output = run_command("GETVER", None);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unable to open serial port"));
}

#[test]
fn zero_baud_is_a_usage_error() {
    let device = missing_device();
    let output = kisscmd(&[device.as_str(), "0", "GETVER"]);
    assert_eq!(output.status.code(), Some(2));
}
