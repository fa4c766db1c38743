//! Integration tests for the epochtime CLI
//!
//! Local-zone output is only checked under a fixed `--zone`, a profile with a
//! fixed zone, or an explicit `TZ`, never against the machine's own timezone.

use pretty_assertions::assert_eq;
use std::process::Command;

/// Helper to run epochtime and capture output
fn run_epochtime(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_epochtime"))
        .args(args)
        .env_remove("EPOCHTIME_PROFILE")
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute epochtime");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run under an IANA zone through `TZ`, so the OS local calendar is in play
fn run_json_in_zone(tz: &str, args: &[&str]) -> serde_json::Value {
    let output = Command::new(env!("CARGO_BIN_EXE_epochtime"))
        .args(args)
        .env_remove("EPOCHTIME_PROFILE")
        .env("TZ", tz)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute epochtime");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("should output valid JSON")
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_epochtime(args);
    assert_eq!(code, 0, "command failed: {}", stderr);
    serde_json::from_str(&stdout).expect("should output valid JSON")
}

// ============================================================================
// epochtime at
// ============================================================================

#[test]
fn test_at_utc() {
    let (stdout, _, code) = run_epochtime(&["at", "1000000000", "--utc"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "2001-09-09 01:46:40 UTC\n");
}

#[test]
fn test_at_fixed_zone() {
    let (stdout, _, code) = run_epochtime(&["at", "0", "--zone", "+09:00"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "1970-01-01 09:00:00 +0900\n");
}

#[test]
fn test_at_negative_seconds() {
    let (stdout, _, code) = run_epochtime(&["at", "-1", "--utc"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "1969-12-31 23:59:59 UTC\n");
}

#[test]
fn test_at_with_micros_json() {
    let json = run_json(&["at", "0", "250000", "--utc", "--json"]);
    assert_eq!(json["to_i"], 0);
    assert_eq!(json["usec"], 250000);
    assert_eq!(json["to_f"], 0.25);
    assert_eq!(json["zone"], "UTC");
    assert_eq!(json["utc"], true);
}

#[test]
fn test_at_fractional_seconds() {
    let json = run_json(&["at", "1.5", "--utc", "--json"]);
    assert_eq!(json["to_i"], 1);
    assert_eq!(json["usec"], 500000);
}

#[test]
fn test_at_out_of_range_float() {
    let (_, stderr, code) = run_epochtime(&["at", "1e30"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("out of Time range"), "stderr: {}", stderr);
}

#[test]
fn test_at_not_a_number() {
    let (_, stderr, code) = run_epochtime(&["at", "yesterday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not a number: yesterday"));
}

// ============================================================================
// epochtime gm / local
// ============================================================================

#[test]
fn test_gm_json_fields() {
    let json = run_json(&["gm", "2000", "1", "1", "--json"]);
    assert_eq!(json["year"], 2000);
    assert_eq!(json["month"], 1);
    assert_eq!(json["day"], 1);
    assert_eq!(json["weekday"], 6);
    assert_eq!(json["yearday"], 1);
    assert_eq!(json["to_i"], 946684800);
    assert_eq!(json["to_s"], "2000-01-01 00:00:00 UTC");
    assert_eq!(json["asctime"], "Sat Jan  1 00:00:00 2000");
    assert!(json["hash"].is_u64());
}

#[test]
fn test_gm_year_only() {
    let (stdout, _, code) = run_epochtime(&["gm", "1970"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "1970-01-01 00:00:00 UTC\n");
}

#[test]
fn test_gm_hour_24_rolls_over() {
    let (stdout, _, code) = run_epochtime(&["gm", "2000", "12", "31", "24"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "2001-01-01 00:00:00 UTC\n");
}

#[test]
fn test_gm_bad_month() {
    let (_, stderr, code) = run_epochtime(&["gm", "2000", "13"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("argument out of range"));
}

#[test]
fn test_local_with_fixed_zone() {
    let json = run_json(&["local", "1970", "1", "1", "9", "--zone", "+09:00", "--json"]);
    assert_eq!(json["to_i"], 0);
    assert_eq!(json["utc_offset"], 32400);
    assert_eq!(json["utc"], false);
}

#[test]
fn test_local_then_utc() {
    let (stdout, _, code) = run_epochtime(&["local", "2000", "6", "1", "--zone", "-05:00", "--utc"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "2000-06-01 05:00:00 UTC\n");
}

// ============================================================================
// epochtime add / sub / diff / cmp
// ============================================================================

#[test]
fn test_add_and_sub() {
    let (stdout, _, _) = run_epochtime(&["add", "0", "86400", "--utc"]);
    assert_eq!(stdout, "1970-01-02 00:00:00 UTC\n");
    let (stdout, _, _) = run_epochtime(&["sub", "0", "1", "--utc"]);
    assert_eq!(stdout, "1969-12-31 23:59:59 UTC\n");
}

#[test]
fn test_diff() {
    let (stdout, _, code) = run_epochtime(&["diff", "10", "7.5"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2.5");
    let (stdout, _, _) = run_epochtime(&["diff", "7.5", "10"]);
    assert_eq!(stdout.trim(), "-2.5");
}

#[test]
fn test_cmp() {
    let (stdout, _, _) = run_epochtime(&["cmp", "0", "-1"]);
    assert_eq!(stdout.trim(), "1");
    let (stdout, _, _) = run_epochtime(&["cmp", "-1", "0"]);
    assert_eq!(stdout.trim(), "-1");
    let (stdout, _, _) = run_epochtime(&["cmp", "5", "5.0"]);
    assert_eq!(stdout.trim(), "0");
}

// ============================================================================
// profiles
// ============================================================================

#[test]
fn test_narrow_profile_overflow() {
    let (_, stderr, code) = run_epochtime(&[
        "add",
        "2147483647",
        "1",
        "--profile",
        "tests/fixtures/narrow.toml",
    ]);
    assert_eq!(code, 1);
    assert!(stderr.contains("time_t overflow in Time addition"), "stderr: {}", stderr);
}

#[test]
fn test_narrow_profile_named_zone() {
    let (stdout, _, code) = run_epochtime(&["at", "0", "--profile", "tests/fixtures/narrow.toml"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "1970-01-01 09:00:00 JST\n");
}

#[test]
fn test_zone_override_drops_profile_abbreviation() {
    let (stdout, _, code) = run_epochtime(&[
        "at",
        "0",
        "--profile",
        "tests/fixtures/narrow.toml",
        "--zone",
        "-05:00",
    ]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "1969-12-31 19:00:00 -0500\n");
}

#[test]
fn test_narrow_profile_rejects_wide_seconds() {
    let (_, stderr, code) =
        run_epochtime(&["at", "2147483648", "--profile", "tests/fixtures/narrow.toml"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("out of Time range"), "stderr: {}", stderr);
}

#[test]
fn test_profile_from_env() {
    let output = Command::new(env!("CARGO_BIN_EXE_epochtime"))
        .args(["at", "0"])
        .env("EPOCHTIME_PROFILE", "tests/fixtures/narrow.toml")
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute epochtime");
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1970-01-01 09:00:00 JST\n");
}

#[test]
fn test_no_float_profile() {
    let (stdout, _, code) = run_epochtime(&["diff", "10", "8", "--profile", "tests/fixtures/no_float.toml"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2");

    let (_, stderr, code) = run_epochtime(&["at", "1.5", "--profile", "tests/fixtures/no_float.toml"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("cannot convert 1.5 to time"), "stderr: {}", stderr);

    let json = run_json(&["at", "3", "--profile", "tests/fixtures/no_float.toml", "--json"]);
    assert_eq!(json["to_f"], serde_json::Value::Null);
}

#[test]
fn test_invalid_profile() {
    let (_, stderr, code) = run_epochtime(&["now", "--profile", "tests/fixtures/bad_zone.toml"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid profile"), "stderr: {}", stderr);
}

#[test]
fn test_missing_profile_file() {
    let (_, stderr, code) = run_epochtime(&["now", "--profile", "tests/fixtures/missing.toml"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Failed to read"), "stderr: {}", stderr);
}

// ============================================================================
// daylight saving under the system calendar
// ============================================================================

// 2021-01-07 06:13:20 UTC and 2021-07-01 00:00:00 UTC
const JANUARY: &str = "1610000000";
const JULY: &str = "1625097600";

#[test]
fn test_dst_northern_hemisphere() {
    let jan = run_json_in_zone("America/New_York", &["at", JANUARY, "--json"]);
    assert_eq!(jan["is_dst"], false);
    assert_eq!(jan["utc_offset"], -18000);
    assert_eq!(jan["zone"], "-0500");

    let jul = run_json_in_zone("America/New_York", &["at", JULY, "--json"]);
    assert_eq!(jul["is_dst"], true);
    assert_eq!(jul["utc_offset"], -14400);
    assert_eq!(jul["zone"], "-0400");
    assert_eq!(jul["hour"], 20);
}

#[test]
fn test_dst_southern_hemisphere() {
    let jan = run_json_in_zone("Australia/Sydney", &["at", JANUARY, "--json"]);
    assert_eq!(jan["is_dst"], true);
    assert_eq!(jan["utc_offset"], 39600);

    let jul = run_json_in_zone("Australia/Sydney", &["at", JULY, "--json"]);
    assert_eq!(jul["is_dst"], false);
    assert_eq!(jul["utc_offset"], 36000);
}

#[test]
fn test_dst_flag_cleared_in_utc() {
    let jul = run_json_in_zone("America/New_York", &["at", JULY, "--utc", "--json"]);
    assert_eq!(jul["is_dst"], false);
    assert_eq!(jul["utc_offset"], 0);
}

// ============================================================================
// epochtime now
// ============================================================================

#[test]
fn test_now_is_after_2020() {
    let json = run_json(&["now", "--utc", "--json"]);
    assert!(json["year"].as_i64().unwrap() >= 2020);
    assert_eq!(json["zone"], "UTC");
}
