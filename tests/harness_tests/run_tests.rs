//! Tests for full harness runs
//!
//! These tests verify:
//! - Report lines and their order
//! - Fixed phase order regardless of selection
//! - Sentinel behaviour across separate runs on one file
//! - Error tagging and early abort

use bucketbench::config::{Config, SentinelKeys, SENTINEL_A, SENTINEL_B, SENTINEL_C};
use bucketbench::harness::{Harness, Phase, PhaseSelection};
use bucketbench::BenchError;
use tempfile::TempDir;

use crate::common::{sequential_keys, test_config};

fn run_to_string(harness: &Harness, selection: PhaseSelection) -> (bucketbench::RunReport, String) {
    let mut out = Vec::new();
    let report = harness.run(selection, &mut out).unwrap();
    (report, String::from_utf8(out).unwrap())
}

#[test]
fn test_run_without_phases() {
    let temp_dir = TempDir::new().unwrap();
    let harness = Harness::new(test_config(temp_dir.path(), 10)).unwrap();

    let (report, output) = run_to_string(&harness, PhaseSelection::default());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Open() took "));
    assert!(lines[1].starts_with("Close() took "));
    assert!(lines[2].starts_with("Alloc = "));
    assert!(lines[2].contains("\tTotalAlloc = "));
    assert!(lines[2].contains("\tSys = "));
    assert!(lines[2].ends_with("\tNumGC = 0"));
    assert_eq!(lines[3], "Bye! 111");

    assert!(report.lookups.is_empty());
    assert!(report.scan.is_none());
    assert!(report.load.is_none());
    assert!(temp_dir.path().join("test.redb").exists());
}

#[test]
fn test_run_all_phases_in_fixed_order() {
    let temp_dir = TempDir::new().unwrap();
    let harness = Harness::new(test_config(temp_dir.path(), 10)).unwrap();

    let (report, output) = run_to_string(&harness, PhaseSelection::from_tokens(["a", "c", "f"]));

    let find = output.find("Finding key").unwrap();
    let count = output.find("Found ").unwrap();
    let add = output.find("Adding 10 keys...").unwrap();
    assert!(find < count && count < add);
    assert!(output.contains("Adding 10 keys took "));
    assert!(output.contains("Counting took "));

    // Scan and lookups ran before the load on a fresh store
    assert_eq!(report.scan.as_ref().unwrap().count, 0);
    assert!(report.lookups.iter().all(|l| l.value.is_none()));
    assert_eq!(report.load.as_ref().unwrap().new_keys(), 12);
}

#[test]
fn test_find_phase_lookup_order_and_lines() {
    let temp_dir = TempDir::new().unwrap();
    let harness = Harness::new(test_config(temp_dir.path(), 5)).unwrap();

    run_to_string(&harness, PhaseSelection::from_tokens(["a"]));
    let (report, output) = run_to_string(&harness, PhaseSelection::from_tokens(["f"]));

    let keys: Vec<&str> = report.lookups.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, vec![SENTINEL_C, SENTINEL_A, SENTINEL_B]);

    assert!(output.contains(&format!("Finding key {} => \n", SENTINEL_C)));
    assert!(output.contains(&format!("Finding key {} => 1\n", SENTINEL_A)));
    assert!(output.contains(&format!("Finding key {} => 1\n", SENTINEL_B)));
    assert_eq!(output.matches("Find key took ").count(), 3);
}

#[test]
fn test_load_then_scan_then_find_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let harness = Harness::new(test_config(temp_dir.path(), 300)).unwrap();

    run_to_string(&harness, PhaseSelection::from_tokens(["a"]));

    let (report, output) = run_to_string(&harness, PhaseSelection::from_tokens(["c"]));
    assert_eq!(report.scan.as_ref().unwrap().count, 302);
    assert!(output.contains("Found 302 keys\n"));

    let (report, _) = run_to_string(&harness, PhaseSelection::from_tokens(["f"]));
    assert_eq!(report.lookup(SENTINEL_A).unwrap().value.as_deref(), Some("1"));
    assert_eq!(report.lookup(SENTINEL_B).unwrap().value.as_deref(), Some("1"));
    assert_eq!(report.lookup(SENTINEL_C).unwrap().value, None);
}

#[test]
fn test_double_load_bounds() {
    let temp_dir = TempDir::new().unwrap();
    let harness = Harness::new(test_config(temp_dir.path(), 200)).unwrap();

    run_to_string(&harness, PhaseSelection::from_tokens(["a"]));
    run_to_string(&harness, PhaseSelection::from_tokens(["a"]));

    let (report, _) = run_to_string(&harness, PhaseSelection::from_tokens(["c", "f"]));
    let count = report.scan.as_ref().unwrap().count;
    assert!((202..=402).contains(&count), "count {count}");
    assert_eq!(report.lookup(SENTINEL_A).unwrap().value.as_deref(), Some("1"));
    assert_eq!(report.lookup(SENTINEL_B).unwrap().value.as_deref(), Some("1"));
}

#[test]
fn test_double_load_with_colliding_keys() {
    let temp_dir = TempDir::new().unwrap();
    let harness = Harness::new(test_config(temp_dir.path(), 100)).unwrap();

    let mut out = Vec::new();
    harness
        .run_with_keys(PhaseSelection::from_tokens(["a"]), &mut sequential_keys("k"), &mut out)
        .unwrap();
    // Second load repeats half of the first load's keys
    let mut keys = sequential_keys("k");
    for _ in 0..50 {
        keys();
    }
    let report = harness
        .run_with_keys(PhaseSelection::from_tokens(["a", "c"]), &mut keys, &mut out)
        .unwrap();

    // Scan runs before the load in the same run
    assert_eq!(report.scan.as_ref().unwrap().count, 102);
    let load = report.load.as_ref().unwrap();
    assert_eq!(load.overwritten, 52);
    assert_eq!(load.new_keys(), 50);

    let report = harness
        .run(PhaseSelection::from_tokens(["c"]), &mut out)
        .unwrap();
    assert_eq!(report.scan.as_ref().unwrap().count, 152);
}

#[test]
fn test_bucket_created_only_on_first_run() {
    let temp_dir = TempDir::new().unwrap();
    let harness = Harness::new(test_config(temp_dir.path(), 1)).unwrap();
    assert_eq!(harness.config().bucket_name, "b1");
    assert_eq!(harness.config().load_count, 1);

    let (first, _) = run_to_string(&harness, PhaseSelection::default());
    let (second, _) = run_to_string(&harness, PhaseSelection::from_tokens(["c"]));

    assert!(first.bucket_created);
    assert!(!second.bucket_created);
    assert_eq!(second.scan.as_ref().unwrap().count, 0);
}

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().unwrap();

    let empty_bucket = Config { bucket_name: String::new(), ..test_config(temp_dir.path(), 1) };
    assert!(matches!(Harness::new(empty_bucket), Err(BenchError::Config(_))));

    let empty_marker = Config { marker: Vec::new(), ..test_config(temp_dir.path(), 1) };
    assert!(matches!(Harness::new(empty_marker), Err(BenchError::Config(_))));

    let overlapping = Config {
        sentinels: SentinelKeys {
            present: ["x".to_string(), "y".to_string()],
            absent: "y".to_string(),
        },
        ..test_config(temp_dir.path(), 1)
    };
    assert!(matches!(Harness::new(overlapping), Err(BenchError::Config(_))));
}

#[test]
fn test_open_failure_is_tagged_and_stops_run() {
    let temp_dir = TempDir::new().unwrap();
    // A directory cannot be opened as the store file
    let config = Config::builder()
        .store_path(temp_dir.path())
        .load_count(1)
        .build();
    let harness = Harness::new(config).unwrap();

    let mut out = Vec::new();
    let err = harness.run(PhaseSelection::all(), &mut out).unwrap_err();

    assert_eq!(err.phase(), Some(Phase::Open));
    assert!(matches!(err.root(), BenchError::StoreOpen { .. }));
    assert!(err.to_string().starts_with("open store failed: "));
    assert!(out.is_empty());
}

#[test]
fn test_in_phase_keeps_innermost_tag() {
    let err = BenchError::Config("bad".into())
        .in_phase(Phase::Add)
        .in_phase(Phase::Report);

    assert_eq!(err.phase(), Some(Phase::Add));
    assert!(matches!(err.root(), BenchError::Config(msg) if msg == "bad"));
}
