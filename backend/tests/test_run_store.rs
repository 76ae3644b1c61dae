//! RunStore Tests - Save/Load Named Runs
//!
//! Critical invariants tested:
//! - Round trip: a saved run reloads to identical parameters and series
//! - Listing: only record files, empty (not an error) for a missing root
//! - Selection: 1-based, bounded by the most recent listing
//! - Malformed files are rejected, never partially loaded

use population_simulator_core_rs::{simulate, RunStore, SimulationParameters, StoreError};
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn sample_params() -> SimulationParameters {
    SimulationParameters {
        initial_population: 100,
        growth_rate: 0.2,
        time_steps: 25,
        decay_interval: 4,
        decay_percent: 0.3,
    }
}

/// Store rooted in a not-yet-created subdirectory of a temp dir
fn temp_store() -> (TempDir, RunStore) {
    let dir = TempDir::new().unwrap();
    let store = RunStore::at(dir.path().join("saved_runs"));
    (dir, store)
}

fn save_sample(store: &RunStore, name: &str) {
    let params = sample_params();
    store.save_run(name, &params, &simulate(&params)).unwrap();
}

// ============================================================================
// Storage Root
// ============================================================================

#[test]
fn test_list_missing_root_is_empty() {
    let (_dir, mut store) = temp_store();
    assert!(!store.root().exists());
    assert_eq!(store.list_runs().unwrap(), Vec::<String>::new());
}

#[test]
fn test_ensure_storage_root_is_idempotent() {
    let (_dir, store) = temp_store();
    store.ensure_storage_root().unwrap();
    store.ensure_storage_root().unwrap();
    assert!(store.root().is_dir());
}

#[test]
fn test_first_save_creates_root() {
    let (_dir, store) = temp_store();
    save_sample(&store, "first");
    assert!(store.root().join("first.json").is_file());
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_save_then_load_round_trips_exactly() {
    let (_dir, mut store) = temp_store();
    let params = SimulationParameters {
        initial_population: 7,
        growth_rate: 0.1 + 0.2,
        time_steps: 40,
        decay_interval: 3,
        decay_percent: 1.0 / 3.0,
    };
    let series = simulate(&params);
    store.save_run("awkward", &params, &series).unwrap();

    assert_eq!(store.list_runs().unwrap(), vec!["awkward.json".to_string()]);
    let record = store.load_run(1).unwrap();

    assert_eq!(record.name(), "awkward");
    assert_eq!(record.parameters(), &params);
    assert_eq!(record.series().steps(), series.steps());
    let loaded: Vec<u64> = record.series().populations().iter().map(|v| v.to_bits()).collect();
    let original: Vec<u64> = series.populations().iter().map(|v| v.to_bits()).collect();
    assert_eq!(loaded, original);
}

#[test]
fn test_loaded_record_replays_to_same_series() {
    let (_dir, mut store) = temp_store();
    save_sample(&store, "replay");
    store.list_runs().unwrap();
    let record = store.load_run(1).unwrap();
    assert_eq!(&simulate(record.parameters()), record.series());
}

#[test]
fn test_save_record_writes_under_record_name() {
    let (_dir, mut store) = temp_store();
    save_sample(&store, "source");
    store.list_runs().unwrap();
    let record = store.load_run(1).unwrap();

    let copy = population_simulator_core_rs::RunRecord::new(
        "copy",
        *record.parameters(),
        record.series().clone(),
    );
    let path = store.save_record(&copy).unwrap();
    assert_eq!(path, store.record_path("copy"));
    assert_eq!(store.list_runs().unwrap(), vec!["copy.json", "source.json"]);
}

#[test]
fn test_loads_file_in_legacy_layout() {
    let (_dir, mut store) = temp_store();
    store.ensure_storage_root().unwrap();
    let legacy = r#"{
    "name": "legacy",
    "initial_population": 100,
    "growth_rate": 0.2,
    "time_steps": 3,
    "decay_interval": 2,
    "decay_percent": 0.3,
    "time_data": [
        1,
        2,
        3
    ],
    "population_data": [
        120.0,
        100.8,
        120.96
    ]
}"#;
    fs::write(store.root().join("legacy.json"), legacy).unwrap();

    store.list_runs().unwrap();
    let record = store.load_run(1).unwrap();
    assert_eq!(record.name(), "legacy");
    assert_eq!(record.parameters().decay_interval, 2);
    assert_eq!(record.series().populations(), vec![120.0, 100.8, 120.96]);
}

// ============================================================================
// Listing and Selection
// ============================================================================

#[test]
fn test_listing_ignores_other_files_and_directories() {
    let (_dir, mut store) = temp_store();
    save_sample(&store, "b");
    save_sample(&store, "a");
    fs::write(store.root().join("notes.txt"), "not a run").unwrap();
    fs::create_dir(store.root().join("folder.json")).unwrap();

    assert_eq!(store.list_runs().unwrap(), vec!["a.json", "b.json"]);
}

#[test]
fn test_selection_bounds() {
    let (_dir, mut store) = temp_store();
    save_sample(&store, "only");
    store.list_runs().unwrap();

    assert!(matches!(
        store.load_run(0),
        Err(StoreError::SelectionOutOfRange { selection: 0, count: 1 })
    ));
    assert!(matches!(
        store.load_run(2),
        Err(StoreError::SelectionOutOfRange { selection: 2, count: 1 })
    ));
    assert!(store.load_run(1).is_ok());
    assert_eq!(store.listed_file(1), Some("only.json"));
    assert_eq!(store.listed_file(0), None);
}

#[test]
fn test_selection_uses_most_recent_listing() {
    let (_dir, mut store) = temp_store();
    save_sample(&store, "m");
    store.list_runs().unwrap();
    save_sample(&store, "a");

    // "a" sorts first but is not in the listing yet
    assert_eq!(store.load_run(1).unwrap().name(), "m");

    store.list_runs().unwrap();
    assert_eq!(store.load_run(1).unwrap().name(), "a");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_malformed_records_rejected() {
    let cases = [
        ("garbage", "this is not json"),
        ("missing", r#"{"name": "missing", "initial_population": 1}"#),
        (
            "wrong_type",
            r#"{"name": "w", "initial_population": "many", "growth_rate": 0.1,
               "time_steps": 1, "decay_interval": 1, "decay_percent": 0.1,
               "time_data": [1], "population_data": [1.0]}"#,
        ),
        (
            "misaligned",
            r#"{"name": "m", "initial_population": 1, "growth_rate": 0.1,
               "time_steps": 2, "decay_interval": 1, "decay_percent": 0.1,
               "time_data": [1, 2], "population_data": [1.0]}"#,
        ),
    ];

    for (name, contents) in cases {
        let (_dir, mut store) = temp_store();
        store.ensure_storage_root().unwrap();
        fs::write(store.root().join(format!("{}.json", name)), contents).unwrap();
        store.list_runs().unwrap();

        match store.load_run(1) {
            Err(StoreError::MalformedRecord { path, .. }) => {
                assert!(path.ends_with(format!("{}.json", name)));
            }
            other => panic!("{}: expected MalformedRecord, got {:?}", name, other),
        }
    }
}

#[test]
fn test_read_error_when_listed_file_disappears() {
    let (_dir, mut store) = temp_store();
    save_sample(&store, "gone");
    store.list_runs().unwrap();
    fs::remove_file(store.record_path("gone")).unwrap();

    assert!(matches!(
        store.load_run(1),
        Err(StoreError::StorageRead { .. })
    ));
}

#[test]
fn test_write_error_when_root_is_a_file() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "occupied").unwrap();
    let store = RunStore::at(&blocker);

    let params = sample_params();
    let result = store.save_run("x", &params, &simulate(&params));
    assert!(matches!(result, Err(StoreError::StorageWrite { .. })));
}

#[test]
fn test_non_finite_population_is_not_written() {
    let (_dir, store) = temp_store();
    let params = SimulationParameters {
        initial_population: 1,
        growth_rate: 1e300,
        time_steps: 3,
        decay_interval: 10,
        decay_percent: 0.0,
    };
    let result = store.save_run("overflow", &params, &simulate(&params));
    match result {
        Err(StoreError::NonFinitePopulation { step, value, .. }) => {
            assert_eq!(step, 2);
            assert!(value.is_infinite());
        }
        other => panic!("expected NonFinitePopulation, got {:?}", other),
    }
    assert!(!store.contains("overflow"));
    assert!(!store.root().exists());
}

#[test]
fn test_save_overwrites_existing_record() {
    let (_dir, mut store) = temp_store();
    save_sample(&store, "same");

    let params = SimulationParameters {
        time_steps: 2,
        ..sample_params()
    };
    store.save_run("same", &params, &simulate(&params)).unwrap();

    store.list_runs().unwrap();
    assert_eq!(store.load_run(1).unwrap().series().len(), 2);
}
