//! Integration tests for the flat-file store
//!
//! These tests verify that separate store handles on one data directory see
//! each other's writes and that rewriting a document leaves no stray files.

use common::store::{JsonStore, StoreConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Ledger {
    entries: Vec<String>,
}

/// Two handles on the same directory share state through the files only
#[test]
fn test_handles_share_documents() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = StoreConfig::new(dir.path().join("nested/data"));

    let first = JsonStore::open(&config)?;
    let second = JsonStore::open(&config)?;
    assert!(first.health_check()?, "data directory was not created");

    let mut ledger: Ledger = first.read("ledger.json")?;
    ledger.entries.push("one".to_string());
    first.write("ledger.json", &ledger)?;

    let mut seen: Ledger = second.read("ledger.json")?;
    assert_eq!(seen, ledger);

    // Last writer wins
    seen.entries.push("two".to_string());
    second.write("ledger.json", &seen)?;
    first.write("ledger.json", &ledger)?;

    let final_state: Ledger = second.read("ledger.json")?;
    assert_eq!(final_state.entries, vec!["one".to_string()]);

    // Only the document itself remains, no temporary files
    let names: Vec<String> = std::fs::read_dir(first.root())?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    assert_eq!(names, vec!["ledger.json".to_string()]);

    Ok(())
}
