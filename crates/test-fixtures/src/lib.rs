//! Test fixtures for Fathom: golden JSON loading, an insurance policy corpus,
//! and in-memory implementations of every collaborator trait (including
//! failing variants for degradation tests).

pub mod corpus;
pub mod stores;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use corpus::{Corpus, FixtureStores};
pub use stores::{
    FailingEmbedder, FailingStore, InMemoryDocumentStore, InMemoryExtractionStore,
    InMemoryVectorStore,
};

/// Root of the fixture files (`crates/test-fixtures`).
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by path.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// The policy corpus used by integration tests.
pub fn policy_corpus() -> Corpus {
    load_fixture(corpus::POLICY_CORPUS)
}
