/// Profile store integration tests — install, lazy build, caching, and
/// end-to-end generation.

use std::cell::Cell;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use simlish::core::dict::{DictionarySource, DirSource, SourceError};
use simlish::core::profile::{ProfileStore, StoreError};

fn fixture_source() -> DirSource {
    DirSource::new(Path::new("tests/fixtures/dict"))
}

/// A source that fails as unavailable a set number of times before
/// succeeding, for exercising the store's single-retry policy.
struct FlakySource {
    failures: Cell<u32>,
    inner: DirSource,
}

impl FlakySource {
    fn new(failures: u32) -> Self {
        Self {
            failures: Cell::new(failures),
            inner: fixture_source(),
        }
    }
}

impl DictionarySource for FlakySource {
    fn word_list(&self, language: &str) -> Result<String, SourceError> {
        let remaining = self.failures.get();
        if remaining > 0 {
            self.failures.set(remaining - 1);
            return Err(SourceError::Unavailable("simulated outage".to_string()));
        }
        self.inner.word_list(language)
    }
}

#[test]
fn install_persists_corpus_table_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());

    store.install("toyland", &fixture_source()).unwrap();

    let lang_dir = dir.path().join("toyland");
    assert!(lang_dir.join("words.txt").is_file());
    assert!(lang_dir.join("weights1.csv").is_file());
    assert!(lang_dir.join("profile.ron").is_file());

    let words = std::fs::read_to_string(lang_dir.join("words.txt")).unwrap();
    assert!(words.lines().any(|w| w == "kat"));
    // Stress marks from the raw dictionary never reach the corpus
    assert!(!words.contains('ˈ'));
    // Only the first pronunciation of "at" survives
    assert!(words.lines().any(|w| w == "at"));
    assert!(!words.lines().any(|w| w == "ɑt"));
}

#[test]
fn load_profile_builds_missing_levels_lazily() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());

    store.install("toyland", &fixture_source()).unwrap();
    assert!(!dir.path().join("toyland/weights2.csv").is_file());

    let profile = store.load_profile("toyland", 2, &fixture_source()).unwrap();
    assert_eq!(profile.levels(), 2);
    assert!(dir.path().join("toyland/weights2.csv").is_file());

    let manifest = store.read_manifest("toyland").unwrap().unwrap();
    assert_eq!(manifest.levels, vec![1, 2]);
}

#[test]
fn cached_profile_loads_without_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());
    store.install("toyland", &fixture_source()).unwrap();

    // A source with no data at all: everything must come from the cache
    let empty = tempfile::tempdir().unwrap();
    let offline = DirSource::new(empty.path());

    let profile = store.load_profile("toyland", 1, &offline).unwrap();
    assert!(profile.corpus().contains("kat"));
}

#[test]
fn unknown_language_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());

    let result = store.load_profile("atlantean", 1, &fixture_source());
    assert!(matches!(result, Err(StoreError::LanguageNotFound(ref l)) if l == "atlantean"));
}

#[test]
fn transient_source_failure_is_retried_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());

    let flaky = FlakySource::new(1);
    let profile = store.load_profile("toyland", 1, &flaky).unwrap();
    assert!(!profile.corpus().is_empty());
}

#[test]
fn persistent_source_failure_surfaces() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());

    let broken = FlakySource::new(u32::MAX);
    let result = store.load_profile("toyland", 1, &broken);
    assert!(matches!(
        result,
        Err(StoreError::Source(SourceError::Unavailable(_)))
    ));
}

#[test]
fn reloaded_profile_generates_identical_sequences() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());

    // First load trains and persists; second load reads from disk
    let built = store.load_profile("toyland", 2, &fixture_source()).unwrap();
    let reloaded = store.load_profile("toyland", 2, &fixture_source()).unwrap();

    let mut rng1 = StdRng::seed_from_u64(42);
    let mut rng2 = StdRng::seed_from_u64(42);
    for _ in 0..10 {
        assert_eq!(
            built.random_word(&mut rng1).unwrap(),
            reloaded.random_word(&mut rng2).unwrap()
        );
    }
}

#[test]
fn end_to_end_words_are_novel() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());
    let profile = store.load_profile("toyland", 2, &fixture_source()).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..30 {
        let word = profile.random_word(&mut rng).unwrap();
        assert!(!profile.corpus().contains(&word), "reproduced '{}'", word);
    }
}

#[test]
fn end_to_end_sentence_shape() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());
    let profile = store.load_profile("toyland", 1, &fixture_source()).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    assert_eq!(profile.random_sentence(&mut rng, 0).unwrap(), "");
    let sentence = profile.random_sentence(&mut rng, 6).unwrap();
    assert_eq!(sentence.split(' ').count(), 6);
}

#[test]
fn end_bias_is_recorded_and_reused() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path()).with_end_bias(2);
    store.install("toyland", &fixture_source()).unwrap();

    // A store handle with a different default must keep the recorded bias
    let other = ProfileStore::new(dir.path());
    let manifest = other.read_manifest("toyland").unwrap().unwrap();
    assert_eq!(manifest.end_bias, 2);
}
