/// Profile store — lazy build, caching, and retrieval of language profiles.
///
/// On-disk layout, one directory per language under the store root:
/// `words.txt` (the corpus, one word per line), `weights<k>.csv` (the
/// level-k transition table), and `profile.ron` (build metadata).

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::corpus::Corpus;
use crate::core::dict::{DictionarySource, SourceError};
use crate::core::model::{BuildError, TableError, TransitionTable};
use crate::core::persist;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no dictionary data or cached profile for language '{0}'")]
    LanguageNotFound(String),
    #[error("profile for '{language}' is missing its level-{level} table")]
    MissingLevel { language: String, level: usize },
    #[error("dictionary source error: {0}")]
    Source(#[from] SourceError),
    #[error("build error: {0}")]
    Build(#[from] BuildError),
    #[error("table error: {0}")]
    Table(#[from] TableError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Build metadata persisted alongside a language's tables.
///
/// Records the end bias the tables were trained with, so lazy builds of
/// higher levels stay consistent with what is already on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileManifest {
    pub language: String,
    pub end_bias: u64,
    pub levels: Vec<usize>,
}

/// A ready-to-generate language profile: the corpus plus one transition
/// table per level 1..=L.
///
/// Fixed shape, validated on construction, and read-only afterwards —
/// safe to share across threads.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    language: String,
    corpus: Corpus,
    tables: Vec<TransitionTable>,
}

impl LanguageProfile {
    /// Assemble a profile, checking that `tables` holds exactly the
    /// levels 1..=L in order.
    pub fn new(corpus: Corpus, tables: Vec<TransitionTable>) -> Result<Self, StoreError> {
        let language = corpus.language().to_string();
        if tables.is_empty() {
            return Err(StoreError::MissingLevel { language, level: 1 });
        }
        for (i, table) in tables.iter().enumerate() {
            if table.level() != i + 1 {
                return Err(StoreError::MissingLevel {
                    language,
                    level: i + 1,
                });
            }
        }
        Ok(Self {
            language,
            corpus,
            tables,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The highest Markov order available, L.
    pub fn levels(&self) -> usize {
        self.tables.len()
    }

    /// Tables ordered by level, 1..=L.
    pub fn tables(&self) -> &[TransitionTable] {
        &self.tables
    }
}

/// Persists and retrieves corpora and transition tables per language,
/// building missing pieces on demand.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
    end_bias: u64,
}

impl ProfileStore {
    /// A store rooted at `root`, training with no end bias by default.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            end_bias: 0,
        }
    }

    /// Use `end_bias` when training tables for languages that have no
    /// manifest yet. Languages already on disk keep their recorded bias.
    pub fn with_end_bias(mut self, end_bias: u64) -> Self {
        self.end_bias = end_bias;
        self
    }

    fn language_dir(&self, language: &str) -> PathBuf {
        self.root.join(language)
    }

    fn words_path(&self, language: &str) -> PathBuf {
        self.language_dir(language).join("words.txt")
    }

    fn table_path(&self, language: &str, level: usize) -> PathBuf {
        self.language_dir(language)
            .join(format!("weights{}.csv", level))
    }

    fn manifest_path(&self, language: &str) -> PathBuf {
        self.language_dir(language).join("profile.ron")
    }

    /// Ensure a language's corpus and base (level-1) profile exist,
    /// fetching and training as needed.
    pub fn install(
        &self,
        language: &str,
        source: &dyn DictionarySource,
    ) -> Result<(), StoreError> {
        let corpus = self.ensure_corpus(language, source)?;
        let end_bias = self.recorded_end_bias(language)?;
        self.ensure_table(&corpus, 1, end_bias)?;
        self.record_levels(language, end_bias, 1)?;
        Ok(())
    }

    /// Supply a ready profile for `(language, levels)`, 1..=levels
    /// inclusive, loading cached pieces and lazily building the rest.
    ///
    /// Newly built tables are persisted before returning, so subsequent
    /// loads are plain retrieval.
    pub fn load_profile(
        &self,
        language: &str,
        levels: usize,
        source: &dyn DictionarySource,
    ) -> Result<LanguageProfile, StoreError> {
        assert!(levels >= 1, "levels must be >= 1");

        let corpus = self.ensure_corpus(language, source)?;
        let end_bias = self.recorded_end_bias(language)?;

        let mut tables = Vec::with_capacity(levels);
        for level in 1..=levels {
            tables.push(self.ensure_table(&corpus, level, end_bias)?);
        }
        self.record_levels(language, end_bias, levels)?;

        LanguageProfile::new(corpus, tables)
    }

    /// Load the cached corpus, or fetch and persist it.
    ///
    /// A fetch that fails as unavailable is retried once before the
    /// error is surfaced; a source with no data for the language at all
    /// maps to [`StoreError::LanguageNotFound`].
    fn ensure_corpus(
        &self,
        language: &str,
        source: &dyn DictionarySource,
    ) -> Result<Corpus, StoreError> {
        let path = self.words_path(language);
        if path.is_file() {
            debug!("using cached word list for '{}'", language);
            let text = std::fs::read_to_string(&path)?;
            return Ok(Corpus::from_lines(language, &text));
        }

        let raw = match source.word_list(language) {
            Ok(raw) => raw,
            Err(SourceError::NotFound(_)) => {
                return Err(StoreError::LanguageNotFound(language.to_string()));
            }
            Err(SourceError::Unavailable(reason)) => {
                warn!(
                    "dictionary fetch for '{}' failed ({}), retrying once",
                    language, reason
                );
                source.word_list(language)?
            }
        };

        let corpus = Corpus::from_dictionary_text(language, &raw);
        persist::write_atomic(&path, &corpus.to_lines())?;
        Ok(corpus)
    }

    /// Load a cached table, or build and persist it.
    fn ensure_table(
        &self,
        corpus: &Corpus,
        level: usize,
        end_bias: u64,
    ) -> Result<TransitionTable, StoreError> {
        let path = self.table_path(corpus.language(), level);
        if path.is_file() {
            debug!(
                "using cached level-{} table for '{}'",
                level,
                corpus.language()
            );
            return Ok(TransitionTable::load(&path, level)?);
        }

        warn!(
            "training level-{} table for '{}' for the first time; this may take a while",
            level,
            corpus.language()
        );
        let table = TransitionTable::build(corpus, level, end_bias)?;
        table.save(&path)?;
        Ok(table)
    }

    /// The end bias this language's tables were (or will be) trained
    /// with: the manifest's value if one exists, the store default
    /// otherwise.
    fn recorded_end_bias(&self, language: &str) -> Result<u64, StoreError> {
        Ok(self
            .read_manifest(language)?
            .map(|m| m.end_bias)
            .unwrap_or(self.end_bias))
    }

    /// Read a language's manifest, if one has been written.
    pub fn read_manifest(&self, language: &str) -> Result<Option<ProfileManifest>, StoreError> {
        let path = self.manifest_path(language);
        if !path.is_file() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(ron::from_str(&contents)?))
    }

    /// Record that levels 1..=`levels` are now on disk.
    fn record_levels(&self, language: &str, end_bias: u64, levels: usize) -> Result<(), StoreError> {
        let built = self
            .read_manifest(language)?
            .map(|m| m.levels)
            .unwrap_or_default();
        let max_level = built.iter().copied().max().unwrap_or(0).max(levels);

        let manifest = ProfileManifest {
            language: language.to_string(),
            end_bias,
            levels: (1..=max_level).collect(),
        };
        let serialized =
            ron::ser::to_string_pretty(&manifest, ron::ser::PrettyConfig::default())
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        persist::write_atomic(&self.manifest_path(language), &serialized)?;
        Ok(())
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
