/// Transition model — training, normalization, and tabular persistence.
///
/// A level-k table maps each context of k preceding symbols to a
/// probability distribution over `Alphabet ∪ {End}`. Tables are the unit
/// of training and caching; one table exists per (language, level).

use std::fmt::Write as _;
use std::path::Path;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::alphabet::{self, Symbol, END_LABEL, IPA_SYMBOLS};
use crate::core::corpus::Corpus;
use crate::core::persist;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("corpus for '{0}' contains no words")]
    EmptyCorpus(String),
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed table '{path}' at line {line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },
}

/// Conditional next-symbol distributions for one Markov order.
///
/// Rows are keyed by a context of exactly `level` symbols drawn from
/// `Alphabet ∪ {Start}`; each value holds one probability per column of
/// `Alphabet ∪ {End}`. A context that was never observed has no row,
/// which readers treat as "no information" rather than uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    level: usize,
    rows: FxHashMap<Vec<Symbol>, Vec<f64>>,
}

impl TransitionTable {
    /// Train a level-`level` table from a corpus.
    ///
    /// Each word is padded with `level` copies of `Start` and a single
    /// `End`, then every (context, next-symbol) pair is counted. Counts
    /// toward `End` are weighted `1 + end_bias`, modeling the tendency of
    /// spoken words to end earlier than their dictionary transcriptions.
    /// Rows are then normalized to sum to 1.
    ///
    /// Training is deterministic: the same corpus order, level, and
    /// end_bias always produce an identical table.
    ///
    /// # Errors
    /// Returns [`BuildError::EmptyCorpus`] if the corpus has no words.
    pub fn build(corpus: &Corpus, level: usize, end_bias: u64) -> Result<Self, BuildError> {
        assert!(level >= 1, "level must be >= 1");
        if corpus.is_empty() {
            return Err(BuildError::EmptyCorpus(corpus.language().to_string()));
        }

        let columns = alphabet::column_count();
        let mut counts: FxHashMap<Vec<Symbol>, Vec<u64>> = FxHashMap::default();

        for word in corpus.iter() {
            let symbols = alphabet::segment(word);
            if symbols.is_empty() {
                continue;
            }

            let mut padded = Vec::with_capacity(level + symbols.len() + 1);
            padded.extend(std::iter::repeat(Symbol::Start).take(level));
            padded.extend(symbols);
            padded.push(Symbol::End);

            // Every position from the first real symbol through End
            for i in level..padded.len() {
                let Some(column) = padded[i].column() else {
                    continue;
                };
                let context = padded[i - level..i].to_vec();
                let row = counts
                    .entry(context)
                    .or_insert_with(|| vec![0u64; columns]);
                row[column] += if padded[i] == Symbol::End {
                    1 + end_bias
                } else {
                    1
                };
            }
        }

        let mut rows = FxHashMap::default();
        for (context, row) in counts {
            let total: u64 = row.iter().sum();
            // Every accumulated row has at least one observation
            let probs = row.iter().map(|&c| c as f64 / total as f64).collect();
            rows.insert(context, probs);
        }

        Ok(Self { level, rows })
    }

    /// The Markov order this table was trained at.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of observed contexts.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The probability row for a context, or `None` if never observed.
    pub fn row(&self, context: &[Symbol]) -> Option<&[f64]> {
        self.rows.get(context).map(Vec::as_slice)
    }

    /// Persist the table as flat tabular text, atomically.
    ///
    /// Layout: a header row of column labels (the alphabet plus `$`),
    /// then one line per observed context — the context's symbol labels
    /// joined by spaces, followed by the probabilities. Floats use Rust's
    /// shortest round-trip formatting, so a reload is bit-exact. Rows are
    /// sorted by context label for reproducible files.
    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        let mut text = String::new();
        text.push_str("context");
        for label in IPA_SYMBOLS {
            text.push(',');
            text.push_str(label);
        }
        text.push(',');
        text.push_str(END_LABEL);
        text.push('\n');

        let mut entries: Vec<(String, &Vec<f64>)> = self
            .rows
            .iter()
            .map(|(context, row)| (context_key(context), row))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, row) in entries {
            text.push_str(&key);
            for p in row {
                // Infallible for String
                let _ = write!(text, ",{}", p);
            }
            text.push('\n');
        }

        persist::write_atomic(path, &text)?;
        Ok(())
    }

    /// Load a persisted level-`level` table.
    pub fn load(path: &Path, level: usize) -> Result<Self, TableError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path)?;
        let columns = alphabet::column_count();
        let parse_err = |line: usize, reason: String| TableError::Parse {
            path: display.clone(),
            line,
            reason,
        };

        let mut lines = contents.lines().enumerate();
        let (_, header) = lines
            .next()
            .ok_or_else(|| parse_err(1, "empty file".to_string()))?;
        let labels: Vec<&str> = header.split(',').skip(1).collect();
        let expected: Vec<&str> = IPA_SYMBOLS.iter().copied().chain([END_LABEL]).collect();
        if labels != expected {
            return Err(parse_err(1, "column labels do not match the alphabet".to_string()));
        }

        let mut rows = FxHashMap::default();
        for (i, line) in lines {
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split(',');
            let key = fields
                .next()
                .ok_or_else(|| parse_err(i + 1, "missing context".to_string()))?;

            let context = parse_context(key)
                .ok_or_else(|| parse_err(i + 1, format!("bad context '{}'", key)))?;
            if context.len() != level {
                return Err(parse_err(
                    i + 1,
                    format!("context '{}' is not {} symbols", key, level),
                ));
            }

            let mut row = Vec::with_capacity(columns);
            for field in fields {
                let p: f64 = field
                    .parse()
                    .map_err(|_| parse_err(i + 1, format!("bad probability '{}'", field)))?;
                row.push(p);
            }
            if row.len() != columns {
                return Err(parse_err(
                    i + 1,
                    format!("expected {} columns, found {}", columns, row.len()),
                ));
            }

            rows.insert(context, row);
        }

        Ok(Self { level, rows })
    }
}

/// Space-joined symbol labels identifying a context row.
fn context_key(context: &[Symbol]) -> String {
    context
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inverse of [`context_key`]. Contexts may contain `Start` but never `End`.
fn parse_context(key: &str) -> Option<Vec<Symbol>> {
    key.split(' ')
        .map(|label| match Symbol::from_label(label) {
            Some(Symbol::End) | None => None,
            Some(s) => Some(s),
        })
        .collect()
}
