/// Dictionary sources — external suppliers of raw pronunciation word lists.
///
/// Fetching and versioning the dictionary collection itself is out of
/// scope; the store only needs "the word list file for language X".

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// The source has no data for the requested language at all.
    #[error("no dictionary data for language '{0}'")]
    NotFound(String),
    /// The source exists but could not be read; worth one retry.
    #[error("dictionary source unavailable: {0}")]
    Unavailable(String),
}

/// A supplier of raw per-language pronunciation word lists.
///
/// Implementations return the file content as-is; parsing and cleaning
/// happen in [`Corpus::from_dictionary_text`](crate::core::corpus::Corpus).
pub trait DictionarySource {
    /// Raw word-list text for `language`, lines of `headword<TAB>/ipa/…`.
    fn word_list(&self, language: &str) -> Result<String, SourceError>;
}

/// Reads `<dir>/<language>.txt` from a local checkout of an ipa-dict
/// style repository's data directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl DictionarySource for DirSource {
    fn word_list(&self, language: &str) -> Result<String, SourceError> {
        let path = self.dir.join(format!("{}.txt", language));
        if !path.is_file() {
            return Err(SourceError::NotFound(language.to_string()));
        }
        std::fs::read_to_string(&path)
            .map_err(|e| SourceError::Unavailable(format!("{}: {}", path.display(), e)))
    }
}
