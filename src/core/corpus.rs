/// Corpus — the IPA word list for one language.
///
/// Serves as both training data for the transition tables and the
/// novelty-exclusion set during generation. Loaded once per language and
/// treated as an immutable snapshot afterwards.

use rustc_hash::FxHashSet;

use crate::core::alphabet;

/// A deduplicated, order-preserving set of IPA words for one language.
///
/// Insertion order is preserved so that training iterates words in a fixed
/// order, keeping table builds deterministic.
#[derive(Debug, Clone)]
pub struct Corpus {
    language: String,
    words: Vec<String>,
    index: FxHashSet<String>,
}

impl Corpus {
    /// An empty corpus for the given language.
    pub fn empty(language: &str) -> Self {
        Self {
            language: language.to_string(),
            words: Vec::new(),
            index: FxHashSet::default(),
        }
    }

    /// Parse raw dictionary text in the ipa-dict format.
    ///
    /// Each line has the shape `headword<TAB>/ipa1/, /ipa2/, …`. Only the
    /// first pronunciation is kept; alternates are discarded. Entries are
    /// cleaned by greedy alphabet segmentation (dropping stress marks and
    /// anything else outside the alphabet) and stored in canonical form.
    pub fn from_dictionary_text(language: &str, raw: &str) -> Self {
        let mut corpus = Self::empty(language);
        for line in raw.lines() {
            let Some(entry) = first_pronunciation(line) else {
                continue;
            };
            let symbols = alphabet::segment(entry);
            if symbols.is_empty() {
                continue;
            }
            corpus.push(alphabet::render(&symbols));
        }
        corpus
    }

    /// Load a persisted word list: one canonical IPA word per line.
    pub fn from_lines(language: &str, text: &str) -> Self {
        let mut corpus = Self::empty(language);
        for line in text.lines() {
            let word = line.trim();
            if !word.is_empty() {
                corpus.push(word.to_string());
            }
        }
        corpus
    }

    fn push(&mut self, word: String) {
        if self.index.insert(word.clone()) {
            self.words.push(word);
        }
    }

    /// The language this corpus was built for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether `word` is a real dictionary word.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    /// Words in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Serialized form for the persisted `words.txt` resource.
    pub fn to_lines(&self) -> String {
        self.words.join("\n")
    }
}

/// Extract the content between the first pair of slashes on a line.
fn first_pronunciation(line: &str) -> Option<&str> {
    let start = line.find('/')? + 1;
    let rest = &line[start..];
    let end = rest.find('/')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dictionary_lines() {
        let raw = "cat\t/kat/\ntack\t/tak/\n";
        let corpus = Corpus::from_dictionary_text("toy", raw);
        assert_eq!(corpus.len(), 2);
        assert!(corpus.contains("kat"));
        assert!(corpus.contains("tak"));
    }

    #[test]
    fn keeps_only_first_pronunciation() {
        let raw = "either\t/at/, /æt/\n";
        let corpus = Corpus::from_dictionary_text("toy", raw);
        assert_eq!(corpus.len(), 1);
        assert!(corpus.contains("at"));
        assert!(!corpus.contains("æt"));
    }

    #[test]
    fn strips_non_alphabet_marks() {
        let raw = "think\t/ˈθɪŋk/\n";
        let corpus = Corpus::from_dictionary_text("toy", raw);
        assert!(corpus.contains("θɪŋk"));
    }

    #[test]
    fn skips_malformed_and_empty_lines() {
        let raw = "no slashes here\n\nbad\t/ˈˈ/\nok\t/ok/\n";
        let corpus = Corpus::from_dictionary_text("toy", raw);
        assert_eq!(corpus.len(), 1);
        assert!(corpus.contains("ok"));
    }

    #[test]
    fn deduplicates_preserving_order() {
        let raw = "a\t/kat/\nb\t/tak/\nc\t/kat/\n";
        let corpus = Corpus::from_dictionary_text("toy", raw);
        let words: Vec<&str> = corpus.iter().collect();
        assert_eq!(words, vec!["kat", "tak"]);
    }

    #[test]
    fn line_round_trip() {
        let corpus = Corpus::from_lines("toy", "kat\ntak\n\nmok\n");
        assert_eq!(corpus.to_lines(), "kat\ntak\nmok");
        let reloaded = Corpus::from_lines("toy", &corpus.to_lines());
        assert_eq!(reloaded.len(), corpus.len());
    }
}
