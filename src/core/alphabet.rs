/// The fixed IPA alphabet — symbols, sentinels, and segmentation.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// The ordered catalog of IPA symbols the model operates over.
///
/// Some entries span more than one `char` (affricates and symbols carrying
/// combining marks), so the alphabet is a list of strings rather than chars.
/// Order matters: it defines the column layout of every transition table.
pub const IPA_SYMBOLS: &[&str] = &[
    "a", "ä", "ɑ", "ɒ", "æ", "b", "ḇ", "β", "c", "č", "ɔ", "ɕ", "ç", "d",
    "ḏ", "ḍ", "ð", "e", "ə", "ɚ", "ɛ", "ɝ", "f", "g", "ḡ", "h", "ʰ", "ḥ",
    "ḫ", "ẖ", "i", "ɪ", "ỉ", "ɨ", "j", "ʲ", "ǰ", "k", "ḳ", "ḵ", "l", "ḷ",
    "ɬ", "ɫ", "m", "n", "ŋ", "ṇ", "ɲ", "ɴ", "o", "ŏ", "ɸ", "θ", "p", "p̅",
    "þ", "q", "r", "ɹ", "ɾ", "ʀ", "ʁ", "ṛ", "s", "š", "ś", "ṣ", "ʃ", "t",
    "ṭ", "ṯ", "ʨ", "tʂ", "u", "ʊ", "ŭ", "ü", "v", "ʌ", "ɣ", "w", "ʍ", "x",
    "χ", "y", "ʸ", "ʎ", "z", "ẓ", "ž", "ʒ", "’", "‘", "ʔ", "ʕ",
];

/// Label for the word-start sentinel in persisted tables.
pub const START_LABEL: &str = "^";
/// Label for the word-end sentinel in persisted tables.
pub const END_LABEL: &str = "$";

/// Longest alphabet entry, in chars. Bounds the greedy-match window.
const MAX_SYMBOL_CHARS: usize = 2;

/// One atomic unit of a symbol sequence: an alphabet phone or a sentinel.
///
/// Sentinels are distinct from every phone and from each other; they mark
/// sequence boundaries during training and generation and never appear in
/// a finished word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// Word-start sentinel, rendered as `^`.
    Start,
    /// Word-end sentinel, rendered as `$`.
    End,
    /// Index into [`IPA_SYMBOLS`].
    Phone(u16),
}

impl Symbol {
    /// The textual label used in persisted tables and rendered words.
    pub fn label(&self) -> &'static str {
        match self {
            Symbol::Start => START_LABEL,
            Symbol::End => END_LABEL,
            Symbol::Phone(i) => IPA_SYMBOLS[*i as usize],
        }
    }

    /// Parse a persisted label back into a symbol.
    pub fn from_label(label: &str) -> Option<Symbol> {
        match label {
            START_LABEL => Some(Symbol::Start),
            END_LABEL => Some(Symbol::End),
            other => phone_index(other).map(Symbol::Phone),
        }
    }

    /// Column index of this symbol in a transition row, if it has one.
    ///
    /// Columns cover `Alphabet ∪ {End}`; `Start` never appears as an
    /// observed next symbol and has no column.
    pub fn column(&self) -> Option<usize> {
        match self {
            Symbol::Start => None,
            Symbol::End => Some(end_column()),
            Symbol::Phone(i) => Some(*i as usize),
        }
    }
}

/// Number of columns in a transition row: one per phone, plus `End`.
pub fn column_count() -> usize {
    IPA_SYMBOLS.len() + 1
}

/// Column index of the `End` sentinel (always the last column).
pub fn end_column() -> usize {
    IPA_SYMBOLS.len()
}

/// Look up a phone's alphabet index by its label.
pub fn phone_index(label: &str) -> Option<u16> {
    static INDEX: OnceLock<FxHashMap<&'static str, u16>> = OnceLock::new();
    let index = INDEX.get_or_init(|| {
        IPA_SYMBOLS
            .iter()
            .enumerate()
            .map(|(i, s)| (*s, i as u16))
            .collect()
    });
    index.get(label).copied()
}

/// Segment a string into alphabet symbols by greedy longest match.
///
/// Characters that match no alphabet entry (stress marks, length marks,
/// stray punctuation) are dropped. This is the cleaning step applied to
/// every dictionary entry before training.
pub fn segment(text: &str) -> Vec<Symbol> {
    let chars: Vec<char> = text.chars().collect();
    let mut symbols = Vec::new();
    let mut i = 0;
    let mut buf = String::new();

    while i < chars.len() {
        let mut matched = false;
        for len in (1..=MAX_SYMBOL_CHARS).rev() {
            if i + len > chars.len() {
                continue;
            }
            buf.clear();
            buf.extend(&chars[i..i + len]);
            if let Some(idx) = phone_index(&buf) {
                symbols.push(Symbol::Phone(idx));
                i += len;
                matched = true;
                break;
            }
        }
        if !matched {
            // Not in the alphabet, drop it
            i += 1;
        }
    }

    symbols
}

/// Render a symbol sequence as a plain IPA string, skipping sentinels.
pub fn render(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .filter(|s| matches!(s, Symbol::Phone(_)))
        .map(|s| s.label())
        .collect()
}
