//! Page text reconstruction and the character-to-word index
//!
//! The diff runs on characters while highlighting works on words. This module
//! builds the page text by joining word texts with one separator and records,
//! for every character of that text, the word that owns it. Separator
//! positions map to `None`.
//!
//! Positions are counted in characters (Unicode scalar values), never bytes.

use crate::types::Word;

/// Separator placed between consecutive words
pub const DEFAULT_SEPARATOR: char = ' ';

/// Position -> owning word index; `None` marks a joining separator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharIndexMap(Vec<Option<usize>>);

impl CharIndexMap {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Word owning character `position`, `None` for separators and
    /// out-of-range positions
    pub fn word_at(&self, position: usize) -> Option<usize> {
        self.0.get(position).copied().flatten()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.0
    }
}

/// Reconstructed page text with its index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedText {
    pub text: String,
    pub map: CharIndexMap,
}

/// Build the reconstructed text and its character index for a word list
pub fn build_index(words: &[Word], separator: char) -> IndexedText {
    let mut text = String::new();
    let mut map = Vec::new();

    for (i, word) in words.iter().enumerate() {
        for c in word.text.chars() {
            text.push(c);
            map.push(Some(i));
        }
        if i + 1 < words.len() {
            text.push(separator);
            map.push(None);
        }
    }

    IndexedText {
        text,
        map: CharIndexMap(map),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts
            .iter()
            .map(|t| Word::new(*t, 0.0, 0.0, 1.0, 1.0))
            .collect()
    }

    #[test]
    fn test_empty_word_list() {
        let indexed = build_index(&[], DEFAULT_SEPARATOR);
        assert_eq!(indexed.text, "");
        assert!(indexed.map.is_empty());
    }

    #[test]
    fn test_single_word_has_no_separator() {
        let indexed = build_index(&words(&["hello"]), DEFAULT_SEPARATOR);
        assert_eq!(indexed.text, "hello");
        assert_eq!(indexed.map.as_slice(), &[Some(0); 5]);
    }

    #[test]
    fn test_separators_map_to_none() {
        let indexed = build_index(&words(&["ab", "c", "de"]), DEFAULT_SEPARATOR);
        assert_eq!(indexed.text, "ab c de");
        assert_eq!(
            indexed.map.as_slice(),
            &[Some(0), Some(0), None, Some(1), None, Some(2), Some(2)]
        );
    }

    #[test]
    fn test_multibyte_characters_count_once() {
        let indexed = build_index(&words(&["Total:", "100€"]), DEFAULT_SEPARATOR);
        assert_eq!(indexed.map.len(), 11);
        assert_eq!(indexed.map.word_at(10), Some(1));
        assert_eq!(indexed.map.word_at(6), None);
    }

    #[test]
    fn test_word_at_out_of_range() {
        let indexed = build_index(&words(&["a"]), DEFAULT_SEPARATOR);
        assert_eq!(indexed.map.word_at(1), None);
    }

    #[test]
    fn test_custom_separator() {
        let indexed = build_index(&words(&["a", "b"]), '\n');
        assert_eq!(indexed.text, "a\nb");
    }

    #[test]
    fn test_deterministic() {
        let list = words(&["x", "yy", "zzz"]);
        assert_eq!(
            build_index(&list, DEFAULT_SEPARATOR),
            build_index(&list, DEFAULT_SEPARATOR)
        );
    }
}
