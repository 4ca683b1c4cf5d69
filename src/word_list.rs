use std::fs;
use std::path::Path;
use thiserror::Error;

/// The word list for the small built-in puzzle.
pub const SMALL_WORD_LIST: [&str; 15] = [
    "AFT", "LASER", "ALE", "LEE", "EEL", "LINE", "HEEL", "SAILS", "HIKE", "SHEET", "HOSES",
    "STEER", "KEEL", "TIE", "KNOT",
];

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("can't read word list {path}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("word list contains invalid word {word:?} on line {line}")]
    InvalidWord { word: String, line: usize },
}

pub fn small_word_list() -> Vec<String> {
    SMALL_WORD_LIST.iter().map(|word| word.to_string()).collect()
}

/// Parse a word list with one word per line. Surrounding whitespace is trimmed and blank lines
/// are skipped; a line with whitespace inside the word is rejected, since no slot could hold it.
pub fn parse_word_list(contents: &str) -> Result<Vec<String>, WordListError> {
    contents
        .lines()
        .enumerate()
        .map(|(line_idx, line)| (line_idx, line.trim()))
        .filter(|(_, word)| !word.is_empty())
        .map(|(line_idx, word)| {
            if word.chars().any(char::is_whitespace) {
                Err(WordListError::InvalidWord { word: word.to_string(), line: line_idx + 1 })
            } else {
                Ok(word.to_string())
            }
        })
        .collect()
}

pub fn load_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, WordListError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| WordListError::InvalidPath {
        path: path.display().to_string(),
        source,
    })?;

    parse_word_list(&contents)
}

#[cfg(test)]
mod tests {
    use crate::word_list::{load_word_list, parse_word_list, small_word_list, WordListError};

    #[test]
    fn test_parse_word_list() {
        let words = parse_word_list("AFT\n  laser \n\n\tAle\r\n").unwrap();

        assert_eq!(words, vec!["AFT", "laser", "Ale"]);
    }

    #[test]
    fn test_parse_word_list_rejects_phrases() {
        let result = parse_word_list("AFT\nHIGH SEAS\n");

        assert!(matches!(
            result,
            Err(WordListError::InvalidWord { word, line: 2 }) if word == "HIGH SEAS"
        ));
    }

    #[test]
    fn test_load_word_list() {
        let path = std::env::temp_dir().join(format!("fillcsp-words-{}.txt", std::process::id()));
        std::fs::write(&path, small_word_list().join("\n")).unwrap();

        let words = load_word_list(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(words, small_word_list());
        assert!(matches!(load_word_list(&path), Err(WordListError::InvalidPath { .. })));
    }
}
