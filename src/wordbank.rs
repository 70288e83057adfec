use crate::error::{Result, SolverError};
use std::fmt;
use std::str::FromStr;

pub const WORD_LENGTH: usize = 5;

pub const EMBEDDED_ANSWERS: &str = include_str!("resources/answers.txt");
pub const EMBEDDED_GUESSES: &str = include_str!("resources/guesses.txt");

/// A normalized five letter word: lowercase ASCII `a`..=`z` only.
///
/// Ordering is plain lexicographic order of the letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Trim, lowercase and validate raw text.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let normalized = trimmed.to_lowercase();
        let actual = normalized.chars().count();
        if actual != WORD_LENGTH {
            return Err(SolverError::InvalidLength {
                input: trimmed.to_string(),
                expected: WORD_LENGTH,
                actual,
            });
        }
        if let Some(found) = normalized.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(SolverError::InvalidAlphabet {
                input: trimmed.to_string(),
                found,
                expected: "letters a-z",
            });
        }
        let mut letters = [0u8; WORD_LENGTH];
        letters.copy_from_slice(normalized.as_bytes());
        Ok(Self(letters))
    }

    pub fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Bit `n` is set when the `n`th letter of the alphabet occurs in the word.
    pub fn letter_mask(&self) -> u32 {
        self.0
            .iter()
            .fold(0, |mask, &b| mask | 1 << letter_index(b))
    }
}

/// Alphabet index (0 for `a`) of a normalized letter.
pub(crate) fn letter_index(letter: u8) -> usize {
    (letter - b'a') as usize
}

impl FromStr for Word {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Normalize a word list entry, dropping anything that is not five letters.
pub fn normalize_word(raw: &str) -> Option<Word> {
    Word::parse(raw).ok()
}

/// Parse a newline-delimited list into a sorted, deduplicated word list.
pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    let mut words: Vec<Word> = data.lines().filter_map(normalize_word).collect();
    words.sort_unstable();
    words.dedup();
    words
}

/// Which list supplies the candidate answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CandidateSource {
    /// Curated answer list
    #[default]
    #[value(alias = "la")]
    Answers,
    /// Extra guess-only list
    #[value(alias = "ta")]
    Guesses,
    /// Union of both lists
    All,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Answers => "answers",
            Self::Guesses => "guesses",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

/// Candidate answers plus every word that may be typed as a guess.
///
/// The allowed list always contains every candidate and is kept sorted.
#[derive(Debug, Clone)]
pub struct Dictionary {
    candidates: Vec<Word>,
    allowed: Vec<Word>,
}

impl Dictionary {
    pub fn new(candidates: Vec<Word>, mut allowed: Vec<Word>) -> Self {
        allowed.extend_from_slice(&candidates);
        allowed.sort_unstable();
        allowed.dedup();
        Self {
            candidates,
            allowed,
        }
    }

    pub fn from_lists(answers: &str, guesses: &str, source: CandidateSource) -> Result<Self> {
        let answers = load_wordbank_from_str(answers);
        let guesses = load_wordbank_from_str(guesses);
        let candidates = match source {
            CandidateSource::Answers => answers.clone(),
            CandidateSource::Guesses => guesses.clone(),
            CandidateSource::All => {
                let mut all = answers.clone();
                all.extend_from_slice(&guesses);
                all.sort_unstable();
                all.dedup();
                all
            }
        };
        if candidates.is_empty() {
            return Err(SolverError::EmptyDictionary(source.to_string()));
        }
        let mut allowed = answers;
        allowed.extend(guesses);
        Ok(Self::new(candidates, allowed))
    }

    /// Dictionary built from the word lists compiled into the binary.
    pub fn embedded(source: CandidateSource) -> Result<Self> {
        Self::from_lists(EMBEDDED_ANSWERS, EMBEDDED_GUESSES, source)
    }

    pub fn candidates(&self) -> &[Word] {
        &self.candidates
    }

    pub fn allowed(&self) -> &[Word] {
        &self.allowed
    }

    pub fn is_allowed(&self, word: &Word) -> bool {
        self.allowed.binary_search(word).is_ok()
    }
}
