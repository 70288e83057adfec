//! Feedback scoring for a guess against an answer.
//!
//! A [`Pattern`] holds one [`Feedback`] per letter of the guess, in guess order.
//! It has two textual forms: a five character code using `g`/`y`/`b`
//! (`x` is accepted for `b` on input), and the spelled-out symbol names
//! `CORRECT`, `PRESENT` and `ABSENT`, comma separated. [`Pattern::parse`]
//! accepts either; `Display` always writes the code.

use crate::error::{Result, SolverError};
use crate::wordbank::{WORD_LENGTH, Word, letter_index};
use std::fmt;
use std::str::FromStr;

/// Feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Right letter, right position (green)
    Correct,
    /// Right letter, wrong position (yellow)
    Present,
    /// Letter not present beyond the instances already accounted for (gray)
    Absent,
}

impl Feedback {
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'g',
            Self::Present => 'y',
            Self::Absent => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' => Some(Self::Correct),
            'y' => Some(Self::Present),
            'b' | 'x' => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Correct => "CORRECT",
            Self::Present => "PRESENT",
            Self::Absent => "ABSENT",
        }
    }
}

impl FromStr for Feedback {
    type Err = SolverError;

    /// Parse a spelled-out symbol name, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CORRECT" => Ok(Self::Correct),
            "PRESENT" => Ok(Self::Present),
            "ABSENT" => Ok(Self::Absent),
            _ => Err(SolverError::InvalidAlphabet {
                input: s.to_string(),
                found: s.trim().chars().next().unwrap_or(' '),
                expected: "CORRECT, PRESENT or ABSENT",
            }),
        }
    }
}

/// Five feedback symbols aligned with the letters of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern(pub [Feedback; WORD_LENGTH]);

impl Pattern {
    pub const ALL_CORRECT: Self = Self([Feedback::Correct; WORD_LENGTH]);

    /// Feedback that `guess` receives when the secret is `answer`.
    ///
    /// Greens are resolved first and consume their answer letter. Yellows are
    /// then handed out left to right while unclaimed copies of the letter remain,
    /// so a guess with more copies of a letter than the answer only gets
    /// `Present` on the leftmost ones.
    pub fn calculate(answer: &Word, guess: &Word) -> Self {
        let answer = answer.letters();
        let guess = guess.letters();

        let mut feedback = [Feedback::Absent; WORD_LENGTH];
        let mut unclaimed = [0u8; 26];

        for i in 0..WORD_LENGTH {
            if guess[i] == answer[i] {
                feedback[i] = Feedback::Correct;
            } else {
                unclaimed[letter_index(answer[i])] += 1;
            }
        }

        for i in 0..WORD_LENGTH {
            if feedback[i] == Feedback::Correct {
                continue;
            }
            let remaining = &mut unclaimed[letter_index(guess[i])];
            if *remaining > 0 {
                feedback[i] = Feedback::Present;
                *remaining -= 1;
            }
        }

        Self(feedback)
    }

    pub fn feedbacks(&self) -> &[Feedback; WORD_LENGTH] {
        &self.0
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::ALL_CORRECT
    }

    /// Parse a `g`/`y`/`b` code such as `"gybbg"`, or comma separated
    /// names such as `"CORRECT,PRESENT,ABSENT,ABSENT,CORRECT"`.
    pub fn parse(raw: &str) -> Result<Self> {
        let code = raw.trim();
        if code.contains(',') {
            let names: Vec<&str> = code.split(',').collect();
            return Self::from_names(&names);
        }
        let actual = code.chars().count();
        if actual != WORD_LENGTH {
            return Err(SolverError::InvalidLength {
                input: code.to_string(),
                expected: WORD_LENGTH,
                actual,
            });
        }
        let mut feedback = [Feedback::Absent; WORD_LENGTH];
        for (slot, c) in feedback.iter_mut().zip(code.chars()) {
            *slot = Feedback::from_char(c).ok_or_else(|| SolverError::InvalidAlphabet {
                input: code.to_string(),
                found: c,
                expected: "g, y or b",
            })?;
        }
        Ok(Self(feedback))
    }

    /// Build a pattern from spelled-out symbol names.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        if names.len() != WORD_LENGTH {
            let joined: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
            return Err(SolverError::InvalidLength {
                input: joined.join(","),
                expected: WORD_LENGTH,
                actual: names.len(),
            });
        }
        let mut feedback = [Feedback::Absent; WORD_LENGTH];
        for (slot, name) in feedback.iter_mut().zip(names) {
            *slot = name.as_ref().parse()?;
        }
        Ok(Self(feedback))
    }

    pub fn names(&self) -> [&'static str; WORD_LENGTH] {
        self.0.map(Feedback::name)
    }
}

impl FromStr for Pattern {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for feedback in self.0 {
            write!(f, "{}", feedback.to_char())?;
        }
        Ok(())
    }
}

/// Score raw text, normalizing both words first.
///
/// Fails with `InvalidLength` (or `InvalidAlphabet`) rather than producing a
/// pattern for malformed input.
pub fn score(answer: &str, guess: &str) -> Result<Pattern> {
    let answer = Word::parse(answer)?;
    let guess = Word::parse(guess)?;
    Ok(Pattern::calculate(&answer, &guess))
}
