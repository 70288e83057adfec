//! Candidate filtering from letter-count bounds instead of re-scoring.
//!
//! Each round pins down, per letter, a minimum count (greens plus yellows of
//! that letter) and, when the letter also drew a gray, an exact maximum.
//! Greens fix a position; every non-green position rules its letter out there.
//! For any history produced by [`Pattern::calculate`](crate::feedback::Pattern::calculate)
//! this admits exactly the same words as [`filter_candidates`](crate::solver::filter_candidates).

use crate::feedback::Feedback;
use crate::solver::Round;
use crate::wordbank::{WORD_LENGTH, Word, letter_index};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterConstraints {
    fixed: [Option<u8>; WORD_LENGTH],
    /// Bit `n` set at position `i`: letter `n` cannot be at `i`.
    excluded: [u32; WORD_LENGTH],
    min_count: [u8; 26],
    max_count: [u8; 26],
}

impl Default for LetterConstraints {
    fn default() -> Self {
        Self {
            fixed: [None; WORD_LENGTH],
            excluded: [0; WORD_LENGTH],
            min_count: [0; 26],
            max_count: [WORD_LENGTH as u8; 26],
        }
    }
}

impl LetterConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rounds(rounds: &[Round]) -> Self {
        let mut constraints = Self::new();
        for round in rounds {
            constraints.add_round(round);
        }
        constraints
    }

    /// Tighten the bounds with one more round.
    pub fn add_round(&mut self, round: &Round) {
        let letters = round.guess.letters();
        let mut known = [0u8; 26];
        let mut capped = 0u32;

        for (i, (&letter, &feedback)) in letters.iter().zip(round.pattern.feedbacks()).enumerate() {
            let idx = letter_index(letter);
            match feedback {
                Feedback::Correct => {
                    self.fixed[i] = Some(letter);
                    known[idx] += 1;
                }
                Feedback::Present => {
                    self.excluded[i] |= 1 << idx;
                    known[idx] += 1;
                }
                Feedback::Absent => {
                    self.excluded[i] |= 1 << idx;
                    capped |= 1 << idx;
                }
            }
        }

        for idx in 0..26 {
            self.min_count[idx] = self.min_count[idx].max(known[idx]);
            if capped & (1 << idx) != 0 {
                self.max_count[idx] = self.max_count[idx].min(known[idx]);
            }
        }
    }

    /// Does `word` satisfy every positional and count bound?
    pub fn admits(&self, word: &Word) -> bool {
        let letters = word.letters();
        let mut counts = [0u8; 26];

        for (i, &letter) in letters.iter().enumerate() {
            if let Some(fixed) = self.fixed[i] {
                if fixed != letter {
                    return false;
                }
            }
            let idx = letter_index(letter);
            if self.excluded[i] & (1 << idx) != 0 {
                return false;
            }
            counts[idx] += 1;
        }

        counts
            .iter()
            .zip(self.min_count.iter().zip(&self.max_count))
            .all(|(count, (min, max))| min <= count && count <= max)
    }
}

/// Same contract as `filter_candidates`, driven by [`LetterConstraints`].
pub fn filter_by_constraints(pool: &[Word], rounds: &[Round]) -> Vec<Word> {
    let constraints = LetterConstraints::from_rounds(rounds);
    pool.iter()
        .filter(|word| constraints.admits(word))
        .copied()
        .collect()
}
