use crate::error::{Result, SolverError};
use crate::feedback::Pattern;
use crate::wordbank::{Dictionary, Word};
use crate::{debug_log, info_log};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// One turn of play: the guess and the feedback it received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Round {
    pub guess: Word,
    pub pattern: Pattern,
}

impl Round {
    pub fn new(guess: Word, pattern: Pattern) -> Self {
        Self { guess, pattern }
    }

    /// Validate a guess/pattern pair given as raw text.
    pub fn from_parts(guess: &str, pattern: &str) -> Result<Self> {
        Ok(Self::new(Word::parse(guess)?, Pattern::parse(pattern)?))
    }

    /// Parse a `"<guess> <pattern>"` line such as `"crane gybbg"`.
    pub fn parse(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [guess, pattern] => Self::from_parts(guess, pattern),
            _ => Err(SolverError::Usage(format!(
                "expected \"<guess> <pattern>\", got \"{}\"",
                line.trim()
            ))),
        }
    }

    /// Would this round have been observed if `answer` were the secret?
    pub fn admits(&self, answer: &Word) -> bool {
        Pattern::calculate(answer, &self.guess) == self.pattern
    }
}

impl FromStr for Round {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.guess, self.pattern)
    }
}

/// Keep the words of `pool` that are consistent with every round, in pool order.
pub fn filter_candidates(pool: &[Word], rounds: &[Round]) -> Vec<Word> {
    if rounds.is_empty() {
        return pool.to_vec();
    }
    let filtered: Vec<Word> = pool
        .iter()
        .filter(|word| rounds.iter().all(|round| round.admits(word)))
        .copied()
        .collect();
    debug_log!(
        "filter_candidates() - {} rounds narrowed {} words to {}",
        rounds.len(),
        pool.len(),
        filtered.len()
    );
    filtered
}

/// Number of words containing each letter at least once, indexed `a`..=`z`.
pub fn build_letter_frequency(words: &[Word]) -> [usize; 26] {
    let mut freq = [0; 26];
    for word in words {
        let mask = word.letter_mask();
        for (letter, count) in freq.iter_mut().enumerate() {
            if mask & (1 << letter) != 0 {
                *count += 1;
            }
        }
    }
    freq
}

/// Sum of the frequencies of the distinct letters of `word`.
pub fn score_word(word: &Word, freq: &[usize; 26]) -> usize {
    let mask = word.letter_mask();
    freq.iter()
        .enumerate()
        .filter(|&(letter, _)| mask & (1 << letter) != 0)
        .map(|(_, &count)| count)
        .sum()
}

/// A suggested next guess with its heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedGuess {
    pub word: Word,
    pub score: usize,
}

/// Rank `guess_pool` by how common its letters are across `remaining`.
///
/// Highest score first, ties broken by ascending word. At most `top_n`
/// entries are returned; a `top_n` of 0 yields nothing.
pub fn rank_guesses(remaining: &[Word], guess_pool: &[Word], top_n: usize) -> Vec<RankedGuess> {
    let freq = build_letter_frequency(remaining);
    let mut scored: Vec<RankedGuess> = guess_pool
        .iter()
        .map(|&word| RankedGuess {
            word,
            score: score_word(&word, &freq),
        })
        .collect();
    scored.sort_by_key(|ranked| (Reverse(ranked.score), ranked.word));
    scored.truncate(top_n);
    scored
}

/// Which words are offered as suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GuessPool {
    /// Only words that could still be the answer
    #[default]
    Candidates,
    /// Every allowed guess, including ones already ruled out
    Allowed,
}

/// Remaining candidates and the ranked suggestions drawn from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub remaining: Vec<Word>,
    pub suggestions: Vec<RankedGuess>,
}

impl Suggestion {
    /// The answer, once exactly one candidate is left.
    pub fn solution(&self) -> Option<&Word> {
        match self.remaining.as_slice() {
            [answer] => Some(answer),
            _ => None,
        }
    }
}

/// Filter the dictionary's candidates by `rounds` and rank the next guesses.
///
/// When nothing remains, the full allowed list stands in as both the
/// frequency source and the guess pool so the ranking stays meaningful.
pub fn suggest(
    dictionary: &Dictionary,
    rounds: &[Round],
    top_n: usize,
    pool: GuessPool,
) -> Suggestion {
    let remaining = filter_candidates(dictionary.candidates(), rounds);
    let suggestions = if remaining.is_empty() {
        info_log!("suggest() - no candidates remain, ranking the allowed list instead");
        rank_guesses(dictionary.allowed(), dictionary.allowed(), top_n)
    } else {
        let guess_pool = match pool {
            GuessPool::Candidates => remaining.as_slice(),
            GuessPool::Allowed => dictionary.allowed(),
        };
        rank_guesses(&remaining, guess_pool, top_n)
    };
    Suggestion {
        remaining,
        suggestions,
    }
}

/// Validate raw history and produce suggestions in one call.
///
/// With `strict` set, every guess must be in the allowed list.
pub fn suggest_from_history(
    dictionary: &Dictionary,
    rounds: &[Round],
    top_n: usize,
    pool: GuessPool,
    strict: bool,
) -> Result<Suggestion> {
    if top_n == 0 {
        return Err(SolverError::Usage(
            "number of suggestions must be at least 1".to_string(),
        ));
    }
    if strict {
        if let Some(round) = rounds.iter().find(|r| !dictionary.is_allowed(&r.guess)) {
            return Err(SolverError::UnknownGuess(round.guess.to_string()));
        }
    }
    Ok(suggest(dictionary, rounds, top_n, pool))
}
