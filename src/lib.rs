// Library interface for wordle-assist
// This allows integration tests to access internal modules

pub mod cli;
pub mod constraints;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod solver;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use constraints::filter_by_constraints;
pub use error::{Result, SolverError};
pub use feedback::{Feedback, Pattern, score};
pub use game_state::{GameOutcome, Session, game_loop};
pub use solver::{
    GuessPool, RankedGuess, Round, Suggestion, build_letter_frequency, filter_candidates,
    rank_guesses, score_word, suggest, suggest_from_history,
};
pub use wordbank::{CandidateSource, Dictionary, Word, load_wordbank_from_str};
