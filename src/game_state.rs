use crate::error::{Result, SolverError};
use crate::solver::{GuessPool, Round, Suggestion, filter_candidates, suggest};
use crate::wordbank::{Dictionary, Word};
use crate::{debug_log, info_log};

pub const DEFAULT_TOP_N: usize = 10;

/// Caller-owned state of one solving session.
///
/// Only the round history is stored; candidates are recomputed from the
/// dictionary on every query, so undo and reset need no bookkeeping.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    dictionary: &'a Dictionary,
    rounds: Vec<Round>,
    top_n: usize,
    pool: GuessPool,
}

impl<'a> Session<'a> {
    pub fn new(dictionary: &'a Dictionary, top_n: usize, pool: GuessPool) -> Result<Self> {
        check_top_n(top_n)?;
        Ok(Self {
            dictionary,
            rounds: Vec::new(),
            top_n,
            pool,
        })
    }

    pub fn dictionary(&self) -> &'a Dictionary {
        self.dictionary
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn set_top_n(&mut self, top_n: usize) -> Result<()> {
        check_top_n(top_n)?;
        self.top_n = top_n;
        Ok(())
    }

    pub fn push_round(&mut self, round: Round) {
        info_log!("Session::push_round() - {}", round);
        self.rounds.push(round);
    }

    pub fn undo(&mut self) -> Option<Round> {
        let dropped = self.rounds.pop();
        debug_log!("Session::undo() - dropped {:?}", dropped);
        dropped
    }

    pub fn reset(&mut self) {
        self.rounds.clear();
    }

    pub fn candidates(&self) -> Vec<Word> {
        filter_candidates(self.dictionary.candidates(), &self.rounds)
    }

    pub fn suggest(&self) -> Suggestion {
        suggest(self.dictionary, &self.rounds, self.top_n, self.pool)
    }
}

fn check_top_n(top_n: usize) -> Result<()> {
    if top_n == 0 {
        return Err(SolverError::Usage(
            "number of suggestions must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Something the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Submit(Round),
    Undo,
    Reset,
    List,
    Top(usize),
    Help,
    Exit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Solved(Word),
    Exited,
}

/// Front end driven by [`game_loop`]: the line-mode REPL or the TUI.
pub trait GameInterface {
    fn display_welcome(&mut self, dictionary: &Dictionary);
    fn display_suggestions(&mut self, session: &Session, suggestion: &Suggestion);
    /// Block until the player does something. End of input maps to `Exit`.
    fn read_action(&mut self) -> Result<UserAction>;
    fn display_candidates(&mut self, candidates: &[Word]);
    fn display_help(&mut self);
    fn display_error(&mut self, error: &SolverError);
    fn display_solved(&mut self, round: &Round);
    fn display_exit_message(&mut self);
}

pub fn game_loop<I: GameInterface + ?Sized>(
    session: &mut Session,
    interface: &mut I,
) -> GameOutcome {
    interface.display_welcome(session.dictionary());
    loop {
        let suggestion = session.suggest();
        interface.display_suggestions(session, &suggestion);

        let action = match interface.read_action() {
            Ok(action) => action,
            Err(e) => {
                log::warn!("rejected input: {e}");
                interface.display_error(&e);
                continue;
            }
        };
        debug_log!("game_loop() - action {:?}", action);

        match action {
            UserAction::Submit(round) => {
                session.push_round(round);
                if round.pattern.is_solved() {
                    info_log!("game_loop() - solved with {}", round.guess);
                    interface.display_solved(&round);
                    return GameOutcome::Solved(round.guess);
                }
            }
            UserAction::Undo => {
                if session.undo().is_none() {
                    interface.display_error(&SolverError::Usage("nothing to undo".to_string()));
                }
            }
            UserAction::Reset => session.reset(),
            UserAction::List => interface.display_candidates(&suggestion.remaining),
            UserAction::Top(n) => {
                if let Err(e) = session.set_top_n(n) {
                    interface.display_error(&e);
                }
            }
            UserAction::Help => interface.display_help(),
            UserAction::Exit => {
                interface.display_exit_message();
                return GameOutcome::Exited;
            }
        }
    }
}
