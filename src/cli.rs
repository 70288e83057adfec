use crate::debug_log;
use crate::error::{Result, SolverError};
use crate::game_state::{DEFAULT_TOP_N, GameInterface, Session, UserAction};
use crate::solver::{GuessPool, Round, Suggestion};
use crate::wordbank::{CandidateSource, Dictionary, Word};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP_TEXT: &str = "\
Commands:
  <guess> <pattern>   e.g. \"crane gybbg\"
  help                show this help
  list                list remaining candidates
  top <n>             set number of suggestions shown
  undo                remove last round
  reset               clear history
  quit                exit

Pattern chars: g=green, y=yellow, b=gray/black (x also accepted)";

/// Wordle assistant: narrows candidates from your feedback and suggests guesses
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of the default location
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start an interactive solving session (default)
    Interactive {
        #[command(flatten)]
        options: SessionArgs,

        /// Use the full-screen terminal interface
        #[arg(long)]
        tui: bool,
    },
    /// Suggest next guesses for a given history (non-interactive)
    Suggest {
        #[command(flatten)]
        options: SessionArgs,

        /// A round as two tokens: <guess> <pattern>. Can be repeated.
        #[arg(
            long = "round",
            num_args = 2,
            value_names = ["GUESS", "PATTERN"],
            action = ArgAction::Append
        )]
        rounds: Vec<String>,

        /// Accept guesses that are not in the allowed word list
        #[arg(long)]
        allow_unlisted: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Self::Interactive {
            options: SessionArgs::default(),
            tui: false,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SessionArgs {
    /// Number of suggestions to show
    #[arg(long, default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
    pub top: usize,

    /// Which word list supplies the candidate answers
    #[arg(long, value_enum, default_value_t = CandidateSource::Answers)]
    pub candidate_source: CandidateSource,

    /// Which words are offered as suggestions
    #[arg(long, value_enum, default_value_t = GuessPool::Candidates)]
    pub pool: GuessPool,
}

impl Default for SessionArgs {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP_N,
            candidate_source: CandidateSource::default(),
            pool: GuessPool::default(),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_top_n(raw: &str) -> std::result::Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("expected a positive number, got \"{raw}\"")),
    }
}

/// Pair up flat `--round` tokens into rounds.
pub fn rounds_from_pairs(tokens: &[String]) -> Result<Vec<Round>> {
    if tokens.len() % 2 != 0 {
        return Err(SolverError::Usage(
            "--round expects pairs: <guess> <pattern>".to_string(),
        ));
    }
    tokens
        .chunks(2)
        .map(|pair| Round::from_parts(&pair[0], &pair[1]))
        .collect()
}

/// Interpret one line typed at the interactive prompt.
pub fn parse_command(line: &str) -> Result<UserAction> {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return Err(SolverError::Usage(
            "expected a command or \"<guess> <pattern>\"".to_string(),
        ));
    };

    match command.to_lowercase().as_str() {
        "quit" | "exit" | "q" => Ok(UserAction::Exit),
        "help" | "?" => Ok(UserAction::Help),
        "list" => Ok(UserAction::List),
        "undo" => Ok(UserAction::Undo),
        "reset" => Ok(UserAction::Reset),
        "top" => tokens
            .next()
            .and_then(|n| parse_top_n(n).ok())
            .map(UserAction::Top)
            .ok_or_else(|| SolverError::Usage("usage: top <n> (n >= 1)".to_string())),
        _ => Round::parse(line).map(UserAction::Submit),
    }
}

/// Print the remaining count followed by `word<TAB>score` lines.
pub fn write_suggestion_report<W: Write>(
    writer: &mut W,
    suggestion: &Suggestion,
) -> io::Result<()> {
    writeln!(writer, "Remaining candidates: {}", suggestion.remaining.len())?;
    for ranked in &suggestion.suggestions {
        writeln!(writer, "{}\t{}", ranked.word, ranked.score)?;
    }
    Ok(())
}

/// Write and flush the report for the `suggest` subcommand.
///
/// A closed pipe on the reading side (`wordle-assist suggest | head -1`)
/// is not an error.
pub fn print_suggestion_report<W: Write>(writer: &mut W, suggestion: &Suggestion) -> Result<()> {
    match write_suggestion_report(writer, suggestion).and_then(|()| writer.flush()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug_log!("print_suggestion_report() - reader went away: {}", e);
            Ok(())
        }
        Err(e) => Err(SolverError::Output(e.to_string())),
    }
}

/// Line-oriented REPL over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            debug_log!("CliInterface::emit() - write failed: {}", e);
        }
    }

    fn prompt(&mut self) {
        let result = write!(self.writer, "\n> ").and_then(|()| self.writer.flush());
        if let Err(e) = result {
            debug_log!("CliInterface::prompt() - write failed: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_welcome(&mut self, dictionary: &Dictionary) {
        self.emit("\nWordle assistant. Type \"help\" for commands.");
        self.emit(&format!(
            "Loaded candidates={}, allowed={}\n",
            dictionary.candidates().len(),
            dictionary.allowed().len()
        ));
    }

    fn display_suggestions(&mut self, session: &Session, suggestion: &Suggestion) {
        self.emit(&format!(
            "Remaining candidates: {}",
            suggestion.remaining.len()
        ));
        if suggestion.remaining.is_empty() {
            self.emit("No candidates remain. Check your inputs.");
        } else if let Some(answer) = suggestion.solution() {
            self.emit(&format!("Solution found: {answer}"));
        }
        if suggestion.suggestions.is_empty() {
            return;
        }
        let source = if suggestion.remaining.is_empty() {
            " from the full allowed list"
        } else {
            ""
        };
        self.emit(&format!(
            "Top {} suggestions{source} (showing up to {}):",
            suggestion.suggestions.len(),
            session.top_n()
        ));
        for ranked in &suggestion.suggestions {
            self.emit(&format!("  {}\t{}", ranked.word, ranked.score));
        }
    }

    fn read_action(&mut self) -> Result<UserAction> {
        loop {
            self.prompt();
            let mut input = String::new();
            match self.reader.read_line(&mut input) {
                Ok(0) => return Ok(UserAction::Exit),
                Ok(_) => {}
                Err(e) => {
                    log::warn!("failed to read input: {e}");
                    return Ok(UserAction::Exit);
                }
            }
            if !input.trim().is_empty() {
                return parse_command(&input);
            }
        }
    }

    fn display_candidates(&mut self, candidates: &[Word]) {
        let listing: Vec<String> = candidates.iter().map(Word::to_string).collect();
        self.emit(&format!("\n{}\n", listing.join("\n")));
    }

    fn display_help(&mut self) {
        self.emit(&format!("\n{HELP_TEXT}\n"));
    }

    fn display_error(&mut self, error: &SolverError) {
        self.emit(&format!("Error: {error}"));
    }

    fn display_solved(&mut self, round: &Round) {
        self.emit(&format!("\nSolved ({}). Good game.", round.pattern));
    }

    fn display_exit_message(&mut self) {
        self.emit("Exiting.");
    }
}
