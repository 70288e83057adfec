use std::io;
use std::process::ExitCode;

use wordle_assist::cli::{
    CliInterface, Command, SessionArgs, parse_cli, print_suggestion_report, rounds_from_pairs,
};
use wordle_assist::error::Result;
use wordle_assist::game_state::{Session, game_loop};
use wordle_assist::logging::{self, LogDestination};
use wordle_assist::solver::suggest_from_history;
use wordle_assist::tui::TuiInterface;
use wordle_assist::wordbank::Dictionary;

fn main() -> ExitCode {
    let cli = parse_cli();
    let command = cli.command.unwrap_or_default();
    let tui = matches!(command, Command::Interactive { tui: true, .. });

    let destination = LogDestination::choose(tui, cli.log_file.as_deref());
    if let Err(e) = logging::init(cli.verbose, &destination) {
        eprintln!("Logging disabled: {e}");
    }

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_dictionary(options: &SessionArgs) -> Result<Dictionary> {
    let dictionary = Dictionary::embedded(options.candidate_source)?;
    log::info!(
        "loaded {} candidates ({}), {} allowed",
        dictionary.candidates().len(),
        options.candidate_source,
        dictionary.allowed().len()
    );
    Ok(dictionary)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Suggest {
            options,
            rounds,
            allow_unlisted,
        } => {
            let dictionary = load_dictionary(&options)?;
            let rounds = rounds_from_pairs(&rounds)?;
            let strict = !allow_unlisted;
            let suggestion =
                suggest_from_history(&dictionary, &rounds, options.top, options.pool, strict)?;
            print_suggestion_report(&mut io::stdout().lock(), &suggestion)
        }
        Command::Interactive { options, tui } => {
            let dictionary = load_dictionary(&options)?;
            let mut session = Session::new(&dictionary, options.top, options.pool)?;
            let outcome = if tui {
                match TuiInterface::new() {
                    Ok(mut interface) => game_loop(&mut session, &mut interface),
                    Err(e) => {
                        eprintln!("Failed to start the terminal interface: {e}");
                        let stdin = io::stdin();
                        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
                        game_loop(&mut session, &mut interface)
                    }
                }
            } else {
                let stdin = io::stdin();
                let mut interface = CliInterface::new(stdin.lock(), io::stdout());
                game_loop(&mut session, &mut interface)
            };
            log::info!("session ended: {outcome:?}");
            Ok(())
        }
    }
}
