// Integration tests for the wordle-assist application
// These tests verify that all modules work together correctly

use std::io::Cursor;
use wordle_assist::cli::CliInterface;
use wordle_assist::*;

fn w(s: &str) -> Word {
    Word::parse(s).unwrap()
}

fn words(list: &[&str]) -> Vec<Word> {
    list.iter().map(|s| w(s)).collect()
}

/// Round as the player would report it for `guess` against `answer`.
fn observed(answer: &str, guess: &str) -> Round {
    Round::new(w(guess), score(answer, guess).unwrap())
}

fn answers() -> Dictionary {
    Dictionary::embedded(CandidateSource::Answers).unwrap()
}

#[test]
fn test_literal_scenarios() {
    assert_eq!(score("cigar", "cigar").unwrap().to_string(), "ggggg");
    assert_eq!(score("cigar", "array").unwrap().to_string(), "bybgb");
    assert_eq!(score("allee", "eagle").unwrap().to_string(), "yybyg");

    let pool = words(&["cigar", "rebut", "sissy", "humph"]);
    let rounds = [Round::parse("cigar ggggg").unwrap()];
    assert_eq!(filter_candidates(&pool, &rounds), vec!["cigar"]);

    let candidates = words(&["apple", "zzzzz", "aeros"]);
    let ranked = rank_guesses(&candidates, &candidates, 3);
    let order: Vec<(String, usize)> = ranked
        .iter()
        .map(|r| (r.word.to_string(), r.score))
        .collect();
    assert_eq!(
        order,
        vec![
            ("aeros".to_string(), 7),
            ("apple".to_string(), 6),
            ("zzzzz".to_string(), 1)
        ]
    );
}

#[test]
fn test_identity_over_dictionary() {
    let dict = answers();
    for word in dict.allowed() {
        assert!(
            Pattern::calculate(word, word).is_solved(),
            "{word} should score all green against itself"
        );
    }
}

#[test]
fn test_filter_monotonic_and_consistent() {
    let dict = answers();
    let pool = dict.candidates();
    let guesses = ["crane", "slate", "humph", "sissy", "eagle"];

    for answer in ["cigar", "rebut", "array", "brain"] {
        let mut history = Vec::new();
        let mut previous = pool.len();
        for guess in guesses {
            history.push(observed(answer, guess));
            let remaining = filter_candidates(pool, &history);

            // Adding a round never grows the candidate set
            assert!(remaining.len() <= previous, "answer={answer} guess={guess}");
            previous = remaining.len();

            // The real answer always survives its own feedback
            assert!(remaining.contains(&w(answer)), "answer={answer} guess={guess}");

            for word in &remaining {
                for round in &history {
                    assert_eq!(Pattern::calculate(word, &round.guess), round.pattern);
                }
            }
        }
    }
}

#[test]
fn test_empty_history_returns_whole_pool() {
    let dict = answers();
    assert_eq!(filter_candidates(dict.candidates(), &[]), dict.candidates());
    assert_eq!(filter_by_constraints(dict.candidates(), &[]), dict.candidates());
}

#[test]
fn test_constraint_filter_cross_check() {
    let dict = Dictionary::embedded(CandidateSource::All).unwrap();
    let pool = dict.candidates();

    for answer in ["cigar", "humph", "sissy", "eagle", "slate"] {
        let mut history = Vec::new();
        for guess in ["aeros", "array", "geese", "sissy"] {
            history.push(observed(answer, guess));
            assert_eq!(
                filter_by_constraints(pool, &history),
                filter_candidates(pool, &history),
                "answer={answer} after {guess}"
            );
        }
    }
}

#[test]
fn test_ranker_size_bound_and_determinism() {
    let dict = answers();
    let remaining = filter_candidates(dict.candidates(), &[observed("cigar", "slate")]);

    for top_n in [0, 1, 5, 10, dict.allowed().len(), dict.allowed().len() + 50] {
        let ranked = rank_guesses(&remaining, dict.allowed(), top_n);
        assert_eq!(ranked.len(), top_n.min(dict.allowed().len()));
        assert_eq!(ranked, rank_guesses(&remaining, dict.allowed(), top_n));

        // Best score first, ties broken alphabetically
        for pair in ranked.windows(2) {
            assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].word < pair[1].word)
            );
        }
    }
}

#[test]
fn test_frequency_counts_words_not_letters() {
    let freq = build_letter_frequency(&words(&["sissy", "humph"]));
    assert_eq!(freq[usize::from(b's' - b'a')], 1);
    assert_eq!(freq[usize::from(b'h' - b'a')], 1);
    assert_eq!(score_word(&w("sissy"), &freq), 3);
}

#[test]
fn test_contradictory_history_falls_back_to_allowed_list() {
    let dict = answers();
    // No word has 'c' both green at position 0 and absent
    let rounds = [
        Round::parse("cigar gbbbb").unwrap(),
        Round::parse("crane bbbbb").unwrap(),
    ];
    let suggestion = suggest(&dict, &rounds, 5, GuessPool::Candidates);
    assert!(suggestion.remaining.is_empty());
    assert_eq!(suggestion.suggestions.len(), 5);
    assert!(suggestion.suggestions.iter().all(|s| dict.is_allowed(&s.word)));
    assert!(suggestion.suggestions.iter().all(|s| s.score > 0));
}

#[test]
fn test_suggest_from_history_rejects_bad_requests() {
    let dict = answers();
    let rounds = [observed("cigar", "slate")];
    assert!(matches!(
        suggest_from_history(&dict, &rounds, 0, GuessPool::Candidates, true),
        Err(SolverError::Usage(_))
    ));

    let unknown = [Round::parse("qzxvk bbbbb").unwrap()];
    assert!(matches!(
        suggest_from_history(&dict, &unknown, 3, GuessPool::Candidates, true),
        Err(SolverError::UnknownGuess(_))
    ));
    assert!(suggest_from_history(&dict, &unknown, 3, GuessPool::Candidates, false).is_ok());
}

#[test]
fn test_malformed_input_errors() {
    assert!(matches!(
        score("cigar", "cig"),
        Err(SolverError::InvalidLength { expected: 5, actual: 3, .. })
    ));
    assert!(matches!(
        score("cig4r", "cigar"),
        Err(SolverError::InvalidAlphabet { found: '4', .. })
    ));
    assert!(matches!(
        Round::parse("crane gybqg"),
        Err(SolverError::InvalidAlphabet { found: 'q', .. })
    ));
    assert!(matches!(Round::parse("crane"), Err(SolverError::Usage(_))));
}

#[test]
fn test_pattern_codes_and_names_agree() {
    let pattern = score("allee", "eagle").unwrap();
    let names = pattern.names();
    assert_eq!(names, ["PRESENT", "PRESENT", "ABSENT", "PRESENT", "CORRECT"]);
    assert_eq!(Pattern::from_names(&names).unwrap(), pattern);
    assert_eq!(pattern.to_string().parse::<Pattern>().unwrap(), pattern);
}

#[test]
fn test_full_game_simulation_multiple_answers() {
    // Always play the top suggestion and feed back the true pattern
    let dict = answers();
    for answer in ["cigar", "rebut", "sissy", "humph", "array", "eagle"] {
        let mut session = Session::new(&dict, 3, GuessPool::Candidates).unwrap();
        let mut solved = false;

        for _ in 0..dict.candidates().len() {
            let suggestion = session.suggest();
            assert!(suggestion.remaining.contains(&w(answer)));
            let guess = suggestion.suggestions[0].word;
            let round = Round::new(guess, Pattern::calculate(&w(answer), &guess));
            session.push_round(round);
            if round.pattern.is_solved() {
                solved = true;
                break;
            }
        }

        assert!(solved, "never solved {answer}");
        assert_eq!(session.candidates(), vec![answer]);
    }
}

#[test]
fn test_late_alphabet_answers_survive_their_own_feedback() {
    let dict = answers();
    for answer in ["chunk", "nymph", "vivid", "fjord", "jazzy", "quirk"] {
        assert!(dict.is_allowed(&w(answer)), "{answer} should be a legal guess");

        let rounds = [observed(answer, "crane"), observed(answer, "moist")];
        let suggestion = suggest_from_history(&dict, &rounds, 5, GuessPool::Candidates, true)
            .unwrap();
        assert!(
            suggestion.remaining.contains(&w(answer)),
            "{answer} eliminated by its own feedback"
        );

        let solved = [Round::new(w(answer), Pattern::ALL_CORRECT)];
        let suggestion = suggest(&dict, &solved, 5, GuessPool::Candidates);
        assert_eq!(suggestion.solution(), Some(&w(answer)));
    }

    // Legal guesses are accepted by strict validation
    let rounds = [observed("chunk", "quirk")];
    assert!(suggest_from_history(&dict, &rounds, 3, GuessPool::Candidates, true).is_ok());
}

#[test]
fn test_end_to_end_cli_session() {
    let dict = answers();
    let mut session = Session::new(&dict, 5, GuessPool::Candidates).unwrap();

    let input = format!(
        "help\nslate {}\nlist\nundo\nslate {}\ncrane {}\ncigar ggggg\n",
        score("cigar", "slate").unwrap(),
        score("cigar", "slate").unwrap(),
        score("cigar", "crane").unwrap(),
    );
    let mut interface = CliInterface::new(Cursor::new(input), Vec::new());

    let outcome = game_loop(&mut session, &mut interface);
    assert_eq!(outcome, GameOutcome::Solved(w("cigar")));

    let output = String::from_utf8(interface.into_writer()).unwrap();
    assert!(output.contains("Loaded candidates="));
    assert!(output.contains("Commands:"));
    assert!(output.contains("Top 5 suggestions"));
    assert!(output.contains("\ncigar\n"));
    assert!(output.contains("Solved (ggggg)"));
    assert!(!output.contains("Error:"));
}

#[test]
fn test_cli_session_survives_bad_lines() {
    let dict = answers();
    let mut session = Session::new(&dict, 2, GuessPool::Allowed).unwrap();
    let input = "crane gyq\nfoo\nundo\ntop 0\nquit\n";
    let mut interface = CliInterface::new(Cursor::new(input), Vec::new());

    assert_eq!(game_loop(&mut session, &mut interface), GameOutcome::Exited);
    let output = String::from_utf8(interface.into_writer()).unwrap();
    assert_eq!(output.matches("Error:").count(), 4);
    assert!(output.contains("Exiting."));
    assert_eq!(session.top_n(), 2);
}
