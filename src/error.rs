use thiserror::Error;

/// Everything that can go wrong when turning user input into engine calls.
///
/// None of these are transient; they are reported to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("expected {expected} characters, got {actual} in \"{input}\"")]
    InvalidLength {
        input: String,
        expected: usize,
        actual: usize,
    },
    #[error("invalid character '{found}' in \"{input}\" (expected {expected})")]
    InvalidAlphabet {
        input: String,
        found: char,
        expected: &'static str,
    },
    #[error("{0}")]
    Usage(String),
    #[error("guess \"{0}\" is not in the allowed word list; double-check spelling")]
    UnknownGuess(String),
    #[error("candidate source \"{0}\" produced 0 words")]
    EmptyDictionary(String),
    #[error("failed to write output: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_input() {
        let err = SolverError::InvalidLength {
            input: "toolong".to_string(),
            expected: 5,
            actual: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("toolong"));
        assert!(msg.contains('5'));

        let err = SolverError::InvalidAlphabet {
            input: "gyqbb".to_string(),
            found: 'q',
            expected: "g, y or b",
        };
        assert!(err.to_string().contains("'q'"));
    }
}
