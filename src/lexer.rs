//! Splitting of a raw command line into bounded argument vectors.

use thiserror::Error;

/// Most tokens a plain command may carry, program name included.
pub const MAX_COMMAND_TOKENS: usize = 4;

/// Most tokens each half of a pipeline may carry.
pub const MAX_STAGE_TOKENS: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("too many arguments (at most {0} are accepted)")]
    TooManyTokens(usize),
    #[error("only a single pipe is supported")]
    ExtraPipe,
    #[error("pipe is missing a command on one side")]
    EmptyStage,
}

/// Splits `line` on any character of `delimiters` into borrowed tokens,
/// collapsing delimiter runs. The tokens borrow from `line` and stay valid
/// for as long as it does.
///
/// Fails once the token count would exceed `max_tokens`; callers pick the
/// bound for their call site ([`MAX_COMMAND_TOKENS`] or
/// [`MAX_STAGE_TOKENS`]).
pub fn split_bounded<'a>(
    line: &'a str,
    delimiters: &str,
    max_tokens: usize,
) -> Result<Vec<&'a str>, LexError> {
    let mut tokens = Vec::new();
    for token in line
        .split(|c| delimiters.contains(c))
        .filter(|t| !t.is_empty())
    {
        if tokens.len() == max_tokens {
            return Err(LexError::TooManyTokens(max_tokens));
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Recognizes pipeline syntax: `Ok(None)` when `line` has no pipe, the two
/// untokenized halves when it has exactly one. More than one pipe, or a
/// blank half, is an error rather than a truncated pipeline.
pub fn split_pipeline(line: &str) -> Result<Option<(&str, &str)>, LexError> {
    let Some((producer, consumer)) = line.split_once('|') else {
        return Ok(None);
    };
    if consumer.contains('|') {
        return Err(LexError::ExtraPipe);
    }
    if producer.trim().is_empty() || consumer.trim().is_empty() {
        return Err(LexError::EmptyStage);
    }
    Ok(Some((producer, consumer)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_spaces() {
        let tokens = split_bounded("ls -la", " ", MAX_COMMAND_TOKENS).unwrap();
        assert_eq!(tokens, vec!["ls", "-la"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(split_bounded("", " ", MAX_COMMAND_TOKENS).unwrap().is_empty());
    }

    #[test]
    fn delimiter_runs_collapse() {
        let tokens = split_bounded("  echo   hi  ", " ", MAX_COMMAND_TOKENS).unwrap();
        assert_eq!(tokens, vec!["echo", "hi"]);
    }

    #[test]
    fn token_bound_is_enforced() {
        assert_eq!(
            split_bounded("a b c d", " ", MAX_COMMAND_TOKENS).unwrap().len(),
            4
        );
        assert_eq!(
            split_bounded("a b c d e", " ", MAX_COMMAND_TOKENS),
            Err(LexError::TooManyTokens(MAX_COMMAND_TOKENS))
        );
    }

    #[test]
    fn stage_bound_is_tighter_than_command_bound() {
        assert_eq!(
            split_bounded("grep -v foo bar", " ", MAX_STAGE_TOKENS),
            Err(LexError::TooManyTokens(MAX_STAGE_TOKENS))
        );
    }

    #[test]
    fn lines_without_a_pipe_are_not_pipelines() {
        assert_eq!(split_pipeline("ls -la"), Ok(None));
    }

    #[test]
    fn single_pipe_splits_into_two_halves() {
        assert_eq!(
            split_pipeline("echo hello | cat"),
            Ok(Some(("echo hello ", " cat")))
        );
    }

    #[test]
    fn second_pipe_is_rejected() {
        assert_eq!(split_pipeline("a | b | c"), Err(LexError::ExtraPipe));
    }

    #[test]
    fn blank_halves_are_rejected() {
        assert_eq!(split_pipeline("| cat"), Err(LexError::EmptyStage));
        assert_eq!(split_pipeline("ls |"), Err(LexError::EmptyStage));
        assert_eq!(split_pipeline("  |  "), Err(LexError::EmptyStage));
    }
}
