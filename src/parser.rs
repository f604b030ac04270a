//! Redirection extraction: separating output-redirection directives from
//! the command itself.
//!
//! The extractor consumes the token sequence produced by [`crate::lexer`]
//! and yields the clean command tokens plus one [`RedirectTarget`] per
//! output stream. Redirection syntax errors are collected rather than
//! aborting the scan, so a line with a dangling operator still runs.

use std::path::PathBuf;

use crate::error::ShellError;

/// How a file target treats existing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    Overwrite,
    Append,
}

/// Destination of one output stream.
///
/// Exactly one target exists per stream per command. When the same stream's
/// operator appears twice on a line, the last occurrence wins and earlier
/// targets are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// The interpreter's own console stream.
    Console,
    /// A named file, opened with the given mode.
    File { path: PathBuf, mode: RedirectMode },
}

impl RedirectTarget {
    fn file(path: &str, mode: RedirectMode) -> Self {
        RedirectTarget::File {
            path: PathBuf::from(path),
            mode,
        }
    }
}

/// A command ready for dispatch: a non-empty name, its arguments, and one
/// redirection target per output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
    pub stdout: RedirectTarget,
    pub stderr: RedirectTarget,
}

/// Result of scanning one token sequence.
#[derive(Debug)]
pub struct Extraction {
    /// Tokens with every operator-filename pair removed, in original order.
    pub command: Vec<String>,
    pub stdout: RedirectTarget,
    pub stderr: RedirectTarget,
    /// Redirection syntax errors found along the way.
    pub errors: Vec<ShellError>,
}

impl Extraction {
    /// Split the clean tokens into a dispatchable command.
    ///
    /// A line consisting only of redirection operators and filenames has no
    /// command and dissolves into `None`.
    pub fn into_command(self) -> Option<ParsedCommand> {
        let mut tokens = self.command.into_iter();
        let name = tokens.next()?;
        Some(ParsedCommand {
            name,
            args: tokens.collect(),
            stdout: self.stdout,
            stderr: self.stderr,
        })
    }
}

enum Stream {
    Stdout,
    Stderr,
}

fn operator(token: &str) -> Option<(Stream, RedirectMode)> {
    match token {
        ">" | "1>" => Some((Stream::Stdout, RedirectMode::Overwrite)),
        ">>" | "1>>" => Some((Stream::Stdout, RedirectMode::Append)),
        "2>" => Some((Stream::Stderr, RedirectMode::Overwrite)),
        "2>>" => Some((Stream::Stderr, RedirectMode::Append)),
        _ => None,
    }
}

/// Pull redirection directives out of a token sequence.
///
/// Each recognized operator consumes exactly one following token as its
/// filename. An operator with nothing after it is a syntax error: the
/// operator alone is discarded, no target is set for its stream, and the
/// scan continues with the remaining tokens.
pub fn extract(tokens: Vec<String>) -> Extraction {
    let mut command = Vec::new();
    let mut stdout = RedirectTarget::Console;
    let mut stderr = RedirectTarget::Console;
    let mut errors = Vec::new();

    let mut it = tokens.into_iter();
    while let Some(token) = it.next() {
        match operator(&token) {
            Some((stream, mode)) => match it.next() {
                Some(path) => {
                    let target = RedirectTarget::file(&path, mode);
                    match stream {
                        Stream::Stdout => stdout = target,
                        Stream::Stderr => stderr = target,
                    }
                }
                None => errors.push(ShellError::MissingRedirectTarget { operator: token }),
            },
            None => command.push(token),
        }
    }

    Extraction {
        command,
        stdout,
        stderr,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_plain_command_passes_through() {
        let ex = extract(strings(&["echo", "hello", "world"]));
        assert_eq!(ex.command, strings(&["echo", "hello", "world"]));
        assert_eq!(ex.stdout, RedirectTarget::Console);
        assert_eq!(ex.stderr, RedirectTarget::Console);
        assert!(ex.errors.is_empty());
    }

    #[test]
    fn test_stdout_overwrite() {
        let ex = extract(strings(&["echo", "hi", ">", "out.txt"]));
        assert_eq!(ex.command, strings(&["echo", "hi"]));
        assert_eq!(
            ex.stdout,
            RedirectTarget::file("out.txt", RedirectMode::Overwrite)
        );
        assert_eq!(ex.stderr, RedirectTarget::Console);
        assert!(ex.errors.is_empty());
    }

    #[test]
    fn test_explicit_descriptor_spellings() {
        let ex = extract(strings(&["cmd", "1>", "a", "2>", "b"]));
        assert_eq!(ex.command, strings(&["cmd"]));
        assert_eq!(ex.stdout, RedirectTarget::file("a", RedirectMode::Overwrite));
        assert_eq!(ex.stderr, RedirectTarget::file("b", RedirectMode::Overwrite));
    }

    #[test]
    fn test_append_spellings() {
        let ex = extract(strings(&["cmd", ">>", "a", "2>>", "b"]));
        assert_eq!(ex.stdout, RedirectTarget::file("a", RedirectMode::Append));
        assert_eq!(ex.stderr, RedirectTarget::file("b", RedirectMode::Append));

        let ex = extract(strings(&["cmd", "1>>", "c"]));
        assert_eq!(ex.stdout, RedirectTarget::file("c", RedirectMode::Append));
    }

    #[test]
    fn test_last_operator_for_a_stream_wins() {
        let ex = extract(strings(&["echo", ">", "first", ">>", "second"]));
        assert_eq!(ex.command, strings(&["echo"]));
        assert_eq!(
            ex.stdout,
            RedirectTarget::file("second", RedirectMode::Append)
        );
        assert!(ex.errors.is_empty());
    }

    #[test]
    fn test_operator_in_the_middle_consumes_only_its_filename() {
        let ex = extract(strings(&["a", ">", "f", "b"]));
        assert_eq!(ex.command, strings(&["a", "b"]));
        assert_eq!(ex.stdout, RedirectTarget::file("f", RedirectMode::Overwrite));
    }

    #[test]
    fn test_trailing_operator_is_a_syntax_error() {
        let ex = extract(strings(&["echo", "hi", ">"]));
        assert_eq!(ex.command, strings(&["echo", "hi"]));
        assert_eq!(ex.stdout, RedirectTarget::Console);
        assert_eq!(
            ex.errors,
            vec![ShellError::MissingRedirectTarget {
                operator: ">".to_string()
            }]
        );
    }

    #[test]
    fn test_trailing_operator_does_not_unset_an_earlier_target() {
        let ex = extract(strings(&["echo", ">", "keep.txt", ">>"]));
        assert_eq!(
            ex.stdout,
            RedirectTarget::file("keep.txt", RedirectMode::Overwrite)
        );
        assert_eq!(ex.errors.len(), 1);
    }

    #[test]
    fn test_redirections_only_line_has_no_command() {
        let ex = extract(strings(&[">", "out.txt", "2>", "err.txt"]));
        assert!(ex.command.is_empty());
        assert_eq!(
            ex.stdout,
            RedirectTarget::file("out.txt", RedirectMode::Overwrite)
        );
        assert!(ex.into_command().is_none());
    }

    #[test]
    fn test_into_command_splits_name_and_args() {
        let cmd = extract(strings(&["echo", "a", "b", ">", "f"]))
            .into_command()
            .unwrap();
        assert_eq!(cmd.name, "echo");
        assert_eq!(cmd.args, strings(&["a", "b"]));
        assert_eq!(cmd.stdout, RedirectTarget::file("f", RedirectMode::Overwrite));
        assert_eq!(cmd.stderr, RedirectTarget::Console);
    }
}
