use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;

use crate::builtin;
use crate::command::{ExitCode, Registry};
use crate::env::Environment;
use crate::external;
use crate::io_adapters::Io;
use crate::lexer;
use crate::parser::{self, ParsedCommand};

/// The read-parse-dispatch-execute pipeline, one line at a time.
///
/// The interpreter owns the [`Environment`] and the fixed builtin
/// [`Registry`]; both live for the whole session while every token
/// sequence, redirection target and output sink is created fresh per line
/// and dropped when the command completes.
///
/// Example
/// ```
/// use minish::Interpreter;
/// let mut sh = Interpreter::default();
/// let code = sh.execute_line("echo hello world").unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Interpreter {
    env: Environment,
    registry: Registry,
}

impl Interpreter {
    /// Create an interpreter with a custom builtin table.
    pub fn new(registry: Registry) -> Self {
        Self {
            env: Environment::new(),
            registry,
        }
    }

    /// Whether a previously executed command asked the session to end.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Execute one raw input line to completion.
    ///
    /// Blank lines are a no-op. Errors of every kind (syntax, unknown
    /// command, usage, filesystem) are reported to the line's active stderr
    /// sink and never tear down the session; the returned exit code follows
    /// shell conventions.
    pub fn execute_line(&mut self, line: &str) -> Result<ExitCode> {
        let tokens = lexer::tokenize(line);
        if tokens.is_empty() {
            return Ok(0);
        }

        let extraction = parser::extract(tokens);

        // Sinks are opened before anything is reported so that `2>` also
        // captures the diagnostics of the very command it redirects.
        let mut io = match Io::from_targets(&extraction.stdout, &extraction.stderr) {
            Ok(io) => io,
            Err(e) => {
                let mut console = Io::console();
                writeln!(console.stderr, "minish: {e}")?;
                return Ok(1);
            }
        };

        for error in &extraction.errors {
            writeln!(io.stderr, "{error}")?;
        }
        let had_errors = !extraction.errors.is_empty();

        let Some(command) = extraction.into_command() else {
            return Ok(if had_errors { 1 } else { 0 });
        };

        match self.dispatch(&command, &mut io) {
            Ok(code) => Ok(code),
            Err(e) => {
                writeln!(io.stderr, "{}: {e:#}", command.name)?;
                Ok(1)
            }
        }
    }

    /// Builtin names go to their registered handler with the joined
    /// argument string; everything else goes to the external runner.
    fn dispatch(&mut self, command: &ParsedCommand, io: &mut Io) -> Result<ExitCode> {
        match self.registry.lookup(&command.name) {
            Some(handler) => handler.run(&command.args.join(" "), io, &self.registry, &mut self.env),
            None => external::run(&command.name, &command.args, io, &self.env),
        }
    }

    /// Interactive loop: read a line, execute it, repeat.
    ///
    /// Empty and whitespace-only lines are ignored; everything else lands
    /// in the editor history. Ctrl-C abandons the current line, Ctrl-D ends
    /// the session, and `exit 0` stops the loop through the environment's
    /// exit flag.
    pub fn repl(&mut self, prompt: &str) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline(prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str())?;
                    self.execute_line(&line)?;
                    if self.env.should_exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    /// Interpreter with the standard builtin set: `echo`, `exit`, `type`,
    /// `pwd`, `cd`.
    fn default() -> Self {
        Self::new(builtin::default_registry())
    }
}
