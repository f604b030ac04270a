//! A tiny line-oriented command interpreter.
//!
//! One line of input at a time is split into tokens honoring quoting and
//! escaping, stripped of its output-redirection directives, and dispatched
//! either to an in-process builtin or to an external program resolved on the
//! search path. The program's output streams are routed to the console or to
//! files per the extracted redirection targets.
//!
//! The main entry point is [`Interpreter`], which executes one raw line to
//! completion per call and also provides an interactive read loop. The
//! public modules [`lexer`], [`parser`], [`command`] and [`env`] expose the
//! individual pipeline stages for embedding and testing.

pub mod command;
pub mod env;
pub mod error;
pub mod external;
pub mod io_adapters;
pub mod lexer;
pub mod parser;

mod builtin;
mod interpreter;

#[cfg(test)]
mod test_utils;

/// Convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
