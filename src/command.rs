use anyhow::Result;

use crate::env::Environment;
use crate::io_adapters::Io;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line
/// tools.
pub type ExitCode = i32;

/// A command implemented inside the interpreter process.
///
/// Handlers receive the arguments joined by single spaces into one flat
/// string. Argument boundaries established by quoting are not recoverable
/// at this seam: `echo "a b"` and `echo a b` look identical from inside a
/// handler. That loss is part of the builtin calling convention, not an
/// accident of this implementation.
pub trait Builtin {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name(&self) -> &'static str;

    /// Execute with the joined argument string, the command's output sinks,
    /// the registry (for introspection), and the environment.
    ///
    /// Return value follows shell conventions: 0 for success, non-zero for
    /// error.
    fn run(
        &self,
        args: &str,
        io: &mut Io,
        registry: &Registry,
        env: &mut Environment,
    ) -> Result<ExitCode>;
}

/// Fixed name-to-handler table, built once when the interpreter is
/// constructed and immutable afterwards.
///
/// The same table answers `type`'s "is this a shell builtin" question, so
/// the dispatch set and the introspection set cannot drift apart.
pub struct Registry {
    entries: Vec<Box<dyn Builtin>>,
}

impl Registry {
    pub fn new(entries: Vec<Box<dyn Builtin>>) -> Self {
        Self { entries }
    }

    /// Find the handler registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&dyn Builtin> {
        self.entries
            .iter()
            .find(|b| b.name() == name)
            .map(|b| b.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// The recognized builtin names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|b| b.name())
    }
}
