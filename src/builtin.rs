//! The fixed builtin command set: `echo`, `exit`, `type`, `pwd`, `cd`.
//!
//! Builtins execute directly in-process without spawning a child. Each one
//! writes to the output sinks it is handed, so redirection works the same
//! for builtins as for external programs.

use anyhow::Result;
use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::command::{Builtin, ExitCode, Registry};
use crate::env::Environment;
use crate::error::{ChdirError, ShellError};
use crate::external;
use crate::io_adapters::Io;

/// The standard builtin table.
pub fn default_registry() -> Registry {
    Registry::new(vec![
        Box::new(Echo),
        Box::new(Exit),
        Box::new(Type),
        Box::new(Pwd),
        Box::new(Cd),
    ])
}

/// Write the joined argument string, followed by a newline, to stdout.
pub struct Echo;

impl Builtin for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn run(
        &self,
        args: &str,
        io: &mut Io,
        _registry: &Registry,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        writeln!(io.stdout, "{args}")?;
        Ok(0)
    }
}

/// Terminate the interpreter, but only for the exact argument `0`.
///
/// Any other argument string (including none at all) is a usage error and
/// the interpreter keeps running.
pub struct Exit;

impl Builtin for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn run(
        &self,
        args: &str,
        io: &mut Io,
        _registry: &Registry,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        if args == "0" {
            env.should_exit = true;
            Ok(0)
        } else {
            writeln!(
                io.stderr,
                "{}",
                ShellError::Usage("exit: only `exit 0` is supported".to_string())
            )?;
            Ok(1)
        }
    }
}

/// Report whether a name is a shell builtin or an executable on the search
/// path.
pub struct Type;

impl Builtin for Type {
    fn name(&self) -> &'static str {
        "type"
    }

    fn run(
        &self,
        args: &str,
        io: &mut Io,
        registry: &Registry,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        if args.is_empty() {
            writeln!(
                io.stderr,
                "{}",
                ShellError::Usage("type: missing operand".to_string())
            )?;
            return Ok(1);
        }

        if registry.contains(args) {
            writeln!(io.stdout, "{args} is a shell builtin")?;
            return Ok(0);
        }

        let path_var = env.get_var("PATH").unwrap_or_default();
        match external::find_in_search_path(OsStr::new(path_var), args) {
            Some(path) => {
                writeln!(io.stdout, "{args} is {}", path.display())?;
                Ok(0)
            }
            None => {
                writeln!(io.stderr, "{}", ShellError::CommandNotFound(args.to_string()))?;
                Ok(1)
            }
        }
    }
}

/// Print the current working directory.
pub struct Pwd;

impl Builtin for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn run(
        &self,
        _args: &str,
        io: &mut Io,
        _registry: &Registry,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        writeln!(io.stdout, "{}", env.current_dir.display())?;
        Ok(0)
    }
}

/// Change the current working directory.
pub struct Cd;

impl Builtin for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn run(
        &self,
        args: &str,
        io: &mut Io,
        _registry: &Registry,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        if args.is_empty() {
            writeln!(
                io.stderr,
                "{}",
                ShellError::Usage("cd: missing operand".to_string())
            )?;
            return Ok(1);
        }

        match change_dir(env, args) {
            Ok(()) => Ok(0),
            Err(e) => {
                writeln!(io.stderr, "cd: {args}: {e}")?;
                Ok(1)
            }
        }
    }
}

/// Resolve a `cd` target and apply it, classifying failures.
///
/// `~` resolves to HOME (empty string when unset); a relative path resolves
/// against the environment's working directory; an absolute path is used
/// as-is. On success both the process working directory and the
/// environment's copy are updated.
fn change_dir(env: &mut Environment, target: &str) -> Result<(), ChdirError> {
    let requested = if target == "~" {
        PathBuf::from(env.get_var("HOME").unwrap_or_default())
    } else {
        let path = PathBuf::from(target);
        if path.is_absolute() {
            path
        } else {
            env.current_dir.join(path)
        }
    };

    let resolved = fs::canonicalize(&requested).map_err(|e| ChdirError::classify(&e))?;
    std::env::set_current_dir(&resolved).map_err(|e| ChdirError::classify(&e))?;
    env.current_dir = resolved;
    Ok(())
}
