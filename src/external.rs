//! Resolution and execution of commands that are not builtins.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use crate::command::ExitCode;
use crate::env::Environment;
use crate::error::ShellError;
use crate::io_adapters::Io;

/// Resolve `name` against the search path.
///
/// Each directory is scanned in listed order; the first entry whose path
/// exists and is not a directory wins. Execute permission is not checked,
/// so a plain data file shadows a real executable later on the path.
pub fn find_in_search_path(search_paths: &OsStr, name: &str) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists() && !candidate.is_dir())
}

/// Run an external program with captured output.
///
/// Both child streams are captured rather than inherited and drained
/// concurrently before waiting for exit, then routed to the command's
/// sinks. An unresolved name reports `<name>: not found` on the stderr sink
/// and spawns nothing.
pub fn run(name: &str, args: &[String], io: &mut Io, env: &Environment) -> Result<ExitCode> {
    let path_var = env.get_var("PATH").unwrap_or_default();
    let Some(executable) = find_in_search_path(OsStr::new(path_var), name) else {
        writeln!(io.stderr, "{}", ShellError::CommandNotFound(name.to_string()))?;
        return Ok(127);
    };

    let output = Command::new(&executable)
        .args(args)
        .envs(env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .current_dir(&env.current_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("failed to run {}", executable.display()))?;

    io.stdout.write_all(&output.stdout)?;
    io.stderr.write_all(&output.stderr)?;

    match output.status.code() {
        Some(code) => Ok(code),
        None => Ok(terminated_by_signal(output.status)),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}
