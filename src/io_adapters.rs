use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{self, Result as IoResult, Write};
use std::rc::Rc;

use crate::parser::{RedirectMode, RedirectTarget};

/// The pair of output sinks a single command writes to.
///
/// An `Io` is built fresh for every command from its redirection targets and
/// dropped when the command finishes. The console streams are never globally
/// replaced, so there is nothing to restore on any exit path, including
/// handler errors.
pub struct Io {
    pub stdout: Box<dyn Write>,
    pub stderr: Box<dyn Write>,
}

impl Io {
    /// Console-backed sinks.
    pub fn console() -> Self {
        Self {
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// Open the sinks for a command's redirection targets.
    ///
    /// File targets are opened here, before the command runs: `Overwrite`
    /// truncates, `Append` appends, and both create a missing file.
    pub fn from_targets(stdout: &RedirectTarget, stderr: &RedirectTarget) -> IoResult<Self> {
        Ok(Self {
            stdout: open_sink(stdout, || Box::new(io::stdout()))?,
            stderr: open_sink(stderr, || Box::new(io::stderr()))?,
        })
    }

    /// Memory-backed sinks plus handles to read back what was written.
    /// Intended for tests and embedding.
    pub fn capture() -> (Self, SinkHandle, SinkHandle) {
        let (out, out_handle) = MemWriter::with_handle();
        let (err, err_handle) = MemWriter::with_handle();
        let io = Self {
            stdout: Box::new(out),
            stderr: Box::new(err),
        };
        (io, out_handle, err_handle)
    }
}

fn open_sink(
    target: &RedirectTarget,
    console: impl FnOnce() -> Box<dyn Write>,
) -> IoResult<Box<dyn Write>> {
    match target {
        RedirectTarget::Console => Ok(console()),
        RedirectTarget::File { path, mode } => {
            let file = match mode {
                RedirectMode::Overwrite => File::create(path)?,
                RedirectMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
            };
            Ok(Box::new(file))
        }
    }
}

/// Shared handle to a [`MemWriter`] buffer.
pub type SinkHandle = Rc<RefCell<Vec<u8>>>;

/// Memory-backed writer for capturing sink output.
pub struct MemWriter {
    buf: SinkHandle,
}

impl MemWriter {
    /// Create a writer and return it together with the buffer handle.
    pub fn with_handle() -> (Self, SinkHandle) {
        let buf = Rc::new(RefCell::new(Vec::new()));
        let handle = buf.clone();
        (Self { buf }, handle)
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

/// Read a captured sink back as text.
pub fn sink_text(handle: &SinkHandle) -> String {
    String::from_utf8_lossy(&handle.borrow()).into_owned()
}
