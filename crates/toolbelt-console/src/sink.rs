//! Output destinations.
//!
//! A [`Console`] owns an error stream and a stack of output destinations.
//! The bottom of the stack is the process stdout (or a buffer for tests);
//! [`Console::redirect`] pushes a file on top and the returned guard pops it
//! again, whichever way the scope is left.

use once_cell::sync::Lazy;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use toolbelt_util::{path, Error, Result};
use tracing::{debug, warn};

static GLOBAL: Lazy<Arc<Console>> = Lazy::new(|| Arc::new(Console::stdio()));

/// Which stream a line goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Out,
    Err,
}

type Sink = Box<dyn Write + Send>;

struct Streams {
    /// Never empty; the last entry receives output.
    out: Vec<Sink>,
    err: Sink,
}

/// In-memory sink shared between a console and whoever reads it back.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The streams printing helpers write to.
pub struct Console {
    streams: Mutex<Streams>,
    capture: Option<(SharedBuffer, SharedBuffer)>,
}

impl Console {
    /// A console writing to the process stdout and stderr.
    pub fn stdio() -> Self {
        Self {
            streams: Mutex::new(Streams {
                out: vec![Box::new(io::stdout())],
                err: Box::new(io::stderr()),
            }),
            capture: None,
        }
    }

    /// A console writing to in-memory buffers, read back with
    /// [`Console::captured`].
    pub fn buffered() -> Self {
        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        Self {
            streams: Mutex::new(Streams {
                out: vec![Box::new(out.clone())],
                err: Box::new(err.clone()),
            }),
            capture: Some((out, err)),
        }
    }

    /// The process-wide console.
    pub fn global() -> Arc<Console> {
        GLOBAL.clone()
    }

    /// Everything written to `stream` so far; empty for non-buffered
    /// consoles. Output written while redirected is not included.
    pub fn captured(&self, stream: Stream) -> String {
        match (&self.capture, stream) {
            (Some((out, _)), Stream::Out) => out.contents(),
            (Some((_, err)), Stream::Err) => err.contents(),
            (None, _) => String::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Streams> {
        self.streams.lock().unwrap_or_else(|e| {
            warn!("Console lock was poisoned, recovering");
            e.into_inner()
        })
    }

    /// Write each line followed by a newline, then flush.
    pub fn write_lines<S: AsRef<str>>(&self, stream: Stream, lines: &[S]) -> io::Result<()> {
        let mut streams = self.lock();
        let sink: &mut Sink = match stream {
            Stream::Out => match streams.out.last_mut() {
                Some(sink) => sink,
                None => return Ok(()),
            },
            Stream::Err => &mut streams.err,
        };
        for line in lines {
            sink.write_all(line.as_ref().as_bytes())?;
            sink.write_all(b"\n")?;
        }
        sink.flush()
    }

    /// Number of redirections currently active.
    pub fn redirect_depth(&self) -> usize {
        self.lock().out.len().saturating_sub(1)
    }

    /// Send output to `path` (truncated or created) until the guard drops.
    ///
    /// `~` is expanded. A directory target fails with
    /// [`ErrorKind::InvalidInput`](toolbelt_util::ErrorKind::InvalidInput)
    /// and leaves the current destination in place. Guards nest: each drop
    /// restores the destination that was current when it was created.
    ///
    /// Only lines written through this console are redirected. `println!`
    /// and other direct writes to the process stdout are not affected.
    pub fn redirect(&self, path: impl AsRef<Path>) -> Result<RedirectGuard<'_>> {
        let target = path::absolute(path)?;
        if target.is_dir() {
            return Err(Error::directory_target(&target));
        }
        let file = File::create(&target)?;

        let mut streams = self.lock();
        let restore_len = streams.out.len();
        streams.out.push(Box::new(BufWriter::new(file)));
        debug!(path = %target.display(), depth = restore_len, "Redirected output");

        Ok(RedirectGuard {
            console: self,
            restore_len,
            path: target,
        })
    }
}

/// Restores the previous output destination on drop.
#[must_use = "output is restored as soon as the guard is dropped"]
pub struct RedirectGuard<'a> {
    console: &'a Console,
    restore_len: usize,
    path: PathBuf,
}

impl RedirectGuard<'_> {
    /// Absolute path of the redirect target.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RedirectGuard<'_> {
    fn drop(&mut self) {
        let mut streams = self.console.lock();
        // Also drops destinations pushed by guards that were leaked above us.
        while streams.out.len() > self.restore_len {
            if let Some(mut sink) = streams.out.pop() {
                if let Err(e) = sink.flush() {
                    warn!(path = %self.path.display(), error = %e, "Failed to flush redirect target");
                }
            }
        }
        debug!(path = %self.path.display(), "Restored output");
    }
}
