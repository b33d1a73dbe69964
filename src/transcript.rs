//! Game transcripts.
//!
//! A transcript is a verbatim copy of everything written to the display,
//! kept in a plain-text file named after the second the session started.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

/// Writer that duplicates every write to two underlying writers.
pub struct Tee<A, B> {
    primary: A,
    copy: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(primary: A, copy: B) -> Self {
        Tee { primary, copy }
    }

    /// Returns both writers.
    pub fn into_inner(self) -> (A, B) {
        (self.primary, self.copy)
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    /// Writes all of `buf` to the primary, then all of it to the copy.
    ///
    /// Never reports a partial write. An error from the copy is returned
    /// after the primary already holds the bytes, so retrying duplicates
    /// them on the primary.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.primary.write_all(buf)?;
        self.copy.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        self.copy.flush()
    }
}

/// File name for a transcript started at `time`.
pub fn transcript_name(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("kalah-{}.log", secs)
}

/// Creates a new transcript file in `dir`, named by the current time.
pub fn create_transcript(dir: &Path) -> io::Result<(PathBuf, File)> {
    let path = dir.join(transcript_name(SystemTime::now()));
    let file = File::create(&path)?;
    info!(path = %path.display(), "writing transcript");
    Ok((path, file))
}
