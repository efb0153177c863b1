//! Output sink - streams candidates to a writer, one per line

use std::collections::HashSet;
use std::io::{BufWriter, Write};

use crate::error::{Result, WordForgeError};

/// Lines written between two flushes of the underlying writer
pub const DEFAULT_FLUSH_INTERVAL: u64 = 1024;

/// Buffered newline-delimited writer.
///
/// The buffer is flushed every `flush_interval` lines so an interrupted run
/// leaves whole lines on disk.
pub struct LineWriter<W: Write> {
    inner: BufWriter<W>,
    path: Option<String>,
    flush_interval: u64,
    pending: u64,
    written: u64,
    bytes: u64,
}

impl<W: Write> LineWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: BufWriter::new(writer),
            path: None,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            pending: 0,
            written: 0,
            bytes: 0,
        }
    }

    /// Flush every `lines` lines; 0 is treated as 1
    pub fn with_flush_interval(mut self, lines: u64) -> Self {
        self.flush_interval = lines.max(1);
        self
    }

    /// Path reported in write errors
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Write `line` followed by `\n`
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let result = self
            .inner
            .write_all(line.as_bytes())
            .and_then(|_| self.inner.write_all(b"\n"));
        if let Err(e) = result {
            return Err(self.error(e));
        }

        self.written += 1;
        self.bytes += line.len() as u64 + 1;
        self.pending += 1;
        if self.pending >= self.flush_interval {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(|e| self.error(e))?;
        self.pending = 0;
        Ok(())
    }

    /// Lines written through this writer
    pub fn lines_written(&self) -> u64 {
        self.written
    }

    /// Bytes written through this writer, newlines included
    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        let path = self.path.clone();
        self.inner
            .into_inner()
            .map_err(|e| WordForgeError::sink_write(e.error().to_string(), path))
    }

    fn error(&self, err: std::io::Error) -> WordForgeError {
        tracing::warn!(path = ?self.path, error = %err, "Wordlist write failed");
        WordForgeError::sink_write(err.to_string(), self.path.clone())
    }
}

/// Write the unique items of `source`, stopping after `cap` lines (0 = no cap).
///
/// The seen-set lives only for this call and holds every line written, so
/// memory grows with the output. Sources that are unique by construction
/// should go through [`write_capped`] instead.
///
/// Returns the number of lines written.
pub fn write_unique<I, W, F>(source: I, out: &mut LineWriter<W>, cap: u64, mut on_write: F) -> Result<u64>
where
    I: IntoIterator<Item = String>,
    W: Write,
    F: FnMut(u64),
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut count = 0u64;

    for item in source {
        if seen.contains(&item) {
            continue;
        }
        out.write_line(&item)?;
        seen.insert(item);
        count += 1;
        on_write(count);

        if out_of_budget(count, cap) {
            break;
        }
    }

    Ok(count)
}

/// Write `source` as-is, stopping after `cap` lines (0 = no cap)
pub fn write_capped<I, W, F>(source: I, out: &mut LineWriter<W>, cap: u64, mut on_write: F) -> Result<u64>
where
    I: IntoIterator<Item = String>,
    W: Write,
    F: FnMut(u64),
{
    let mut count = 0u64;

    for item in source {
        out.write_line(&item)?;
        count += 1;
        on_write(count);

        if out_of_budget(count, cap) {
            break;
        }
    }

    Ok(count)
}

fn out_of_budget(count: u64, cap: u64) -> bool {
    cap > 0 && count >= cap
}
