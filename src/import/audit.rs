// src/import/audit.rs
use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::io::{self, Write};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Honour width/alignment so `{:<8}` pads.
        f.pad(self.as_str())
    }
}

/// Per-import log: `<timestamp> <LEVEL> <message>` lines into any sink.
///
/// Each import owns its own instance, so concurrent requests never share
/// logger state. The first write error is kept and reported by `finish`;
/// later lines are dropped.
pub struct AuditLog<W: Write> {
    sink: W,
    clock: fn() -> NaiveDateTime,
    failed: Option<io::Error>,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<W: Write> AuditLog<W> {
    pub fn new(sink: W) -> Self {
        Self::with_clock(sink, local_now)
    }

    pub fn with_clock(sink: W, clock: fn() -> NaiveDateTime) -> Self {
        Self {
            sink,
            clock,
            failed: None,
        }
    }

    pub fn log(&mut self, level: Level, message: impl AsRef<str>) {
        if self.failed.is_some() {
            return;
        }
        let ts = (self.clock)().format(TIMESTAMP_FORMAT);
        if let Err(e) = writeln!(self.sink, "{ts} {level:<8} {}", message.as_ref()) {
            self.failed = Some(e);
        }
    }

    pub fn debug(&mut self, message: impl AsRef<str>) {
        self.log(Level::Debug, message)
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.log(Level::Info, message)
    }

    pub fn warning(&mut self, message: impl AsRef<str>) {
        self.log(Level::Warning, message)
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.log(Level::Error, message)
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.failed.take() {
            return Err(e);
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}

impl AuditLog<Vec<u8>> {
    pub fn in_memory() -> Self {
        Self::new(Vec::new())
    }

    pub fn into_string(self) -> String {
        String::from_utf8_lossy(&self.sink).into_owned()
    }
}
