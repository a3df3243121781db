//! Console progress reporting

use crate::adapters::host::ProgressSink;
use std::io::{self, Write};

/// Prints one `[ 33%] Processing: A101` line per update
pub struct ConsoleProgress<W: Write = io::Stdout> {
    out: W,
    percent: f64,
    status: String,
    closed: bool,
}

impl ConsoleProgress {
    /// Progress on stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleProgress<W> {
    /// Progress on any writer
    pub fn new(out: W) -> Self {
        Self {
            out,
            percent: 0.0,
            status: String::new(),
            closed: false,
        }
    }

    /// Last reported percentage
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Whether [`ProgressSink::close`] was called
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_line(&mut self) {
        // Console output is best effort
        let _ = writeln!(self.out, "[{:>3.0}%] {}", self.percent, self.status);
        let _ = self.out.flush();
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn update(&mut self, percent: f64) {
        if self.closed {
            return;
        }
        self.percent = percent.clamp(0.0, 100.0);
        self.print_line();
    }

    fn set_status(&mut self, text: &str) {
        if self.closed {
            return;
        }
        self.status = text.to_string();
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _ = self.out.flush();
    }
}
