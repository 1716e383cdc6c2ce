//! User-facing diagnostics sink.
//!
//! Providers emit progress notices through [`Diag`] while extracting metrics.
//! The verbosity and silence flags are set once by the orchestrator from the
//! invocation environment and threaded through the pipeline context; there is
//! no process-wide state.

use core::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Marker prefix for every diagnostic line
const MARKER: &str = "* ";

/// Line-oriented diagnostics sink with explicit verbosity flags.
///
/// `silent` suppresses all output; verbose-tagged lines additionally require
/// `verbose` to be set. Clones share the underlying writer.
#[derive(Clone)]
pub struct Diag {
    verbose: bool,
    silent: bool,
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Diag {
    /// Create a sink writing to stdout.
    #[must_use]
    pub fn new(verbose: bool, silent: bool) -> Self {
        Self::with_writer(verbose, silent, std::io::stdout())
    }

    /// Create a sink writing to an arbitrary writer (used by tests).
    pub fn with_writer(verbose: bool, silent: bool, writer: impl Write + Send + 'static) -> Self {
        Self {
            verbose,
            silent,
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Emit a diagnostic line. Suppressed in silent mode.
    pub fn log(&self, message: &str) {
        if !self.silent {
            self.emit(message);
        }
    }

    /// Emit a verbose-tagged diagnostic line. Suppressed in silent mode and
    /// unless verbose mode is enabled.
    pub fn log_verbose(&self, message: &str) {
        if !self.silent && self.verbose {
            self.emit(message);
        }
    }

    fn emit(&self, message: &str) {
        let mut sink = self.sink.lock().expect("diagnostics sink lock poisoned");
        let _ = writeln!(sink, "{MARKER}{message}");
    }
}

impl fmt::Debug for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diag")
            .field("verbose", &self.verbose)
            .field("silent", &self.silent)
            .finish_non_exhaustive()
    }
}
