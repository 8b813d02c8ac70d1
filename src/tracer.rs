//! Event dispatch: filter, depth bookkeeping, rendering, output
//!
//! The host delivers events strictly in execution order and waits for each
//! callback to return, so a single `&mut Tracer` is all the state there is.

use std::io::{BufRead, Write};
use tracing::{debug, trace, warn};

use crate::error::{Result, TraceError};
use crate::event::{EventKind, TraceEvent};
use crate::filter::{ModuleFilter, Verdict};
use crate::source::LineResolver;
use crate::state::TraceState;

/// Counters reported when tracing stops
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceSummary {
    pub events: u64,
    pub emitted: u64,
    pub rejected: u64,
    /// Input records that could not be parsed and were skipped
    pub malformed: u64,
    pub final_depth: i64,
}

impl std::fmt::Display for TraceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[modtrace: {} events, {} emitted, {} rejected, {} malformed, final depth {}]",
            self.events, self.emitted, self.rejected, self.malformed, self.final_depth
        )
    }
}

/// Single-run tracer writing to an output sink
pub struct Tracer<W: Write> {
    filter: ModuleFilter,
    resolver: LineResolver,
    state: TraceState,
    out: W,
    summary: TraceSummary,
}

impl<W: Write> Tracer<W> {
    pub fn new(filter: ModuleFilter, out: W) -> Self {
        Self {
            filter,
            resolver: LineResolver::new(),
            state: TraceState::new(),
            out,
            summary: TraceSummary::default(),
        }
    }

    pub fn state(&self) -> &TraceState {
        &self.state
    }

    pub fn filter(&self) -> &ModuleFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut ModuleFilter {
        &mut self.filter
    }

    /// Handle one event, returning the line written (if any)
    ///
    /// Depth is updated for every event, filtered or not. Only a failed
    /// write to the output sink is an error.
    pub fn on_event(&mut self, event: &TraceEvent) -> Result<Option<String>> {
        self.summary.events += 1;
        self.state.apply(event.kind);

        let module = event.module_name();
        if let Verdict::Reject(rule) = self.filter.evaluate(module) {
            trace!(module, ?rule, depth = self.state.depth, "rejected");
            self.summary.rejected += 1;
            return Ok(None);
        }

        let source_text = match event.kind {
            EventKind::Call | EventKind::Line => {
                self.resolver.resolve_line(event.file_name(), event.line)
            }
            EventKind::Return => String::new(),
        };

        let Some(line) = self
            .state
            .render(event, &source_text, self.filter.config().display_mode)
        else {
            return Ok(None);
        };

        writeln!(self.out, "{line}").map_err(TraceError::Output)?;
        self.summary.emitted += 1;
        Ok(Some(line))
    }

    /// Drive the tracer from a JSON-lines event stream until EOF
    ///
    /// Blank lines are ignored. Records that are not UTF-8 or not a valid
    /// event are skipped with a warning; only a failed read stops the run.
    pub fn run<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        let mut buf = Vec::new();
        let mut line_no = 0usize;
        loop {
            buf.clear();
            if reader
                .read_until(b'\n', &mut buf)
                .map_err(TraceError::Input)?
                == 0
            {
                break;
            }
            line_no += 1;

            let record = match std::str::from_utf8(&buf) {
                Ok(record) => record,
                Err(e) => {
                    warn!(line = line_no, error = %e, "skipping non-UTF-8 event");
                    self.summary.malformed += 1;
                    continue;
                }
            };
            if record.trim().is_empty() {
                continue;
            }
            match TraceEvent::from_json(record.trim_end()) {
                Ok(event) => {
                    self.on_event(&event)?;
                }
                Err(e) => {
                    warn!(line = line_no, error = %e, "skipping malformed event");
                    self.summary.malformed += 1;
                }
            }
        }
        self.out.flush().map_err(TraceError::Output)?;
        Ok(())
    }

    /// Detach: flush the sink and hand back the counters and the sink
    pub fn finish(mut self) -> Result<(TraceSummary, W)> {
        self.out.flush().map_err(TraceError::Output)?;
        self.summary.final_depth = self.state.depth;
        debug!(
            events = self.summary.events,
            emitted = self.summary.emitted,
            cached_files = self.resolver.cached_files(),
            "tracing finished"
        );
        Ok((self.summary, self.out))
    }
}
