//! modtrace - module-filtered line tracer for interpreted programs
//!
//! Consumes the call/line/return events an interpreter's trace hook
//! produces, decides per event whether the originating module should be
//! shown, and renders depth-indented trace lines.

pub mod classifier;
pub mod cli;
pub mod error;
pub mod event;
pub mod filter;
pub mod presets;
pub mod source;
pub mod state;
pub mod tables;
pub mod tracer;

pub use error::{Result, TraceError};
pub use event::{EventKind, TraceEvent};
pub use filter::{FilterConfig, FilterOptions, ModuleFilter, Rule, Verdict};
pub use state::{DisplayMode, TraceState};
pub use tracer::{TraceSummary, Tracer};
