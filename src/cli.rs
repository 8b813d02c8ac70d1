//! CLI argument parsing for modtrace

use clap::Parser;
use std::path::PathBuf;

use crate::filter::FilterOptions;
use crate::state::DisplayMode;

#[derive(Parser, Debug)]
#[command(name = "modtrace")]
#[command(version)]
#[command(about = "Module-filtered line tracer for interpreted programs", long_about = None)]
pub struct Cli {
    /// Include builtin modules (default: excluded)
    #[arg(long = "include-builtins")]
    pub include_builtins: bool,

    /// Include standard library modules (default: excluded)
    #[arg(long = "include-stdlib")]
    pub include_stdlib: bool,

    /// Display module names only, once per change of module
    #[arg(long = "module-only", conflicts_with = "calls_only")]
    pub module_only: bool,

    /// Display function calls only
    #[arg(long = "calls-only")]
    pub calls_only: bool,

    /// Comma separated module prefixes to trace
    #[arg(long = "good", value_name = "PREFIXES", default_value = "")]
    pub good: String,

    /// Comma separated module prefixes to exclude (takes precedence over --good)
    #[arg(long = "bad", value_name = "PREFIXES", default_value = "")]
    pub bad: String,

    /// Regular expression a module name must contain
    #[arg(long = "good-regex", value_name = "REGEX", default_value = "")]
    pub good_regex: String,

    /// Regular expression of module names to exclude (takes precedence over --good-regex)
    #[arg(long = "bad-regex", value_name = "REGEX", default_value = "")]
    pub bad_regex: String,

    /// Key into the good presets table
    #[arg(long = "good-preset", value_name = "KEY", default_value = "")]
    pub good_preset: String,

    /// Key into the bad presets table
    #[arg(long = "bad-preset", value_name = "KEY", default_value = "")]
    pub bad_preset: String,

    /// TOML file with builtin/stdlib module sets and preset tables
    #[arg(long = "tables", value_name = "FILE")]
    pub tables: Option<PathBuf>,

    /// JSON-lines event stream to read (default: stdin)
    #[arg(long = "events", value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Write trace lines to FILE instead of stderr
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print a summary line to stderr when the stream ends
    #[arg(long = "summary")]
    pub summary: bool,

    /// Enable debug logging of the tracer itself
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    pub fn display_mode(&self) -> DisplayMode {
        if self.module_only {
            DisplayMode::ModuleOnly
        } else if self.calls_only {
            DisplayMode::CallsOnly
        } else {
            DisplayMode::Full
        }
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            include_builtins: self.include_builtins,
            include_stdlib: self.include_stdlib,
            good: self.good.clone(),
            bad: self.bad.clone(),
            good_regex: self.good_regex.clone(),
            bad_regex: self.bad_regex.clone(),
            good_preset: self.good_preset.clone(),
            bad_preset: self.bad_preset.clone(),
            display_mode: self.display_mode(),
        }
    }
}
