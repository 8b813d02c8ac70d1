//! Module filtering for trace events
//!
//! Rules run in a fixed order and the first one that fires rejects the
//! module:
//! 1. builtin modules (unless `--include-builtins`)
//! 2. stdlib modules (unless `--include-stdlib`)
//! 3. bad list: name starts with any entry
//! 4. good list: name starts with no entry
//! 5. bad preset: name starts with any preset prefix
//! 6. good preset: name starts with no preset prefix
//! 7. bad regex: pattern found in name
//! 8. good regex: pattern not found in name
//!
//! Regexes come last because they are the slowest check.

use regex::Regex;
use tracing::debug;

use crate::classifier::ModuleClassifier;
use crate::error::{Result, TraceError};
use crate::presets::PresetTable;
use crate::state::DisplayMode;

/// Raw option values as supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub include_builtins: bool,
    pub include_stdlib: bool,
    /// Comma separated module prefixes to keep
    pub good: String,
    /// Comma separated module prefixes to drop
    pub bad: String,
    pub good_regex: String,
    pub bad_regex: String,
    pub good_preset: String,
    pub bad_preset: String,
    pub display_mode: DisplayMode,
}

/// Per-run filter configuration, fixed before tracing starts
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    pub include_builtins: bool,
    pub include_stdlib: bool,
    pub bad_list: Vec<String>,
    pub good_list: Vec<String>,
    /// Preset keys, resolved against the preset table on every evaluation
    pub bad_preset: Option<String>,
    pub good_preset: Option<String>,
    pub bad_regex: Option<Regex>,
    pub good_regex: Option<Regex>,
    pub display_mode: DisplayMode,
}

impl FilterConfig {
    /// Build a config from raw options, compiling the regexes
    ///
    /// An empty regex or preset string disables that tier. Invalid regexes
    /// are the only error.
    pub fn from_options(options: &FilterOptions) -> Result<Self> {
        Ok(Self {
            include_builtins: options.include_builtins,
            include_stdlib: options.include_stdlib,
            bad_list: split_list(&options.bad),
            good_list: split_list(&options.good),
            bad_preset: non_empty(&options.bad_preset),
            good_preset: non_empty(&options.good_preset),
            bad_regex: compile("bad", &options.bad_regex)?,
            good_regex: compile("good", &options.good_regex)?,
            display_mode: options.display_mode,
        })
    }
}

/// Split a comma separated list, dropping blank entries
fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn compile(tier: &'static str, pattern: &str) -> Result<Option<Regex>> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(pattern)
        .map(Some)
        .map_err(|source| TraceError::InvalidRegex { tier, source })
}

fn starts_with_any<S: AsRef<str>>(name: &str, prefixes: &[S]) -> bool {
    prefixes.iter().any(|prefix| name.starts_with(prefix.as_ref()))
}

/// The rule that rejected a module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Builtin,
    Stdlib,
    BadList,
    GoodList,
    BadPreset,
    GoodPreset,
    BadRegex,
    GoodRegex,
}

/// Outcome of running the filter chain on one module name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(Rule),
}

impl Verdict {
    pub fn is_accept(self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Filter chain: config plus the lookup tables it consults
#[derive(Debug, Clone)]
pub struct ModuleFilter {
    config: FilterConfig,
    classifier: ModuleClassifier,
    presets: PresetTable,
}

impl ModuleFilter {
    pub fn new(config: FilterConfig, classifier: ModuleClassifier, presets: PresetTable) -> Self {
        if let Some(key) = config.bad_preset.as_deref().filter(|k| !presets.has_bad(k)) {
            debug!(key, "unknown bad preset key, tier disabled");
        }
        if let Some(key) = config.good_preset.as_deref().filter(|k| !presets.has_good(k)) {
            debug!(key, "unknown good preset key, tier disabled");
        }

        Self {
            config,
            classifier,
            presets,
        }
    }

    /// A filter that accepts every module, builtins and stdlib included
    pub fn all() -> Self {
        let config = FilterConfig {
            include_builtins: true,
            include_stdlib: true,
            ..FilterConfig::default()
        };
        Self::new(config, ModuleClassifier::default(), PresetTable::default())
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    /// Mutable access to the preset table; later evaluations see the edits
    pub fn presets_mut(&mut self) -> &mut PresetTable {
        &mut self.presets
    }

    /// Check if events from a module should be shown
    pub fn should_trace(&self, module_name: &str) -> bool {
        self.evaluate(module_name).is_accept()
    }

    /// Run the chain and report which rule, if any, rejected the module
    pub fn evaluate(&self, name: &str) -> Verdict {
        let cfg = &self.config;

        if !cfg.include_builtins && self.classifier.is_builtin(name) {
            return Verdict::Reject(Rule::Builtin);
        }
        if !cfg.include_stdlib && self.classifier.is_stdlib(name) {
            return Verdict::Reject(Rule::Stdlib);
        }
        if !cfg.bad_list.is_empty() && starts_with_any(name, &cfg.bad_list) {
            return Verdict::Reject(Rule::BadList);
        }
        if !cfg.good_list.is_empty() && !starts_with_any(name, &cfg.good_list) {
            return Verdict::Reject(Rule::GoodList);
        }
        if let Some(key) = &cfg.bad_preset {
            let prefixes = self.presets.bad(key);
            if !prefixes.is_empty() && starts_with_any(name, prefixes) {
                return Verdict::Reject(Rule::BadPreset);
            }
        }
        if let Some(key) = &cfg.good_preset {
            let prefixes = self.presets.good(key);
            if !prefixes.is_empty() && !starts_with_any(name, prefixes) {
                return Verdict::Reject(Rule::GoodPreset);
            }
        }
        if let Some(re) = &cfg.bad_regex {
            if re.is_match(name) {
                return Verdict::Reject(Rule::BadRegex);
            }
        }
        if let Some(re) = &cfg.good_regex {
            if !re.is_match(name) {
                return Verdict::Reject(Rule::GoodRegex);
            }
        }

        Verdict::Accept
    }
}
