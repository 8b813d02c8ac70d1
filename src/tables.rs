//! Static lookup tables loaded from TOML
//!
//! ```toml
//! builtin_modules = ["sys", "builtins"]      # optional, defaults apply
//! stdlib_modules = ["os", "posixpath"]       # optional, defaults apply
//!
//! [good_presets]
//! web = ["myapp.views", "myapp.urls"]
//!
//! [bad_presets]
//! orm = ["django.db"]
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::classifier::ModuleClassifier;
use crate::error::{Result, TraceError};
use crate::presets::PresetTable;

/// On-disk form of the lookup tables
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupTables {
    /// Replaces the default builtin set when present
    #[serde(default)]
    pub builtin_modules: Option<Vec<String>>,

    /// Replaces the default stdlib set when present
    #[serde(default)]
    pub stdlib_modules: Option<Vec<String>>,

    #[serde(default)]
    pub good_presets: HashMap<String, Vec<String>>,

    #[serde(default)]
    pub bad_presets: HashMap<String, Vec<String>>,
}

impl LookupTables {
    /// Load and parse a tables file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let contents = fs::read_to_string(path_ref).map_err(|e| TraceError::Tables {
            path: path_ref.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_toml(&contents).map_err(|e| match e {
            TraceError::Tables { reason, .. } => TraceError::Tables {
                path: path_ref.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    /// Parse tables from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| TraceError::Tables {
            path: "<inline>".into(),
            reason: e.to_string(),
        })
    }

    /// Split into the classifier and preset table used by the filter chain
    pub fn into_parts(self) -> (ModuleClassifier, PresetTable) {
        let mut classifier = ModuleClassifier::default();
        if let Some(builtin) = self.builtin_modules {
            classifier = classifier.with_builtin(builtin);
        }
        if let Some(stdlib) = self.stdlib_modules {
            classifier = classifier.with_stdlib(stdlib);
        }
        (
            classifier,
            PresetTable::new(self.good_presets, self.bad_presets),
        )
    }
}
