//! Named module-prefix presets
//!
//! A preset is a key that names a list of module prefixes. Good and bad
//! presets live in separate namespaces. Keys are looked up on every filter
//! evaluation, so editing the table mid-run changes later decisions.

use std::collections::HashMap;

/// Good/bad preset namespaces
#[derive(Debug, Clone, Default)]
pub struct PresetTable {
    good: HashMap<String, Vec<String>>,
    bad: HashMap<String, Vec<String>>,
}

impl PresetTable {
    pub fn new(good: HashMap<String, Vec<String>>, bad: HashMap<String, Vec<String>>) -> Self {
        Self { good, bad }
    }

    /// Prefixes for a good preset key (empty when the key is unknown)
    pub fn good(&self, key: &str) -> &[String] {
        self.good.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Prefixes for a bad preset key (empty when the key is unknown)
    pub fn bad(&self, key: &str) -> &[String] {
        self.bad.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_good(&self, key: &str) -> bool {
        self.good.contains_key(key)
    }

    pub fn has_bad(&self, key: &str) -> bool {
        self.bad.contains_key(key)
    }

    /// Insert or replace a good preset, returning the previous prefixes
    pub fn set_good<I>(&mut self, key: impl Into<String>, prefixes: I) -> Option<Vec<String>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.good
            .insert(key.into(), prefixes.into_iter().map(Into::into).collect())
    }

    /// Insert or replace a bad preset, returning the previous prefixes
    pub fn set_bad<I>(&mut self, key: impl Into<String>, prefixes: I) -> Option<Vec<String>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.bad
            .insert(key.into(), prefixes.into_iter().map(Into::into).collect())
    }
}
