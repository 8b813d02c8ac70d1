//! Source line lookup for trace output
//!
//! Maps (file, line) to the literal source text. Purely cosmetic: a miss
//! yields an empty string and is never reported as an error.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Placeholder file name used for code read from standard input
pub const STDIN_PLACEHOLDER: &str = "traceit.py";

const STDIN_PSEUDO_SOURCE: &str = "<stdin>";
const COMPILED_SUFFIXES: &[&str] = &[".pyc", ".pyo"];

/// Map a reported file name to the path its source should be read from
///
/// `<stdin>` becomes [`STDIN_PLACEHOLDER`]; compiled artifacts (`.pyc`,
/// `.pyo`) lose their last character to point back at the `.py` source.
pub fn normalize_path(file_name: &str) -> PathBuf {
    if file_name == STDIN_PSEUDO_SOURCE {
        return PathBuf::from(STDIN_PLACEHOLDER);
    }
    if COMPILED_SUFFIXES
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
    {
        return PathBuf::from(&file_name[..file_name.len() - 1]);
    }
    PathBuf::from(file_name)
}

/// Line resolver with an append-only per-file cache
#[derive(Debug, Default)]
pub struct LineResolver {
    files: HashMap<PathBuf, Vec<String>>,
}

impl LineResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source text of a 1-based line, trailing whitespace trimmed
    ///
    /// Returns an empty string when the file or line is unavailable.
    pub fn resolve_line(&mut self, file_name: &str, line_number: u32) -> String {
        let path = normalize_path(file_name);

        let Some(index) = line_number.checked_sub(1) else {
            return String::new();
        };

        if !self.files.contains_key(&path) {
            match read_lines(&path) {
                Some(lines) => {
                    self.files.insert(path.clone(), lines);
                }
                None => {
                    trace!(path = %path.display(), "source unavailable");
                    return String::new();
                }
            }
        }

        self.files
            .get(&path)
            .and_then(|lines| lines.get(index as usize))
            .map(|line| line.trim_end().to_string())
            .unwrap_or_default()
    }

    /// Number of files currently cached
    pub fn cached_files(&self) -> usize {
        self.files.len()
    }
}

fn read_lines(path: &Path) -> Option<Vec<String>> {
    let bytes = fs::read(path).ok()?;
    Some(split_lines(&String::from_utf8_lossy(&bytes)))
}

/// Split on `\r\n`, `\n` or a bare `\r` (universal newlines)
fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split(|c: char| c == '\n' || c == '\r')
        .map(str::to_string)
        .collect()
}
