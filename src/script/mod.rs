//! Operation scripts for driving a table from text.
//!
//! A script holds one operation per line:
//!
//! ```text
//! # comment
//! insert zero
//! insert Bene Gesserit
//! lookup zero
//! remove aardvark
//! size
//! print
//! stats
//! ```
//!
//! Keywords are case-insensitive. Everything after the keyword, trimmed, is
//! the key, so keys may contain inner spaces.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info_span};

use crate::data_structures::puka_cuckoo_hash::{PukaCuckooHash, Result as TableResult, TableStats};
use crate::error::script::ScriptError;

/// A single table operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert a key
    Insert(String),
    /// Remove a key
    Remove(String),
    /// Check whether a key is present
    Lookup(String),
    /// Report the number of stored keys
    Size,
    /// Render the table contents
    Print,
    /// Report table statistics
    Stats,
}

/// The result of applying one [`Operation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Outcome {
    /// Result of an insert; `added` is false when the key was already present
    Insert {
        /// The key
        key: String,
        /// Whether the key was newly stored
        added: bool,
    },
    /// Result of a remove
    Remove {
        /// The key
        key: String,
        /// Whether the key was present
        removed: bool,
    },
    /// Result of a lookup
    Lookup {
        /// The key
        key: String,
        /// Whether the key is present
        found: bool,
    },
    /// Number of stored keys
    Size {
        /// The count
        len: usize,
    },
    /// Rendered table contents
    Print {
        /// The dump, as produced by the table's `Display` implementation
        dump: String,
    },
    /// Table statistics
    Stats {
        /// The snapshot
        stats: TableStats,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Insert { key, added } => {
                write!(f, "insert {key}: {}", if *added { "added" } else { "present" })
            }
            Outcome::Remove { key, removed } => {
                write!(f, "remove {key}: {}", if *removed { "removed" } else { "absent" })
            }
            Outcome::Lookup { key, found } => {
                write!(f, "lookup {key}: {}", if *found { "found" } else { "missing" })
            }
            Outcome::Size { len } => write!(f, "size: {len}"),
            Outcome::Print { dump } => f.write_str(dump.trim_end()),
            Outcome::Stats { stats } => write!(
                f,
                "stats: len={} primary={} secondary={} load={:.3} resizes={} failed_walks={} displacements={}",
                stats.len,
                stats.primary_capacity,
                stats.secondary_capacity,
                stats.load_factor,
                stats.resizes,
                stats.failed_walks,
                stats.displacements
            ),
        }
    }
}

/// Parses a script into operations.
///
/// # Returns
///
/// The operations in source order, or the first [`ScriptError`] encountered.
pub fn parse(source: &str) -> Result<Vec<Operation>, ScriptError> {
    let mut operations = Vec::new();

    for (number, raw) in source.lines().enumerate() {
        let line = number + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let (keyword, rest) = match text.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (text, ""),
        };
        let op = keyword.to_ascii_lowercase();

        let keyed = |build: fn(String) -> Operation| {
            if rest.is_empty() {
                Err(ScriptError::MissingKey {
                    line,
                    op: op.clone(),
                })
            } else {
                Ok(build(rest.to_string()))
            }
        };
        let bare = |operation: Operation| {
            if rest.is_empty() {
                Ok(operation)
            } else {
                Err(ScriptError::UnexpectedKey {
                    line,
                    op: op.clone(),
                })
            }
        };

        let operation = match op.as_str() {
            "insert" => keyed(Operation::Insert),
            "remove" => keyed(Operation::Remove),
            "lookup" => keyed(Operation::Lookup),
            "size" => bare(Operation::Size),
            "print" => bare(Operation::Print),
            "stats" => bare(Operation::Stats),
            _ => Err(ScriptError::UnknownOperation {
                line,
                op: keyword.to_string(),
            }),
        }?;
        operations.push(operation);
    }

    Ok(operations)
}

/// Applies operations to a table in order.
///
/// Stops at the first table error; operations before it stay applied.
pub fn run<I>(table: &mut PukaCuckooHash, operations: I) -> TableResult<Vec<Outcome>>
where
    I: IntoIterator<Item = Operation>,
{
    let span = info_span!("script");
    let _guard = span.enter();

    let mut outcomes = Vec::new();
    for operation in operations {
        debug!(?operation, "applying operation");
        let outcome = match operation {
            Operation::Insert(key) => {
                let added = table.insert(key.clone())?;
                Outcome::Insert { key, added }
            }
            Operation::Remove(key) => {
                let removed = table.remove(key.as_str());
                Outcome::Remove { key, removed }
            }
            Operation::Lookup(key) => {
                let found = table.lookup(key.as_str());
                Outcome::Lookup { key, found }
            }
            Operation::Size => Outcome::Size { len: table.len() },
            Operation::Print => Outcome::Print {
                dump: table.to_string(),
            },
            Operation::Stats => Outcome::Stats {
                stats: table.stats(),
            },
        };
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
