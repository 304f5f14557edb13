//! Line-oriented commands for shells that drive the engine
//!
//! The engine only accepts validated keys; turning user text into keys
//! happens here, on the caller's side.
//!
//! Accepted forms (case-insensitive, `#` starts a comment):
//! - `insert 30`, `i 30`, `+30`
//! - `delete 30`, `d 30`, `-30` (so `--5` deletes -5 and `+-5` inserts it)
//! - `traverse` / `t` / `inorder`, `reset`, `show` / `print`

use std::num::ParseIntError;

use thiserror::Error;

/// Key type used by the shell
pub type ShellKey = i64;

/// One parsed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Insert a key
    Insert(ShellKey),
    /// Delete a key
    Delete(ShellKey),
    /// Print keys in order
    Traverse,
    /// Discard the tree
    Reset,
    /// Print the tree structure
    Show,
}

/// Input that does not parse into an [`Op`]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// First word is not a known command
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Command needs a key but none was given
    #[error("'{0}' needs a key")]
    MissingKey(String),

    /// Key is not an integer
    #[error("invalid key '{token}': {source}")]
    InvalidKey {
        /// Offending text
        token: String,
        /// Parse failure
        source: ParseIntError,
    },

    /// Extra words after a complete command
    #[error("unexpected trailing input '{0}'")]
    Trailing(String),

    /// Failure located in a multi-line script
    #[error("line {line}: {source}")]
    AtLine {
        /// 1-based line number
        line: usize,
        /// Underlying failure
        source: Box<ScriptError>,
    },
}

fn parse_key(token: &str) -> Result<ShellKey, ScriptError> {
    token.parse().map_err(|source| ScriptError::InvalidKey {
        token: token.to_string(),
        source,
    })
}

/// Parse one line. Blank lines and comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Op>, ScriptError> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let op = if let Some(rest) = head.strip_prefix('+') {
        Op::Insert(parse_key(rest)?)
    } else if let Some(rest) = head.strip_prefix('-') {
        Op::Delete(parse_key(rest)?)
    } else {
        let command = head.to_ascii_lowercase();
        match command.as_str() {
            "insert" | "i" | "delete" | "d" | "del" => {
                let key = words
                    .next()
                    .ok_or_else(|| ScriptError::MissingKey(head.to_string()))
                    .and_then(parse_key)?;
                if command.starts_with('i') {
                    Op::Insert(key)
                } else {
                    Op::Delete(key)
                }
            }
            "traverse" | "t" | "inorder" => Op::Traverse,
            "reset" => Op::Reset,
            "show" | "print" => Op::Show,
            _ => return Err(ScriptError::UnknownCommand(head.to_string())),
        }
    };

    match words.next() {
        Some(extra) => Err(ScriptError::Trailing(extra.to_string())),
        None => Ok(Some(op)),
    }
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(text: &str) -> Result<Vec<Op>, ScriptError> {
    let mut ops = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(op)) => ops.push(op),
            Ok(None) => {}
            Err(err) => {
                return Err(ScriptError::AtLine {
                    line: idx + 1,
                    source: Box::new(err),
                })
            }
        }
    }
    Ok(ops)
}
