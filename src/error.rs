use std::{path::PathBuf, result::Result as StdResult};

use thiserror::Error;

pub type Result<T> = StdResult<T, Error>;

/// An enum for describing and handling the errors encountered while
/// gathering the commits of a release and building its notification.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse config file: {0}")]
    ConfigParse(PathBuf),

    #[error("authors file must be an object of string pairs: {0}")]
    AuthorsParse(PathBuf),

    #[error("cannot get current directory")]
    CurrentDir,

    #[error("fatal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid issue tracker pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Whatever the command wrote to its error stream, verbatim.
    #[error("{0}")]
    Stderr(String),

    #[error("unexpected input: {name} should not contain the delimiter {delimiter}")]
    OutputDelimiter { name: String, delimiter: String },

    #[error("`{command}` exited with status {code}")]
    ExitStatus { command: String, code: i32 },
}
