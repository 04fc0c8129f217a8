//! Crate-internal error types. Only `RuntimeError` survives evaluation as a `Result::Err`; scan,
//! parse, and resolve errors are reported straight to [`crate::diagnostics::Diagnostics`] at the
//! point of discovery, since none of those stages need to propagate failure up a call stack the
//! way the evaluator does.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::token::Token;

/// An error raised while evaluating an already-parsed, already-resolved program.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: Token, message: impl Into<String>) -> Self {
        RuntimeError { token, message: message.into() }
    }
}

/// An error raised by the driver outside of the scan/parse/resolve/evaluate pipeline itself.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
