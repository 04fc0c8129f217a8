//! The user-visible error sink. The book's reference implementation reports errors through a pair
//! of process-global mutable statics (`HAD_ERROR`, `HAD_RUNTIME_ERROR`); this crate threads an
//! explicit [`Diagnostics`] value through the scanner, parser, resolver and evaluator instead, so
//! two `Interpreter`s (e.g. two tests running in the same process) never share error state.

use std::io::Write;

use crate::token::{Location, Token, Type};

/// Collects and formats scan/parse/resolve/runtime errors for a single run.
pub struct Diagnostics {
    had_error: bool,
    had_runtime_error: bool,
    sink: Box<dyn Write>,
}

impl Diagnostics {
    pub fn new(sink: Box<dyn Write>) -> Self {
        Diagnostics { had_error: false, had_runtime_error: false, sink }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears both flags, mirroring the book's `reset_error`, for reuse between REPL submissions.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }

    /// Reports a scan/parse/resolve error at a source location.
    pub fn static_error(&mut self, location: Location, where_: &str, message: &str) {
        let _ = writeln!(self.sink, "[line {location}] Error{where_}: {message}");
        self.had_error = true;
    }

    /// Reports a parse/resolve error anchored on a token (end-of-file gets "at end").
    pub fn error_at(&mut self, token: &Token, message: &str) {
        if token.r#type == Type::EOF {
            self.static_error(token.location, " at end", message);
        } else {
            self.static_error(token.location, &format!(" at '{}'", token.lexeme), message);
        }
    }

    /// Reports an execution-time error.
    pub fn runtime_error(&mut self, token: &Token, message: &str) {
        let _ = writeln!(self.sink, "[line {}] Error at '{}': {}", token.location, token.lexeme, message);
        self.had_runtime_error = true;
    }
}

impl Default for Diagnostics {
    /// Reports to stderr by default.
    fn default() -> Self {
        Diagnostics::new(Box::new(std::io::stderr()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SharedBuffer;

    #[test]
    fn static_error_sets_flag_and_formats_location() {
        let buf = SharedBuffer::new();
        let mut diagnostics = Diagnostics::new(Box::new(buf.clone()));
        diagnostics.static_error(Location::new(0, 4), "", "Unexpected character 'x'");
        assert!(diagnostics.had_error());
        assert!(!diagnostics.had_runtime_error());
        assert_eq!(buf.contents(), "[line 1:5] Error: Unexpected character 'x'\n");
    }

    #[test]
    fn reset_clears_both_flags() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.static_error(Location::new(0, 0), "", "boom");
        diagnostics.reset();
        assert!(!diagnostics.had_error());
        assert!(!diagnostics.had_runtime_error());
    }
}
