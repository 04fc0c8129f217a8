#![allow(clippy::needless_return)]

//! Rocks is a tree-walking interpreter for a small dynamically typed scripting language. It has
//! lexical scoping, first-class functions and closures, and no garbage collector — reference
//! cycles through closures leak rather than freeing. This crate is a teaching project; it is not
//! meant to run untrusted code.
//!
//! ## Scanning
//! The first step is scanning: turning a string of source characters into a flat list of tokens.
//! The scanner is implemented in [`scanner`] over a [`peekmore`] iterator, so it can look two
//! characters ahead to distinguish, say, `+` from `+=` from `++`. Lexical errors (an unterminated
//! string, an unexpected character) are reported through [`Diagnostics`](diagnostics::Diagnostics)
//! as they're found; scanning always continues to the end of the source so the user sees every
//! lexical mistake at once instead of just the first.
//!
//! ## Parsing
//! The second step converts the token list into an AST: [`Expr`](expr::Expr) nodes that produce a
//! value, and [`Stmt`](stmt::Stmt) nodes that perform an action. [`parser`] is a hand-written
//! recursive-descent parser with operator-precedence climbing. A malformed statement is reported
//! and then skipped via panic-mode synchronization, so one syntax error doesn't hide the rest.
//!
//! ## Resolving
//! [`resolver`] walks the parsed AST once before evaluation to work out, for every variable
//! reference, how many lexical scopes out its binding lives. This produces a side-table
//! (`resolver::Locals`) keyed by each expression's stable [`ExprId`](expr::ExprId) that the
//! evaluator consults instead of re-searching the scope chain on every lookup. The resolver is
//! also where a handful of static mistakes are caught: reading a local in its own initializer,
//! returning from top-level code, redeclaring a name in the same scope.
//!
//! ## Evaluating
//! [`evaluator`] walks the resolved AST and produces a value. Unlike the book this is based on,
//! `return`/`break`/`continue` are not implemented as thrown exceptions — they're an explicit
//! [`Flow`](evaluator::Flow) value threaded back up through `Result`, which a loop or function
//! call intercepts. Values are represented by [`Object`](object::Object); environments are
//! `Rc<RefCell<Environment>>` chains so that closures can share a mutable binding with the scope
//! that defined it.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use log::{debug, trace};

pub mod ast;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod expr;
pub mod function;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod sink;
pub mod stmt;
pub mod token;

use diagnostics::Diagnostics;
use error::InterpreterError;
use evaluator::Evaluator;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The exit code a process running this interpreter should use after a static error
/// (scan/parse/resolve). Follows the `sysexits.h` convention the book uses.
pub const EX_DATAERR: u8 = 65;

/// The exit code after an uncaught runtime error.
pub const EX_SOFTWARE: u8 = 70;

/// The exit code when the driver can't even read the script file.
pub const EX_IOERR: u8 = 74;

/// Where a run's `print`ed output goes. Kept as a factory rather than a single open `Box<dyn
/// Write>` because a fresh `Evaluator` (and thus a fresh sink handle) is built on every `run`.
enum OutputSink {
    Stdout,
    Shared(sink::SharedBuffer),
}

impl OutputSink {
    fn open(&self) -> Box<dyn Write> {
        match self {
            OutputSink::Stdout => Box::new(io::stdout()),
            OutputSink::Shared(buffer) => Box::new(buffer.clone()),
        }
    }
}

/// Drives a single interpreter session: scan, parse, resolve, evaluate. A fresh `Interpreter`
/// owns its own global environment, so two sessions in the same process (e.g. two tests) never
/// share state.
pub struct Interpreter {
    diagnostics: Diagnostics,
    output: OutputSink,
}

impl Interpreter {
    /// Builds an interpreter that reports errors to stderr and prints to stdout.
    pub fn new() -> Self {
        Interpreter { diagnostics: Diagnostics::default(), output: OutputSink::Stdout }
    }

    /// Builds an interpreter with explicit error and output sinks, for tests that want to assert
    /// on what was printed rather than letting it go to the real stdout/stderr.
    pub fn with_sinks(error_sink: Box<dyn Write>, output: sink::SharedBuffer) -> Self {
        Interpreter { diagnostics: Diagnostics::new(error_sink), output: OutputSink::Shared(output) }
    }

    pub fn had_error(&self) -> bool {
        self.diagnostics.had_error()
    }

    pub fn had_runtime_error(&self) -> bool {
        self.diagnostics.had_runtime_error()
    }

    /// Runs a whole file and returns the process exit code it implies. Fails only if the file
    /// itself can't be read; scan/parse/resolve/runtime errors are reported to diagnostics and
    /// reflected in the returned exit code instead.
    pub fn run_file(&mut self, path: &Path) -> Result<ExitCode, InterpreterError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| InterpreterError::ReadFile { path: path.to_path_buf(), source })?;

        self.run(&contents);

        Ok(if self.had_error() {
            ExitCode::from(EX_DATAERR)
        } else if self.had_runtime_error() {
            ExitCode::from(EX_SOFTWARE)
        } else {
            ExitCode::SUCCESS
        })
    }

    /// Runs one line (or block) of source, e.g. a single REPL submission, resetting the error
    /// flags first so a previous mistake doesn't linger.
    pub fn run_line(&mut self, source: &str) {
        trace!("REPL line: {source:?}");
        self.diagnostics.reset();
        self.run(source);
    }

    fn run(&mut self, source: &str) {
        debug!("scanning {} bytes of source", source.len());
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens(&mut self.diagnostics);

        if self.diagnostics.had_error() {
            return;
        }

        debug!("parsing {} tokens", tokens.len());
        let mut parser = Parser::new(tokens, &mut self.diagnostics);
        let statements = parser.parse();

        if self.diagnostics.had_error() {
            return;
        }

        debug!("resolving {} top-level statements", statements.len());
        let resolver = Resolver::new(&mut self.diagnostics);
        let locals = resolver.resolve(&statements);

        if self.diagnostics.had_error() {
            return;
        }

        debug!("evaluating");
        let mut evaluator = Evaluator::new(locals, self.output.open());
        evaluator.interpret(&statements, &mut self.diagnostics);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
