use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as _;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use rocks_lang::{Interpreter, EX_IOERR, EX_SOFTWARE};

/// A tree-walking interpreter for the rocks scripting language.
#[derive(clap::Parser)]
#[command(version, about)]
struct Cli {
    /// Script to run. Omit to start an interactive REPL.
    script: Option<PathBuf>,

    /// Enable phase-by-phase tracing on stderr (scan/parse/resolve/evaluate).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut interpreter = Interpreter::new();

    match cli.script {
        Some(path) => run_script(&mut interpreter, &path),
        None => run_prompt(&mut interpreter),
    }
}

fn run_script(interpreter: &mut Interpreter, path: &Path) -> ExitCode {
    match interpreter.run_file(path) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{:#}", anyhow::Error::new(error));
            ExitCode::from(EX_IOERR)
        }
    }
}

fn history_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".rocks_history"))
}

fn run_prompt(interpreter: &mut Interpreter) -> ExitCode {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(error) => {
            eprintln!("Failed to start line editor: {error}");
            return ExitCode::from(EX_SOFTWARE);
        }
    };

    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                interpreter.run_line(&line);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => {
                eprintln!("Readline error: {error}");
                break;
            }
        }
    }

    if let Some(path) = &history {
        let _ = editor.save_history(path);
    }

    ExitCode::SUCCESS
}
