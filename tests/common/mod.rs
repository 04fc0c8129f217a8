use rocks_lang::sink::SharedBuffer;
use rocks_lang::Interpreter;

/// Runs `source` and asserts it produced exactly `expected` lines of `print`ed output and no
/// static or runtime error. One fresh `Interpreter` per call, so tests never share globals.
pub fn assert_output(source: &str, expected: &[&str]) {
    let output = SharedBuffer::new();
    let errors = SharedBuffer::new();
    let mut interpreter = Interpreter::with_sinks(Box::new(errors.clone()), output.clone());

    interpreter.run_line(source);

    assert!(!interpreter.had_error(), "unexpected static error(s):\n{}", errors.contents());
    assert!(!interpreter.had_runtime_error(), "unexpected runtime error:\n{}", errors.contents());

    let expected = if expected.is_empty() { String::new() } else { format!("{}\n", expected.join("\n")) };
    assert_eq!(output.contents(), expected);
}

/// Runs `source` and asserts it reported exactly `expected` as error lines (static or runtime).
pub fn assert_error(source: &str, expected: &[&str]) {
    let output = SharedBuffer::new();
    let errors = SharedBuffer::new();
    let mut interpreter = Interpreter::with_sinks(Box::new(errors.clone()), output.clone());

    interpreter.run_line(source);

    assert!(interpreter.had_error() || interpreter.had_runtime_error(), "expected an error, got none");
    assert_eq!(errors.contents(), format!("{}\n", expected.join("\n")));
}

#[macro_export]
macro_rules! tests {
    ($name:ident is OK $source:expr $(, $expected:expr)* $(,)?) => {
        #[test]
        fn $name() {
            $crate::common::assert_output($source, &[$($expected),*]);
        }
    };
    ($name:ident is ERR $source:expr $(, $expected:expr)* $(,)?) => {
        #[test]
        fn $name() {
            $crate::common::assert_error($source, &[$($expected),*]);
        }
    };
}
