#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literals is OK
        "print \"\"; print \"a string\"; print \"A~ॐ\";",
        "", "a string", "A~ॐ"
    }

    tests! {
        concatenation is OK
        "print \"foo\" + \"bar\";",
        "foobar"
    }

    tests! {
        multiline is OK
        "print \"line one\nline two\";",
        "line one\nline two"
    }

    tests! {
        unterminated is ERR
        "var a = \"unterminated;",
        "[line 1:9] Error: Unterminated string."
    }
}
