#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        literals is OK
        "print 123; print 0; print -0; print 123.456;",
        "123", "0", "-0", "123.456"
    }

    tests! {
        trailing_dot_without_fraction is ERR
        "var x = 123.;",
        "[line 1:9] Error: Unterminated number."
    }

    tests! {
        trailing_dot_at_eof is ERR
        "123.",
        "[line 1:1] Error: Unterminated number."
    }

    tests! {
        leading_dot_is_not_a_number is ERR
        ".5;",
        "[line 1:1] Error at '.': Expect expression."
    }

    tests! {
        nan_equality is OK
        "print (0 / 0) == (0 / 0); print (0 / 0) != (0 / 0);",
        "false", "true"
    }
}
