#[macro_use]
mod common;

#[cfg(test)]
mod postfix {
    tests! {
        prefix_increment_returns_updated_value is OK
        "var a = 1; print ++a; print a;",
        "2", "2"
    }

    tests! {
        prefix_decrement_returns_updated_value is OK
        "var a = 1; print --a; print a;",
        "0", "0"
    }

    tests! {
        postfix_increment_returns_original_value is OK
        "var a = 1; print a++; print a;",
        "1", "2"
    }

    tests! {
        postfix_decrement_returns_original_value is OK
        "var a = 1; print a--; print a;",
        "1", "0"
    }

    tests! {
        backslash_appends_newline_to_string is OK
        "print \"hi\"\\;",
        "hi\n"
    }

    tests! {
        backslash_on_non_string_is_error is ERR
        "print 1\\;",
        "[line 1:8] Error at '\\': Operand must be a string."
    }

    tests! {
        prefix_on_non_variable_is_error is ERR
        "++1;",
        "[line 1:1] Error at '++': Invalid increment/decrement target."
    }

    tests! {
        postfix_on_non_variable_is_error is ERR
        "1++;",
        "[line 1:2] Error at '++': Invalid increment/decrement target."
    }

    tests! {
        cannot_chain_postfix_operators is ERR
        "var a = 1; a++++;",
        "[line 1:15] Error at '++': Cannot chain increment/decrement operators."
    }
}
