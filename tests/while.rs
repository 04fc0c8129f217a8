#[macro_use]
mod common;

#[cfg(test)]
mod _while {
    tests! {
        runs_while_condition_is_truthy is OK
        "var i = 0; while (i < 3) { print i; i = i + 1; }",
        "0", "1", "2"
    }

    tests! {
        never_runs_if_condition_starts_falsy is OK
        "var ran = false; while (false) { ran = true; } print ran;",
        "false"
    }

    tests! {
        closure_in_body_captures_shared_binding is OK
        "var f; var i = 0; while (i < 3) { fun g() { return i; } f = g; i = i + 1; } print f();",
        "3"
    }

    tests! {
        return_from_inside_while is OK
        "fun f() { var i = 0; while (true) { if (i == 2) return i; i = i + 1; } } print f();",
        "2"
    }

    tests! {
        condition_must_be_parenthesized is ERR
        "while true { }",
        "[line 1:7] Error at 'true': Expect '(' after 'while'."
    }
}
