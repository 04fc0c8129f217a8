#[macro_use]
mod common;

#[cfg(test)]
mod regression {
    // Closures captured in a for-loop body share the loop's single Environment rather than
    // getting a fresh binding per iteration; calling one immediately sees that iteration's
    // value, but stashing all three and calling them after the loop sees the final value.
    tests! {
        for_loop_closures_share_one_binding is OK
"var f0; var f1; var f2; var i = 0; for (; i < 3; i = i + 1) { if (i == 0) { fun g() { print i; } f0 = g; } if (i == 1) { fun h() { print i; } f1 = h; } if (i == 2) { fun k() { print i; } f2 = k; } } f0(); f1(); f2();",
        "3", "3", "3"
    }

    // A `continue` inside a `for` body must still run the increment clause before the next
    // condition check, not skip straight back to the condition.
    tests! {
        continue_still_runs_for_increment is OK
        "for (var i = 0; i < 4; i = i + 1) { if (i == 2) continue; print i; }",
        "0", "1", "3"
    }

    // A bare block with no statements is a statement on its own, not folded into whatever
    // follows it.
    tests! {
        empty_block_is_a_statement is OK
        "{ } print \"ok\";",
        "ok"
    }

    // Callables compare by identity: the same declared function is equal to itself across
    // separate reads of its binding, but two distinct declarations are never equal even when
    // their bodies are identical source.
    tests! {
        same_function_value_equals_itself is OK
        "fun f() { return 1; } var g = f; print f == f; print f == g;",
        "true", "true"
    }

    tests! {
        different_functions_are_not_equal is OK
        "fun f() { return 1; } fun g() { return 1; } print f == g;",
        "false"
    }

    tests! {
        closures_from_different_calls_are_not_equal is OK
        "fun make() { fun inner() { } return inner; } print make() == make();",
        "false"
    }
}
