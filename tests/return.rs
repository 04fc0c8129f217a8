#[macro_use]
mod common;

#[cfg(test)]
mod _return {
    tests! {
        in_function is OK
        "fun f() { return \"ok\"; print \"unreached\"; } print f();",
        "ok"
    }

    tests! {
        return_nil_if_no_value is OK
        "fun f() { return; } print f();",
        "nil"
    }

    tests! {
        after_if is OK
        "fun f() { if (true) return \"ok\"; return \"bad\"; } print f();",
        "ok"
    }

    tests! {
        after_while is OK
        "fun f() { while (true) return \"ok\"; } print f();",
        "ok"
    }

    tests! {
        from_nested_block is OK
        "fun f() { { { return \"ok\"; } } } print f();",
        "ok"
    }

    tests! {
        at_top_level is ERR
        "return \"nope\";",
        "[line 1:1] Error at 'return': Cannot return from top-level code."
    }
}
