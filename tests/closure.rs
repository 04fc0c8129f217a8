#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        close_over_later_variable is OK
        "fun make() { var a = \"a\"; var b = \"b\"; fun show() { print a; print b; } return show; } make()();",
        "a", "b"
    }

    tests! {
        assign_to_closure is OK
        "var f; var g; { var local = \"local\"; fun f_() { print local; local = \"after f\"; } f = f_; fun g_() { print local; local = \"after g\"; } g = g_; } f(); f(); g(); g();",
        "local", "after f", "after f", "after g"
    }

    tests! {
        nested_closure is OK
        "fun f() { var a = \"a\"; fun g() { var b = \"b\"; fun h() { var c = \"c\"; print a; print b; print c; } h(); } g(); } f();",
        "a", "b", "c"
    }

    tests! {
        each_call_gets_its_own_closure is OK
        "fun counter() { var i = 0; fun inc() { i = i + 1; return i; } return inc; } var a = counter(); var b = counter(); print a(); print a(); print b();",
        "1", "2", "1"
    }

    tests! {
        recursion_through_closure is OK
        "fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); } print fib(8);",
        "21"
    }
}
