#[macro_use]
mod common;

#[cfg(test)]
mod native {
    tests! {
        clock_returns_a_number is OK
        "print clock() >= 0;",
        "true"
    }

    tests! {
        clock_takes_no_arguments is ERR
        "clock(1);",
        "[line 1:8] Error at ')': Expected 0 arguments but got 1."
    }

    // `println` prints its argument but returns the callable itself, not the argument — a
    // source-preserved quirk.
    tests! {
        println_prints_its_argument_and_returns_itself is OK
        "var x = println(\"hi\"); print x;",
        "hi", "<native fn println>"
    }

    tests! {
        println_returning_itself_means_it_can_be_called_again is OK
        "println(\"a\")(\"b\");",
        "a", "b"
    }

    tests! {
        native_functions_compare_by_identity is OK
        "print clock == clock; print clock == println;",
        "true", "false"
    }
}
