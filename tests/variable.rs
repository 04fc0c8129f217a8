#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        uninitialized_is_a_runtime_error is ERR
        "var a; print a;",
        "[line 1:14] Error at 'a': Variable used before initialization."
    }

    tests! {
        assigned_before_read_is_fine is OK
        "var a; a = \"value\"; print a;",
        "value"
    }

    tests! {
        redefine_global is OK
        "var a = \"first\"; var a = \"second\"; print a;",
        "second"
    }

    tests! {
        shadow_in_block is OK
        "var a = \"outer\"; { var a = \"inner\"; print a; } print a;",
        "inner", "outer"
    }

    tests! {
        in_middle_of_block is OK
        "var a = \"a\"; var b = \"b\"; { var a = \"a2\"; print a + b; var b = \"b2\"; print a + b; } print a + b;",
        "a2b", "a2b2", "ab"
    }

    tests! {
        use_global_in_initializer is OK
        "var a = \"value\"; var b = a; print b;",
        "value"
    }

    tests! {
        duplicate_local_is_error is ERR
        "{ var a = \"first\"; var a = \"second\"; }",
        "[line 1:24] Error at 'a': A variable named 'a' is already declared in this scope."
    }

    tests! {
        use_local_in_own_initializer_is_error is ERR
        "{ var a = a; }",
        "[line 1:11] Error at 'a': Cannot read local variable in its own initializer."
    }

    tests! {
        undefined_global_is_error is ERR
        "print notDefined;",
        "[line 1:7] Error at 'notDefined': Undefined variable 'notDefined'."
    }

    tests! {
        undefined_local_is_error is ERR
        "{ print notDefined; }",
        "[line 1:9] Error at 'notDefined': Undefined variable 'notDefined'."
    }

    tests! {
        declared_with_number_name_is_error is ERR
        "var 123 = 1;",
        "[line 1:5] Error at '123': Expect variable name."
    }
}
