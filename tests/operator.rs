#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add_numbers is OK
        "print 1 + 2; print -1 + 1; print 1.5 + 1.5;",
        "3", "0", "3"
    }

    tests! {
        add_strings is OK
        "print \"foo\" + \"bar\"; print \"\" + \"\";",
        "foobar", ""
    }

    tests! {
        add_number_and_string_stringifies_and_concatenates is OK
        "print 1 + \"1\"; print \"total: \" + 3;",
        "11", "total: 3"
    }

    tests! {
        add_mismatched_non_stringable_types_is_error is ERR
        "print true + 1;",
        "[line 1:12] Error at '+': Operands must be two numbers or two strings."
    }

    tests! {
        subtract is OK
        "print 4 - 1; print 1 - 4;",
        "3", "-3"
    }

    tests! {
        subtract_non_number_is_error is ERR
        "print \"a\" - 1;",
        "[line 1:11] Error at '-': Operands must be numbers."
    }

    tests! {
        multiply is OK
        "print 5 * 3; print 5 * -3;",
        "15", "-15"
    }

    tests! {
        divide is OK
        "print 8 / 2; print 5 / 2;",
        "4", "2.5"
    }

    tests! {
        negate is OK
        "print -3; print -(-3);",
        "-3", "3"
    }

    tests! {
        negate_non_number_is_error is ERR
        "print -\"a\";",
        "[line 1:7] Error at '-': Operand must be a number."
    }

    tests! {
        comparison is OK
        "print 1 < 2; print 2 < 1; print 1 <= 1; print 2 > 1; print 1 > 2; print 1 >= 1;",
        "true", "false", "true", "true", "false", "true"
    }

    tests! {
        comparison_non_number_is_error is ERR
        "print \"a\" < 1;",
        "[line 1:11] Error at '<': Operands must be numbers."
    }

    tests! {
        equality is OK
        "print 1 == 1; print 1 == 2; print \"a\" == \"a\"; print \"a\" != \"b\";",
        "true", "false", "true", "true"
    }
}
