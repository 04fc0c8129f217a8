#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        empty_file is OK
        ""
    }

    tests! {
        only_whitespace is OK
        "   \n\t  "
    }

    tests! {
        precedence is OK
        "print 2 + 3 * 4; print (2 + 3) * 4; print 2 + 3 == 5; print 10 - 2 - 3; print !true == false;",
        "14", "20", "true", "5", "true"
    }

    tests! {
        unexpected_character is ERR
        "print 1; |",
        "[line 1:10] Error: Unexpected character '|'."
    }

    tests! {
        multiple_errors_reported_together is ERR
        "var a = @; var b = #;",
        "[line 1:9] Error: Unexpected character '@'.",
        "[line 1:20] Error: Unexpected character '#'."
    }

    // A primary beginning with a binary operator is missing its left operand; the parser reports
    // it and keeps going instead of aborting the whole statement.
    tests! {
        missing_left_hand_operand is ERR
        "print + 1;",
        "[line 1:7] Error at '+': Missing left-hand operand."
    }

    tests! {
        missing_left_hand_operand_reports_each_independently is ERR
        "print + 1; print * 2;",
        "[line 1:7] Error at '+': Missing left-hand operand.",
        "[line 1:18] Error at '*': Missing left-hand operand."
    }

    // `class` is reserved and scanned but unsupported past the primary position; it simply falls
    // through to the ordinary "no such expression" error like any other unsupported construct.
    tests! {
        class_declarations_are_not_supported is ERR
        "class Foo { }",
        "[line 1:1] Error at 'class': Expect expression."
    }
}
