#[macro_use]
mod common;

#[cfg(test)]
mod comma {
    tests! {
        evaluates_to_the_right_operand is OK
        "print (1, 2, 3);",
        "3"
    }

    tests! {
        left_operand_still_evaluates_for_side_effects is OK
        "var a = \"before\"; (a = \"after\", nil); print a;",
        "after"
    }

    tests! {
        stringifies_and_concatenates_when_either_side_is_a_string is OK
        "print (\"a\", \"b\"); print (1, \"b\"); print (\"a\", 2);",
        "ab", "1b", "a2"
    }

    tests! {
        enables_comma_separated_printing is OK
        "print \"x = \", 1, \", y = \", 2;",
        "x = 1, y = 2"
    }
}
