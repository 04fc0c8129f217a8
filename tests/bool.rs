#[macro_use]
mod common;

#[cfg(test)]
mod bool {
    tests! {
        equality is OK
        "print true == true; print true == false; print 1 == 1; print 1 == 2; print true == 1; print nil == nil; print nil == false;",
        "true", "false", "true", "false", "false", "true", "false"
    }

    tests! {
        mixed_types_never_equal is OK
        "print 1 == \"1\"; print \"\" == nil; print true != 1;",
        "false", "false", "true"
    }

    tests! {
        not is OK
        "print !true; print !false; print !!true;",
        "false", "true", "true"
    }
}
