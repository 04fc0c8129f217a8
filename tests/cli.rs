use assert_cmd::Command;

#[test]
fn runs_a_script_and_prints_its_output() {
    Command::cargo_bin("rocks")
        .unwrap()
        .arg("tests/fixtures/ok.rocks")
        .assert()
        .success()
        .stdout("3\n")
        .stderr("");
}

#[test]
fn static_error_exits_65_and_reports_to_stderr() {
    Command::cargo_bin("rocks")
        .unwrap()
        .arg("tests/fixtures/static_error.rocks")
        .assert()
        .code(65)
        .stdout("")
        .stderr("[line 1:10] Error at ';': Expect expression.\n");
}

#[test]
fn runtime_error_exits_70_and_reports_to_stderr() {
    Command::cargo_bin("rocks")
        .unwrap()
        .arg("tests/fixtures/runtime_error.rocks")
        .assert()
        .code(70)
        .stdout("")
        .stderr("[line 1:12] Error at '+': Operands must be two numbers or two strings.\n");
}

#[test]
fn missing_script_exits_74() {
    Command::cargo_bin("rocks")
        .unwrap()
        .arg("tests/fixtures/does_not_exist.rocks")
        .assert()
        .code(74);
}
