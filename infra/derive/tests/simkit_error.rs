#[test]
fn simkit_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/simkit_error_pass.rs");
}

#[test]
fn entity_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/entity_pass.rs");
}
