//! trybuild UI tests for component_macros

#[test]
fn ui_injectable() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/injectable_ok.rs");
    t.pass("tests/trybuild/injectable_variadic_ok.rs");
    t.compile_fail("tests/trybuild/injectable_trait_impl.rs");
    t.compile_fail("tests/trybuild/injectable_generic.rs");
    t.compile_fail("tests/trybuild/injectable_variadic_not_last.rs");
    t.compile_fail("tests/trybuild/injectable_unsupported_type.rs");
    t.compile_fail("tests/trybuild/injectable_new_return.rs");
}
