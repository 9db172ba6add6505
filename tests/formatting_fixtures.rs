//! Formatting tests driven by `tests/fixtures/*.twig`
//!
//! Each fixture pairs an input template with its canonical rendering. Besides matching the
//! expected text, the canonical rendering must format to itself.

use rstest::rstest;
use twig_html::html::testing::Fixture;
use twig_html::{format_source, FormattingRules};

#[rstest]
#[case::void_elements("void_elements")]
#[case::inline_text("inline_text")]
#[case::attributes_multiline("attributes_multiline")]
#[case::conditional_else("conditional_else")]
#[case::conditional_elseif("conditional_elseif")]
#[case::conditional_attribute("conditional_attribute")]
#[case::empty_block("empty_block")]
#[case::block_nesting("block_nesting")]
#[case::template_slots("template_slots")]
#[case::comments("comments")]
#[case::long_expressions("long_expressions")]
#[case::entities("entities")]
#[case::unmatched_closing("unmatched_closing")]
#[case::mixed_text("mixed_text")]
fn test_fixture_formats_to_expected(#[case] name: &str) {
    let fixture = Fixture::load(name);
    let rules = FormattingRules::default();

    let output = fixture
        .format(&rules)
        .unwrap_or_else(|e| panic!("{name}: failed to parse input: {e}"));
    assert_eq!(output, fixture.expected, "{name}: formatted output differs");

    let again = format_source(&output, &rules)
        .unwrap_or_else(|e| panic!("{name}: failed to parse formatted output: {e}"));
    assert_eq!(again, output, "{name}: formatting is not idempotent");
}

#[test]
fn test_every_fixture_file_is_valid() {
    let fixtures = Fixture::all();
    assert!(fixtures.len() >= 14, "found only {} fixtures", fixtures.len());
    for fixture in fixtures {
        let output = fixture
            .format(&FormattingRules::default())
            .unwrap_or_else(|e| panic!("{}: {}", fixture.name, e));
        assert_eq!(output, fixture.expected, "{}: formatted output differs", fixture.name);
    }
}

#[test]
fn test_tab_indentation() {
    let fixture = Fixture::load("block_nesting");
    let output = fixture.format(&FormattingRules::tabs()).unwrap();
    let expected = fixture.expected.replace("    ", "\t");
    assert_eq!(output, expected);
}
