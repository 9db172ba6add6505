//! Property-based tests for parsing and canonical formatting
//!
//! Templates are generated from a small grammar of elements, void tags, blocks, conditionals,
//! comments, interpolations and plain words. Text never contains markup characters, so every
//! generated template parses.

use proptest::prelude::*;
use twig_html::{format_source, parse, FormattingRules};

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9]{0,7}"
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..4).prop_map(|words| words.join(" "))
}

fn separator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just(" "), Just("\n"), Just("\n    ")]
}

fn attribute_strategy() -> impl Strategy<Value = String> {
    let key = "[:@#]?[a-z][a-z-]{0,8}";
    prop_oneof![
        // Bare flag
        key.prop_map(|k| k.to_string()),
        // Double quoted, possibly empty or with spaces
        (key, "[a-zA-Z0-9 ]{0,12}").prop_map(|(k, v)| format!("{k}=\"{v}\"")),
        // Single quoted
        (key, "[a-zA-Z0-9]{0,8}").prop_map(|(k, v)| format!("{k}='{v}'")),
        // Unquoted
        (key, "[a-zA-Z0-9]{1,8}").prop_map(|(k, v)| format!("{k}={v}")),
        // Long value that cannot share the tag line
        (key, "[a-z]{70,90}").prop_map(|(k, v)| format!("{k}=\"{v}\"")),
        // Conditional attribute
        (word_strategy(), key).prop_map(|(c, k)| format!("{{% if {c} %}}{k}{{% endif %}}")),
    ]
}

fn attributes_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(attribute_strategy(), 0..4)
        .prop_map(|attributes| attributes.iter().map(|a| format!(" {a}")).collect())
}

fn expression_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.|]{0,45}".prop_map(|e| format!("{{{{ {e} }}}}"))
}

fn leaf_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => text_strategy(),
        2 => expression_strategy(),
        1 => text_strategy().prop_map(|t| format!("<!-- {t} -->")),
        1 => (prop::sample::select(vec!["br", "img", "input"]), attributes_strategy())
            .prop_map(|(tag, attrs)| format!("<{tag}{attrs}>")),
        1 => Just("{% parent() %}".to_string()),
    ]
}

fn join(parts: Vec<(&'static str, String)>) -> String {
    parts
        .into_iter()
        .map(|(separator, part)| format!("{separator}{part}"))
        .collect()
}

fn children_strategy(
    inner: impl Strategy<Value = String> + Clone,
) -> impl Strategy<Value = String> {
    prop::collection::vec((separator_strategy(), inner), 0..4).prop_map(join)
}

fn template_strategy() -> impl Strategy<Value = String> {
    let node = leaf_strategy().prop_recursive(3, 32, 4, |inner| {
        let tags = vec!["div", "span", "p", "sw-card", "template"];
        prop_oneof![
            (
                prop::sample::select(tags),
                attributes_strategy(),
                children_strategy(inner.clone())
            )
                .prop_map(|(tag, attrs, children)| format!("<{tag}{attrs}>{children}</{tag}>")),
            ("[a-z_]{1,12}", children_strategy(inner.clone())).prop_map(|(name, children)| {
                format!("{{% block {name} %}}{children}{{% endblock %}}")
            }),
            (
                word_strategy(),
                children_strategy(inner.clone()),
                prop::collection::vec((word_strategy(), children_strategy(inner.clone())), 0..2),
                prop::option::of(children_strategy(inner))
            )
                .prop_map(|(condition, children, else_ifs, else_children)| {
                    let mut out = format!("{{% if {condition} %}}{children}");
                    for (condition, children) in else_ifs {
                        out.push_str(&format!("{{% elseif {condition} %}}{children}"));
                    }
                    if let Some(children) = else_children {
                        out.push_str(&format!("{{% else %}}{children}"));
                    }
                    out.push_str("{% endif %}");
                    out
                }),
        ]
    });
    prop::collection::vec((separator_strategy(), node), 1..4).prop_map(join)
}

proptest! {
    #[test]
    fn test_generated_templates_parse(source in template_strategy()) {
        prop_assert!(parse(&source).is_ok(), "failed to parse: {:?}", source);
    }

    #[test]
    fn test_formatting_is_idempotent(source in template_strategy()) {
        let rules = FormattingRules::default();
        let first = format_source(&source, &rules).unwrap();
        let second = format_source(&first, &rules).unwrap();
        prop_assert_eq!(&second, &first, "source: {:?}", source);
    }

    #[test]
    fn test_formatting_with_tabs_is_idempotent(source in template_strategy()) {
        let rules = FormattingRules::tabs();
        let first = format_source(&source, &rules).unwrap();
        let second = format_source(&first, &rules).unwrap();
        prop_assert_eq!(&second, &first, "source: {:?}", source);
    }

    #[test]
    fn test_arbitrary_input_never_panics(source in "\\PC*") {
        let _ = parse(&source);
    }

    #[test]
    fn test_markup_soup_never_panics(source in "[<>{}%/!=\"' a-z\\n-]{0,80}") {
        if let Ok(nodes) = parse(&source) {
            let _ = twig_html::dump_nodes(&nodes, 0, &FormattingRules::default());
        }
    }
}
