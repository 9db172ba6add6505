//! Snapshots of the JSON tree and canonical text for a representative template

use twig_html::html::formats::json::to_json;
use twig_html::{format_source, parse, FormattingRules};

const PRODUCT_CARD: &str = "{% block sw_product_card %}
<sw-card title=\"Product\" :isLoading=\"isLoading\">
<!-- actions -->
{% if product.active %}<sw-icon name=\"check\"/>{% else %}<sw-icon name=\"x\"/>{% endif %}
<template #footer>{{ product.name }}</template>
<template #actions><sw-button variant=\"primary\" @click=\"onSave\">Save</sw-button></template>
</sw-card>
{% endblock %}";

#[test]
fn test_element_tree_json() {
    let nodes = parse("<div title=\"A\">{{ x }}</div>").unwrap();
    insta::assert_snapshot!("element_tree", to_json(&nodes).unwrap());
}

#[test]
fn test_product_card_formatting() {
    let output = format_source(PRODUCT_CARD, &FormattingRules::default()).unwrap();
    insta::assert_snapshot!("product_card", output);
}
