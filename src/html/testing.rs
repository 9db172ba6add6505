//! Testing utilities
//!
//!     Formatting behavior is easy to get subtly wrong when expected output is typed inline
//!     in a test: a missing indent level or a trailing newline slips through review. Layout
//!     tests therefore go through fixture files, where input and expected output sit next to
//!     each other and can be read as they will appear on disk.
//!
//! Fixtures
//!
//!     `tests/fixtures/*.twig` holds one case per file: the input template, a `-----` line,
//!     then the expected canonical output. Load them with [Fixture::load] or iterate all of
//!     them with [Fixture::all].
//!
//!     ```rust,ignore
//!     use twig_html::html::testing::Fixture;
//!
//!     let fixture = Fixture::load("void_elements");
//!     assert_eq!(fixture.format(&FormattingRules::default()).unwrap(), fixture.expected);
//!     ```
//!
//! AST Assertions
//!
//!     Structural checks use the fluent API from [assert_nodes] instead of walking the tree
//!     by hand. Each step carries a context path, so failures read like
//!     `nodes[0]:children[1]: Expected Element, found RawText`.
//!
//!     ```rust,ignore
//!     assert_nodes(&nodes).count(1).item(0, |node| {
//!         node.assert_element()
//!             .tag("sw-field")
//!             .attribute("type", "text")
//!             .child_count(0);
//!     });
//!     ```

pub mod assertions;
pub mod fixtures;

pub use assertions::{
    assert_nodes, BlockAssertion, ConditionalAssertion, ElementAssertion, NodeAssertion,
    NodesAssertion,
};
pub use fixtures::{fixtures_dir, Fixture, FixtureError};
