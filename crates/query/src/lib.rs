/*!
Parses a CSS-style selector string into a [`query_core::Evaluator`] tree.

This crate is the tokenizer and grammar half of the selector engine: it
owns the [`TokenQueue`](token_queue::TokenQueue) cursor, the attribute and
`nth-*` argument micro-grammars, and the recursive-descent combinator
logic that builds the tree. Evaluating that tree against a live document
is `query-core`'s job, reached only through its `Element` trait — this
crate never touches a concrete DOM.

```
# #[cfg(feature = "regex")]
# fn main() -> Result<(), query_parser::SelectorParseError> {
let evaluator = query_parser::parse("div.note > p:nth-child(2n+1)")?;
let _ = evaluator; // matches(root, candidate) against your Element impl
# Ok(())
# }
# #[cfg(not(feature = "regex"))]
# fn main() {}
```
*/

mod attribute;
mod error;
mod nth_arg;
mod parser;
mod token_queue;

pub use error::SelectorParseError;
pub use parser::parse;
