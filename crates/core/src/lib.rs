/*!
This crate holds the predicate tree produced by parsing a CSS-style
selector, plus the capability contract a host document model must
satisfy for that tree to be evaluated against it.

Parsing the selector text itself lives in `query-parser`, which depends
on this crate. Usually you only need `query-parser`; this crate is the
right place if you're implementing `Element` for a new document model,
or building evaluator trees programmatically rather than by parsing text.
*/

pub mod dom;
pub mod evaluator;
pub mod nth;

pub use dom::Element;
pub use evaluator::Evaluator;
pub use nth::NthSpec;

#[cfg(test)]
pub(crate) mod test_dom;
