//! The evaluator tree: a closed tagged union of predicates over
//! `Element`, with a single `matches` method dispatched by exhaustive
//! `match` rather than dynamic dispatch.

use crate::dom::Element;
use crate::nth::NthSpec;

#[cfg(feature = "regex")]
use regex::Regex;

/// A predicate node. Given a `root` and a `candidate`, decides whether the
/// candidate matches relative to that root.
///
/// Every non-leaf variant owns its children exclusively; the tree is
/// immutable once `query_parser::parse` returns it.
#[derive(Debug, Clone)]
pub enum Evaluator {
    // simple predicates
    Tag(String),
    Id(String),
    Class(String),
    AllElements,
    IsEmpty,
    IsRoot,

    // attribute predicates
    HasAttr(String),
    AttrStarting(String),
    AttrEq(String, String),
    AttrNe(String, String),
    AttrStartsWith(String, String),
    AttrEndsWith(String, String),
    AttrContains(String, String),
    #[cfg(feature = "regex")]
    AttrMatches(String, Box<Regex>),

    // positional predicates
    /// `:lt()`/`:gt()`/`:eq()` compare against the 0-based sibling index,
    /// so `:eq(0)` selects the first child.
    IndexLt(i32),
    IndexGt(i32),
    IndexEq(i32),
    IsFirstChild,
    IsLastChild,
    IsOnlyChild,
    IsFirstOfType,
    IsLastOfType,
    IsOnlyOfType,
    NthChild(NthSpec),
    NthLastChild(NthSpec),
    NthOfType(NthSpec),
    NthLastOfType(NthSpec),

    // text predicates
    ContainsText(String),
    ContainsOwnText(String),
    #[cfg(feature = "regex")]
    MatchesText(Box<Regex>),
    #[cfg(feature = "regex")]
    MatchesOwnText(Box<Regex>),

    // structural wrappers
    Parent(Box<Evaluator>),
    ImmediateParent(Box<Evaluator>),
    PreviousSibling(Box<Evaluator>),
    ImmediatePreviousSibling(Box<Evaluator>),
    Has(Box<Evaluator>),
    Not(Box<Evaluator>),
    Root,

    // combining evaluators
    And(Vec<Evaluator>),
    Or(Vec<Evaluator>),
}

impl Evaluator {
    pub fn matches<E: Element>(&self, root: &E, candidate: &E) -> bool {
        use Evaluator::*;
        match self {
            Tag(name) => &candidate.tag_name() == name,
            Id(id) => candidate.id().as_deref() == Some(id.as_str()),
            Class(class) => candidate.classes().iter().any(|c| c == class),
            AllElements => true,
            IsEmpty => candidate.children().is_empty() && candidate.own_text().trim().is_empty(),
            IsRoot => candidate.is_root(),

            HasAttr(key) => candidate.has_attr(key),
            AttrStarting(prefix) => candidate.attr_names().iter().any(|name| name.starts_with(prefix.as_str())),
            AttrEq(k, v) => candidate.attr(k).as_deref() == Some(v.as_str()),
            AttrNe(k, v) => candidate.attr(k).as_deref() != Some(v.as_str()),
            AttrStartsWith(k, v) => candidate.attr(k).is_some_and(|a| a.starts_with(v.as_str())),
            AttrEndsWith(k, v) => candidate.attr(k).is_some_and(|a| a.ends_with(v.as_str())),
            AttrContains(k, v) => candidate.attr(k).is_some_and(|a| a.contains(v.as_str())),
            #[cfg(feature = "regex")]
            AttrMatches(k, re) => candidate.attr(k).is_some_and(|a| re.is_match(&a)),

            IndexLt(n) => (candidate.sibling_index() as i32 - 1) < *n,
            IndexGt(n) => (candidate.sibling_index() as i32 - 1) > *n,
            IndexEq(n) => (candidate.sibling_index() as i32 - 1) == *n,
            IsFirstChild => candidate.sibling_index() == 1,
            IsLastChild => candidate.sibling_index_from_end() == 1,
            IsOnlyChild => candidate.sibling_index() == 1 && candidate.sibling_index_from_end() == 1,
            IsFirstOfType => candidate.sibling_index_of_type() == 1,
            IsLastOfType => candidate.sibling_index_of_type_from_end() == 1,
            IsOnlyOfType => {
                candidate.sibling_index_of_type() == 1 && candidate.sibling_index_of_type_from_end() == 1
            }
            NthChild(spec) => spec.is_matched(candidate.sibling_index()),
            NthLastChild(spec) => spec.is_matched(candidate.sibling_index_from_end()),
            NthOfType(spec) => spec.is_matched(candidate.sibling_index_of_type()),
            NthLastOfType(spec) => spec.is_matched(candidate.sibling_index_of_type_from_end()),

            ContainsText(s) => candidate.all_text().contains(s.as_str()),
            ContainsOwnText(s) => candidate.own_text().contains(s.as_str()),
            #[cfg(feature = "regex")]
            MatchesText(re) => re.is_match(&candidate.all_text()),
            #[cfg(feature = "regex")]
            MatchesOwnText(re) => re.is_match(&candidate.own_text()),

            Parent(inner) => {
                let mut cur = candidate.parent();
                while let Some(ancestor) = cur {
                    if inner.matches(root, &ancestor) {
                        return true;
                    }
                    if &ancestor == root {
                        break;
                    }
                    cur = ancestor.parent();
                }
                false
            }
            ImmediateParent(inner) => candidate
                .parent()
                .is_some_and(|p| inner.matches(root, &p)),
            PreviousSibling(inner) => candidate
                .siblings_before()
                .iter()
                .any(|s| inner.matches(root, s)),
            ImmediatePreviousSibling(inner) => candidate
                .previous_sibling()
                .is_some_and(|s| inner.matches(root, &s)),
            Has(inner) => candidate
                .descendants()
                .iter()
                .any(|d| inner.matches(candidate, d)),
            Not(inner) => !inner.matches(root, candidate),
            Root => candidate == root,

            And(children) => children.iter().all(|c| c.matches(root, candidate)),
            Or(children) => children.iter().any(|c| c.matches(root, candidate)),
        }
    }

    /// Every literal tag name mentioned anywhere in the tree, collected by a
    /// read-only walk. Useful for diagnostics or a future selectivity
    /// index; has no effect on matching.
    pub fn tag_names(&self) -> Vec<&str> {
        use Evaluator::*;
        match self {
            Tag(name) => vec![name.as_str()],
            Parent(inner) | ImmediateParent(inner) | PreviousSibling(inner) => inner.tag_names(),
            ImmediatePreviousSibling(inner) | Has(inner) | Not(inner) => inner.tag_names(),
            And(children) | Or(children) => children.iter().flat_map(|c| c.tag_names()).collect(),
            _ => Vec::new(),
        }
    }
}
