//! The attribute-selector grammar inside balanced `[...]`.

use query_core::Evaluator;
use thiserror::Error;

#[cfg(feature = "regex")]
use regex::Regex;

#[derive(Debug, Error)]
pub enum AttributeGrammarError {
    #[error("empty attribute key in `[{0}]`")]
    EmptyKey(String),
    #[cfg(feature = "regex")]
    #[error("invalid regex in attribute value: {0}")]
    InvalidRegex(#[from] regex::Error),
    #[cfg(not(feature = "regex"))]
    #[error("`~=` attribute matching requires the `regex` feature")]
    RegexUnavailable,
}

const COMPARATORS: [&str; 6] = ["!=", "^=", "$=", "*=", "~=", "="];

/// `inner` is the text between the balanced `[` and `]`, not including the
/// brackets themselves.
pub fn parse_attribute_selector(inner: &str) -> Result<Evaluator, AttributeGrammarError> {
    // The leftmost comparator wins, not the first one found in array order —
    // `[a=b!=c]` must split on the earlier `=`, not the later `!=`. A tie at
    // the same position (impossible for this operator set, but kept honest)
    // favors the multi-char operator.
    let found = COMPARATORS
        .iter()
        .filter_map(|op| inner.find(op).map(|pos| (pos, *op)))
        .fold(None, |best: Option<(usize, &str)>, (pos, op)| match best {
            None => Some((pos, op)),
            Some((best_pos, best_op)) if pos < best_pos || (pos == best_pos && op.len() > best_op.len()) => {
                Some((pos, op))
            }
            Some(best) => Some(best),
        });

    match found {
        None => {
            let key = inner.trim();
            if key.is_empty() {
                return Err(AttributeGrammarError::EmptyKey(inner.to_string()));
            }
            // The `[^attr]` quirk: special-cased only here, when no comparator
            // follows. A value test on a key literally starting with `^` still
            // uses the full key including `^`.
            match key.strip_prefix('^') {
                Some(rest) => Ok(Evaluator::AttrStarting(rest.to_string())),
                None => Ok(Evaluator::HasAttr(key.to_string())),
            }
        }
        Some((pos, op)) => {
            let key = inner[..pos].trim().to_string();
            if key.is_empty() {
                return Err(AttributeGrammarError::EmptyKey(inner.to_string()));
            }
            let value = inner[pos + op.len()..].trim_start().to_string();
            match op {
                "=" => Ok(Evaluator::AttrEq(key, value)),
                "!=" => Ok(Evaluator::AttrNe(key, value)),
                "^=" => Ok(Evaluator::AttrStartsWith(key, value)),
                "$=" => Ok(Evaluator::AttrEndsWith(key, value)),
                "*=" => Ok(Evaluator::AttrContains(key, value)),
                "~=" => compile_attr_regex(key, &value),
                _ => unreachable!("exhaustive over COMPARATORS"),
            }
        }
    }
}

#[cfg(feature = "regex")]
fn compile_attr_regex(key: String, value: &str) -> Result<Evaluator, AttributeGrammarError> {
    let re = Regex::new(value)?;
    Ok(Evaluator::AttrMatches(key, Box::new(re)))
}

#[cfg(not(feature = "regex"))]
fn compile_attr_regex(_key: String, _value: &str) -> Result<Evaluator, AttributeGrammarError> {
    Err(AttributeGrammarError::RegexUnavailable)
}
