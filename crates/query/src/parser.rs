//! Recursive-descent / Pratt-style combiner that turns token queue input
//! into an `Evaluator` tree: a flat run of atomic selectors and
//! combinators is folded into nested `And`/`Or`/structural-wrapper nodes
//! as each combinator is seen.

use crate::attribute::parse_attribute_selector;
use crate::error::SelectorParseError;
use crate::nth_arg::parse_nth_argument;
use crate::token_queue::TokenQueue;
use query_core::Evaluator;

#[cfg(feature = "regex")]
use regex::Regex;

/// Guards against adversarial `:has(:has(:has(...)))` nesting driving the
/// recursive descent into a stack overflow instead of a clean parse error.
const MAX_SUBQUERY_DEPTH: usize = 128;

const COMBINATORS: [&str; 4] = [",", ">", "+", "~"];

pub fn parse(query: &str) -> Result<Evaluator, SelectorParseError> {
    log::trace!("parsing selector `{query}`");
    let mut parser = Parser::at_depth(query, 0)?;
    parser.parse_selector_group()
}

struct Parser<'a> {
    queue: TokenQueue<'a>,
    query: &'a str,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn at_depth(query: &'a str, depth: usize) -> Result<Self, SelectorParseError> {
        if depth > MAX_SUBQUERY_DEPTH {
            return Err(SelectorParseError::new(
                format!("selector nesting exceeds the maximum depth of {MAX_SUBQUERY_DEPTH}"),
                query,
                query,
            ));
        }
        Ok(Self {
            queue: TokenQueue::new(query),
            query,
            depth,
        })
    }

    fn err(&self, message: impl Into<String>) -> SelectorParseError {
        SelectorParseError::new(message, self.query, self.queue.remainder())
    }

    /// Recursively parses `text` as a complete selector group, one nesting
    /// level deeper than `self`.
    fn parse_nested(&self, text: &str) -> Result<Evaluator, SelectorParseError> {
        let mut nested = Parser::at_depth(text, self.depth + 1)?;
        nested.parse_selector_group()
    }

    /// The shared entry point for both the top-level query and every
    /// recursively parsed sub-query: consume leading whitespace, parse one
    /// atomic selector (or an implicit `Root` left operand if the query
    /// starts with a combinator), then keep folding in whatever follows —
    /// another atomic selector, an explicit combinator, or a bare run of
    /// whitespace standing in for the descendant combinator.
    fn parse_selector_group(&mut self) -> Result<Evaluator, SelectorParseError> {
        self.queue.consume_whitespace();
        let mut accum: Vec<Evaluator> = Vec::new();

        if self.queue.matches_any(&COMBINATORS) {
            accum.push(Evaluator::Root);
            let c = self.consume_combinator_char()?;
            accum = vec![self.apply_combinator(c, accum)?];
        } else {
            accum.push(self.find_elements()?);
        }

        loop {
            if self.queue.is_empty() {
                break;
            }
            let saw_ws = self.queue.consume_whitespace();
            if self.queue.is_empty() {
                break;
            }
            if self.queue.matches_any(&COMBINATORS) {
                let c = self.consume_combinator_char()?;
                accum = vec![self.apply_combinator(c, accum)?];
            } else if saw_ws {
                accum = vec![self.apply_combinator(' ', accum)?];
            } else {
                accum.push(self.find_elements()?);
            }
        }

        Ok(Self::and_wrap(accum))
    }

    fn and_wrap(mut evals: Vec<Evaluator>) -> Evaluator {
        if evals.len() == 1 {
            evals.pop().unwrap()
        } else {
            Evaluator::And(evals)
        }
    }

    fn consume_combinator_char(&mut self) -> Result<char, SelectorParseError> {
        let c = self.queue.peek().ok_or_else(|| self.err("expected a combinator"))?;
        if matches!(c, ',' | '>' | '+' | '~') {
            self.queue.consume();
            self.queue.consume_whitespace();
            Ok(c)
        } else {
            Err(self.err("unknown combinator character"))
        }
    }

    /// Extracts the right-hand compound selector via `consume_sub_query`,
    /// parses it, then folds it with the accumulated left operand according
    /// to `c`, including the OR-splice rule: a non-comma combinator
    /// following an already-built `Or` attaches only to that `Or`'s
    /// right-most disjunct, not to the whole disjunction (so `a, b > c`
    /// parses as `a, (b > c)`).
    fn apply_combinator(&mut self, c: char, accum: Vec<Evaluator>) -> Result<Evaluator, SelectorParseError> {
        let sub_text = self.consume_sub_query();
        if sub_text.is_empty() {
            return Err(self.err("expected a selector after combinator"));
        }
        let new_eval = self.parse_nested(&sub_text)?;
        log::trace!("combinator {c:?}: folding `{sub_text}` into the accumulated selector");

        let current_eval = Self::and_wrap(accum);

        if c != ',' {
            if let Evaluator::Or(mut disjuncts) = current_eval {
                let rightmost = disjuncts.pop().expect("Or always holds at least one disjunct");
                disjuncts.push(Self::combine(c, new_eval, rightmost));
                return Ok(Evaluator::Or(disjuncts));
            } else {
                return Ok(Self::combine(c, new_eval, current_eval));
            }
        }

        Ok(match current_eval {
            Evaluator::Or(mut disjuncts) => {
                disjuncts.push(new_eval);
                Evaluator::Or(disjuncts)
            }
            other => Evaluator::Or(vec![other, new_eval]),
        })
    }

    fn combine(c: char, new_eval: Evaluator, current_eval: Evaluator) -> Evaluator {
        match c {
            '>' => Evaluator::And(vec![new_eval, Evaluator::ImmediateParent(Box::new(current_eval))]),
            ' ' => Evaluator::And(vec![new_eval, Evaluator::Parent(Box::new(current_eval))]),
            '+' => Evaluator::And(vec![new_eval, Evaluator::ImmediatePreviousSibling(Box::new(current_eval))]),
            '~' => Evaluator::And(vec![new_eval, Evaluator::PreviousSibling(Box::new(current_eval))]),
            _ => unreachable!("dispatch covers every combinator character"),
        }
    }

    /// Reads one compound-selector's worth of text — stopping at an
    /// unescaped top-level combinator, unprotected whitespace, or EOF — while
    /// treating balanced `(...)` and `[...]` runs as opaque so internal
    /// whitespace or combinator-like characters don't end the scan early.
    /// Quoted strings are not given the same treatment, so a combinator
    /// character inside one still splits the sub-query early.
    fn consume_sub_query(&mut self) -> String {
        let mut out = String::new();
        while !self.queue.is_empty() {
            if self.queue.matches_any(&COMBINATORS) || self.queue.peek().is_some_and(|c| c.is_ascii_whitespace()) {
                break;
            }
            if self.queue.match_chomp("(") {
                out.push('(');
                if let Ok(inner) = self.queue.chomp_balanced('(', ')') {
                    out.push_str(&inner);
                    out.push(')');
                }
                continue;
            }
            if self.queue.match_chomp("[") {
                out.push('[');
                if let Ok(inner) = self.queue.chomp_balanced('[', ']') {
                    out.push_str(&inner);
                    out.push(']');
                }
                continue;
            }
            if let Some(c) = self.queue.consume() {
                out.push(c);
            }
        }
        out
    }

    /// Dispatches one atomic selector by its leading character: `#id`,
    /// `.class`, `[attr]`, `*`, a bare tag name, or a `:pseudo-class`.
    fn find_elements(&mut self) -> Result<Evaluator, SelectorParseError> {
        if self.queue.match_chomp("#") {
            let id = self.queue.consume_css_identifier();
            if id.is_empty() {
                return Err(self.err("empty identifier after `#`"));
            }
            return Ok(Evaluator::Id(id));
        }
        if self.queue.match_chomp(".") {
            let class = self.queue.consume_css_identifier();
            if class.is_empty() {
                return Err(self.err("empty identifier after `.`"));
            }
            return Ok(Evaluator::Class(class));
        }
        if self.queue.match_chomp("[") {
            let inner = self
                .queue
                .chomp_balanced('[', ']')
                .map_err(|e| self.err(e.to_string()))?;
            return parse_attribute_selector(&inner).map_err(|e| self.err(e.to_string()));
        }
        if self.queue.match_chomp("*") {
            return Ok(Evaluator::AllElements);
        }
        if self.queue.matches(":") {
            return self.find_pseudo_selector();
        }
        if self.queue.matches_word() {
            let name = self.queue.consume_element_selector();
            let name = if name.contains('|') { name.replace('|', ":") } else { name };
            return Ok(Evaluator::Tag(name));
        }
        Err(self.err(format!("unexpected token `{}`", self.queue.remainder())))
    }

    fn find_pseudo_selector(&mut self) -> Result<Evaluator, SelectorParseError> {
        // leaf pseudo-classes, no arguments
        for (prefix, leaf) in [
            (":first-child", Evaluator::IsFirstChild),
            (":last-child", Evaluator::IsLastChild),
            (":only-child", Evaluator::IsOnlyChild),
            (":first-of-type", Evaluator::IsFirstOfType),
            (":last-of-type", Evaluator::IsLastOfType),
            (":only-of-type", Evaluator::IsOnlyOfType),
            (":empty", Evaluator::IsEmpty),
            (":root", Evaluator::IsRoot),
        ] {
            if self.queue.match_chomp(prefix) {
                return Ok(leaf);
            }
        }

        for (prefix, index_of) in [
            (":lt(", Evaluator::IndexLt as fn(i32) -> Evaluator),
            (":gt(", Evaluator::IndexGt as fn(i32) -> Evaluator),
            (":eq(", Evaluator::IndexEq as fn(i32) -> Evaluator),
        ] {
            if self.queue.match_chomp(prefix) {
                let arg = self.queue.chomp_balanced('(', ')').map_err(|e| self.err(e.to_string()))?;
                let n = self.parse_index_argument(&arg)?;
                return Ok(index_of(n));
            }
        }

        if self.queue.match_chomp(":has(") {
            let sub = self.queue.chomp_balanced('(', ')').map_err(|e| self.err(e.to_string()))?;
            let inner = self.parse_nested(&sub)?;
            return Ok(Evaluator::Has(Box::new(inner)));
        }
        if self.queue.match_chomp(":not(") {
            let sub = self.queue.chomp_balanced('(', ')').map_err(|e| self.err(e.to_string()))?;
            let inner = self.parse_nested(&sub)?;
            return Ok(Evaluator::Not(Box::new(inner)));
        }
        if self.queue.match_chomp(":containsOwn(") {
            let sub = self.queue.chomp_balanced('(', ')').map_err(|e| self.err(e.to_string()))?;
            if sub.trim().is_empty() {
                return Err(self.err("empty argument to `:containsOwn()`"));
            }
            return Ok(Evaluator::ContainsOwnText(TokenQueue::unescape(&sub)));
        }
        if self.queue.match_chomp(":contains(") {
            let sub = self.queue.chomp_balanced('(', ')').map_err(|e| self.err(e.to_string()))?;
            if sub.trim().is_empty() {
                return Err(self.err("empty argument to `:contains()`"));
            }
            return Ok(Evaluator::ContainsText(TokenQueue::unescape(&sub)));
        }
        #[cfg(feature = "regex")]
        if self.queue.match_chomp(":matchesOwn(") {
            let sub = self.queue.chomp_balanced('(', ')').map_err(|e| self.err(e.to_string()))?;
            let re = self.compile_regex(&sub)?;
            return Ok(Evaluator::MatchesOwnText(re));
        }
        #[cfg(feature = "regex")]
        if self.queue.match_chomp(":matches(") {
            let sub = self.queue.chomp_balanced('(', ')').map_err(|e| self.err(e.to_string()))?;
            let re = self.compile_regex(&sub)?;
            return Ok(Evaluator::MatchesText(re));
        }

        for (prefix, backwards, of_type) in [
            (":nth-last-child(", true, false),
            (":nth-last-of-type(", true, true),
            (":nth-of-type(", false, true),
            (":nth-child(", false, false),
        ] {
            if self.queue.match_chomp(prefix) {
                let arg = self.queue.chomp_balanced('(', ')').map_err(|e| self.err(e.to_string()))?;
                let spec = parse_nth_argument(&arg).map_err(|e| self.err(e.to_string()))?;
                return Ok(match (backwards, of_type) {
                    (false, false) => Evaluator::NthChild(spec),
                    (true, false) => Evaluator::NthLastChild(spec),
                    (false, true) => Evaluator::NthOfType(spec),
                    (true, true) => Evaluator::NthLastOfType(spec),
                });
            }
        }

        Err(self.err(format!("unknown pseudo-class `{}`", self.queue.remainder())))
    }

    fn parse_index_argument(&self, raw: &str) -> Result<i32, SelectorParseError> {
        let text = raw.trim();
        let text = text.strip_prefix('+').unwrap_or(text);
        text
            .parse::<i32>()
            .map_err(|_| self.err(format!("non-numeric index argument `{raw}`")))
    }

    #[cfg(feature = "regex")]
    fn compile_regex(&self, pattern: &str) -> Result<Box<Regex>, SelectorParseError> {
        Regex::new(pattern)
            .map(Box::new)
            .map_err(|e| self.err(format!("invalid regex `{pattern}`: {e}")))
    }
}
