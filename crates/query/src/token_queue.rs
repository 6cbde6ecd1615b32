//! A cursor over the selector text with balanced-delimiter and
//! CSS-identifier consumption primitives. Owned by exactly one `Parser`
//! invocation and discarded once `parse` returns.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenQueueError {
    #[error("unterminated `{open}...{close}`")]
    UnterminatedBalanced { open: char, close: char },
}

pub struct TokenQueue<'a> {
    input: &'a str,
    cursor: usize,
}

impl<'a> TokenQueue<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, cursor: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.cursor >= self.input.len()
    }

    pub fn remainder(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// Non-consuming prefix test, case-sensitive.
    pub fn matches(&self, seq: &str) -> bool {
        self.remainder().starts_with(seq)
    }

    pub fn matches_any(&self, seqs: &[&str]) -> bool {
        seqs.iter().any(|s| self.matches(s))
    }

    /// If the prefix matches `seq`, consume it and return `true`.
    pub fn match_chomp(&mut self, seq: &str) -> bool {
        if self.matches(seq) {
            self.cursor += seq.len();
            true
        } else {
            false
        }
    }

    /// Non-consuming: does the next character begin a CSS-style identifier?
    pub fn matches_word(&self) -> bool {
        self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '|')
    }

    /// Consumes ASCII whitespace; returns whether any was consumed.
    pub fn consume_whitespace(&mut self) -> bool {
        let mut any = false;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.consume();
            any = true;
        }
        any
    }

    /// Consumes a run of `[A-Za-z0-9_-]`. Returns an empty string if the
    /// first character isn't one of those — the caller validates non-empty.
    pub fn consume_css_identifier(&mut self) -> String {
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    /// Like `consume_css_identifier` but also permits `|` (namespace
    /// separator) and `*`, for tag-name position.
    pub fn consume_element_selector(&mut self) -> String {
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '|' || c == '*')
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.consume();
        }
        out
    }

    /// Consumes up to (not including) `seq`. If `seq` never occurs, consumes
    /// to end of input.
    pub fn consume_to(&mut self, seq: &str) -> String {
        match self.remainder().find(seq) {
            Some(offset) => {
                let text = self.remainder()[..offset].to_string();
                self.cursor += offset;
                text
            }
            None => {
                let text = self.remainder().to_string();
                self.cursor = self.input.len();
                text
            }
        }
    }

    /// Consumes up to `seq`, then consumes `seq` itself; returns the text
    /// before `seq`.
    pub fn chomp_to(&mut self, seq: &str) -> String {
        let text = self.consume_to(seq);
        self.match_chomp(seq);
        text
    }

    /// Consumes characters tracking nesting depth of `open`/`close`,
    /// honoring single- and double-quote string delimiters (no balancing
    /// inside strings), until depth returns to zero. `open` has already
    /// been consumed by the caller. Returns the inner text, excluding the
    /// outer delimiters.
    pub fn chomp_balanced(&mut self, open: char, close: char) -> Result<String, TokenQueueError> {
        let mut depth = 1usize;
        let mut out = String::new();
        let mut in_quote: Option<char> = None;
        loop {
            let Some(c) = self.consume() else {
                return Err(TokenQueueError::UnterminatedBalanced { open, close });
            };
            match in_quote {
                Some(q) => {
                    if c == q {
                        in_quote = None;
                    }
                    out.push(c);
                }
                None => match c {
                    '\'' | '"' => {
                        in_quote = Some(c);
                        out.push(c);
                    }
                    c if c == open => {
                        depth += 1;
                        out.push(c);
                    }
                    c if c == close => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(out);
                        }
                        out.push(c);
                    }
                    c => out.push(c),
                },
            }
        }
    }

    /// Replaces `\X` with `X` for any `X`.
    pub fn unescape(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                    continue;
                }
            }
            out.push(c);
        }
        out
    }
}
