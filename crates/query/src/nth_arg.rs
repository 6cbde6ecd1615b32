//! Parses the textual argument of `:nth-child()` and its siblings into a
//! `query_core::NthSpec`, plus the `odd`/`even` keyword shortcuts CSS
//! allows as aliases for `2n+1`/`2n`.

use query_core::NthSpec;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NthArgError {
    #[error("malformed nth-argument `{0}`")]
    Malformed(String),
    #[error("numeric overflow in nth-argument `{0}`")]
    Overflow(String),
}

pub fn parse_nth_argument(raw: &str) -> Result<NthSpec, NthArgError> {
    let s = raw.trim().to_lowercase();
    if s == "odd" {
        return Ok(NthSpec::new(2, 1));
    }
    if s == "even" {
        return Ok(NthSpec::new(2, 0));
    }

    match s.find('n') {
        Some(n_pos) => {
            let (before, after) = (&s[..n_pos], &s[n_pos + 1..]);
            let a = parse_coefficient(before, &s)?;
            let b = parse_trailing_offset(after, &s)?;
            Ok(NthSpec::new(a, b))
        }
        None => {
            let b = parse_signed_int(&s, &s)?;
            Ok(NthSpec::new(0, b))
        }
    }
}

/// The `((+|-)?\d*)` part before `n`: empty means 1, a bare sign means
/// +-1, otherwise a signed integer.
fn parse_coefficient(text: &str, whole: &str) -> Result<i32, NthArgError> {
    match text {
        "" | "+" => Ok(1),
        "-" => Ok(-1),
        digits => parse_signed_int(digits, whole),
    }
}

/// The optional `(\s*(+|-)?\s*\d+)?` part after `n`: empty means 0.
fn parse_trailing_offset(text: &str, whole: &str) -> Result<i32, NthArgError> {
    let trimmed: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if trimmed.is_empty() {
        return Ok(0);
    }
    parse_signed_int(&trimmed, whole)
}

fn parse_signed_int(text: &str, whole: &str) -> Result<i32, NthArgError> {
    let text = text.strip_prefix('+').unwrap_or(text);
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '-') {
        return Err(NthArgError::Malformed(whole.to_string()));
    }
    text.parse::<i32>().map_err(|_| NthArgError::Overflow(whole.to_string()))
}
