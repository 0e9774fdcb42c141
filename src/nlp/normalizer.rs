//! Query normalization and tokenization

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

use super::stemmer;

/// A normalized word token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Lowercased surface text (digit-group commas removed)
    pub text: String,
    /// Stemmed form used for vocabulary lookups
    pub stem: String,
    /// Start byte offset in the original query
    pub start: usize,
    /// End byte offset in the original query
    pub end: usize,
}

impl Token {
    /// Creates a token, deriving its stem from `text`
    pub fn new(text: String, start: usize, end: usize) -> Self {
        let stem = stemmer::stem(&text);
        Self {
            text,
            stem,
            start,
            end,
        }
    }

    /// Integer value of a numeral token
    ///
    /// Accepts plain digits and a trailing `k` for thousands (`60k`).
    pub fn numeric_value(&self) -> Option<i64> {
        let (digits, multiplier) = match self.text.strip_suffix('k') {
            Some(digits) => (digits, 1000),
            None => (self.text.as_str(), 1),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        digits.parse::<i64>().ok()?.checked_mul(multiplier)
    }

    /// Whether this token is a numeral
    pub fn is_numeral(&self) -> bool {
        self.numeric_value().is_some()
    }
}

/// Ordered sequence of normalized tokens
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Whether any token has one of the given surface forms
    pub fn contains_text(&self, words: &[&str]) -> bool {
        self.tokens.iter().any(|t| words.contains(&t.text.as_str()))
    }

    /// Whether any token has the given stem
    pub fn contains_stem(&self, stem: &str) -> bool {
        self.tokens.iter().any(|t| t.stem == stem)
    }

    /// Position of the first contiguous run of tokens whose stems equal `stems`
    pub fn find_stem_sequence(&self, stems: &[String]) -> Option<usize> {
        if stems.is_empty() || stems.len() > self.tokens.len() {
            return None;
        }

        self.tokens
            .windows(stems.len())
            .position(|window| window.iter().zip(stems).all(|(t, s)| t.stem == *s))
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Lowercases, splits and stems query text
#[derive(Debug, Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenizes `text` into a non-empty token stream
    pub fn normalize(&self, text: &str) -> Result<TokenStream> {
        let stream = TokenStream::new(self.tokenize(text));
        if stream.is_empty() {
            return Err(Error::Validation("Search query required".to_string()));
        }
        Ok(stream)
    }

    /// Splits on non-alphanumeric boundaries; keeps `60,000` as a single numeral
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut start = 0;
        let mut prev: Option<char> = None;

        for (offset, c) in text.char_indices() {
            if c.is_alphanumeric() {
                if current.is_empty() {
                    start = offset;
                }
                current.extend(c.to_lowercase());
            } else if c == ','
                && prev.is_some_and(|p| p.is_ascii_digit())
                && is_digit_group(&text[offset + 1..])
                && current.bytes().all(|b| b.is_ascii_digit())
            {
                // digit group separator inside a numeral
            } else if !current.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut current), start, offset));
            }
            prev = Some(c);
        }

        if !current.is_empty() {
            tokens.push(Token::new(current, start, text.len()));
        }

        tokens
    }

    /// Normalizes a vocabulary phrase into its stem sequence
    pub fn stems(&self, phrase: &str) -> Vec<String> {
        self.tokenize(phrase).into_iter().map(|t| t.stem).collect()
    }
}

/// Whether `rest` starts with exactly three digits (a thousands group)
fn is_digit_group(rest: &str) -> bool {
    let bytes = rest.as_bytes();
    bytes.len() >= 3
        && bytes[..3].iter().all(u8::is_ascii_digit)
        && bytes.get(3).map_or(true, |b| !b.is_ascii_digit())
}
