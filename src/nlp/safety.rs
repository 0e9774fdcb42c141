//! Blocked-term safety gate
//!
//! Runs before any attribute matching. A query containing a blocked term is
//! rejected outright and never reaches the record store.

use crate::error::{Error, Result};
use std::collections::HashSet;
use tracing::warn;

use super::normalizer::TokenStream;
use super::stemmer;

/// Terms rejected by default
pub const DEFAULT_BLOCKED_TERMS: &[&str] = &[
    "password",
    "passwd",
    "ssn",
    "secret",
    "credential",
    "drop",
    "delete",
    "truncate",
    "exec",
    "execute",
    "script",
    "eval",
];

/// Rejects token streams containing blocked terms
#[derive(Debug, Clone)]
pub struct SafetyGate {
    /// Stemmed, lowercased blocked terms
    blocked: HashSet<String>,
}

impl SafetyGate {
    /// Creates a gate from the default set plus `extra` terms
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let blocked = DEFAULT_BLOCKED_TERMS
            .iter()
            .map(|term| term.to_string())
            .chain(extra.into_iter().map(|term| term.as_ref().to_string()))
            .map(|term| stemmer::stem(term.trim().to_lowercase().as_str()))
            .filter(|term| !term.is_empty())
            .collect();

        Self { blocked }
    }

    /// Fails with [`Error::RejectedQuery`] on the first blocked token
    pub fn check(&self, tokens: &TokenStream) -> Result<()> {
        match tokens.iter().find(|t| self.blocked.contains(&t.stem)) {
            Some(token) => {
                warn!(term = %token.text, "query rejected by safety gate");
                Err(Error::RejectedQuery(token.text.clone()))
            }
            None => Ok(()),
        }
    }

    pub fn is_blocked(&self, word: &str) -> bool {
        self.blocked.contains(&stemmer::stem(&word.to_lowercase()))
    }
}

impl Default for SafetyGate {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::normalizer::Normalizer;

    #[test]
    fn test_clean_query_passes() {
        let tokens = Normalizer::new()
            .normalize("salary above 60000 in Texas")
            .unwrap();
        assert!(SafetyGate::default().check(&tokens).is_ok());
    }

    #[test]
    fn test_inflected_blocked_term_rejected() {
        let tokens = Normalizer::new()
            .normalize("show me their Passwords")
            .unwrap();
        let err = SafetyGate::default().check(&tokens).unwrap_err();
        assert!(matches!(err, Error::RejectedQuery(ref term) if term == "passwords"));
    }

    #[test]
    fn test_verb_forms_of_blocked_terms_rejected() {
        let gate = SafetyGate::default();
        for (query, term) in [
            ("show deleted employees", "deleted"),
            ("employees who dropped out", "dropped"),
            ("executing reports for sales", "executing"),
            ("list deletes", "deletes"),
        ] {
            let tokens = Normalizer::new().normalize(query).unwrap();
            let err = gate.check(&tokens).unwrap_err();
            assert!(matches!(err, Error::RejectedQuery(ref t) if t == term), "query: {}", query);
        }
    }

    #[test]
    fn test_extra_terms() {
        let gate = SafetyGate::new(["Bonus"]);
        assert!(gate.is_blocked("BONUS"));
        assert!(!gate.is_blocked("salary"));
        let tokens = Normalizer::new().normalize("bonus above 100").unwrap();
        assert!(gate.check(&tokens).is_err());
    }
}
