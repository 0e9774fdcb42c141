//! Field extraction strategies
//!
//! Every stage that turns query text into constraints implements
//! [`FieldExtractor`]. Two strategies live here: closed-vocabulary matching
//! ([`VocabularyExtractor`]) and open-vocabulary positional capture
//! ([`FreeCaptureExtractor`]). Numeric and relative-date resolution live in
//! their own modules.

use crate::employee::Field;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

use super::lexicon::{CanonicalTerm, Cardinality, Category, Lexicon};
use super::normalizer::TokenStream;
use super::numeric::{AnchorKind, NumeralBinding};
use super::predicate::Constraint;

/// Everything an extractor may read about one query
#[derive(Debug)]
pub struct QueryContext<'a> {
    raw: &'a str,
    tokens: &'a TokenStream,
    now: DateTime<Utc>,
    bindings: HashMap<AnchorKind, NumeralBinding>,
}

impl<'a> QueryContext<'a> {
    pub fn new(
        raw: &'a str,
        tokens: &'a TokenStream,
        now: DateTime<Utc>,
        bindings: HashMap<AnchorKind, NumeralBinding>,
    ) -> Self {
        Self {
            raw,
            tokens,
            now,
            bindings,
        }
    }

    /// Original query text, casing preserved
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn tokens(&self) -> &'a TokenStream {
        self.tokens
    }

    /// Reference time for relative dates
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn binding(&self, anchor: AnchorKind) -> Option<&NumeralBinding> {
        self.bindings.get(&anchor)
    }
}

/// A stage producing constraints for the fields it owns
pub trait FieldExtractor: Send + Sync + std::fmt::Debug {
    /// Stage name used in logs and ownership errors
    fn name(&self) -> &'static str;

    /// Fields this extractor may constrain
    fn fields(&self) -> Vec<Field>;

    /// Constraints found in the query; empty when nothing applies
    fn extract(&self, ctx: &QueryContext<'_>) -> Vec<(Field, Constraint)>;
}

/// Closed-vocabulary matching for one lexicon category
#[derive(Debug, Clone)]
pub struct VocabularyExtractor {
    category: Category,
    terms: Vec<CanonicalTerm>,
}

impl VocabularyExtractor {
    pub fn new(lexicon: &Lexicon, category: Category) -> Self {
        Self {
            category,
            terms: lexicon.terms(category).to_vec(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl FieldExtractor for VocabularyExtractor {
    fn name(&self) -> &'static str {
        match self.category {
            Category::State => "lexicon:state",
            Category::Department => "lexicon:department",
            Category::Skill => "lexicon:skill",
            Category::Education => "lexicon:education",
        }
    }

    fn fields(&self) -> Vec<Field> {
        vec![self.category.field()]
    }

    fn extract(&self, ctx: &QueryContext<'_>) -> Vec<(Field, Constraint)> {
        let mut present = self.terms.iter().filter(|t| t.is_present_in(ctx.tokens()));
        let field = self.category.field();

        let constraint = match self.category.cardinality() {
            Cardinality::Single => present
                .next()
                .map(|term| Constraint::MatchesPattern(term.value.clone())),
            Cardinality::Multi => {
                let matched: BTreeSet<String> = present.map(|t| t.value.clone()).collect();
                (!matched.is_empty()).then_some(Constraint::OneOf(matched))
            }
        };

        constraint.map(|c| vec![(field, c)]).unwrap_or_default()
    }
}

/// Function words that are never a captured value
const CAPTURE_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "with", "in", "of", "for", "who", "that", "is", "are",
];

/// Open-vocabulary capture of the word following a trigger
#[derive(Debug, Clone)]
pub struct FreeCaptureExtractor {
    name: &'static str,
    field: Field,
    pattern: Regex,
}

impl FreeCaptureExtractor {
    /// Captures the word after `trigger`, allowing `of`, `is`, `:` or `=` in between
    pub fn new(name: &'static str, field: Field, trigger: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r"(?i)\b{}\b(?:\s*[:=]\s*|\s+(?:of|is)\s+|\s+)(\w+)",
            regex::escape(trigger)
        ))
        .map_err(|e| Error::Config(format!("Invalid capture trigger {:?}: {}", trigger, e)))?;

        Ok(Self {
            name,
            field,
            pattern,
        })
    }

    pub fn city() -> Result<Self> {
        Self::new("capture:city", Field::City, "city")
    }
}

impl FieldExtractor for FreeCaptureExtractor {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fields(&self) -> Vec<Field> {
        vec![self.field]
    }

    fn extract(&self, ctx: &QueryContext<'_>) -> Vec<(Field, Constraint)> {
        self.pattern
            .captures(ctx.raw())
            .and_then(|caps| caps.get(1))
            .filter(|m| !CAPTURE_STOPWORDS.contains(&m.as_str().to_lowercase().as_str()))
            .map(|m| vec![(self.field, Constraint::MatchesPattern(m.as_str().to_string()))])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::normalizer::Normalizer;

    fn extract(extractor: &dyn FieldExtractor, query: &str) -> Vec<(Field, Constraint)> {
        let tokens = Normalizer::new().normalize(query).unwrap();
        let ctx = QueryContext::new(query, &tokens, Utc::now(), HashMap::new());
        extractor.extract(&ctx)
    }

    fn lexicon() -> Lexicon {
        Lexicon::new(&Normalizer::new())
    }

    #[test]
    fn test_single_valued_first_in_vocabulary_order() {
        let extractor = VocabularyExtractor::new(&lexicon(), Category::Department);
        let result = extract(&extractor, "sales or engineering people");
        assert_eq!(
            result,
            vec![(
                Field::Department,
                Constraint::MatchesPattern("engineering".to_string())
            )]
        );
    }

    #[test]
    fn test_multi_valued_collects_all() {
        let extractor = VocabularyExtractor::new(&lexicon(), Category::Skill);
        let result = extract(&extractor, "Python and React developers");
        let expected: BTreeSet<String> = ["python", "react"].iter().map(|s| s.to_string()).collect();
        assert_eq!(result, vec![(Field::SkillSet, Constraint::OneOf(expected))]);
    }

    #[test]
    fn test_absent_category_is_unconstrained() {
        let extractor = VocabularyExtractor::new(&lexicon(), Category::Education);
        assert!(extract(&extractor, "salary above 60000").is_empty());
    }

    #[test]
    fn test_city_capture_preserves_case() {
        let extractor = FreeCaptureExtractor::city().unwrap();
        assert_eq!(
            extract(&extractor, "employees in CITY Miami"),
            vec![(Field::City, Constraint::MatchesPattern("Miami".to_string()))]
        );
        assert_eq!(
            extract(&extractor, "city of Houston with MBA"),
            vec![(Field::City, Constraint::MatchesPattern("Houston".to_string()))]
        );
        assert_eq!(
            extract(&extractor, "city: Austin"),
            vec![(Field::City, Constraint::MatchesPattern("Austin".to_string()))]
        );
    }

    #[test]
    fn test_city_trigger_absent_or_dangling() {
        let extractor = FreeCaptureExtractor::city().unwrap();
        assert!(extract(&extractor, "employees in Miami").is_empty());
        assert!(extract(&extractor, "New York City").is_empty());
        assert!(extract(&extractor, "velocity 12").is_empty());
    }

    #[test]
    fn test_city_capture_skips_function_words() {
        let extractor = FreeCaptureExtractor::city().unwrap();
        assert!(extract(&extractor, "employees in New York City with an MBA").is_empty());
        assert!(extract(&extractor, "city and state").is_empty());
        assert!(extract(&extractor, "which city is").is_empty());
    }
}
