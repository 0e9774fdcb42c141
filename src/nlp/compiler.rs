//! Free-text to filter-predicate compiler

use crate::employee::Field;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

use super::date::{self, RelativeDateExtractor};
use super::extractor::{FieldExtractor, FreeCaptureExtractor, QueryContext, VocabularyExtractor};
use super::lexicon::{Category, Lexicon};
use super::normalizer::Normalizer;
use super::numeric::{AnchorKind, NumeralBinder, NumericExtractor, DEFAULT_NUMERAL_WINDOW};
use super::predicate::{FilterPredicate, PredicateBuilder};
use super::safety::SafetyGate;

/// Tunables for [`QueryCompiler`]
#[derive(Debug, Clone)]
pub struct CompilerSettings {
    /// Tokens searched around a numeric anchor
    pub numeral_window: usize,
    /// Terms blocked in addition to the defaults
    pub blocked_terms: Vec<String>,
    /// Terms appended to the built-in vocabularies
    pub extra_terms: HashMap<Category, Vec<String>>,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            numeral_window: DEFAULT_NUMERAL_WINDOW,
            blocked_terms: Vec::new(),
            extra_terms: HashMap::new(),
        }
    }
}

/// Compiles natural-language queries into [`FilterPredicate`]s
///
/// Stateless per call: the lexicon, blocked terms and extractors are built
/// once and only read afterwards, so one compiler can serve any number of
/// concurrent requests.
#[derive(Debug)]
pub struct QueryCompiler {
    normalizer: Normalizer,
    gate: SafetyGate,
    binder: NumeralBinder,
    extractors: Vec<Box<dyn FieldExtractor>>,
}

impl QueryCompiler {
    pub fn new(settings: &CompilerSettings) -> Result<Self> {
        if settings.numeral_window == 0 {
            return Err(Error::Config("numeral_window must be at least 1".to_string()));
        }

        let normalizer = Normalizer::new();
        let mut lexicon = Lexicon::new(&normalizer);
        for (category, terms) in &settings.extra_terms {
            lexicon.extend(&normalizer, *category, terms);
        }

        let mut extractors: Vec<Box<dyn FieldExtractor>> = Category::ALL
            .into_iter()
            .map(|category| {
                Box::new(VocabularyExtractor::new(&lexicon, category)) as Box<dyn FieldExtractor>
            })
            .collect();
        extractors.push(Box::new(FreeCaptureExtractor::city()?));
        extractors.push(Box::new(NumericExtractor::salary()));
        extractors.push(Box::new(NumericExtractor::age()));
        extractors.push(Box::new(RelativeDateExtractor::new()));

        Self::with_extractors(
            normalizer,
            SafetyGate::new(&settings.blocked_terms),
            NumeralBinder::new(settings.numeral_window),
            extractors,
        )
    }

    /// Assembles a compiler from explicit parts
    ///
    /// Fails when two extractors claim the same field.
    pub fn with_extractors(
        normalizer: Normalizer,
        gate: SafetyGate,
        binder: NumeralBinder,
        extractors: Vec<Box<dyn FieldExtractor>>,
    ) -> Result<Self> {
        let mut owners: HashMap<Field, &'static str> = HashMap::new();
        for extractor in &extractors {
            for field in extractor.fields() {
                if let Some(owner) = owners.insert(field, extractor.name()) {
                    return Err(Error::Config(format!(
                        "field {} is owned by both {} and {}",
                        field,
                        owner,
                        extractor.name()
                    )));
                }
            }
        }

        Ok(Self {
            normalizer,
            gate,
            binder,
            extractors,
        })
    }

    /// Compiles `query` relative to the current time
    pub fn compile(&self, query: &str) -> Result<FilterPredicate> {
        self.compile_at(query, Utc::now())
    }

    /// Compiles `query` with `now` as the reference for relative dates
    pub fn compile_at(&self, query: &str, now: DateTime<Utc>) -> Result<FilterPredicate> {
        if query.trim().is_empty() {
            return Err(Error::Validation("Search query required".to_string()));
        }

        let tokens = self.normalizer.normalize(query)?;
        self.gate.check(&tokens)?;

        let mut anchors = vec![AnchorKind::Salary, AnchorKind::Age];
        if date::is_triggered(&tokens) {
            anchors.push(AnchorKind::Years);
        }
        let bindings = self.binder.bind(&tokens, &anchors);
        let ctx = QueryContext::new(query, &tokens, now, bindings);

        let mut builder = PredicateBuilder::new();
        for extractor in &self.extractors {
            for (field, constraint) in extractor.extract(&ctx) {
                debug!(stage = extractor.name(), %field, ?constraint, "constraint extracted");
                builder.insert(extractor.name(), field, constraint)?;
            }
        }

        let predicate = builder.build();
        debug!(query, constraints = predicate.len(), "query compiled");
        Ok(predicate)
    }
}
