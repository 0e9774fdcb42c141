//! Numeric attribute resolution
//!
//! Every numeric anchor (`salary`, `age`, `years`) binds its own numeral:
//! anchors are visited in textual order and each claims the nearest unclaimed
//! numeral inside a small token window, never crossing another anchor. A
//! numeral claimed by one anchor is invisible to the others, so
//! "salary above 50000 and age below 30" cannot bind both fields to 50000.
//!
//! The comparison direction is a property of the whole query, not of one
//! binding: upward keywords anywhere make every numeric field a lower bound.

use crate::employee::Field;
use std::collections::HashMap;

use super::extractor::{FieldExtractor, QueryContext};
use super::normalizer::TokenStream;
use super::predicate::{Constraint, ConstraintValue};
use super::stemmer;

/// Default number of tokens searched on each side of an anchor
pub const DEFAULT_NUMERAL_WINDOW: usize = 4;

/// Keywords meaning "at least"
pub const UPWARD_KEYWORDS: &[&str] = &["more", "above", "greater", "higher", "older"];

/// Keywords meaning "at most"
pub const DOWNWARD_KEYWORDS: &[&str] = &["less", "below", "lower", "younger"];

/// Words that own a numeral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    Salary,
    Age,
    Years,
}

impl AnchorKind {
    /// Surface words, stemmed before comparison
    fn words(&self) -> &'static [&'static str] {
        match self {
            AnchorKind::Salary => &["salary", "pay", "income"],
            AnchorKind::Age => &["age", "aged"],
            AnchorKind::Years => &["year"],
        }
    }

    /// Side searched first: "salary 50000" but "3 years"
    fn looks_forward_first(&self) -> bool {
        !matches!(self, AnchorKind::Years)
    }
}

/// Comparison direction for a numeric constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Exact,
    AtLeast,
    AtMost,
}

impl Comparison {
    pub fn constraint(&self, value: i64) -> Constraint {
        let value = ConstraintValue::Number(value);
        match self {
            Comparison::Exact => Constraint::Equals(value),
            Comparison::AtLeast => Constraint::AtLeast(value),
            Comparison::AtMost => Constraint::AtMost(value),
        }
    }

    /// Upward keywords are checked first; downward only when none is present
    fn from_tokens<'a>(mut words: impl Iterator<Item = &'a str> + Clone) -> Option<Self> {
        if words.clone().any(|w| UPWARD_KEYWORDS.contains(&w)) {
            Some(Comparison::AtLeast)
        } else if words.any(|w| DOWNWARD_KEYWORDS.contains(&w)) {
            Some(Comparison::AtMost)
        } else {
            None
        }
    }
}

/// A numeral bound to an anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumeralBinding {
    pub anchor: usize,
    pub numeral: usize,
    pub value: i64,
}

/// Binds anchors to numerals for one token stream
#[derive(Debug, Clone)]
pub struct NumeralBinder {
    window: usize,
    anchors: Vec<(AnchorKind, Vec<String>)>,
}

impl NumeralBinder {
    pub fn new(window: usize) -> Self {
        let anchors = [AnchorKind::Salary, AnchorKind::Age, AnchorKind::Years]
            .into_iter()
            .map(|kind| {
                let stems = kind.words().iter().map(|w| stemmer::stem(w)).collect();
                (kind, stems)
            })
            .collect();

        Self {
            window: window.max(1),
            anchors,
        }
    }

    fn anchor_kind(&self, stem: &str, active: &[AnchorKind]) -> Option<AnchorKind> {
        self.anchors
            .iter()
            .find(|(kind, stems)| active.contains(kind) && stems.iter().any(|s| s == stem))
            .map(|(kind, _)| *kind)
    }

    /// Binds each active anchor kind to at most one numeral
    pub fn bind(&self, tokens: &TokenStream, active: &[AnchorKind]) -> HashMap<AnchorKind, NumeralBinding> {
        let anchor_positions: Vec<(usize, AnchorKind)> = tokens
            .iter()
            .enumerate()
            .filter_map(|(i, t)| self.anchor_kind(&t.stem, active).map(|kind| (i, kind)))
            .collect();
        let is_anchor = |i: usize| anchor_positions.iter().any(|(p, _)| *p == i);

        let mut claimed: Vec<usize> = Vec::new();
        let mut bindings = HashMap::new();

        for &(anchor, kind) in &anchor_positions {
            if bindings.contains_key(&kind) {
                continue;
            }

            let forward = (anchor + 1..tokens.len().min(anchor + 1 + self.window)).collect::<Vec<_>>();
            let backward = (anchor.saturating_sub(self.window)..anchor).rev().collect::<Vec<_>>();
            let (first, second) = if kind.looks_forward_first() {
                (forward, backward)
            } else {
                (backward, forward)
            };

            let found = [first, second].into_iter().find_map(|side| {
                side.into_iter()
                    .take_while(|&i| !is_anchor(i))
                    .find(|i| !claimed.contains(i) && tokens.get(*i).is_some_and(|t| t.is_numeral()))
            });

            if let Some(numeral) = found {
                if let Some(value) = tokens.get(numeral).and_then(|t| t.numeric_value()) {
                    claimed.push(numeral);
                    bindings.insert(
                        kind,
                        NumeralBinding {
                            anchor,
                            numeral,
                            value,
                        },
                    );
                }
            }
        }

        bindings
    }
}

impl Default for NumeralBinder {
    fn default() -> Self {
        Self::new(DEFAULT_NUMERAL_WINDOW)
    }
}

/// Resolves the comparison direction from the whole token stream
///
/// Direction is not windowed: every numeric field of a query shares it.
/// Upward keywords are checked before downward ones; with neither the
/// comparison is exact.
pub fn resolve_direction(tokens: &TokenStream) -> Comparison {
    Comparison::from_tokens(tokens.iter().map(|t| t.text.as_str())).unwrap_or(Comparison::Exact)
}

/// Extracts salary or age constraints
#[derive(Debug, Clone)]
pub struct NumericExtractor {
    field: Field,
    anchor: AnchorKind,
}

impl NumericExtractor {
    pub fn new(field: Field, anchor: AnchorKind) -> Self {
        Self { field, anchor }
    }

    pub fn salary() -> Self {
        Self::new(Field::Salary, AnchorKind::Salary)
    }

    pub fn age() -> Self {
        Self::new(Field::Age, AnchorKind::Age)
    }
}

impl FieldExtractor for NumericExtractor {
    fn name(&self) -> &'static str {
        match self.anchor {
            AnchorKind::Salary => "numeric:salary",
            AnchorKind::Age => "numeric:age",
            AnchorKind::Years => "numeric:years",
        }
    }

    fn fields(&self) -> Vec<Field> {
        vec![self.field]
    }

    fn extract(&self, ctx: &QueryContext<'_>) -> Vec<(Field, Constraint)> {
        let Some(binding) = ctx.binding(self.anchor) else {
            return Vec::new();
        };

        let direction = resolve_direction(ctx.tokens());

        vec![(self.field, direction.constraint(binding.value))]
    }
}
