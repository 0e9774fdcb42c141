//! Category vocabularies
//!
//! The lexicon is a closed-world table from attribute category to an ordered
//! list of canonical terms. Adding a state, department, skill or degree is a
//! change to the tables below, not to matching code.

use crate::employee::Field;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::normalizer::{Normalizer, TokenStream};

/// Canonical term with its aliases, as written in the tables
type TermEntry = (&'static str, &'static [&'static str]);

const STATES: &[TermEntry] = &[
    ("california", &[]),
    ("texas", &[]),
    ("new york", &["ny"]),
    ("florida", &[]),
    ("washington", &[]),
    ("illinois", &[]),
];

const DEPARTMENTS: &[TermEntry] = &[
    ("it", &["information technology"]),
    ("hr", &["human resources"]),
    ("engineering", &[]),
    ("marketing", &[]),
    ("sales", &[]),
];

const SKILLS: &[TermEntry] = &[
    ("javascript", &["js"]),
    ("python", &[]),
    ("react", &[]),
    ("node.js", &["nodejs"]),
    ("sql", &[]),
    ("java", &[]),
    ("typescript", &[]),
    ("docker", &[]),
];

const EDUCATION: &[TermEntry] = &[
    ("mba", &[]),
    ("b.tech", &["btech"]),
    ("m.tech", &["mtech"]),
    ("b.sc", &["bsc"]),
];

/// How many canonical terms of a category a query may select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// First match in vocabulary order wins
    Single,
    /// Every present term is collected
    Multi,
}

/// Enumerable attribute categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    State,
    Department,
    Skill,
    Education,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::State,
        Category::Department,
        Category::Skill,
        Category::Education,
    ];

    /// Schema field constrained by this category
    pub fn field(&self) -> Field {
        match self {
            Category::State => Field::State,
            Category::Department => Field::Department,
            Category::Skill => Field::SkillSet,
            Category::Education => Field::Education,
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            Category::Skill => Cardinality::Multi,
            _ => Cardinality::Single,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::State => "state",
            Category::Department => "department",
            Category::Skill => "skill",
            Category::Education => "education",
        }
    }

    fn default_entries(&self) -> &'static [TermEntry] {
        match self {
            Category::State => STATES,
            Category::Department => DEPARTMENTS,
            Category::Skill => SKILLS,
            Category::Education => EDUCATION,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Config(format!("Unknown lexicon category: {}", s)))
    }
}

/// A recognized value of a category, pre-stemmed for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTerm {
    /// Value emitted into constraints
    pub value: String,
    /// Stem sequences of the term and its aliases
    forms: Vec<Vec<String>>,
}

impl CanonicalTerm {
    /// Builds a term, stemming it and its aliases with `normalizer`
    pub fn new(normalizer: &Normalizer, value: &str, aliases: &[&str]) -> Self {
        let value = value.trim().to_lowercase();
        let forms = std::iter::once(value.as_str())
            .chain(aliases.iter().copied())
            .map(|form| normalizer.stems(form))
            .filter(|stems| !stems.is_empty())
            .collect();

        Self { value, forms }
    }

    /// Whether the term or one of its aliases occurs in `tokens`
    pub fn is_present_in(&self, tokens: &TokenStream) -> bool {
        self.forms
            .iter()
            .any(|stems| tokens.find_stem_sequence(stems).is_some())
    }
}

/// Category name → ordered canonical terms
#[derive(Debug, Clone)]
pub struct Lexicon {
    categories: HashMap<Category, Vec<CanonicalTerm>>,
}

impl Lexicon {
    /// Builds the built-in vocabularies
    pub fn new(normalizer: &Normalizer) -> Self {
        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let terms = category
                    .default_entries()
                    .iter()
                    .map(|(value, aliases)| CanonicalTerm::new(normalizer, value, aliases))
                    .collect();
                (category, terms)
            })
            .collect();

        Self { categories }
    }

    /// Appends terms to a category, after the built-in ones
    ///
    /// Terms already present in the category are ignored.
    pub fn extend<I, S>(&mut self, normalizer: &Normalizer, category: Category, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.categories.entry(category).or_default();
        for term in terms {
            let term = CanonicalTerm::new(normalizer, term.as_ref(), &[]);
            if term.forms.is_empty() || entry.iter().any(|t| t.value == term.value) {
                continue;
            }
            entry.push(term);
        }
    }

    /// Terms of a category in vocabulary order
    pub fn terms(&self, category: Category) -> &[CanonicalTerm] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
