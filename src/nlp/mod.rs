//! Natural-language query compilation
//!
//! Turns a short free-text query ("employees with salary above 60000 in
//! California with an MBA") into a [`FilterPredicate`] over the employee
//! schema. The pipeline runs left to right and keeps no state between calls:
//!
//! 1. [`normalizer`] lowercases, tokenizes and stems the text
//! 2. [`safety`] rejects queries containing blocked terms
//! 3. [`extractor`] matches lexicon categories and captures free-text fields
//! 4. [`numeric`] binds salary and age to their own numerals
//! 5. [`date`] resolves relative join dates
//! 6. [`predicate`] assembles the per-field constraints

pub mod compiler;
pub mod date;
pub mod extractor;
pub mod lexicon;
pub mod normalizer;
pub mod numeric;
pub mod predicate;
pub mod safety;
pub mod stemmer;

pub use compiler::{CompilerSettings, QueryCompiler};
pub use extractor::{FieldExtractor, FreeCaptureExtractor, QueryContext, VocabularyExtractor};
pub use lexicon::{CanonicalTerm, Cardinality, Category, Lexicon};
pub use normalizer::{Normalizer, Token, TokenStream};
pub use numeric::{AnchorKind, Comparison, NumeralBinder, NumericExtractor};
pub use predicate::{Constraint, ConstraintValue, FilterPredicate, PredicateBuilder};
pub use safety::SafetyGate;
