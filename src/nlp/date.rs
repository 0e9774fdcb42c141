//! Relative join-date resolution ("joined before 3 years")

use crate::employee::Field;
use chrono::{DateTime, Months, TimeZone, Utc};

use super::extractor::{FieldExtractor, QueryContext};
use super::normalizer::TokenStream;
use super::numeric::AnchorKind;
use super::predicate::{Constraint, ConstraintValue};

/// Surface words that trigger date resolution
const TRIGGER_WORDS: &[&str] = &["joined", "before"];

/// Whether the query talks about a relative join date
///
/// The `year` anchor only claims numerals when this holds.
pub fn is_triggered(tokens: &TokenStream) -> bool {
    (tokens.contains_text(TRIGGER_WORDS) || tokens.contains_stem("join"))
        && tokens.contains_stem("year")
}

/// Midnight UTC of the day `years` years before `now`
pub fn years_before(now: DateTime<Utc>, years: i64) -> Option<DateTime<Utc>> {
    let months = u32::try_from(years.checked_mul(12)?).ok()?;
    let day = now.date_naive().checked_sub_months(Months::new(months))?;
    Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
}

/// Produces `joinDate < threshold`
#[derive(Debug, Clone, Default)]
pub struct RelativeDateExtractor;

impl RelativeDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for RelativeDateExtractor {
    fn name(&self) -> &'static str {
        "relative-date:joinDate"
    }

    fn fields(&self) -> Vec<Field> {
        vec![Field::JoinDate]
    }

    fn extract(&self, ctx: &QueryContext<'_>) -> Vec<(Field, Constraint)> {
        if !is_triggered(ctx.tokens()) {
            return Vec::new();
        }

        ctx.binding(AnchorKind::Years)
            .and_then(|binding| years_before(ctx.now(), binding.value))
            .map(|threshold| {
                vec![(
                    Field::JoinDate,
                    Constraint::LessThan(ConstraintValue::Date(threshold)),
                )]
            })
            .unwrap_or_default()
    }
}
