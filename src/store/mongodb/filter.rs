//! FilterPredicate to MongoDB query document translation

use crate::nlp::{Constraint, ConstraintValue, FilterPredicate};
use mongodb::bson::{doc, Bson, DateTime as BsonDateTime, Document, Regex};

/// Builds the query document for `predicate`; an empty predicate yields `{}`
pub fn to_filter_document(predicate: &FilterPredicate) -> Document {
    let mut filter = Document::new();
    for (field, constraint) in predicate.iter() {
        filter.insert(field.as_str(), constraint_to_bson(constraint));
    }
    filter
}

fn constraint_to_bson(constraint: &Constraint) -> Bson {
    match constraint {
        Constraint::Equals(value) => value_to_bson(value),
        Constraint::AtLeast(value) => Bson::Document(doc! { "$gte": value_to_bson(value) }),
        Constraint::AtMost(value) => Bson::Document(doc! { "$lte": value_to_bson(value) }),
        Constraint::LessThan(value) => Bson::Document(doc! { "$lt": value_to_bson(value) }),
        Constraint::MatchesPattern(pattern) => Bson::Document(doc! {
            "$regex": regex::escape(pattern),
            "$options": "i",
        }),
        Constraint::OneOf(values) => {
            let alternatives: Vec<Bson> = values
                .iter()
                .map(|v| {
                    Bson::RegularExpression(Regex {
                        pattern: format!("^{}$", regex::escape(v)),
                        options: "i".to_string(),
                    })
                })
                .collect();
            Bson::Document(doc! { "$in": alternatives })
        }
    }
}

fn value_to_bson(value: &ConstraintValue) -> Bson {
    match value {
        ConstraintValue::Number(n) => Bson::Int64(*n),
        ConstraintValue::Date(d) => Bson::DateTime(BsonDateTime::from_millis(d.timestamp_millis())),
        ConstraintValue::Text(s) => Bson::String(s.clone()),
    }
}
