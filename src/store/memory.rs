//! In-memory employee store

use super::{EmployeeStore, StoreError};
use crate::employee::EmployeeRecord;
use crate::nlp::FilterPredicate;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps records in a vector and evaluates predicates in process
///
/// Matching follows the same rules as the MongoDB translation: patterns are
/// case-insensitive substrings, set membership is case-insensitive and
/// intersects list fields.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeStore {
    records: Arc<RwLock<Vec<EmployeeRecord>>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn find(&self, predicate: &FilterPredicate) -> Result<Vec<EmployeeRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| predicate.matches(r))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn insert_many(&self, records: Vec<EmployeeRecord>) -> Result<usize, StoreError> {
        let mut stored = self.records.write().await;
        let inserted = records.len();
        let next_id = stored.len();
        stored.extend(records.into_iter().enumerate().map(|(i, mut record)| {
            if record.id.is_none() {
                record.id = Some(format!("mem-{}", next_id + i + 1));
            }
            record
        }));
        Ok(inserted)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::Field;
    use crate::nlp::{Constraint, ConstraintValue, PredicateBuilder};

    fn employee(name: &str, salary: f64) -> EmployeeRecord {
        EmployeeRecord {
            name: name.to_string(),
            salary,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let store = InMemoryEmployeeStore::new();
        let inserted = store
            .insert_many(vec![employee("a", 1.0), employee("b", 2.0)])
            .await
            .unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(store.count().await.unwrap(), 2);
        let all = store.find_all().await.unwrap();
        assert_eq!(all[1].id.as_deref(), Some("mem-2"));
    }

    #[tokio::test]
    async fn test_find_filters_by_predicate() {
        let store = InMemoryEmployeeStore::with_records(vec![
            employee("low", 40000.0),
            employee("high", 80000.0),
        ]);

        let mut builder = PredicateBuilder::new();
        builder
            .insert(
                "test",
                Field::Salary,
                Constraint::AtLeast(ConstraintValue::Number(60000)),
            )
            .unwrap();

        let found = store.find(&builder.build()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "high");
    }
}
